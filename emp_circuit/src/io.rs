//! Named, typed inputs and outputs of a multi-party circuit.

use std::{collections::BTreeMap, fmt, fs};

use anyhow::Context;
use circuit::Circuit;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::EmpError;

/// How the bits of a wire group are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoType {
    /// Unsigned integer, least significant bit first.
    Number,
    /// A single bit.
    Bool,
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoType::Number => write!(f, "number"),
            IoType::Bool => write!(f, "bool"),
        }
    }
}

/// A named wire group starting at `address` in the original circuit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoDescriptor {
    pub name: String,
    pub address: usize,
    pub width: usize,
    #[serde(rename = "type")]
    pub ty: IoType,
}

impl IoDescriptor {
    pub fn number(name: impl Into<String>, address: usize, width: usize) -> Self {
        Self {
            name: name.into(),
            address,
            width,
            ty: IoType::Number,
        }
    }

    pub fn boolean(name: impl Into<String>, address: usize) -> Self {
        Self {
            name: name.into(),
            address,
            width: 1,
            ty: IoType::Bool,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitInfo {
    pub inputs: Vec<IoDescriptor>,
    pub outputs: Vec<IoDescriptor>,
}

/// One participant: the inputs it provides and the outputs it learns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpcSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl MpcSetting {
    pub fn new(name: Option<&str>, inputs: &[&str], outputs: &[&str]) -> Self {
        Self {
            name: name.map(str::to_string),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// A circuit as produced by the compiler, before renumbering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitSource {
    pub bristol: Circuit,
    pub info: CircuitInfo,
    pub mpc_settings: Vec<MpcSetting>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SourceDocument {
    bristol: String,
    info: CircuitInfo,
    mpc_settings: Vec<MpcSetting>,
}

impl CircuitSource {
    pub fn new(bristol: Circuit, info: CircuitInfo, mpc_settings: Vec<MpcSetting>) -> Self {
        Self {
            bristol,
            info,
            mpc_settings,
        }
    }

    /// Read `{ "bristol": "...", "info": {...}, "mpcSettings": [...] }`.
    pub fn from_json(text: &str) -> Result<Self, EmpError> {
        let doc: SourceDocument = serde_json::from_str(text)?;
        let bristol = Circuit::parse(&doc.bristol)?;
        Ok(Self::new(bristol, doc.info, doc.mpc_settings))
    }

    pub fn load(path: &str) -> Result<Self, EmpError> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read circuit source from {}", path))?;
        Self::from_json(&text)
    }
}

/// A value crossing the party boundary.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawValue")]
pub enum IoValue {
    Number(BigUint),
    Bool(bool),
}

/// Named values, keyed by input or output name.
pub type Values = BTreeMap<String, IoValue>;

impl IoValue {
    pub fn ty(&self) -> IoType {
        match self {
            IoValue::Number(_) => IoType::Number,
            IoValue::Bool(_) => IoType::Bool,
        }
    }

    pub fn to_u64(&self) -> Option<u64> {
        match self {
            IoValue::Number(n) => n.to_u64(),
            IoValue::Bool(_) => None,
        }
    }
}

impl From<u64> for IoValue {
    fn from(v: u64) -> Self {
        IoValue::Number(BigUint::from(v))
    }
}

impl From<u32> for IoValue {
    fn from(v: u32) -> Self {
        IoValue::Number(BigUint::from(v))
    }
}

impl From<BigUint> for IoValue {
    fn from(v: BigUint) -> Self {
        IoValue::Number(v)
    }
}

impl From<bool> for IoValue {
    fn from(v: bool) -> Self {
        IoValue::Bool(v)
    }
}

impl fmt::Display for IoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoValue::Number(n) => write!(f, "{}", n),
            IoValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Numbers above `u64::MAX` travel as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl TryFrom<RawValue> for IoValue {
    type Error = String;

    fn try_from(raw: RawValue) -> Result<Self, Self::Error> {
        match raw {
            RawValue::Bool(b) => Ok(IoValue::Bool(b)),
            RawValue::Number(n) => Ok(IoValue::from(n)),
            RawValue::Text(s) => s
                .parse::<BigUint>()
                .map(IoValue::Number)
                .map_err(|_| format!("{} is not an unsigned integer", s)),
        }
    }
}

impl Serialize for IoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IoValue::Bool(b) => serializer.serialize_bool(*b),
            IoValue::Number(n) => match n.to_u64() {
                Some(v) => serializer.serialize_u64(v),
                None => serializer.serialize_str(&n.to_string()),
            },
        }
    }
}
