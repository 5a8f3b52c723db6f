//! Resolve parties, their inputs and the outputs they observe.

use std::collections::{HashMap, HashSet};

use crate::errors::EmpError;
use crate::io::{CircuitSource, IoDescriptor, IoType};

/// Party names and the ordering of every named input and output.
#[derive(Clone, Debug)]
pub struct Resolution {
    party_names: Vec<String>,
    /// Input names of each party, sorted by original address. Aligned with `party_names`.
    party_inputs: Vec<Vec<String>>,
    /// Distinct outputs of all parties, sorted by original address.
    outputs: Vec<String>,
    input_info: HashMap<String, IoDescriptor>,
    output_info: HashMap<String, IoDescriptor>,
}

fn index_by_name(descriptors: &[IoDescriptor]) -> HashMap<String, IoDescriptor> {
    let mut map = HashMap::with_capacity(descriptors.len());
    for d in descriptors {
        map.entry(d.name.clone()).or_insert_with(|| d.clone());
    }
    map
}

fn check_width(d: &IoDescriptor) -> Result<(), EmpError> {
    let ok = match d.ty {
        IoType::Number => d.width >= 1,
        IoType::Bool => d.width == 1,
    };
    if ok {
        Ok(())
    } else {
        Err(EmpError::InvalidWidth {
            name: d.name.clone(),
            width: d.width,
            ty: d.ty,
        })
    }
}

impl Resolution {
    pub fn new(source: &CircuitSource) -> Result<Self, EmpError> {
        let input_info = index_by_name(&source.info.inputs);
        let output_info = index_by_name(&source.info.outputs);

        let mut party_names = Vec::with_capacity(source.mpc_settings.len());
        let mut seen = HashSet::new();
        for (i, setting) in source.mpc_settings.iter().enumerate() {
            let name = setting
                .name
                .clone()
                .unwrap_or_else(|| format!("party{}", i));
            if !seen.insert(name.clone()) {
                return Err(EmpError::DuplicatePartyName(name));
            }
            party_names.push(name);
        }

        let mut claimed = HashSet::new();
        let mut party_inputs = Vec::with_capacity(party_names.len());
        for setting in source.mpc_settings.iter() {
            let mut inputs = Vec::with_capacity(setting.inputs.len());
            for name in setting.inputs.iter() {
                let d = input_info
                    .get(name)
                    .ok_or_else(|| EmpError::MissingInput(name.clone()))?;
                check_width(d)?;
                if !claimed.insert(name.as_str()) {
                    return Err(EmpError::DuplicateInput(name.clone()));
                }
                inputs.push((d.address, name.clone()));
            }
            inputs.sort_by_key(|(address, _)| *address);
            party_inputs.push(inputs.into_iter().map(|(_, name)| name).collect());
        }

        let mut outputs = Vec::new();
        let mut seen = HashSet::new();
        for name in source.mpc_settings.iter().flat_map(|s| s.outputs.iter()) {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let d = output_info
                .get(name)
                .ok_or_else(|| EmpError::MissingOutput(name.clone()))?;
            check_width(d)?;
            outputs.push((d.address, name.clone()));
        }
        if outputs.is_empty() {
            return Err(EmpError::NoOutputs);
        }
        outputs.sort_by_key(|(address, _)| *address);
        let outputs = outputs.into_iter().map(|(_, name)| name).collect();

        Ok(Self {
            party_names,
            party_inputs,
            outputs,
            input_info,
            output_info,
        })
    }

    pub fn party_names(&self) -> &[String] {
        &self.party_names
    }

    pub fn has_party_name(&self, name: &str) -> bool {
        self.party_names.iter().any(|p| p == name)
    }

    pub fn party_name_from_index(&self, index: usize) -> Result<&str, EmpError> {
        self.party_names
            .get(index)
            .map(String::as_str)
            .ok_or(EmpError::UnknownPartyIndex(index))
    }

    pub fn party_index_from_name(&self, name: &str) -> Result<usize, EmpError> {
        self.party_names
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| EmpError::UnknownParty(name.to_string()))
    }

    /// Input names owned by `party`, in address order.
    pub fn party_inputs(&self, party: &str) -> Result<&[String], EmpError> {
        let index = self.party_index_from_name(party)?;
        Ok(&self.party_inputs[index])
    }

    /// Every input descriptor in the order the engine lays input bits out:
    /// party by party, each party's inputs contiguous and address ascending.
    pub fn input_order(&self) -> impl Iterator<Item = &IoDescriptor> + '_ {
        self.party_inputs
            .iter()
            .flatten()
            .map(move |name| &self.input_info[name])
    }

    /// Output names in address order.
    pub fn output_names(&self) -> &[String] {
        &self.outputs
    }

    pub fn outputs(&self) -> impl Iterator<Item = &IoDescriptor> + '_ {
        self.outputs.iter().map(move |name| &self.output_info[name])
    }

    pub fn input_info(&self, name: &str) -> Result<&IoDescriptor, EmpError> {
        self.input_info
            .get(name)
            .ok_or_else(|| EmpError::MissingInput(name.to_string()))
    }

    pub fn output_info(&self, name: &str) -> Result<&IoDescriptor, EmpError> {
        self.output_info
            .get(name)
            .ok_or_else(|| EmpError::MissingOutput(name.to_string()))
    }

    /// Original address of the lowest output. Gate results at or above it
    /// belong to the output region.
    pub fn first_output_address(&self) -> usize {
        self.outputs().map(|d| d.address).min().unwrap_or(0)
    }

    pub fn input_bits_per_party(&self) -> Vec<usize> {
        self.party_inputs
            .iter()
            .map(|inputs| inputs.iter().map(|n| self.input_info[n].width).sum())
            .collect()
    }
}
