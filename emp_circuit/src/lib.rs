//! Prepare named multi-party boolean circuits for a garbling engine.
//!
//! [`EmpCircuit`] renumbers the wires of a [`CircuitSource`] so that every
//! party's input bits form one contiguous block, in party order, and the
//! output bits form one contiguous block at the end of the address space. It
//! also converts named values to and from the bits the engine exchanges, and
//! evaluates the renumbered circuit in plaintext.

pub mod codec;
pub mod emit;
pub mod errors;
pub mod gate;
pub mod io;
pub mod remap;
pub mod resolver;
pub mod settings;

use std::collections::{BTreeMap, HashMap};

pub use emit::SimplifiedBristol;
pub use errors::EmpError;
pub use gate::{EmpGate, Metadata};
pub use io::{CircuitInfo, CircuitSource, IoDescriptor, IoType, IoValue, MpcSetting, Values};
pub use remap::Remapping;
pub use resolver::Resolution;
pub use settings::check_settings;

/// A circuit renumbered for the engine, with the bookkeeping needed to encode
/// inputs and decode outputs.
#[derive(Clone, Debug)]
pub struct EmpCircuit {
    resolution: Resolution,
    remapping: Remapping,
    metadata: Metadata,
}

impl EmpCircuit {
    pub fn new(source: &CircuitSource) -> Result<Self, EmpError> {
        let span = tracing::debug_span!("emp_circuit", gates = source.bristol.gates.len());
        let _enter = span.enter();

        let resolution = Resolution::new(source)?;
        let remapping = Remapping::new(&source.bristol.gates, &resolution)?;
        let metadata = Metadata::new(
            &resolution.input_bits_per_party(),
            remapping.wire_count(),
            remapping.output_bits(),
        );
        tracing::debug!(
            parties = resolution.party_names().len(),
            wire_count = metadata.wire_count,
            input_bits_0 = metadata.input_bits_0,
            input_bits_1 = metadata.input_bits_1,
            output_bits = metadata.output_bits,
            "prepared circuit"
        );

        Ok(Self {
            resolution,
            remapping,
            metadata,
        })
    }

    pub fn party_names(&self) -> &[String] {
        self.resolution.party_names()
    }

    pub fn has_party_name(&self, name: &str) -> bool {
        self.resolution.has_party_name(name)
    }

    pub fn party_name_from_index(&self, index: usize) -> Result<&str, EmpError> {
        self.resolution.party_name_from_index(index)
    }

    pub fn party_index_from_name(&self, name: &str) -> Result<usize, EmpError> {
        self.resolution.party_index_from_name(name)
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn gates(&self) -> &[EmpGate] {
        self.remapping.gates()
    }

    /// Original address to renumbered address, for every referenced wire.
    pub fn address_map(&self) -> &HashMap<usize, usize> {
        self.remapping.address_map()
    }

    pub fn first_output_address(&self) -> usize {
        self.remapping.first_output_address()
    }

    pub fn zero_wire_address(&self) -> Option<usize> {
        self.remapping.zero_wire_address()
    }

    /// Bits `party` feeds into the engine.
    pub fn encode_input(&self, party: &str, values: &Values) -> Result<Vec<bool>, EmpError> {
        codec::encode_input(&self.resolution, party, values)
    }

    /// Named outputs from the output bits revealed by the engine.
    pub fn decode_output(&self, output_bits: &[bool]) -> Result<Values, EmpError> {
        codec::decode_output(&self.resolution, &self.remapping, output_bits)
    }

    /// Evaluate the renumbered circuit in plaintext, keyed by party name.
    pub fn eval(&self, inputs: &BTreeMap<String, Values>) -> Result<Values, EmpError> {
        for party in self.party_names() {
            if !inputs.contains_key(party) {
                return Err(EmpError::MissingPartyInputs(party.clone()));
            }
        }
        if let Some(party) = inputs.keys().find(|p| !self.has_party_name(p)) {
            return Err(EmpError::UnknownParty(party.clone()));
        }

        let mut wires = vec![false; self.metadata.wire_count];
        let mut offset = 0;
        for party in self.party_names() {
            let bits = self.encode_input(party, &inputs[party])?;
            wires[offset..offset + bits.len()].copy_from_slice(&bits);
            offset += bits.len();
        }

        for gate in self.gates() {
            match *gate {
                EmpGate::And {
                    left,
                    right,
                    output,
                } => wires[output] = wires[left] & wires[right],
                EmpGate::Xor {
                    left,
                    right,
                    output,
                } => wires[output] = wires[left] ^ wires[right],
                EmpGate::Inv { input, output } => wires[output] = !wires[input],
            }
        }

        self.decode_output(&wires[self.first_output_address()..])
    }

    /// The renumbered circuit in the engine's text layout.
    pub fn simplified_bristol(&self) -> String {
        emit::emit(self.gates(), &self.metadata)
    }
}
