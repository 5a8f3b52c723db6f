//! Renumber the wires of a circuit into the layout the engine expects.
//!
//! Input bits are numbered first, party by party. Gate results are then
//! numbered in gate order: wires below the first output address take the next
//! forward address, wires in the output region take the next backward slot.
//! Once the gate pass is over the number of backward slots is known and they
//! are flipped onto the tail of the address space, keeping allocation order.

use std::collections::HashMap;

use circuit::Gate;

use crate::errors::EmpError;
use crate::gate::EmpGate;
use crate::resolver::Resolution;

/// Provisional address of a wire during remapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WireSlot {
    /// Forward-allocated, already final.
    Normal(usize),
    /// The `k`-th backward allocation, i.e. slot `-(k + 1)` counting down from `-1`.
    Output(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WireKind {
    Normal,
    Output,
}

#[derive(Debug, Default)]
struct Allocator {
    next_forward: usize,
    next_backward: usize,
}

impl Allocator {
    fn assign(&mut self, kind: WireKind) -> WireSlot {
        match kind {
            WireKind::Normal => {
                let slot = WireSlot::Normal(self.next_forward);
                self.next_forward += 1;
                slot
            }
            WireKind::Output => {
                let slot = WireSlot::Output(self.next_backward);
                self.next_backward += 1;
                slot
            }
        }
    }
}

fn lookup(map: &HashMap<usize, WireSlot>, address: usize) -> Result<WireSlot, EmpError> {
    map.get(&address)
        .copied()
        .ok_or(EmpError::UnmappedAddress(address))
}

/// Renumbered gates and the original-to-new address map.
#[derive(Clone, Debug)]
pub struct Remapping {
    gates: Vec<EmpGate>,
    address_map: HashMap<usize, usize>,
    input_bits: usize,
    first_output_address: usize,
    wire_count: usize,
    zero_wire_address: Option<usize>,
}

impl Remapping {
    pub fn new(source_gates: &[Gate], resolution: &Resolution) -> Result<Self, EmpError> {
        let mut alloc = Allocator::default();
        let mut map: HashMap<usize, WireSlot> = HashMap::new();

        // Inputs, party by party.
        for d in resolution.input_order() {
            for i in 0..d.width {
                let address = d.address + i;
                if map.insert(address, alloc.assign(WireKind::Normal)).is_some() {
                    return Err(EmpError::OverlappingInput(address));
                }
            }
        }
        let input_bits = alloc.next_forward;
        tracing::trace!(input_bits, "assigned input wires");

        // Gates, in their given topological order.
        let threshold = resolution.first_output_address();
        let mut zero_wire: Option<WireSlot> = None;
        let mut gates: Vec<EmpGate<WireSlot>> = Vec::with_capacity(source_gates.len());
        for g in source_gates {
            let out_id = g.out_id();
            if map.contains_key(&out_id) {
                return Err(EmpError::WireRedefined(out_id));
            }
            // `Output` here means an output of the circuit, not of the gate.
            let kind = if out_id < threshold {
                WireKind::Normal
            } else {
                WireKind::Output
            };
            let gate = match *g {
                Gate::And { lin_id, rin_id, .. } => EmpGate::And {
                    left: lookup(&map, lin_id)?,
                    right: lookup(&map, rin_id)?,
                    output: alloc.assign(kind),
                },
                Gate::Xor { lin_id, rin_id, .. } => {
                    let gate = EmpGate::Xor {
                        left: lookup(&map, lin_id)?,
                        right: lookup(&map, rin_id)?,
                        output: alloc.assign(kind),
                    };
                    // x ^ x is always 0; remember the first such wire.
                    if lin_id == rin_id && zero_wire.is_none() {
                        zero_wire = Some(gate.output());
                    }
                    gate
                }
                Gate::Inv { lin_id, .. } => EmpGate::Inv {
                    input: lookup(&map, lin_id)?,
                    output: alloc.assign(kind),
                },
            };
            map.insert(out_id, gate.output());
            gates.push(gate);
        }
        tracing::trace!(
            normal_wires = alloc.next_forward,
            output_wires = alloc.next_backward,
            "assigned gate wires"
        );

        // Move the backward slots onto the tail.
        let output_wire_count = alloc.next_backward;
        let first_output_address = alloc.next_forward;
        alloc.next_forward += output_wire_count;
        let flip = |slot: WireSlot| match slot {
            WireSlot::Normal(address) => address,
            WireSlot::Output(k) => first_output_address + k,
        };

        let gates: Vec<EmpGate> = gates.into_iter().map(|g| g.map(flip)).collect();
        let address_map: HashMap<usize, usize> =
            map.into_iter().map(|(old, slot)| (old, flip(slot))).collect();

        let remapping = Self {
            gates,
            address_map,
            input_bits,
            first_output_address,
            wire_count: alloc.next_forward,
            zero_wire_address: zero_wire.map(flip),
        };

        for d in resolution.outputs() {
            for i in 0..d.width {
                let address = remapping.address(d.address + i)?;
                if address < first_output_address {
                    return Err(EmpError::OutputNotInTail(d.address + i));
                }
            }
        }

        tracing::debug!(
            gates = remapping.gates.len(),
            wire_count = remapping.wire_count,
            first_output_address,
            zero_wire = ?remapping.zero_wire_address,
            "remapped circuit"
        );
        Ok(remapping)
    }

    pub fn gates(&self) -> &[EmpGate] {
        &self.gates
    }

    pub fn address_map(&self) -> &HashMap<usize, usize> {
        &self.address_map
    }

    /// New address of an original address.
    pub fn address(&self, old: usize) -> Result<usize, EmpError> {
        self.address_map
            .get(&old)
            .copied()
            .ok_or(EmpError::UnmappedAddress(old))
    }

    /// Number of leading wires holding party inputs.
    pub fn input_bits(&self) -> usize {
        self.input_bits
    }

    pub fn first_output_address(&self) -> usize {
        self.first_output_address
    }

    pub fn wire_count(&self) -> usize {
        self.wire_count
    }

    pub fn output_bits(&self) -> usize {
        self.wire_count - self.first_output_address
    }

    /// A wire known to always hold 0, if the circuit computes one as `x ^ x`.
    /// Nothing in this crate folds constants with it yet.
    pub fn zero_wire_address(&self) -> Option<usize> {
        self.zero_wire_address
    }
}
