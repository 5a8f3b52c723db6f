//! Build Bristol Fashion circuits in code.
//!
//! Wires handed out by [`CircuitBuilder`] are provisional. [`CircuitBuilder::build`]
//! relabels them so that inputs come first, internal wires next and the
//! requested output groups last, which is the layout Bristol Fashion expects.

use std::collections::HashSet;

use crate::errors::CircuitBuildError;
use crate::gate::{Circuit, Gate};

#[derive(Clone, Debug, Default)]
pub struct CircuitBuilder {
    nwires: usize,
    inputs: Vec<Vec<usize>>,
    is_input: Vec<bool>,
    gates: Vec<Gate>,
    zero: Option<usize>,
    one: Option<usize>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_wire(&mut self, is_input: bool) -> usize {
        let w = self.nwires;
        self.nwires += 1;
        self.is_input.push(is_input);
        w
    }

    /// Declare an input group of `width` wires.
    pub fn add_input(&mut self, width: usize) -> Vec<usize> {
        let wires: Vec<usize> = (0..width).map(|_| self.issue_wire(true)).collect();
        self.inputs.push(wires.clone());
        wires
    }

    pub fn and(&mut self, lin_id: usize, rin_id: usize) -> usize {
        let out_id = self.issue_wire(false);
        self.gates.push(Gate::And {
            gate_id: self.gates.len(),
            lin_id,
            rin_id,
            out_id,
        });
        out_id
    }

    pub fn xor(&mut self, lin_id: usize, rin_id: usize) -> usize {
        let out_id = self.issue_wire(false);
        self.gates.push(Gate::Xor {
            gate_id: self.gates.len(),
            lin_id,
            rin_id,
            out_id,
        });
        out_id
    }

    pub fn inv(&mut self, lin_id: usize) -> usize {
        let out_id = self.issue_wire(false);
        self.gates.push(Gate::Inv {
            gate_id: self.gates.len(),
            lin_id,
            out_id,
        });
        out_id
    }

    /// A wire that is always 0, computed as `w ^ w` from the first wire.
    pub fn zero(&mut self) -> Result<usize, CircuitBuildError> {
        if let Some(zero) = self.zero {
            return Ok(zero);
        }
        if self.nwires == 0 {
            return Err(CircuitBuildError::NoInputs);
        }
        let zero = self.xor(0, 0);
        self.zero = Some(zero);
        Ok(zero)
    }

    /// A wire that is always 1.
    pub fn one(&mut self) -> Result<usize, CircuitBuildError> {
        if let Some(one) = self.one {
            return Ok(one);
        }
        let zero = self.zero()?;
        let one = self.inv(zero);
        self.one = Some(one);
        Ok(one)
    }

    /// Relabel every wire and produce the circuit. `outputs` lists the output
    /// groups in declaration order, least significant bit first.
    pub fn build(mut self, outputs: &[Vec<usize>]) -> Result<Circuit, CircuitBuildError> {
        // Every output bit must be the result of its own gate.
        let mut claimed = HashSet::new();
        let mut output_groups = Vec::with_capacity(outputs.len());
        for group in outputs {
            let mut wires = Vec::with_capacity(group.len());
            for &w in group {
                if w >= self.nwires {
                    return Err(CircuitBuildError::UnknownWire(w));
                }
                let w = if self.is_input[w] || claimed.contains(&w) {
                    let zero = self.zero()?;
                    self.xor(w, zero)
                } else {
                    w
                };
                claimed.insert(w);
                wires.push(w);
            }
            output_groups.push(wires);
        }

        let mut label: Vec<Option<usize>> = vec![None; self.nwires];
        let mut next = 0;
        for &w in self.inputs.iter().flatten() {
            label[w] = Some(next);
            next += 1;
        }
        for gate in self.gates.iter() {
            let out_id = gate.out_id();
            if !claimed.contains(&out_id) {
                label[out_id] = Some(next);
                next += 1;
            }
        }
        for &w in output_groups.iter().flatten() {
            label[w] = Some(next);
            next += 1;
        }

        let relabel = |w: usize| -> Result<usize, CircuitBuildError> {
            label
                .get(w)
                .copied()
                .flatten()
                .ok_or(CircuitBuildError::UnknownWire(w))
        };

        let mut circ = Circuit::new(
            self.gates.len(),
            next,
            self.inputs.iter().map(Vec::len).collect(),
            output_groups.iter().map(Vec::len).collect(),
        );
        for gate in self.gates.iter() {
            let gate = match *gate {
                Gate::Xor {
                    gate_id,
                    lin_id,
                    rin_id,
                    out_id,
                } => Gate::Xor {
                    gate_id,
                    lin_id: relabel(lin_id)?,
                    rin_id: relabel(rin_id)?,
                    out_id: relabel(out_id)?,
                },
                Gate::And {
                    gate_id,
                    lin_id,
                    rin_id,
                    out_id,
                } => Gate::And {
                    gate_id,
                    lin_id: relabel(lin_id)?,
                    rin_id: relabel(rin_id)?,
                    out_id: relabel(out_id)?,
                },
                Gate::Inv {
                    gate_id,
                    lin_id,
                    out_id,
                } => Gate::Inv {
                    gate_id,
                    lin_id: relabel(lin_id)?,
                    out_id: relabel(out_id)?,
                },
            };
            circ.push_gate(gate);
        }

        tracing::trace!(
            ngates = circ.ngates,
            nwires = circ.nwires,
            "built circuit"
        );
        Ok(circ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CircuitInput;

    #[test]
    fn test_outputs_land_at_tail() {
        let mut b = CircuitBuilder::new();
        let x = b.add_input(1);
        let y = b.add_input(1);
        let t = b.and(x[0], y[0]);
        let s = b.xor(x[0], y[0]);
        // `t` is an output but also feeds a later gate.
        b.inv(t);
        let circ = b.build(&[vec![s], vec![t]]).unwrap();

        assert_eq!(circ.nwires, 5);
        assert_eq!(circ.input_nwires, vec![1, 1]);
        assert_eq!(circ.output_nwires, vec![1, 1]);
        assert_eq!(circ.output_address(0), Some(3));
        assert_eq!(circ.output_address(1), Some(4));
        assert_eq!(circ.gates[2], Gate::Inv { gate_id: 2, lin_id: 4, out_id: 2 });

        let inputs = [
            CircuitInput { id: 0, value: true },
            CircuitInput { id: 1, value: true },
        ];
        assert_eq!(circ.eval(&inputs).unwrap(), vec![false, true]);
    }

    #[test]
    fn test_input_passthrough_gets_buffer() {
        let mut b = CircuitBuilder::new();
        let x = b.add_input(2);
        let circ = b.build(&[vec![x[1], x[1]]]).unwrap();

        // zero wire plus one buffer per output bit
        assert_eq!(circ.ngates, 3);
        assert_eq!(circ.nxor, 3);
        assert_eq!(circ.nwires, 5);

        let inputs = [
            CircuitInput { id: 0, value: false },
            CircuitInput { id: 1, value: true },
        ];
        assert_eq!(circ.eval(&inputs).unwrap(), vec![true, true]);
    }

    #[test]
    fn test_constants() {
        let mut b = CircuitBuilder::new();
        assert!(matches!(b.zero(), Err(CircuitBuildError::NoInputs)));

        let x = b.add_input(1);
        let zero = b.zero().unwrap();
        let one = b.one().unwrap();
        assert_eq!(b.zero().unwrap(), zero);
        let o0 = b.and(x[0], zero);
        let o1 = b.and(one, one);
        let circ = b.build(&[vec![o0, o1]]).unwrap();

        for value in [false, true] {
            let out = circ.eval(&[CircuitInput { id: 0, value }]).unwrap();
            assert_eq!(out, vec![false, true]);
        }
    }

    #[test]
    fn test_unknown_wire() {
        let mut b = CircuitBuilder::new();
        let x = b.add_input(1);
        let _ = b.and(x[0], 42);
        assert!(matches!(
            b.clone().build(&[vec![1]]),
            Err(CircuitBuildError::UnknownWire(42))
        ));
        assert!(matches!(b.build(&[vec![7]]), Err(CircuitBuildError::UnknownWire(7))));
    }
}
