//! Define the structure of gates and circuits.

use crate::errors::CircuitEvalError;

/// `gate_id`: the gate id.
/// `lin_id`, `rin_id` are the wire ids of two fan-in gate inputs.
/// `out_id` is the wire id of the gate output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gate {
    Xor {
        gate_id: usize,
        lin_id: usize,
        rin_id: usize,
        out_id: usize,
    },
    And {
        gate_id: usize,
        lin_id: usize,
        rin_id: usize,
        out_id: usize,
    },
    Inv {
        gate_id: usize,
        lin_id: usize,
        out_id: usize,
    },
}

impl Gate {
    /// The wire written by this gate.
    pub fn out_id(&self) -> usize {
        match *self {
            Gate::Xor { out_id, .. } | Gate::And { out_id, .. } | Gate::Inv { out_id, .. } => {
                out_id
            }
        }
    }

    /// The wires read by this gate, left operand first.
    pub fn in_ids(&self) -> Vec<usize> {
        match *self {
            Gate::Xor { lin_id, rin_id, .. } | Gate::And { lin_id, rin_id, .. } => {
                vec![lin_id, rin_id]
            }
            Gate::Inv { lin_id, .. } => vec![lin_id],
        }
    }
}

/// Circuit input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitInput {
    /// Circuit input id
    pub id: usize,

    /// Circuit input value
    pub value: bool,
}

/// Define a circuit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    /// Number of gates
    pub ngates: usize,
    /// Number of wires
    pub nwires: usize,
    /// Width of every input group, in declaration order
    pub input_nwires: Vec<usize>,
    /// Width of every output group, in declaration order
    pub output_nwires: Vec<usize>,
    /// Total number of input wires
    pub ninput_wires: usize,
    /// Total number of output wires
    pub noutput_wires: usize,
    /// All gates in the circuit
    pub gates: Vec<Gate>,
    /// Number of AND gates
    pub nand: usize,
    /// Number of XOR gates
    pub nxor: usize,
    /// Number of INV gates
    pub ninv: usize,
}

impl Circuit {
    pub fn new(
        ngates: usize,
        nwires: usize,
        input_nwires: Vec<usize>,
        output_nwires: Vec<usize>,
    ) -> Self {
        let ninput_wires = input_nwires.iter().sum();
        let noutput_wires = output_nwires.iter().sum();
        Circuit {
            ngates,
            nwires,
            input_nwires,
            output_nwires,
            ninput_wires,
            noutput_wires,
            gates: Vec::with_capacity(ngates),
            nand: 0,
            nxor: 0,
            ninv: 0,
        }
    }

    /// Append a gate and keep the per-type counters in sync.
    pub fn push_gate(&mut self, gate: Gate) {
        match gate {
            Gate::Xor { .. } => self.nxor += 1,
            Gate::And { .. } => self.nand += 1,
            Gate::Inv { .. } => self.ninv += 1,
        }
        self.gates.push(gate);
    }

    /// First wire of the `k`-th input group. Inputs occupy the leading wires.
    pub fn input_address(&self, k: usize) -> Option<usize> {
        (k < self.input_nwires.len()).then(|| self.input_nwires[..k].iter().sum())
    }

    /// First wire of the `k`-th output group. Outputs occupy the trailing wires.
    pub fn output_address(&self, k: usize) -> Option<usize> {
        (k < self.output_nwires.len()).then(|| {
            self.nwires - self.noutput_wires + self.output_nwires[..k].iter().sum::<usize>()
        })
    }

    /// Evaluate the circuit in plaintext and return the value of every wire.
    /// Wires that are neither inputs nor written by a gate stay `None`.
    pub fn eval_wires(&self, inputs: &[CircuitInput]) -> Result<Vec<Option<bool>>, CircuitEvalError> {
        let mut wires: Vec<Option<bool>> = vec![None; self.nwires];
        let nwires = self.nwires;
        let check = |id: usize| {
            if id < nwires {
                Ok(id)
            } else {
                Err(CircuitEvalError::WireOutOfRange { wire: id, nwires })
            }
        };

        for input in inputs.iter() {
            wires[check(input.id)?] = Some(input.value);
        }

        for gate in self.gates.iter() {
            let read = |id: usize| -> Result<bool, CircuitEvalError> {
                wires[check(id)?].ok_or(CircuitEvalError::UninitializedValue(id))
            };
            let (out_id, val) = match *gate {
                Gate::Xor {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => (out_id, read(lin_id)? ^ read(rin_id)?),
                Gate::And {
                    lin_id,
                    rin_id,
                    out_id,
                    ..
                } => (out_id, read(lin_id)? & read(rin_id)?),
                Gate::Inv { lin_id, out_id, .. } => (out_id, !read(lin_id)?),
            };
            wires[check(out_id)?] = Some(val);
        }

        Ok(wires)
    }

    /// Evaluate the circuit in plaintext with the provided inputs
    pub fn eval(&self, inputs: &[CircuitInput]) -> Result<Vec<bool>, CircuitEvalError> {
        let wires = self.eval_wires(inputs)?;

        // The last `noutput_wires` slots store the output bits.
        let first_output = self.nwires - self.noutput_wires;
        wires[first_output..]
            .iter()
            .enumerate()
            .map(|(i, w)| w.ok_or(CircuitEvalError::UninitializedValue(first_output + i)))
            .collect()
    }
}
