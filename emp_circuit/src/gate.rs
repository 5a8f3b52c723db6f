//! Gates and header counts of a renumbered circuit.

/// A gate over addresses of type `A`. Remapped circuits use `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmpGate<A = usize> {
    And { left: A, right: A, output: A },
    Xor { left: A, right: A, output: A },
    Inv { input: A, output: A },
}

impl<A: Copy> EmpGate<A> {
    pub fn output(&self) -> A {
        match *self {
            EmpGate::And { output, .. } | EmpGate::Xor { output, .. } | EmpGate::Inv { output, .. } => {
                output
            }
        }
    }

    /// Rewrite every operand and the result through `f`.
    pub fn map<B>(self, mut f: impl FnMut(A) -> B) -> EmpGate<B> {
        match self {
            EmpGate::And {
                left,
                right,
                output,
            } => EmpGate::And {
                left: f(left),
                right: f(right),
                output: f(output),
            },
            EmpGate::Xor {
                left,
                right,
                output,
            } => EmpGate::Xor {
                left: f(left),
                right: f(right),
                output: f(output),
            },
            EmpGate::Inv { input, output } => EmpGate::Inv {
                input: f(input),
                output: f(output),
            },
        }
    }
}

/// Header counts the engine needs to allocate its wire storage.
///
/// With two parties `input_bits_0` and `input_bits_1` are the bit counts of
/// each party. With any other number of parties only their sum matters, so
/// `input_bits_0` holds the total and `input_bits_1` is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub wire_count: usize,
    pub input_bits_0: usize,
    pub input_bits_1: usize,
    pub output_bits: usize,
}

impl Metadata {
    pub fn new(input_bits_per_party: &[usize], wire_count: usize, output_bits: usize) -> Self {
        let (input_bits_0, input_bits_1) = match *input_bits_per_party {
            [first, second] => (first, second),
            _ => (input_bits_per_party.iter().sum(), 0),
        };
        Self {
            wire_count,
            input_bits_0,
            input_bits_1,
            output_bits,
        }
    }
}
