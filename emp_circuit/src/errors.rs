use circuit::CircuitLoadError;

use crate::io::IoType;

#[derive(Debug, thiserror::Error)]
pub enum EmpError {
    // Configuration errors: raised while resolving parties or validating a call.
    #[error("duplicate party name {0}")]
    DuplicatePartyName(String),
    #[error("no descriptor for input {0}")]
    MissingInput(String),
    #[error("no descriptor for output {0}")]
    MissingOutput(String),
    #[error("input {0} is claimed more than once")]
    DuplicateInput(String),
    #[error("{name} has invalid width {width} for a {ty}")]
    InvalidWidth { name: String, width: usize, ty: IoType },
    #[error("circuit has no outputs")]
    NoOutputs,
    #[error("party {0} not found")]
    UnknownParty(String),
    #[error("party index {0} not found")]
    UnknownPartyIndex(usize),
    #[error("inputs for party {0} not found")]
    MissingPartyInputs(String),
    #[error("outputs of party {party} do not match the circuit")]
    OutputsMismatch { party: String },

    // Mapping errors: the circuit is not topologically sorted or its
    // descriptors disagree with its gates.
    #[error("address {0} not found")]
    UnmappedAddress(usize),
    #[error("input wire {0} belongs to more than one input")]
    OverlappingInput(usize),
    #[error("wire {0} is written more than once")]
    WireRedefined(usize),
    #[error("output address {0} is not in the output region")]
    OutputNotInTail(usize),
    #[error("output buffer has {actual} bits, expected {expected}")]
    OutputBufferTooShort { expected: usize, actual: usize },

    // Type errors: a value does not match its descriptor.
    #[error("expected input {input} to be a {expected}")]
    TypeMismatch { input: String, expected: IoType },
    #[error("missing value for input {input}")]
    MissingValue { input: String },
    #[error("value for input {input} does not fit in {width} bits")]
    ValueOutOfRange { input: String, width: usize },
    #[error("party {party} does not own input {input}")]
    UnexpectedInput { party: String, input: String },

    // Format errors.
    #[error("encountered error while reading circuit")]
    ParsingError(#[from] anyhow::Error),
    #[error("encountered error while loading bristol circuit")]
    LoadError(#[from] CircuitLoadError),
    #[error("encountered error while decoding circuit source")]
    JsonError(#[from] serde_json::Error),
}
