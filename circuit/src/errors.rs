#[derive(Debug, thiserror::Error)]
pub enum CircuitEvalError {
    #[error("uninitialized value, wire {0}")]
    UninitializedValue(usize),
    #[error("wire {wire} out of range, circuit has {nwires} wires")]
    WireOutOfRange { wire: usize, nwires: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitLoadError {
    #[error("encountered error while parsing circuit")]
    ParsingError(#[from] anyhow::Error),
    /// An I/O error occurred.
    #[error("encountered io error while loading circuit")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitBuildError {
    #[error("circuit has no input wire to derive a constant from")]
    NoInputs,
    #[error("wire {0} was never allocated")]
    UnknownWire(usize),
    #[error("operand widths differ: {left} and {right}")]
    WidthMismatch { left: usize, right: usize },
    #[error("operand has no wires")]
    EmptyOperand,
}
