use thiserror::Error;

/// An Error enum capturing the errors produced by this crate.
///
/// Every error is fatal for the ongoing protocol execution: a failed
/// precondition or a broken transport leaves the parties out of sync, so
/// callers are expected to abort rather than retry.
#[derive(Error, Debug)]
pub enum Error {
    /// Type conversion error
    #[error("Conversion error")]
    ConversionError,
    /// Size is invalid
    #[error("Size is invalid")]
    InvalidSizeError,
    /// Tensor shapes do not match
    #[error("Shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
    /// Bit width is out of range for the ring
    #[error("Invalid bit width {0}")]
    InvalidBitWidth(usize),
    /// Share type descriptors disagree
    #[error("Share type mismatch: {0} vs {1}")]
    TypeMismatch(String, String),
    /// Not enough triples error
    #[error("Not enough triples error")]
    NotEnoughTriplesError,
    /// Not enough random bits error
    #[error("Not enough random bits error")]
    NotEnoughRandBitsError,
    /// A IO error has occurred
    #[error("IO error")]
    IOError(#[from] std::io::Error),
    /// Invalid party id provided
    #[error("Invalid Party id {0}")]
    IdError(usize),
    /// Invalid number of parties
    #[error("Invalid number of parties {0}")]
    NumPartyError(usize),
    /// Invalid value provided
    #[error("Invalid value: {0}")]
    ValueError(String),
    /// Some other error has occurred.
    #[error("Err: {0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(mes: String) -> Self {
        Self::Other(mes)
    }
}
impl From<&str> for Error {
    fn from(mes: &str) -> Self {
        Self::Other(mes.to_owned())
    }
}
