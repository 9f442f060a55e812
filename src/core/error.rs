use thiserror::Error;

/// Malformed input. Always fatal to the parse or scan that raised it.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("@SQ record is missing its {tag} field: {line}")]
    MissingSequenceField { tag: &'static str, line: String },

    #[error("Invalid length for sequence {name}: '{value}'")]
    InvalidLength { name: String, value: String },

    #[error("Duplicate sequence name: {0}")]
    DuplicateSequence(String),

    #[error("Sequence {0} is not present in the sequence dictionary")]
    UnknownSequence(String),

    #[error("Sequence {name} ended at position {found} but its declared length is {expected}")]
    LengthMismatch {
        name: String,
        expected: u64,
        found: u64,
    },

    #[error("No sequence headers found (first record starts with '{0}')")]
    NoSequenceHeaders(String),

    #[error("Invalid run on {name}: {reason}")]
    InvalidRun { name: String, reason: String },

    #[error("Malformed alignment record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Invalid text: {0}")]
    InvalidText(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many sequences: {0} exceeds maximum allowed (100000)")]
    TooManySequences(usize),
}

/// Failure of a long-running scan that honours a cancellation token.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Scan cancelled")]
    Cancelled,
}
