use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("Contradictory composition: {left} and {right} cannot both hold")]
    Contradiction { left: String, right: String },

    #[error("No collision rule defined for {0}")]
    CollisionUnsupported(String),

    #[error("{kind} has no attribute '{name}'")]
    NoSuchAttribute { kind: String, name: String },

    #[error("Unknown attribute kind: {0}")]
    UnknownKind(String),

    #[error("Invalid range: {start} is after {end}")]
    InvalidRange { start: String, end: String },

    #[error("Invalid query term '{0}': expected KIND=NAME")]
    InvalidTerm(String),

    #[error("Unable to parse time: {0}")]
    TimeParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AttrError>;
