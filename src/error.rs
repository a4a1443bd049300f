use std::fmt;

/// Errors from the line-record codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A key or value contained a delimiter character the format reserves.
    ReservedCharacter { field: String, value: String },
    /// A non-blank chunk had no key/value separator.
    MissingSeparator(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ReservedCharacter { field, value } => {
                write!(f, "reserved character in field {} value {:?}", field, value)
            }
            CodecError::MissingSeparator(chunk) => {
                write!(f, "record chunk without key/value separator: {:?}", chunk)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A create violated a uniqueness constraint.
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },
    /// Record not found.
    NotFound { collection: String, id: String },
    /// Backing file could not be read or written.
    Io(String),
    /// Backing file contents could not be decoded or re-encoded.
    Malformed(String),
}

impl StoreError {
    pub(crate) fn duplicate(collection: &str, field: &str, value: impl Into<String>) -> Self {
        StoreError::DuplicateKey {
            collection: collection.to_string(),
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub(crate) fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey {
                collection,
                field,
                value,
            } => write!(f, "duplicate {} {:?} in {}", field, value, collection),
            StoreError::NotFound { collection, id } => {
                write!(f, "record not found: {}:{}", collection, id)
            }
            StoreError::Io(msg) => write!(f, "storage i/o error: {}", msg),
            StoreError::Malformed(msg) => write!(f, "malformed record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<CodecError> for StoreError {
    fn from(err: CodecError) -> Self {
        StoreError::Malformed(err.to_string())
    }
}
