//! Error types for the supmatch-core library.

use thiserror::Error;

/// Main error type for the supmatch library.
#[derive(Error, Debug)]
pub enum SupmatchError {
    /// Malformed invoice token or catalog line.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Catalog index build or lookup error.
    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A search worker task failed to complete.
    #[error("worker failed: {0}")]
    Worker(String),
}

/// Errors raised while decoding upstream inputs.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A line of the invoice token dump does not have the expected shape.
    #[error("invalid invoice token at line {line}: {content}")]
    InvalidToken { line: usize, content: String },

    /// A numeric field could not be parsed.
    #[error("invalid {field} value: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// A catalog line is not of the form `<digits>,<name>`.
    #[error("invalid supplier line {line}: {content}")]
    InvalidCatalogLine { line: usize, content: String },

    /// A catalog entry whose name has no words.
    #[error("supplier {id} has an empty name")]
    EmptyName { id: String },
}

/// Errors related to the persisted catalog index.
#[derive(Error, Debug)]
pub enum IndexError {
    /// Failed to encode or decode the offset map.
    #[error("offset map serialization failed: {0}")]
    Serialization(String),

    /// An offset points at or past the end of the flattened catalog.
    #[error("no supplier line at offset {offset}")]
    UnexpectedEof { offset: u64 },

    /// The line at an offset is not of the form `<digits>,<name>`.
    #[error("invalid supplier line at offset {offset}: {content}")]
    InvalidEntry { offset: u64, content: String },

    /// The line at an indexed offset does not start with the expected word.
    #[error("offset {offset} does not start the group for '{word}'")]
    GroupMismatch { offset: u64, word: String },
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::Serialization(err.to_string())
    }
}

/// Result type for the supmatch library.
pub type Result<T> = std::result::Result<T, SupmatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SupmatchError::from(ParseError::EmptyName { id: "42".to_string() });
        assert_eq!(err.to_string(), "parse error: supplier 42 has an empty name");

        let err = SupmatchError::from(IndexError::UnexpectedEof { offset: 17 });
        assert_eq!(err.to_string(), "index error: no supplier line at offset 17");
    }
}
