use thiserror::Error;

use crate::info_hash::InfoHash;

/// Structural faults found while decoding bencoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes are not bencode; carries the decoder's message.
    #[error("malformed bencode: {0}")]
    Malformed(String),

    /// Valid bencode that does not re-encode to the same bytes.
    #[error("bencode is not in canonical form")]
    NonCanonical,

    /// A required field is absent from a dictionary.
    #[error("missing field {0:?}")]
    MissingField(&'static str),

    /// A field holds a value of the wrong bencode type or range.
    #[error("field {field:?} is not a valid {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("pieces length {0} is not a multiple of 20")]
    InvalidPieces(usize),

    /// File lengths add up to more than fits in a `u64`.
    #[error("total length of files overflows")]
    LengthOverflow,
}

/// Errors produced while turning raw metadata bytes into trusted views.
#[derive(Debug, Error)]
pub enum MetaInfoError {
    /// The SHA-1 of the info dictionary differs from the claimed info hash.
    #[error("info bytes have wrong hash: expected {expected}, got {actual}")]
    HashMismatch { expected: InfoHash, actual: InfoHash },

    #[error("error decoding meta info: {0}")]
    Decode(#[from] DecodeError),

    /// A display string is not valid UTF-8.
    #[error("meta info contains an invalid utf8 string in {field}")]
    InvalidEncoding { field: String },

    /// Rejected by a banning check other than encoding.
    #[error("meta info rejected: {0}")]
    Banned(String),
}

/// Result type alias for meta info operations.
pub type Result<T> = std::result::Result<T, MetaInfoError>;
