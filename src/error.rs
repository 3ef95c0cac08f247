//! Closed error taxonomy for the record codec.

use thiserror::Error;

/// Result alias that uses the crate-wide [`CodecError`] type.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors surfaced by encode/decode operations.
///
/// The variant set is closed: callers may match exhaustively. Framing
/// mismatches ([`CodecError::PrefixMismatch`], [`CodecError::SchemaTooNew`])
/// are recoverable conditions a caller can expect to see on ordinary
/// misrouted reads; the rest indicate either programmer error (wrong schema,
/// null where not allowed) or corrupted input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A null value was supplied for a column whose schema entry does not
    /// admit nulls.
    #[error("column {column}: null not allowed")]
    NullNotAllowed {
        /// Logical index of the offending column.
        column: usize,
    },

    /// The value's runtime type did not match the schema entry's type tag.
    #[error("column {column}: value does not match schema type (expected {expected})")]
    TypeMismatch {
        /// Logical index of the offending column.
        column: usize,
        /// Name of the type the schema entry expected.
        expected: &'static str,
    },

    /// A buffer read or skip would advance past the end of the underlying
    /// bytes.
    #[error("out of range while {context}")]
    OutOfRange {
        /// What operation was being attempted.
        context: &'static str,
    },

    /// An ordered byte-string group's padding bytes were non-zero, or the
    /// remaining buffer length was not a multiple of 9.
    #[error("malformed padding while {context}")]
    MalformedPadding {
        /// What operation was being attempted.
        context: &'static str,
    },

    /// The decoded `common_id` did not match the codec's configured id.
    #[error("key prefix does not match this codec's table id")]
    PrefixMismatch,

    /// The decoded schema version exceeds the codec's configured version.
    #[error("value schema version {found} is newer than supported {max}")]
    SchemaTooNew {
        /// Version found in the encoded value.
        found: u32,
        /// Maximum version this codec supports.
        max: u32,
    },

    /// [`crate::record::RecordCodec::encode_max_key_prefix`] was called with
    /// `common_id == i64::MAX`.
    #[error("common_id is i64::MAX; max key prefix would overflow")]
    KeyOverflow,

    /// A list-typed column was marked as a key, or a key operation was
    /// invoked on a list codec.
    #[error("list columns cannot be used as keys ({kind})")]
    UnsupportedKeyType {
        /// Name of the list type involved.
        kind: &'static str,
    },
}
