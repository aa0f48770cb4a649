//! Error types for the record binder.

use thiserror::Error;

use crate::schema::FieldKind;

/// Result type alias for binder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for record binding operations.
///
/// Every decode error carries the offending destination field's binding
/// name, and its positional index where one applies. Binding is fail-fast:
/// the first error aborts the remaining fields, and members decoded before
/// it keep their new values.
#[derive(Error, Debug)]
pub enum Error {
    /// Row value count does not match the field descriptor count.
    #[error("row has {row_len} values but the table has {field_count} fields")]
    SchemaMismatch { row_len: usize, field_count: usize },

    /// Row index out of bounds.
    #[error("row index {index} out of bounds (rows: {count})")]
    RowIndexOutOfBounds { index: usize, count: usize },

    /// Destination record's field accessor disagrees with its declared
    /// binding list.
    #[error("invalid destination record: {message}")]
    InvalidDestination { message: String },

    /// Strict mode: destination binding has no matching table field.
    #[error("table schema does not have field '{name}'")]
    MissingField { name: String },

    /// Destination kind incompatible with the field's declared storage kind.
    #[error("field '{name}' (index {index}): expected {expected} storage, got unconvertible kind '{actual}'")]
    KindMismatch {
        name: String,
        index: usize,
        expected: FieldKind,
        actual: FieldKind,
    },

    /// Malformed numeric or date text.
    #[error("field '{name}' (index {index}): {message}")]
    Parse {
        name: String,
        index: usize,
        message: String,
    },

    /// Destination member has a type with no registered decoder.
    #[error("field '{name}' has unsupported destination type '{type_name}'")]
    UnsupportedKind {
        name: String,
        type_name: &'static str,
    },
}

impl Error {
    /// Create an invalid-destination error.
    pub fn invalid_destination(message: impl Into<String>) -> Self {
        Self::InvalidDestination {
            message: message.into(),
        }
    }

    /// Create a parse error for the named destination field.
    pub fn parse(name: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            name: name.into(),
            index,
            message: message.into(),
        }
    }
}
