//! The table collaborator boundary and an in-memory realization.
//!
//! The binder never touches file bytes: everything it needs from the
//! file-owning side is the [`Table`] contract below. [`MemoryTable`] is
//! the minimal in-memory realization used by the test suite and examples.

use std::borrow::Cow;

use bytes::Bytes;

use crate::binder::RecordBinder;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::FieldDescriptor;

/// Strip the space padding from a raw field value and expose it as text.
///
/// Field values are padded with ASCII spaces on either side; anything else
/// is part of the value. Non-UTF-8 bytes are replaced rather than
/// rejected.
pub fn default_trim_padding(raw: &[u8]) -> Cow<'_, str> {
    let start = raw.iter().position(|&b| b != b' ').unwrap_or(raw.len());
    let end = raw.iter().rposition(|&b| b != b' ').map_or(start, |p| p + 1);
    String::from_utf8_lossy(&raw[start..end])
}

/// Contract required from the owning table.
///
/// Descriptors must be stable for the table's lifetime and index-aligned
/// with every row. The binder treats both as read-only for the duration of
/// one call; the table must not mutate them underneath it.
pub trait Table {
    /// Ordered field descriptors.
    fn fields(&self) -> &[FieldDescriptor];

    /// Number of stored rows.
    fn row_count(&self) -> usize;

    /// Ordered raw field values of one row.
    fn raw_row(&self, index: usize) -> Result<&[Bytes]>;

    /// Strip the padding from one raw value and decode it to text.
    ///
    /// Tables holding non-UTF-8 character data override this with their
    /// own character-set handling.
    fn trim_padding<'a>(&self, raw: &'a [u8]) -> Cow<'a, str> {
        default_trim_padding(raw)
    }

    /// Decode the row at `index` into `dest`.
    ///
    /// See [`RecordBinder::decode_row`].
    fn decode_row<R: Record>(&self, index: usize, dest: &mut R, strict: bool) -> Result<()>
    where
        Self: Sized,
    {
        RecordBinder::new(self).decode_row(index, dest, strict)
    }

    /// Write `record` into a new row of raw field values.
    ///
    /// See [`RecordBinder::encode_row`].
    fn encode_row<R: Record>(&self, record: &R, strict: bool) -> Result<Vec<Bytes>>
    where
        Self: Sized,
    {
        RecordBinder::new(self).encode_row(record, strict)
    }
}

/// In-memory table of descriptors and raw rows.
///
/// Holds exactly what the binder needs from the file-owning table: ordered
/// descriptors plus index-aligned raw field values per row. Carries no
/// file-format behavior.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    fields: Vec<FieldDescriptor>,
    rows: Vec<Vec<Bytes>>,
}

impl MemoryTable {
    /// Create a table over the given schema.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            fields,
            rows: Vec::new(),
        }
    }

    /// Append an empty row (every cell zero-length) and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![Bytes::new(); self.fields.len()]);
        self.rows.len() - 1
    }

    /// Append a caller-built row, index-aligned with the fields.
    pub fn push_row(&mut self, row: Vec<Bytes>) -> Result<usize> {
        if row.len() != self.fields.len() {
            return Err(Error::SchemaMismatch {
                row_len: row.len(),
                field_count: self.fields.len(),
            });
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Set a field of a row from text, right-padded with spaces to the
    /// declared width and truncated beyond it. Field names are matched
    /// case-insensitively.
    pub fn set_field_value(&mut self, row: usize, name: &str, value: &str) -> Result<()> {
        let column = self.column_index(name)?;
        let width = self.fields[column].width() as usize;
        let mut cell = value.as_bytes().to_vec();
        cell.truncate(width);
        cell.resize(width, b' ');
        self.set_cell(row, column, Bytes::from(cell))
    }

    /// Set a field of a row verbatim, without padding.
    ///
    /// A zero-length value reads back as absent through optional
    /// destinations.
    pub fn set_raw_field(&mut self, row: usize, name: &str, value: impl Into<Bytes>) -> Result<()> {
        let column = self.column_index(name)?;
        self.set_cell(row, column, value.into())
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::MissingField {
                name: name.to_string(),
            })
    }

    fn set_cell(&mut self, row: usize, column: usize, value: Bytes) -> Result<()> {
        let count = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(Error::RowIndexOutOfBounds { index: row, count })?;
        cells[column] = value;
        Ok(())
    }
}

impl Table for MemoryTable {
    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn raw_row(&self, index: usize) -> Result<&[Bytes]> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(Error::RowIndexOutOfBounds {
                index,
                count: self.rows.len(),
            })
    }
}
