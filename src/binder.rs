//! Decode/encode orchestration between table rows and typed records.

use std::collections::HashMap;

use bytes::Bytes;

use crate::decode::RawField;
use crate::error::{Error, Result};
use crate::record::{DestinationSchema, FieldTarget, Record};
use crate::schema::FieldDescriptor;
use crate::table::Table;

/// Case-insensitive lookup from binding name to one row's raw value and
/// its descriptor.
///
/// Built fresh for every row: O(field count) build, O(1) lookup. Two
/// descriptors normalizing to the same lower-cased name shadow each other;
/// the last one wins.
pub struct FieldNameResolver<'a> {
    map: HashMap<String, (&'a Bytes, &'a FieldDescriptor)>,
}

impl<'a> FieldNameResolver<'a> {
    /// Pair a row's values with their descriptors, keyed by lower-cased
    /// field name. The slices must be index-aligned.
    pub fn new(fields: &'a [FieldDescriptor], row: &'a [Bytes]) -> Self {
        let mut map = HashMap::with_capacity(fields.len());
        for (descriptor, value) in fields.iter().zip(row) {
            map.insert(descriptor.name().to_lowercase(), (value, descriptor));
        }
        Self { map }
    }

    /// Look up a lower-cased binding name.
    pub fn resolve(&self, name: &str) -> Option<(&'a Bytes, &'a FieldDescriptor)> {
        self.map.get(name).copied()
    }
}

/// The decision engine: resolves destination bindings against a row and
/// dispatches each to its kind's coercion rule.
///
/// A binder borrows the table immutably, so concurrent decodes into
/// distinct destination records over a shared table are safe as long as
/// the table is not mutated underneath them.
pub struct RecordBinder<'t, T: Table + ?Sized> {
    table: &'t T,
}

impl<'t, T: Table + ?Sized> RecordBinder<'t, T> {
    /// Bind against the given table's schema and rows.
    pub fn new(table: &'t T) -> Self {
        Self { table }
    }

    /// Decode the row at `index` into `dest`, mutating it in place.
    ///
    /// Under `strict`, a destination binding with no matching table field
    /// fails with [`Error::MissingField`]; otherwise the member keeps its
    /// current value. Decoding is fail-fast: members decoded before an
    /// error remain mutated.
    pub fn decode_row<R: Record>(&self, index: usize, dest: &mut R, strict: bool) -> Result<()> {
        let row = self.table.raw_row(index)?;
        self.decode_into(row, dest, strict)
    }

    /// Decode a caller-supplied row slice into `dest`.
    ///
    /// The slice must be index-aligned with the table's field descriptors;
    /// a length mismatch fails with [`Error::SchemaMismatch`].
    pub fn decode_into<R: Record>(&self, row: &[Bytes], dest: &mut R, strict: bool) -> Result<()> {
        let fields = self.table.fields();
        if row.len() != fields.len() {
            return Err(Error::SchemaMismatch {
                row_len: row.len(),
                field_count: fields.len(),
            });
        }

        let resolver = FieldNameResolver::new(fields, row);
        let schema = DestinationSchema::of::<R>();

        for (index, entry) in schema.entries().iter().enumerate() {
            if entry.ignored {
                continue;
            }

            let Some((value, descriptor)) = resolver.resolve(&entry.name) else {
                if strict {
                    return Err(Error::MissingField {
                        name: entry.name.clone(),
                    });
                }
                continue;
            };

            let target = match dest.field_target(index) {
                Some(FieldTarget::Decode(target)) => target,
                Some(FieldTarget::Unsupported { type_name }) => {
                    return Err(Error::UnsupportedKind {
                        name: entry.name.clone(),
                        type_name,
                    });
                }
                None => {
                    return Err(Error::invalid_destination(format!(
                        "record declares {} bindings but exposes no field at index {}",
                        schema.len(),
                        index,
                    )));
                }
            };

            let text = self.table.trim_padding(value);
            let raw = RawField::new(&entry.name, index, value.as_ref(), text, descriptor);
            target.decode_field(&raw)?;
        }

        Ok(())
    }

    /// Write `record` into a new row of raw field values, index-aligned
    /// with the table's descriptors and padded to each declared width.
    ///
    /// Descriptors no record member binds to yield zero-length cells, as
    /// do members whose encoded value is empty (absent optionals). Values
    /// longer than the declared width are truncated. Under `strict`, a
    /// non-ignored member with no matching descriptor fails with
    /// [`Error::MissingField`].
    pub fn encode_row<R: Record>(&self, record: &R, strict: bool) -> Result<Vec<Bytes>> {
        let fields = self.table.fields();
        let schema = DestinationSchema::of::<R>();

        let mut members = HashMap::with_capacity(schema.len());
        for (index, entry) in schema.entries().iter().enumerate() {
            if !entry.ignored {
                members.insert(entry.name.as_str(), index);
            }
        }

        if strict {
            for entry in schema.entries() {
                if entry.ignored {
                    continue;
                }
                if !fields
                    .iter()
                    .any(|f| f.name().eq_ignore_ascii_case(&entry.name))
                {
                    return Err(Error::MissingField {
                        name: entry.name.clone(),
                    });
                }
            }
        }

        let mut row = Vec::with_capacity(fields.len());
        for descriptor in fields {
            let name = descriptor.name().to_lowercase();
            let value = match members.get(name.as_str()) {
                Some(&index) => match record.field_source(index) {
                    Some(source) => source.encode_field(descriptor)?,
                    None => Vec::new(),
                },
                None => Vec::new(),
            };
            row.push(pad_to_width(value, descriptor.width()));
        }
        Ok(row)
    }
}

/// Right-pad with spaces to the declared width, truncating overlong
/// values. Zero-length values stay zero-length so optional members
/// round-trip to absent.
fn pad_to_width(mut value: Vec<u8>, width: u8) -> Bytes {
    if value.is_empty() {
        return Bytes::new();
    }
    let width = width as usize;
    value.truncate(width);
    value.resize(width, b' ');
    Bytes::from(value)
}
