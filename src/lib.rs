//! Typed record binding for dBASE-style tabular rows.
//!
//! Converts a row of fixed-width, space-padded, text-encoded field values
//! into a statically-typed record, and writes records back into rows. The
//! destination type declares its bindings through the [`Record`] trait
//! (usually via the [`bind_record!`] macro); the binder resolves each
//! binding against the row's field descriptors case-insensitively and
//! dispatches to the coercion rule matching the member's type.
//!
//! File I/O, header parsing and character-set handling stay with the
//! table that owns the rows; the [`Table`] trait is the whole contract
//! the binder needs from it.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use dbf_bind_rs::{bind_record, FieldDescriptor, MemoryTable, Table};
//!
//! #[derive(Default)]
//! struct Reading {
//!     sensor: String,
//!     value: f64,
//!     day: NaiveDate,
//! }
//!
//! bind_record!(Reading {
//!     sensor,
//!     value,
//!     day => "read_on",
//! });
//!
//! fn main() -> dbf_bind_rs::Result<()> {
//!     let mut table = MemoryTable::new(vec![
//!         FieldDescriptor::character("sensor", 10),
//!         FieldDescriptor::float("value", 8, 2),
//!         FieldDescriptor::date("read_on"),
//!     ]);
//!     let row = table.add_row();
//!     table.set_field_value(row, "sensor", "basement")?;
//!     table.set_field_value(row, "value", "21.50")?;
//!     table.set_field_value(row, "read_on", "20240117")?;
//!
//!     let mut reading = Reading::default();
//!     table.decode_row(row, &mut reading, true)?;
//!
//!     assert_eq!(reading.sensor, "basement");
//!     assert_eq!(reading.value, 21.5);
//!     assert_eq!(reading.day, NaiveDate::from_ymd_opt(2024, 1, 17).unwrap());
//!     Ok(())
//! }
//! ```

pub mod binder;
pub mod decode;
pub mod encode;
pub mod error;
pub mod record;
pub mod schema;
pub mod table;

// Re-export main types
pub use binder::{FieldNameResolver, RecordBinder};
pub use decode::{FieldDecode, RawField};
pub use encode::FieldEncode;
pub use error::{Error, Result};
pub use record::{DestinationSchema, FieldBinding, FieldTarget, Record, SchemaEntry};
pub use schema::{FieldDescriptor, FieldKind};
pub use table::{default_trim_padding, MemoryTable, Table};
