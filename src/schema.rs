//! Field storage kinds and per-column descriptors.
//!
//! A [`FieldDescriptor`] carries the schema metadata of one table column:
//! its name, declared storage kind, width and decimal count. Descriptors
//! are immutable once the table's schema is fixed; the binder only ever
//! reads them.

use std::fmt;

/// Declared storage kind of a table field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Fixed-width text.
    Character,
    /// Text-encoded number, integral or with a declared decimal count.
    Numeric,
    /// Text-encoded floating-point number.
    Float,
    /// Single-character boolean flag.
    Logical,
    /// Calendar date stored as `YYYYMMDD` text.
    Date,
    /// Reference into external memo storage.
    Memo,
}

impl FieldKind {
    /// Create from the one-letter storage code.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'C' => Some(FieldKind::Character),
            'N' => Some(FieldKind::Numeric),
            'F' => Some(FieldKind::Float),
            'L' => Some(FieldKind::Logical),
            'D' => Some(FieldKind::Date),
            'M' => Some(FieldKind::Memo),
            _ => None,
        }
    }

    /// Get the one-letter storage code.
    pub fn code(&self) -> char {
        match self {
            FieldKind::Character => 'C',
            FieldKind::Numeric => 'N',
            FieldKind::Float => 'F',
            FieldKind::Logical => 'L',
            FieldKind::Date => 'D',
            FieldKind::Memo => 'M',
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Character => "Character",
            FieldKind::Numeric => "Numeric",
            FieldKind::Float => "Float",
            FieldKind::Logical => "Logical",
            FieldKind::Date => "Date",
            FieldKind::Memo => "Memo",
        };
        write!(f, "{}", name)
    }
}

/// Schema metadata for one table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    width: u8,
    decimals: u8,
}

impl FieldDescriptor {
    /// Create a descriptor with explicit storage kind and sizing.
    pub fn new(name: impl Into<String>, kind: FieldKind, width: u8, decimals: u8) -> Self {
        Self {
            name: name.into(),
            kind,
            width,
            decimals,
        }
    }

    /// Fixed-width text field.
    pub fn character(name: impl Into<String>, width: u8) -> Self {
        Self::new(name, FieldKind::Character, width, 0)
    }

    /// Text-encoded number field.
    pub fn numeric(name: impl Into<String>, width: u8, decimals: u8) -> Self {
        Self::new(name, FieldKind::Numeric, width, decimals)
    }

    /// Text-encoded floating-point field.
    pub fn float(name: impl Into<String>, width: u8, decimals: u8) -> Self {
        Self::new(name, FieldKind::Float, width, decimals)
    }

    /// Boolean flag field, always one character wide.
    pub fn logical(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Logical, 1, 0)
    }

    /// Calendar date field, always eight characters wide.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date, 8, 0)
    }

    /// Field name as declared in the table schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared storage kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Declared field width in bytes.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Declared decimal count (numeric and float fields).
    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_round_trip() {
        for kind in [
            FieldKind::Character,
            FieldKind::Numeric,
            FieldKind::Float,
            FieldKind::Logical,
            FieldKind::Date,
            FieldKind::Memo,
        ] {
            assert_eq!(FieldKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(FieldKind::from_code('X'), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", FieldKind::Logical), "Logical");
        assert_eq!(format!("{}", FieldKind::Numeric), "Numeric");
    }

    #[test]
    fn test_descriptor_constructors() {
        let logical = FieldDescriptor::logical("flag");
        assert_eq!(logical.name(), "flag");
        assert_eq!(logical.kind(), FieldKind::Logical);
        assert_eq!(logical.width(), 1);

        let date = FieldDescriptor::date("created");
        assert_eq!(date.width(), 8);

        let float = FieldDescriptor::float("price", 8, 2);
        assert_eq!(float.width(), 8);
        assert_eq!(float.decimals(), 2);

        let text = FieldDescriptor::character("note", 10);
        assert_eq!(text.kind(), FieldKind::Character);
        assert_eq!(text.width(), 10);
    }
}
