//! Per-kind coercion rules for destination members.
//!
//! Every supported destination kind is one [`FieldDecode`] implementation,
//! selected at compile time by the destination member's type. Each rule
//! first checks the descriptor's declared storage kind where the format
//! demands one, then coerces the padding-trimmed text. The opaque-bytes
//! rules are the exception: they consume the raw buffer verbatim, padding
//! included.

use std::borrow::Cow;

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::schema::{FieldDescriptor, FieldKind};

/// One resolved row cell, handed to a kind decoder.
///
/// `bytes` is the verbatim padded buffer; `text` is the padding-trimmed
/// view produced by the owning table. `name` and `index` identify the
/// destination field for diagnostics.
#[derive(Debug)]
pub struct RawField<'a> {
    name: &'a str,
    index: usize,
    bytes: &'a [u8],
    text: Cow<'a, str>,
    descriptor: &'a FieldDescriptor,
}

impl<'a> RawField<'a> {
    /// Bundle one resolved cell with its destination field identity.
    pub fn new(
        name: &'a str,
        index: usize,
        bytes: &'a [u8],
        text: Cow<'a, str>,
        descriptor: &'a FieldDescriptor,
    ) -> Self {
        Self {
            name,
            index,
            bytes,
            text,
            descriptor,
        }
    }

    /// Binding name of the destination field.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Positional index of the destination field.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw buffer, padding included.
    pub fn bytes(&self) -> &[u8] {
        self.bytes
    }

    /// Padding-trimmed text view of the buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Descriptor of the resolved table field.
    pub fn descriptor(&self) -> &FieldDescriptor {
        self.descriptor
    }

    /// Check the descriptor's declared storage kind against the kind the
    /// destination requires.
    pub fn expect_kind(&self, expected: FieldKind) -> Result<()> {
        if self.descriptor.kind() != expected {
            return Err(Error::KindMismatch {
                name: self.name.to_string(),
                index: self.index,
                expected,
                actual: self.descriptor.kind(),
            });
        }
        Ok(())
    }

    /// Build a parse error tagged with this field's name and index.
    pub fn parse_error(&self, message: impl Into<String>) -> Error {
        Error::parse(self.name, self.index, message)
    }
}

/// A destination member kind the binder can decode into.
///
/// Implemented for `bool`, `String`, the primitive float and integer
/// types, `Option<T>` over any other implementation, [`chrono`] calendar
/// dates and opaque byte buffers. The set is closed by design: anything
/// else must be declared `ignored` or exposed as
/// [`FieldTarget::Unsupported`](crate::FieldTarget::Unsupported).
pub trait FieldDecode {
    /// Coerce one raw row cell into `self`.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()>;
}

impl FieldDecode for bool {
    /// True iff the trimmed text is exactly one of `y`, `j`, `1`, `t`;
    /// anything else, empty text included, is false.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        raw.expect_kind(FieldKind::Logical)?;
        *self = matches!(raw.text(), "y" | "j" | "1" | "t");
        Ok(())
    }
}

impl FieldDecode for String {
    /// Trimmed text assigned verbatim. Accepts any storage kind; the
    /// asymmetry with the other rules matches the original binder.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        *self = raw.text().to_owned();
        Ok(())
    }
}

macro_rules! impl_decode_float {
    ($($ty:ty),+) => {$(
        impl FieldDecode for $ty {
            /// Base-10 float at this bit width. Empty text leaves the
            /// member unchanged.
            fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
                raw.expect_kind(FieldKind::Float)?;
                let text = raw.text();
                if text.is_empty() {
                    return Ok(());
                }
                *self = text.parse::<$ty>().map_err(|err| {
                    raw.parse_error(format!(
                        "cannot parse '{}' as {}: {}",
                        text,
                        stringify!($ty),
                        err
                    ))
                })?;
                Ok(())
            }
        }
    )+};
}

impl_decode_float!(f32, f64);

/// Split off an optional sign and a `0x`/`0o`/`0b` radix prefix.
fn radix_split(text: &str) -> (bool, u32, &str) {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(d) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, d)
    } else if let Some(d) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        (8, d)
    } else if let Some(d) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2, d)
    } else {
        (10, rest)
    };
    (negative, radix, digits)
}

macro_rules! impl_decode_int {
    ($($ty:ty),+) => {$(
        impl FieldDecode for $ty {
            /// Base-10 or radix-prefixed integer at this bit width. Empty
            /// text leaves the member unchanged.
            fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
                raw.expect_kind(FieldKind::Numeric)?;
                let text = raw.text();
                if text.is_empty() {
                    return Ok(());
                }
                let (negative, radix, digits) = radix_split(text);
                let parsed = if radix == 10 {
                    text.parse::<$ty>()
                } else if negative {
                    <$ty>::from_str_radix(&format!("-{}", digits), radix)
                } else {
                    <$ty>::from_str_radix(digits, radix)
                };
                *self = parsed.map_err(|err| {
                    raw.parse_error(format!(
                        "cannot parse '{}' as {}: {}",
                        text,
                        stringify!($ty),
                        err
                    ))
                })?;
                Ok(())
            }
        }
    )+};
}

impl_decode_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Shared `YYYYMMDD` rule for the calendar-date destinations.
///
/// Returns `None` for empty text (member stays unchanged).
fn decode_calendar_date(raw: &RawField<'_>) -> Result<Option<NaiveDate>> {
    raw.expect_kind(FieldKind::Date)?;
    let text = raw.text();
    if text.is_empty() {
        return Ok(None);
    }
    if text.len() != 8 || !text.is_ascii() {
        return Err(raw.parse_error(format!("'{}' is not a valid date", text)));
    }

    let year: i32 = text[0..4]
        .parse()
        .map_err(|err| raw.parse_error(format!("cannot parse '{}' as year: {}", &text[0..4], err)))?;
    let month: u32 = text[4..6]
        .parse()
        .map_err(|err| raw.parse_error(format!("cannot parse '{}' as month: {}", &text[4..6], err)))?;
    let day: u32 = text[6..8]
        .parse()
        .map_err(|err| raw.parse_error(format!("cannot parse '{}' as day: {}", &text[6..8], err)))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| raw.parse_error(format!("'{}' is not a valid calendar date", text)))?;
    Ok(Some(date))
}

impl FieldDecode for NaiveDate {
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        if let Some(date) = decode_calendar_date(raw)? {
            *self = date;
        }
        Ok(())
    }
}

impl FieldDecode for NaiveDateTime {
    /// Date fields carry no time portion; the stored day decodes to
    /// midnight.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        if let Some(date) = decode_calendar_date(raw)? {
            *self = date.and_time(NaiveTime::MIN);
        }
        Ok(())
    }
}

impl FieldDecode for Vec<u8> {
    /// Raw buffer assigned verbatim, padding included. Accepts any
    /// storage kind.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        *self = raw.bytes().to_vec();
        Ok(())
    }
}

impl FieldDecode for Bytes {
    /// Raw buffer copied verbatim, padding included. Accepts any storage
    /// kind.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        *self = Bytes::copy_from_slice(raw.bytes());
        Ok(())
    }
}

impl<T: FieldDecode + Default> FieldDecode for Option<T> {
    /// Absence is signalled by a zero-length raw buffer, not by
    /// trimmed-empty text: a zero-length cell clears the member regardless
    /// of its prior value. Anything else decodes into the inner value,
    /// allocating it first when absent. Nesting composes.
    fn decode_field(&mut self, raw: &RawField<'_>) -> Result<()> {
        if raw.bytes().is_empty() {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).decode_field(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::default_trim_padding;

    fn raw<'a>(descriptor: &'a FieldDescriptor, bytes: &'a [u8]) -> RawField<'a> {
        RawField::new(
            descriptor.name(),
            0,
            bytes,
            default_trim_padding(bytes),
            descriptor,
        )
    }

    #[test]
    fn test_decode_bool_truthy_values() {
        let descr = FieldDescriptor::logical("flag");
        for text in [&b"y"[..], b"j", b"1", b"t"] {
            let mut value = false;
            value.decode_field(&raw(&descr, text)).unwrap();
            assert!(value, "expected {:?} to decode as true", text);
        }
    }

    #[test]
    fn test_decode_bool_falsy_and_empty() {
        let descr = FieldDescriptor::logical("flag");
        for text in [&b"n"[..], b"T", b"Y", b"0", b" ", b""] {
            let mut value = true;
            value.decode_field(&raw(&descr, text)).unwrap();
            assert!(!value, "expected {:?} to decode as false", text);
        }
    }

    #[test]
    fn test_decode_bool_kind_mismatch() {
        let descr = FieldDescriptor::character("flag", 1);
        let mut value = false;
        let err = value.decode_field(&raw(&descr, b"t")).unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch {
                expected: FieldKind::Logical,
                actual: FieldKind::Character,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_string_accepts_any_kind() {
        let mut value = String::new();

        let character = FieldDescriptor::character("name", 10);
        value.decode_field(&raw(&character, b"hello     ")).unwrap();
        assert_eq!(value, "hello");

        let numeric = FieldDescriptor::numeric("name", 8, 0);
        value.decode_field(&raw(&numeric, b"     100")).unwrap();
        assert_eq!(value, "100");
    }

    #[test]
    fn test_decode_float_basic() {
        let descr = FieldDescriptor::float("price", 8, 2);
        let mut value = 0.0f64;
        value.decode_field(&raw(&descr, b"1.40    ")).unwrap();
        assert_eq!(value, 1.4);
    }

    #[test]
    fn test_decode_float_empty_leaves_unchanged() {
        let descr = FieldDescriptor::float("price", 8, 2);
        let mut value = 9.5f32;
        value.decode_field(&raw(&descr, b"        ")).unwrap();
        assert_eq!(value, 9.5);
    }

    #[test]
    fn test_decode_float_malformed() {
        let descr = FieldDescriptor::float("price", 8, 2);
        let mut value = 0.0f64;
        let err = value.decode_field(&raw(&descr, b"1.4.0   ")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_decode_float_requires_float_kind() {
        let descr = FieldDescriptor::numeric("price", 8, 2);
        let mut value = 0.0f64;
        let err = value.decode_field(&raw(&descr, b"1.40")).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { .. }));
    }

    #[test]
    fn test_decode_int_basic() {
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value = 0i64;
        value.decode_field(&raw(&descr, b"     100")).unwrap();
        assert_eq!(value, 100);

        let mut negative = 0i32;
        negative.decode_field(&raw(&descr, b"-42     ")).unwrap();
        assert_eq!(negative, -42);
    }

    #[test]
    fn test_decode_int_prefixed_radix() {
        let descr = FieldDescriptor::numeric("count", 8, 0);

        let mut hex = 0i64;
        hex.decode_field(&raw(&descr, b"0x1f")).unwrap();
        assert_eq!(hex, 31);

        let mut octal = 0u32;
        octal.decode_field(&raw(&descr, b"0o17")).unwrap();
        assert_eq!(octal, 15);

        let mut binary = 0u8;
        binary.decode_field(&raw(&descr, b"0b101")).unwrap();
        assert_eq!(binary, 5);

        let mut negative_hex = 0i16;
        negative_hex.decode_field(&raw(&descr, b"-0x10")).unwrap();
        assert_eq!(negative_hex, -16);
    }

    #[test]
    fn test_decode_int_empty_leaves_unchanged() {
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value = 7i64;
        value.decode_field(&raw(&descr, b"        ")).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_decode_uint_rejects_negative() {
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value = 0u64;
        let err = value.decode_field(&raw(&descr, b"-5")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_decode_int_requires_numeric_kind() {
        let descr = FieldDescriptor::character("count", 8);
        let mut value = 0i64;
        let err = value.decode_field(&raw(&descr, b"100")).unwrap_err();
        assert!(matches!(
            err,
            Error::KindMismatch {
                expected: FieldKind::Numeric,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_date_basic() {
        let descr = FieldDescriptor::date("created");
        let mut value = NaiveDate::default();
        value.decode_field(&raw(&descr, b"20200209")).unwrap();
        assert_eq!(value, NaiveDate::from_ymd_opt(2020, 2, 9).unwrap());
    }

    #[test]
    fn test_decode_date_wrong_length() {
        let descr = FieldDescriptor::date("created");
        let mut value = NaiveDate::default();
        let err = value.decode_field(&raw(&descr, b"202002  ")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_decode_date_invalid_calendar_day() {
        let descr = FieldDescriptor::date("created");
        let mut value = NaiveDate::default();
        let err = value.decode_field(&raw(&descr, b"20200230")).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_decode_date_empty_leaves_unchanged() {
        let descr = FieldDescriptor::date("created");
        let seed = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let mut value = seed;
        value.decode_field(&raw(&descr, b"        ")).unwrap();
        assert_eq!(value, seed);
    }

    #[test]
    fn test_decode_date_requires_date_kind() {
        let descr = FieldDescriptor::character("created", 8);
        let mut value = NaiveDate::default();
        let err = value.decode_field(&raw(&descr, b"20200209")).unwrap_err();
        assert!(matches!(err, Error::KindMismatch { .. }));
    }

    #[test]
    fn test_decode_datetime_midnight() {
        let descr = FieldDescriptor::date("created");
        let mut value = NaiveDateTime::default();
        value.decode_field(&raw(&descr, b"20200209")).unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 2, 9)
            .unwrap()
            .and_time(NaiveTime::MIN);
        assert_eq!(value, expected);
    }

    #[test]
    fn test_decode_raw_keeps_padding() {
        let descr = FieldDescriptor::character("blob", 6);
        let mut value = Vec::new();
        value.decode_field(&raw(&descr, b"ab    ")).unwrap();
        assert_eq!(value, b"ab    ");

        let mut bytes = Bytes::new();
        bytes.decode_field(&raw(&descr, b"ab    ")).unwrap();
        assert_eq!(bytes.as_ref(), b"ab    ");
    }

    #[test]
    fn test_decode_option_clears_on_zero_length() {
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value = Some(42i64);
        value.decode_field(&raw(&descr, b"")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_decode_option_spaces_are_not_absence() {
        // Padded-but-blank is distinct from zero-length: the inner decoder
        // runs and leaves the allocated default in place.
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value: Option<i64> = None;
        value.decode_field(&raw(&descr, b"        ")).unwrap();
        assert_eq!(value, Some(0));
    }

    #[test]
    fn test_decode_option_decodes_inner() {
        let descr = FieldDescriptor::numeric("count", 8, 0);
        let mut value: Option<i64> = None;
        value.decode_field(&raw(&descr, b"     100")).unwrap();
        assert_eq!(value, Some(100));
    }

    #[test]
    fn test_decode_nested_option() {
        let descr = FieldDescriptor::numeric("count", 8, 0);

        let mut value: Option<Option<i64>> = None;
        value.decode_field(&raw(&descr, b"7")).unwrap();
        assert_eq!(value, Some(Some(7)));

        value.decode_field(&raw(&descr, b"")).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_radix_split() {
        assert_eq!(radix_split("100"), (false, 10, "100"));
        assert_eq!(radix_split("-100"), (true, 10, "100"));
        assert_eq!(radix_split("0x1F"), (false, 16, "1F"));
        assert_eq!(radix_split("+0b11"), (false, 2, "11"));
        assert_eq!(radix_split("-0o7"), (true, 8, "7"));
    }
}
