//! Formatting record members back into row field values.
//!
//! The write direction is symmetric to decoding but simpler: each member
//! produces the unpadded text bytes for its cell and the binder pads the
//! result to the descriptor's declared width. No storage-kind enforcement
//! happens on this path.

use bytes::Bytes;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::Result;
use crate::schema::FieldDescriptor;

/// A record member kind the binder can write back into a row cell.
///
/// An empty result is stored as a zero-length cell, which reads back as
/// absent through optional destinations.
pub trait FieldEncode {
    /// Produce the unpadded value bytes for one cell.
    fn encode_field(&self, descriptor: &FieldDescriptor) -> Result<Vec<u8>>;
}

impl FieldEncode for bool {
    /// `t` or `f`, matching the truthy set the decoder accepts.
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(if *self { b"t".to_vec() } else { b"f".to_vec() })
    }
}

impl FieldEncode for String {
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(self.as_bytes().to_vec())
    }
}

macro_rules! impl_encode_int {
    ($($ty:ty),+) => {$(
        impl FieldEncode for $ty {
            fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
                Ok(self.to_string().into_bytes())
            }
        }
    )+};
}

impl_encode_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_encode_float {
    ($($ty:ty),+) => {$(
        impl FieldEncode for $ty {
            /// Fixed-point text at the descriptor's declared decimal count.
            fn encode_field(&self, descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
                Ok(format!("{:.*}", descriptor.decimals() as usize, self).into_bytes())
            }
        }
    )+};
}

impl_encode_float!(f32, f64);

impl FieldEncode for NaiveDate {
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(self.format("%Y%m%d").to_string().into_bytes())
    }
}

impl FieldEncode for NaiveDateTime {
    /// Only the date portion is stored; any time of day is dropped.
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(self.format("%Y%m%d").to_string().into_bytes())
    }
}

impl FieldEncode for Vec<u8> {
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl FieldEncode for Bytes {
    fn encode_field(&self, _descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl<T: FieldEncode> FieldEncode for Option<T> {
    /// Absent members produce a zero-length cell.
    fn encode_field(&self, descriptor: &FieldDescriptor) -> Result<Vec<u8>> {
        match self {
            Some(value) => value.encode_field(descriptor),
            None => Ok(Vec::new()),
        }
    }
}
