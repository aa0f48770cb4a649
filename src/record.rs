//! Destination record schema declaration.
//!
//! A destination type declares its bindings statically through the
//! [`Record`] trait: an ordered list of [`FieldBinding`]s plus typed access
//! to the member behind each binding. The [`bind_record!`](crate::bind_record)
//! macro generates the implementation for ordinary structs; hand-written
//! implementations are possible for anything the macro cannot express.

use crate::decode::FieldDecode;
use crate::encode::FieldEncode;

/// One declared member binding of a destination record type.
///
/// The binding name defaults to the member's own name and may be overridden
/// with an alias. The reserved name `"-"` marks the member as ignored by
/// the binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBinding {
    name: &'static str,
}

impl FieldBinding {
    /// Create a binding with the given name.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Binding name as declared.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the member is skipped by both the decode and encode paths.
    pub fn is_ignored(&self) -> bool {
        self.name == "-"
    }
}

/// Typed mutable access to one destination member.
pub enum FieldTarget<'a> {
    /// Member decodes through the registered coercion set.
    Decode(&'a mut dyn FieldDecode),
    /// Member has a type with no registered decoder; binding it to a row
    /// field fails with [`Error::UnsupportedKind`](crate::Error::UnsupportedKind).
    Unsupported { type_name: &'static str },
}

/// A statically-typed destination for row decoding.
///
/// `BINDINGS`, `field_target` and `field_source` must agree: the member
/// behind index `i` of `BINDINGS` is the one the accessors expose for `i`.
/// The binder reports an accessor returning `None` for a declared,
/// non-ignored binding as
/// [`Error::InvalidDestination`](crate::Error::InvalidDestination).
pub trait Record {
    /// Ordered binding declarations, one per member, in declaration order.
    const BINDINGS: &'static [FieldBinding];

    /// Mutable access to the member at `index` in `BINDINGS` order.
    fn field_target(&mut self, index: usize) -> Option<FieldTarget<'_>>;

    /// Read access to the member at `index` for the encode path.
    ///
    /// Members answering `None` are skipped when writing a row.
    fn field_source(&self, index: usize) -> Option<&dyn FieldEncode>;
}

/// One entry of a derived destination schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    /// Lower-cased binding name.
    pub name: String,
    /// Whether the member is skipped entirely.
    pub ignored: bool,
}

/// Ordered, lower-cased view of a record type's bindings.
///
/// Derived fresh on every decode or encode call; nothing is cached across
/// calls.
#[derive(Debug)]
pub struct DestinationSchema {
    entries: Vec<SchemaEntry>,
}

impl DestinationSchema {
    /// Derive the schema of a record type.
    pub fn of<R: Record>() -> Self {
        let entries = R::BINDINGS
            .iter()
            .map(|binding| SchemaEntry {
                name: binding.name().to_lowercase(),
                ignored: binding.is_ignored(),
            })
            .collect();
        Self { entries }
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Number of declared bindings, ignored ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record declares no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Attaches a binder schema to a record type.
///
/// Each listed member binds under its own name by default. A string
/// literal after `=>` overrides the binding name; `=> ignored` excludes the
/// member from both binding directions (its type then does not need to
/// implement the coercion traits).
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dbf_bind_rs::bind_record;
///
/// #[derive(Default)]
/// struct Order {
///     id: u32,
///     shipped: bool,
///     day: NaiveDate,
///     audit: Vec<String>,
/// }
///
/// bind_record!(Order {
///     id,
///     shipped,
///     day => "ship_date",
///     audit => ignored,
/// });
/// ```
#[macro_export]
macro_rules! bind_record {
    ($ty:ty { $( $member:ident $( => $spec:tt )? ),+ $(,)? }) => {
        impl $crate::Record for $ty {
            const BINDINGS: &'static [$crate::FieldBinding] = &[
                $( $crate::FieldBinding::new(
                    $crate::bind_record!(@name $member $( => $spec )?)
                ) ),+
            ];

            fn field_target(
                &mut self,
                index: usize,
            ) -> ::std::option::Option<$crate::FieldTarget<'_>> {
                let mut current = 0usize;
                $(
                    if index == current {
                        return $crate::bind_record!(@target self, $member $( => $spec )?);
                    }
                    current += 1;
                )+
                let _ = current;
                ::std::option::Option::None
            }

            fn field_source(
                &self,
                index: usize,
            ) -> ::std::option::Option<&dyn $crate::FieldEncode> {
                let mut current = 0usize;
                $(
                    if index == current {
                        return $crate::bind_record!(@source self, $member $( => $spec )?);
                    }
                    current += 1;
                )+
                let _ = current;
                ::std::option::Option::None
            }
        }
    };

    (@name $member:ident) => {
        ::std::stringify!($member)
    };
    (@name $member:ident => ignored) => {
        "-"
    };
    (@name $member:ident => $alias:literal) => {
        $alias
    };

    (@target $rec:expr, $member:ident) => {
        ::std::option::Option::Some($crate::FieldTarget::Decode(&mut $rec.$member))
    };
    (@target $rec:expr, $member:ident => ignored) => {
        ::std::option::Option::None
    };
    (@target $rec:expr, $member:ident => $alias:literal) => {
        ::std::option::Option::Some($crate::FieldTarget::Decode(&mut $rec.$member))
    };

    (@source $rec:expr, $member:ident) => {
        ::std::option::Option::Some(&$rec.$member as &dyn $crate::FieldEncode)
    };
    (@source $rec:expr, $member:ident => ignored) => {
        ::std::option::Option::None
    };
    (@source $rec:expr, $member:ident => $alias:literal) => {
        ::std::option::Option::Some(&$rec.$member as &dyn $crate::FieldEncode)
    };
}
