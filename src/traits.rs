//! Field-access capability consumed by the comparator
//!
//! A type takes part in a comparison by implementing [`Comparable`]. Struct-like
//! types additionally implement [`Record`] to enumerate their fields in
//! declaration order. The [`impl_record!`](crate::impl_record),
//! [`impl_scalar!`](crate::impl_scalar) and [`impl_enum!`](crate::impl_enum)
//! macros generate both for the common cases.

use crate::types::TypeDescriptor;
use rust_decimal::Decimal;
use std::any::Any;
use std::cell::Ref;
use std::ops::Deref;

/// A value the comparator can classify, compare and render
pub trait Comparable: Any {
    /// Descriptor of `Self`, used when registering the type
    fn type_descriptor() -> TypeDescriptor
    where
        Self: Sized;

    /// Descriptor of the runtime value
    ///
    /// Transparent wrappers (`Box`, `Rc`, `RefCell`, ...) report the wrapped type.
    fn descriptor(&self) -> TypeDescriptor;

    fn as_any(&self) -> &dyn Any;

    /// The type's own equality, used for value types and the lax fallback
    fn value_eq(&self, other: &dyn Comparable) -> bool;

    /// Text reported in a [`FieldDifference`](crate::FieldDifference)
    fn render(&self) -> String;

    /// Structural view used to pick a comparison strategy
    fn view(&self) -> View<'_> {
        View::Leaf
    }
}

/// Struct-like value exposing its fields in declaration order
pub trait Record {
    /// Names of every field, used to validate ignore registrations
    fn field_names() -> &'static [&'static str]
    where
        Self: Sized;

    /// Current field values
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Iterator over sequence elements; `None` marks an absent element
pub type Elements<'a> = Box<dyn Iterator<Item = Option<&'a dyn Comparable>> + 'a>;

/// How a value is laid out for comparison
pub enum View<'a> {
    Leaf,
    Record(RecordRef<'a>),
    Sequence(Elements<'a>),
    Decimal(Decimal),
}

/// A record reachable either directly or through a live `RefCell` borrow
pub enum RecordRef<'a> {
    Direct(&'a (dyn Record + 'a)),
    Borrowed(Ref<'a, dyn Record + 'a>),
}

impl<'a> Deref for RecordRef<'a> {
    type Target = dyn Record + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            RecordRef::Direct(record) => *record,
            RecordRef::Borrowed(record) => &**record,
        }
    }
}

/// One named field of a record
pub struct Field<'a> {
    name: &'static str,
    value: Option<&'a dyn Comparable>,
}

impl<'a> Field<'a> {
    /// Field holding a value or an `Option` of one
    pub fn new<V: AsFieldValue>(name: &'static str, value: &'a V) -> Self {
        Self {
            name,
            value: value.as_field_value(),
        }
    }

    /// Field whose value is absent
    pub fn absent(name: &'static str) -> Self {
        Self { name, value: None }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> Option<&'a dyn Comparable> {
        self.value
    }
}

/// Conversion from a stored field to an optional comparable value
pub trait AsFieldValue {
    fn as_field_value(&self) -> Option<&dyn Comparable>;
}

impl<T: Comparable> AsFieldValue for T {
    fn as_field_value(&self) -> Option<&dyn Comparable> {
        Some(self)
    }
}

impl<T: Comparable> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> Option<&dyn Comparable> {
        self.as_ref().map(|value| value as &dyn Comparable)
    }
}
