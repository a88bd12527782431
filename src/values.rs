//! Comparable implementations for std, chrono and rust_decimal types

use crate::traits::{Comparable, Record, RecordRef, View};
use crate::types::{TypeDescriptor, TypeKind, NULL_VALUE};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::any::Any;
use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

macro_rules! display_scalars {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Comparable for $ty {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::of::<$ty>(TypeKind::Scalar)
                }

                fn descriptor(&self) -> TypeDescriptor {
                    <Self as Comparable>::type_descriptor()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn value_eq(&self, other: &dyn Comparable) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$ty>()
                        .map_or(false, |other| self == other)
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*

        /// Descriptors of the built-in scalar types
        pub fn builtin_scalar_types() -> Vec<TypeDescriptor> {
            vec![$(<$ty as Comparable>::type_descriptor()),*]
        }
    };
}

display_scalars!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    DateTime<Utc>,
    NaiveDate,
    NaiveDateTime,
);

impl Comparable for Decimal {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Decimal>(TypeKind::Decimal)
    }

    fn descriptor(&self) -> TypeDescriptor {
        <Self as Comparable>::type_descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_eq(&self, other: &dyn Comparable) -> bool {
        other
            .as_any()
            .downcast_ref::<Decimal>()
            .map_or(false, |other| self == other && self.scale() == other.scale())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn view(&self) -> View<'_> {
        View::Decimal(*self)
    }
}

fn elements_eq<'a, T: Comparable>(
    left: impl ExactSizeIterator<Item = &'a T>,
    right: impl ExactSizeIterator<Item = &'a T>,
) -> bool {
    left.len() == right.len() && left.zip(right).all(|(a, b)| a.value_eq(b))
}

fn render_elements<'a, T: Comparable>(elements: impl Iterator<Item = &'a T>) -> String {
    let rendered: Vec<String> = elements.map(Comparable::render).collect();
    format!("[{}]", rendered.join(", "))
}

macro_rules! sequences {
    ($($seq:ident),*) => {
        $(
            impl<T: Comparable> Comparable for $seq<T> {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::of::<$seq<T>>(TypeKind::Sequence)
                }

                fn descriptor(&self) -> TypeDescriptor {
                    <Self as Comparable>::type_descriptor()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn value_eq(&self, other: &dyn Comparable) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$seq<T>>()
                        .map_or(false, |other| elements_eq(self.iter(), other.iter()))
                }

                fn render(&self) -> String {
                    render_elements(self.iter())
                }

                fn view(&self) -> View<'_> {
                    View::Sequence(Box::new(self.iter().map(|e| Some(e as &dyn Comparable))))
                }
            }
        )*
    };
}

sequences!(Vec, VecDeque);

// Sequences whose elements may be absent; `None` aligns as a null element.
macro_rules! optional_sequences {
    ($($seq:ident),*) => {
        $(
            impl<T: Comparable> Comparable for $seq<Option<T>> {
                fn type_descriptor() -> TypeDescriptor {
                    TypeDescriptor::of::<$seq<Option<T>>>(TypeKind::Sequence)
                }

                fn descriptor(&self) -> TypeDescriptor {
                    <Self as Comparable>::type_descriptor()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn value_eq(&self, other: &dyn Comparable) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$seq<Option<T>>>()
                        .map_or(false, |other| {
                            self.len() == other.len()
                                && self.iter().zip(other.iter()).all(|pair| match pair {
                                    (Some(a), Some(b)) => a.value_eq(b),
                                    (None, None) => true,
                                    _ => false,
                                })
                        })
                }

                fn render(&self) -> String {
                    let rendered: Vec<String> = self
                        .iter()
                        .map(|e| {
                            e.as_ref()
                                .map_or_else(|| NULL_VALUE.to_string(), Comparable::render)
                        })
                        .collect();
                    format!("[{}]", rendered.join(", "))
                }

                fn view(&self) -> View<'_> {
                    View::Sequence(Box::new(
                        self.iter().map(|e| e.as_ref().map(|e| e as &dyn Comparable)),
                    ))
                }
            }
        )*
    };
}

optional_sequences!(Vec, VecDeque);

impl<T: Comparable, const N: usize> Comparable for [T; N] {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<[T; N]>(TypeKind::Sequence)
    }

    fn descriptor(&self) -> TypeDescriptor {
        <Self as Comparable>::type_descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_eq(&self, other: &dyn Comparable) -> bool {
        other
            .as_any()
            .downcast_ref::<[T; N]>()
            .map_or(false, |other| elements_eq(self.iter(), other.iter()))
    }

    fn render(&self) -> String {
        render_elements(self.iter())
    }

    fn view(&self) -> View<'_> {
        View::Sequence(Box::new(self.iter().map(|e| Some(e as &dyn Comparable))))
    }
}

// Pointer wrappers are transparent: they report, compare and lay out as the
// value they point to, and the pointee address is what the cycle guard sees.
macro_rules! transparent_pointers {
    ($($ptr:ident),*) => {
        $(
            impl<T: Comparable> Comparable for $ptr<T> {
                fn type_descriptor() -> TypeDescriptor {
                    T::type_descriptor()
                }

                fn descriptor(&self) -> TypeDescriptor {
                    (**self).descriptor()
                }

                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }

                fn value_eq(&self, other: &dyn Comparable) -> bool {
                    (**self).value_eq(other)
                }

                fn render(&self) -> String {
                    (**self).render()
                }

                fn view(&self) -> View<'_> {
                    (**self).view()
                }
            }
        )*
    };
}

transparent_pointers!(Box, Rc, Arc);

impl Comparable for Box<dyn Comparable> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::of::<Box<dyn Comparable>>(TypeKind::Scalar)
    }

    fn descriptor(&self) -> TypeDescriptor {
        (**self).descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn value_eq(&self, other: &dyn Comparable) -> bool {
        (**self).value_eq(other)
    }

    fn render(&self) -> String {
        (**self).render()
    }

    fn view(&self) -> View<'_> {
        (**self).view()
    }
}

/// Shared mutable records, the building block of cyclic graphs
///
/// The borrow is held for as long as the comparator descends into the record.
impl<T: Comparable + Record> Comparable for RefCell<T> {
    fn type_descriptor() -> TypeDescriptor {
        T::type_descriptor()
    }

    fn descriptor(&self) -> TypeDescriptor {
        self.borrow().descriptor()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_eq(&self, other: &dyn Comparable) -> bool {
        match other.as_any().downcast_ref::<RefCell<T>>() {
            Some(other) => self.borrow().value_eq(&*other.borrow()),
            None => false,
        }
    }

    fn render(&self) -> String {
        self.borrow().render()
    }

    fn view(&self) -> View<'_> {
        View::Record(RecordRef::Borrowed(Ref::map(self.borrow(), |record| {
            record as &dyn Record
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scalar_equality_is_type_checked() {
        let a: i32 = 5;
        let b: i64 = 5;

        assert!(a.value_eq(&5i32));
        assert!(!a.value_eq(&b));
        assert_eq!("text".to_string().render(), "text");
    }

    #[test]
    fn test_sequence_view_yields_elements() {
        let values = vec![1u8, 2, 3];

        match values.view() {
            View::Sequence(elements) => assert_eq!(elements.count(), 3),
            _ => panic!("expected a sequence view"),
        }
        assert_eq!(values.render(), "[1, 2, 3]");
    }

    #[test]
    fn test_pointers_are_transparent() {
        let boxed = Box::new(7u32);
        let shared = Rc::new(7u32);

        assert_eq!(boxed.descriptor(), 7u32.descriptor());
        assert!(boxed.value_eq(&*shared));
        assert!(shared.value_eq(&7u32));
    }

    #[test]
    fn test_decimal_value_eq_respects_scale() {
        let a = Decimal::from_str("1.50").unwrap();
        let b = Decimal::from_str("1.5").unwrap();

        assert!(!a.value_eq(&b));
        assert!(a.value_eq(&Decimal::from_str("1.50").unwrap()));
        assert_eq!(a.descriptor().kind(), TypeKind::Decimal);
    }

    #[test]
    fn test_optional_elements() {
        let values = vec![Some(1u32), None, Some(3)];

        assert_eq!(values.render(), "[1, null, 3]");
        assert!(values.value_eq(&vec![Some(1u32), None, Some(3)]));
        assert!(!values.value_eq(&vec![Some(1u32), Some(2), Some(3)]));
        match values.view() {
            View::Sequence(elements) => {
                let present: Vec<bool> = elements.map(|e| e.is_some()).collect();
                assert_eq!(present, vec![true, false, true]);
            }
            _ => panic!("expected a sequence view"),
        };
    }

    #[test]
    fn test_builtin_scalars_listed() {
        let builtins = builtin_scalar_types();
        assert!(builtins.contains(&String::type_descriptor()));
        assert!(builtins.contains(&<DateTime<Utc> as Comparable>::type_descriptor()));
    }
}
