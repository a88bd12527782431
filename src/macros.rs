//! Macros generating `Comparable` and `Record` implementations

/// Implement [`Comparable`](crate::Comparable) and [`Record`](crate::Record) for a struct
///
/// Fields are listed in declaration order. A field may hold any comparable
/// value or an `Option` of one. The struct must implement `PartialEq`, which
/// backs the lax equality fallback. Values render field by field, with
/// `Type@0xaddress` standing in for a record already being rendered.
///
/// ```
/// use objdiff::impl_record;
///
/// #[derive(Debug, PartialEq)]
/// struct Line {
///     sku: String,
///     quantity: u32,
///     note: Option<String>,
/// }
///
/// impl_record!(Line { sku, quantity, note });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Comparable for $ty {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::of::<$ty>($crate::TypeKind::Record)
            }

            fn descriptor(&self) -> $crate::TypeDescriptor {
                <Self as $crate::Comparable>::type_descriptor()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn value_eq(&self, other: &dyn $crate::Comparable) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$ty>()
                    .map_or(false, |other| self == other)
            }

            fn render(&self) -> String {
                $crate::render_value(self)
            }

            fn view(&self) -> $crate::View<'_> {
                $crate::View::Record($crate::RecordRef::Direct(self))
            }
        }

        impl $crate::Record for $ty {
            fn field_names() -> &'static [&'static str] {
                &[$(stringify!($field)),*]
            }

            fn fields(&self) -> Vec<$crate::Field<'_>> {
                vec![$($crate::Field::new(stringify!($field), &self.$field)),*]
            }
        }
    };
}

/// Implement [`Comparable`](crate::Comparable) for atomic types compared by equality
///
/// Values render through `Debug`.
#[macro_export]
macro_rules! impl_scalar {
    ($($ty:ty),+ $(,)?) => {
        $($crate::__impl_atomic!($ty, $crate::TypeKind::Scalar);)+
    };
}

/// Implement [`Comparable`](crate::Comparable) for enumerations
///
/// Enumerations are atomic: they can be value types but never descend-into types.
#[macro_export]
macro_rules! impl_enum {
    ($($ty:ty),+ $(,)?) => {
        $($crate::__impl_atomic!($ty, $crate::TypeKind::Enumeration);)+
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __impl_atomic {
    ($ty:ty, $kind:expr) => {
        impl $crate::Comparable for $ty {
            fn type_descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::of::<$ty>($kind)
            }

            fn descriptor(&self) -> $crate::TypeDescriptor {
                <Self as $crate::Comparable>::type_descriptor()
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn value_eq(&self, other: &dyn $crate::Comparable) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$ty>()
                    .map_or(false, |other| self == other)
            }

            fn render(&self) -> String {
                format!("{:?}", self)
            }
        }
    };
}

/// Assert that two objects have no field differences
///
/// Panics with every difference listed, or with the comparison error.
#[macro_export]
macro_rules! assert_no_differences {
    ($diff:expr, $left:expr, $right:expr $(,)?) => {
        match $diff.report($left, $right) {
            Ok(report) => {
                if !report.is_identical() {
                    panic!("{}", report.describe());
                }
            }
            Err(err) => panic!("comparison failed: {}", err),
        }
    };
}
