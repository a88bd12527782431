//! The recursive comparator and its builder

use crate::classifier::{classify, Classification, ClassificationPolicy, Lax, Mode, Strict};
use crate::decimal::DecimalPolicy;
use crate::error::{CompareError, ConfigError};
use crate::guard::{DescentStack, ObjectIdentity};
use crate::logging::{DiffEvent, DiffLogger, LogEntry, LogLevel};
use crate::registry::{IgnoreSet, TypeSet};
use crate::render::render_value;
use crate::report::DiffReport;
use crate::sequence::{self, ElementComparator};
use crate::settings::DiffSettings;
use crate::traits::{Comparable, Record, View};
use crate::types::{ComparisonPath, FieldDifference, TypeDescriptor, TypeKind, NULL_VALUE};
use crate::values::builtin_scalar_types;
use rust_decimal::Decimal;

/// Comparator with unregistered types rejected and cycle detection on
pub type StrictObjectDiff = ObjectDiff<Strict>;

/// Comparator with unregistered types compared by equality
pub type LaxObjectDiff = ObjectDiff<Lax>;

/// Structural comparator reporting every field-level difference
///
/// Configure once, then compare any number of object pairs. Configuration is
/// read-only during a comparison, so a comparator shared across threads is
/// safe as long as the compared values are.
#[derive(Debug, Clone, Default)]
pub struct ObjectDiff<P: ClassificationPolicy> {
    descend_into: TypeSet,
    ignored: IgnoreSet,
    decimal: DecimalPolicy,
    policy: P,
}

impl<P: ClassificationPolicy + Default> ObjectDiff<P> {
    /// Create a comparator with default decimal policy and empty registries
    pub fn new() -> Self {
        Self::with_policy(P::default())
    }

    pub fn builder() -> ObjectDiffBuilder<P> {
        ObjectDiffBuilder::new()
    }
}

impl<P: ClassificationPolicy> ObjectDiff<P> {
    pub fn with_policy(policy: P) -> Self {
        Self {
            descend_into: TypeSet::new(),
            ignored: IgnoreSet::new(),
            decimal: DecimalPolicy::default(),
            policy,
        }
    }

    /// Whether unregistered types are rejected or compared by equality
    pub fn mode(&self) -> Mode {
        self.policy.mode()
    }

    /// The classification policy, holding the value types in strict mode
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Normalization applied before comparing decimals
    pub fn decimal_policy(&self) -> &DecimalPolicy {
        &self.decimal
    }

    /// Types compared field by field
    pub fn descend_into_types(&self) -> &TypeSet {
        &self.descend_into
    }

    /// Fields excluded from every comparison
    pub fn ignored_fields(&self) -> &IgnoreSet {
        &self.ignored
    }

    /// Compare fields of `T` recursively instead of by equality
    ///
    /// Only record types can be descended into; enumerations in particular
    /// are atomic and rejected with `InvalidConfiguration`.
    pub fn register_descend_into<T: Comparable>(&mut self) -> Result<(), ConfigError> {
        let descriptor = T::type_descriptor();
        match descriptor.kind() {
            TypeKind::Record => {}
            TypeKind::Enumeration => {
                return Err(ConfigError::InvalidConfiguration {
                    reason: format!("cannot descend into enumeration type {}", descriptor),
                })
            }
            kind => {
                return Err(ConfigError::InvalidConfiguration {
                    reason: format!("cannot descend into {} type {}", kind, descriptor),
                })
            }
        }
        if self.policy.is_value_type(&descriptor) {
            return Err(ConfigError::InvalidConfiguration {
                reason: format!("{} is already registered as a value type", descriptor),
            });
        }
        self.descend_into.insert_type(descriptor);
        Ok(())
    }

    /// Register a descend-into type by its fully-qualified name
    pub fn register_descend_into_name(
        &mut self,
        name: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let name = name.into();
        if self.policy.is_value_type_name(&name) {
            return Err(both_sets(&name));
        }
        self.descend_into.insert_name(name);
        Ok(())
    }

    /// Stop descending into `T`; returns false if it was not registered
    pub fn unregister_descend_into<T: Comparable>(&mut self) -> bool {
        self.descend_into.remove_type(&T::type_descriptor())
    }

    /// Stop descending into the named type, however it was registered
    pub fn unregister_descend_into_name(&mut self, name: &str) -> bool {
        self.descend_into.remove_name(name)
    }

    /// Exclude a field of `T` from every comparison
    pub fn ignore_field<T: Comparable + Record>(&mut self, field: &str) -> Result<(), ConfigError> {
        self.ignored.insert::<T>(field)
    }

    pub fn set_ignore_decimal_trailing_zeros(&mut self, ignore: bool) {
        self.decimal.ignore_trailing_zeros = ignore;
    }

    pub fn set_max_decimal_scale(&mut self, scale: Option<u32>) -> Result<(), ConfigError> {
        DecimalPolicy::check_scale(scale)?;
        self.decimal.max_scale = scale;
        Ok(())
    }

    /// Whether two decimals are equal under the configured policy
    pub fn decimals_equal(&self, a: Decimal, b: Decimal) -> bool {
        self.decimal.equal(a, b)
    }

    /// Apply name-based settings on top of the current configuration
    ///
    /// The settings are validated as a whole first; on error nothing is applied.
    pub fn apply_settings(&mut self, settings: &DiffSettings) -> Result<(), ConfigError> {
        DecimalPolicy::check_scale(settings.decimal.max_scale)?;
        for name in &settings.value_types {
            if self.descend_into.contains_name(name) || settings.descend_into.contains(name) {
                return Err(both_sets(name));
            }
            self.policy.check_value_type_name(name)?;
        }
        for name in &settings.descend_into {
            if self.policy.is_value_type_name(name) {
                return Err(both_sets(name));
            }
        }

        for name in &settings.value_types {
            self.policy.add_value_type_name(name)?;
        }
        for name in &settings.descend_into {
            self.descend_into.insert_name(name.clone());
        }
        self.decimal = settings.decimal;
        Ok(())
    }

    /// Export the name-addressable configuration
    pub fn settings(&self) -> DiffSettings {
        DiffSettings {
            mode: Some(self.policy.mode()),
            decimal: self.decimal,
            descend_into: self.descend_into.names(),
            value_types: self.policy.value_type_names(),
        }
    }

    /// Compare two objects of the same type field by field
    pub fn compare<T: Comparable>(
        &self,
        object1: &T,
        object2: &T,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        self.compare_dyn(Some(object1), Some(object2))
    }

    /// Compare two possibly absent objects whose types are only known at runtime
    ///
    /// Fails with `NullInput` if either is absent and `TypeMismatch` if their
    /// runtime types differ.
    pub fn compare_dyn(
        &self,
        object1: Option<&dyn Comparable>,
        object2: Option<&dyn Comparable>,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        Walker::new(self, None).run(object1, object2)
    }

    /// Compare two objects, recording the traversal into `logger`
    pub fn compare_logged<T: Comparable>(
        &self,
        object1: &T,
        object2: &T,
        logger: &mut DiffLogger,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        Walker::new(self, Some(logger)).run(Some(object1), Some(object2))
    }

    /// Compare two objects and wrap the differences in a report
    pub fn report<T: Comparable>(
        &self,
        object1: &T,
        object2: &T,
    ) -> Result<DiffReport, CompareError> {
        self.compare(object1, object2).map(DiffReport::new)
    }
}

impl ObjectDiff<Strict> {
    /// Compare `T` with its own equality
    pub fn register_value_type<T: Comparable>(&mut self) -> Result<(), ConfigError> {
        let descriptor = T::type_descriptor();
        if self.descend_into.contains(&descriptor) {
            return Err(ConfigError::InvalidConfiguration {
                reason: format!("{} is already registered as a descend-into type", descriptor),
            });
        }
        self.policy.add_value_type(descriptor)
    }

    /// Register a value type by its fully-qualified name
    pub fn register_value_type_name(&mut self, name: &str) -> Result<(), ConfigError> {
        if self.descend_into.contains_name(name) {
            return Err(ConfigError::InvalidConfiguration {
                reason: format!("{} is already registered as a descend-into type", name),
            });
        }
        self.policy.add_value_type_name(name)
    }

    /// Register every built-in scalar (numbers, text, bool, char, chrono dates)
    ///
    /// Fails without registering anything if one of them is a descend-into type.
    pub fn register_builtin_value_types(&mut self) -> Result<(), ConfigError> {
        let builtins = builtin_scalar_types();
        if let Some(taken) = builtins.iter().find(|d| self.descend_into.contains(d)) {
            return Err(ConfigError::InvalidConfiguration {
                reason: format!("{} is already registered as a descend-into type", taken),
            });
        }
        for descriptor in builtins {
            self.policy.add_value_type(descriptor)?;
        }
        Ok(())
    }
}

fn both_sets(name: &str) -> ConfigError {
    ConfigError::InvalidConfiguration {
        reason: format!("{} cannot be both a value and a descend-into type", name),
    }
}

/// Builder for [`ObjectDiff`]
///
/// The first configuration error is kept and returned from [`build`](Self::build).
pub struct ObjectDiffBuilder<P: ClassificationPolicy> {
    state: Result<ObjectDiff<P>, ConfigError>,
}

impl<P: ClassificationPolicy + Default> ObjectDiffBuilder<P> {
    pub fn new() -> Self {
        Self {
            state: Ok(ObjectDiff::new()),
        }
    }
}

impl<P: ClassificationPolicy + Default> Default for ObjectDiffBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ClassificationPolicy> ObjectDiffBuilder<P> {
    fn apply(
        mut self,
        step: impl FnOnce(&mut ObjectDiff<P>) -> Result<(), ConfigError>,
    ) -> Self {
        self.state = self.state.and_then(|mut diff| {
            step(&mut diff)?;
            Ok(diff)
        });
        self
    }

    pub fn with_descend_into<T: Comparable>(self) -> Self {
        self.apply(|diff| diff.register_descend_into::<T>())
    }

    pub fn with_descend_into_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.apply(move |diff| diff.register_descend_into_name(name))
    }

    pub fn with_ignored_field<T: Comparable + Record>(self, field: &str) -> Self {
        self.apply(|diff| diff.ignore_field::<T>(field))
    }

    pub fn with_trailing_zeros_ignored(self, ignore: bool) -> Self {
        self.apply(|diff| {
            diff.set_ignore_decimal_trailing_zeros(ignore);
            Ok(())
        })
    }

    pub fn with_max_decimal_scale(self, scale: u32) -> Self {
        self.apply(|diff| diff.set_max_decimal_scale(Some(scale)))
    }

    pub fn with_settings(self, settings: &DiffSettings) -> Self {
        self.apply(|diff| diff.apply_settings(settings))
    }

    pub fn build(self) -> Result<ObjectDiff<P>, ConfigError> {
        self.state
    }
}

impl ObjectDiffBuilder<Strict> {
    pub fn with_value_type<T: Comparable>(self) -> Self {
        self.apply(|diff| diff.register_value_type::<T>())
    }

    pub fn with_builtin_value_types(self) -> Self {
        self.apply(|diff| diff.register_builtin_value_types())
    }
}

/// State of one comparison call
struct Walker<'c, 'l, P: ClassificationPolicy> {
    diff: &'c ObjectDiff<P>,
    stack: DescentStack,
    logger: Option<&'l mut DiffLogger>,
}

impl<'c, 'l, P: ClassificationPolicy> Walker<'c, 'l, P> {
    fn new(diff: &'c ObjectDiff<P>, logger: Option<&'l mut DiffLogger>) -> Self {
        Self {
            diff,
            stack: DescentStack::new(),
            logger,
        }
    }

    fn run(
        mut self,
        object1: Option<&dyn Comparable>,
        object2: Option<&dyn Comparable>,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        let (left, right) = match (object1, object2) {
            (Some(left), Some(right)) => (left, right),
            (left, right) => {
                let err = CompareError::NullInput {
                    left: left.map_or_else(|| NULL_VALUE.to_string(), render_value),
                    right: right.map_or_else(|| NULL_VALUE.to_string(), render_value),
                };
                self.note(LogLevel::Error, || {
                    LogEntry::new(LogLevel::Error, err.to_string())
                        .with_event(DiffEvent::ComparisonFailed)
                });
                return Err(err);
            }
        };

        let type_name = left.descriptor().name();
        let mode = self.diff.mode();
        self.note(LogLevel::Debug, || {
            LogEntry::new(LogLevel::Debug, format!("Comparing {} in {:?} mode", type_name, mode))
                .with_event(DiffEvent::ComparisonStarted)
                .with_type(type_name)
        });

        match self.compare_records(&ComparisonPath::root(), left, right) {
            Ok(differences) => {
                let count = differences.len();
                self.note(LogLevel::Debug, || {
                    LogEntry::new(LogLevel::Debug, format!("Found {} differences", count))
                        .with_event(DiffEvent::ComparisonCompleted)
                        .with_metadata("differences".to_string(), count.to_string())
                });
                Ok(differences)
            }
            Err(err) => {
                self.note(LogLevel::Error, || {
                    LogEntry::new(LogLevel::Error, err.to_string())
                        .with_event(DiffEvent::ComparisonFailed)
                });
                Err(err)
            }
        }
    }

    /// Record a log entry, building it only when it would be kept
    fn note(&mut self, level: LogLevel, entry: impl FnOnce() -> LogEntry) {
        if let Some(logger) = self.logger.as_deref_mut() {
            if logger.should_log(level) {
                logger.log(entry());
            }
        }
    }

    fn difference(
        &mut self,
        path: &ComparisonPath,
        value1: String,
        value2: String,
    ) -> FieldDifference {
        let difference = FieldDifference::new(path.segments().to_vec(), value1, value2);
        self.note(LogLevel::Info, || {
            LogEntry::new(LogLevel::Info, difference.to_string())
                .with_event(DiffEvent::DifferenceFound)
                .with_path(difference.path_string())
                .with_metadata("value1".to_string(), difference.value1().to_string())
                .with_metadata("value2".to_string(), difference.value2().to_string())
        });
        difference
    }

    fn type_mismatch(
        &self,
        path: &ComparisonPath,
        left: &TypeDescriptor,
        right: &TypeDescriptor,
    ) -> CompareError {
        CompareError::TypeMismatch {
            left: left.name().to_string(),
            right: right.name().to_string(),
            path: path.to_string(),
        }
    }

    /// Compare two records field by field, guarding against cycles in strict mode
    fn compare_records(
        &mut self,
        path: &ComparisonPath,
        left: &dyn Comparable,
        right: &dyn Comparable,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        let left_type = left.descriptor();
        let right_type = right.descriptor();
        if !left_type.same_type(&right_type) {
            return Err(self.type_mismatch(path, &left_type, &right_type));
        }

        let (View::Record(left_record), View::Record(right_record)) = (left.view(), right.view())
        else {
            return Err(CompareError::NotARecord {
                type_name: left_type.name().to_string(),
                path: path.to_string(),
            });
        };

        if !self.diff.policy.tracks_descent() {
            return self.compare_fields(path, &left_type, &*left_record, &*right_record);
        }

        let identity = ObjectIdentity::of(left_type.id(), &*left_record);
        if self.stack.contains(identity) {
            self.note(LogLevel::Debug, || {
                LogEntry::new(
                    LogLevel::Debug,
                    format!("{} already on the descent stack, treated as equal", left_type),
                )
                .with_event(DiffEvent::CycleSkipped)
                .with_path(path.to_string())
                .with_type(left_type.name())
            });
            return Ok(Vec::new());
        }

        self.stack.push(identity, left_type.name());
        let result = self.compare_fields(path, &left_type, &*left_record, &*right_record);
        self.stack.pop();
        result
    }

    fn compare_fields(
        &mut self,
        path: &ComparisonPath,
        owner: &TypeDescriptor,
        left: &dyn Record,
        right: &dyn Record,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        self.note(LogLevel::Trace, || {
            LogEntry::new(LogLevel::Trace, format!("Descending into {}", owner))
                .with_event(DiffEvent::Descended)
                .with_path(path.to_string())
                .with_type(owner.name())
        });

        let mut differences = Vec::new();
        for (field1, field2) in left.fields().iter().zip(right.fields().iter()) {
            if self.diff.ignored.contains(owner, field1.name()) {
                continue;
            }
            let field_path = path.child(field1.name());
            differences.extend(self.compare_values(&field_path, field1.value(), field2.value())?);
        }
        Ok(differences)
    }

    /// Compare two field values or aligned sequence elements
    fn compare_values(
        &mut self,
        path: &ComparisonPath,
        value1: Option<&dyn Comparable>,
        value2: Option<&dyn Comparable>,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        match (value1, value2) {
            (None, None) => Ok(Vec::new()),
            (None, Some(right)) => {
                Ok(vec![self.difference(path, NULL_VALUE.to_string(), render_value(right))])
            }
            (Some(left), None) => {
                Ok(vec![self.difference(path, render_value(left), NULL_VALUE.to_string())])
            }
            (Some(left), Some(right)) => self.compare_present(path, left, right),
        }
    }

    fn compare_present(
        &mut self,
        path: &ComparisonPath,
        left: &dyn Comparable,
        right: &dyn Comparable,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        let descriptor = left.descriptor();
        let classification = classify(&self.diff.policy, &self.diff.descend_into, &descriptor);

        match classification {
            Some(Classification::Sequence) => match (left.view(), right.view()) {
                (View::Sequence(left_elements), View::Sequence(right_elements)) => {
                    sequence::align(self, path, left_elements, right_elements)
                }
                _ => Err(self.type_mismatch(path, &descriptor, &right.descriptor())),
            },
            Some(Classification::Descend) => self.compare_records(path, left, right),
            Some(Classification::Decimal) => match (left.view(), right.view()) {
                (View::Decimal(a), View::Decimal(b)) => {
                    if self.diff.decimal.equal(a, b) {
                        Ok(Vec::new())
                    } else {
                        Ok(vec![self.difference(path, render_value(left), render_value(right))])
                    }
                }
                _ => Err(self.type_mismatch(path, &descriptor, &right.descriptor())),
            },
            Some(Classification::Equality) => {
                if left.value_eq(right) {
                    Ok(Vec::new())
                } else {
                    Ok(vec![self.difference(path, render_value(left), render_value(right))])
                }
            }
            None => Err(CompareError::UnclassifiedType {
                type_name: descriptor.name().to_string(),
                path: path.to_string(),
                stack: self.stack.render(),
            }),
        }
    }
}

impl<'c, 'l, P: ClassificationPolicy> ElementComparator for Walker<'c, 'l, P> {
    fn compare_elements(
        &mut self,
        path: &ComparisonPath,
        left: Option<&dyn Comparable>,
        right: Option<&dyn Comparable>,
    ) -> Result<Vec<FieldDifference>, CompareError> {
        self.compare_values(path, left, right)
    }

    fn length_mismatch(&mut self, difference: &FieldDifference) {
        self.note(LogLevel::Info, || {
            LogEntry::new(LogLevel::Info, difference.to_string())
                .with_event(DiffEvent::LengthMismatch)
                .with_path(difference.path_string())
                .with_metadata("value1".to_string(), difference.value1().to_string())
                .with_metadata("value2".to_string(), difference.value2().to_string())
        });
    }
}
