//! Positional alignment of two sequences

use crate::error::CompareError;
use crate::traits::{Comparable, Elements};
use crate::types::{ComparisonPath, FieldDifference};

/// Compares one aligned pair of elements
pub trait ElementComparator {
    /// Compare two elements found at the same position
    ///
    /// `path` already carries the `[index]` annotation.
    fn compare_elements(
        &mut self,
        path: &ComparisonPath,
        left: Option<&dyn Comparable>,
        right: Option<&dyn Comparable>,
    ) -> Result<Vec<FieldDifference>, CompareError>;

    /// Called once when the sequences differ in length
    fn length_mismatch(&mut self, _difference: &FieldDifference) {}
}

/// Walk both sequences in lockstep, comparing elements at matching positions
///
/// On the first position where only one side has an element, alignment stops
/// and a single `name.size()` difference carrying both total lengths is
/// emitted; the longer side is drained only to count it.
pub fn align<C: ElementComparator + ?Sized>(
    comparator: &mut C,
    path: &ComparisonPath,
    mut left: Elements<'_>,
    mut right: Elements<'_>,
) -> Result<Vec<FieldDifference>, CompareError> {
    let mut differences = Vec::new();
    let mut index = 0;

    loop {
        match (left.next(), right.next()) {
            (Some(a), Some(b)) => {
                differences.extend(comparator.compare_elements(&path.with_index(index), a, b)?);
                index += 1;
            }
            (None, None) => break,
            (a, b) => {
                let left_len = index + usize::from(a.is_some()) + left.count();
                let right_len = index + usize::from(b.is_some()) + right.count();
                let difference = FieldDifference::new(
                    path.with_size_marker().into_segments(),
                    left_len.to_string(),
                    right_len.to_string(),
                );
                comparator.length_mismatch(&difference);
                differences.push(difference);
                break;
            }
        }
    }

    Ok(differences)
}
