//! Analysis of comparison results

use crate::error::ReportError;
use crate::hasher::{ReportDigest, ReportHasher};
use crate::types::FieldDifference;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered differences produced by one comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    differences: Vec<FieldDifference>,
}

impl DiffReport {
    pub fn new(differences: Vec<FieldDifference>) -> Self {
        Self { differences }
    }

    /// Check if the compared objects had no differences
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn differences(&self) -> &[FieldDifference] {
        &self.differences
    }

    pub fn into_differences(self) -> Vec<FieldDifference> {
        self.differences
    }

    /// The first difference in field order
    pub fn first(&self) -> Option<&FieldDifference> {
        self.differences.first()
    }

    /// Dot-joined paths of every difference
    pub fn paths(&self) -> Vec<String> {
        self.differences.iter().map(FieldDifference::path_string).collect()
    }

    /// Differences located at or below the given dot-joined path
    pub fn under(&self, prefix: &str) -> Vec<&FieldDifference> {
        let prefix: Vec<&str> = prefix.split('.').collect();
        self.differences
            .iter()
            .filter(|d| {
                d.path().len() >= prefix.len()
                    && d.path().iter().zip(&prefix).all(|(segment, wanted)| {
                        segment == wanted
                            || segment
                                .strip_prefix(*wanted)
                                .map_or(false, |rest| rest.starts_with('[') || rest.starts_with('.'))
                    })
            })
            .collect()
    }

    /// Count differences per top-level field
    pub fn count_by_root(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for difference in &self.differences {
            let root = difference
                .path()
                .first()
                .map(|segment| root_field(segment).to_string())
                .unwrap_or_default();
            *counts.entry(root).or_insert(0) += 1;
        }
        counts
    }

    /// Number of sequence length mismatches
    pub fn size_mismatch_count(&self) -> usize {
        self.differences.iter().filter(|d| d.is_size_mismatch()).count()
    }

    /// Blake3 fingerprint of the ordered differences
    pub fn digest(&self) -> Result<ReportDigest, ReportError> {
        ReportHasher::new().hash(&self.differences)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(&self.differences).map_err(|e| {
            ReportError::SerializationFailed {
                reason: format!("JSON serialization failed: {}", e),
            }
        })
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        if self.is_identical() {
            "Objects are identical".to_string()
        } else {
            let mut parts: Vec<String> = self
                .count_by_root()
                .into_iter()
                .map(|(root, count)| format!("{} ({})", root, count))
                .collect();
            if parts.len() > 5 {
                let rest = parts.len() - 5;
                parts.truncate(5);
                parts.push(format!("{} more", rest));
            }
            format!(
                "{} difference{} in {}",
                self.len(),
                if self.len() == 1 { "" } else { "s" },
                parts.join(", ")
            )
        }
    }

    /// Multi-line listing of every difference
    pub fn describe(&self) -> String {
        let mut text = self.summary();
        for difference in &self.differences {
            text.push_str("\n  ");
            text.push_str(&difference.to_string());
        }
        text
    }
}

impl From<Vec<FieldDifference>> for DiffReport {
    fn from(differences: Vec<FieldDifference>) -> Self {
        Self::new(differences)
    }
}

impl IntoIterator for DiffReport {
    type Item = FieldDifference;
    type IntoIter = std::vec::IntoIter<FieldDifference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.into_iter()
    }
}

/// Field name without index or size annotations
fn root_field(segment: &str) -> &str {
    let end = segment
        .find(|c| c == '[' || c == '.')
        .unwrap_or(segment.len());
    &segment[..end]
}
