//! Stable fingerprints of difference lists using Blake3

use crate::error::ReportError;
use crate::types::FieldDifference;
use blake3::Hasher as Blake3Hasher;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-byte Blake3 digest of an ordered difference list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportDigest(pub [u8; 32]);

impl fmt::Display for ReportDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// ReportHasher fingerprints difference lists
///
/// The digest covers paths and values in order, so two comparisons that found
/// the same differences in the same order hash identically. Useful for
/// snapshot-style assertions on large object graphs.
#[derive(Debug, Clone, Default)]
pub struct ReportHasher {
    // Stateless; a fresh Blake3 hasher is created per digest
}

impl ReportHasher {
    pub fn new() -> Self {
        Self {}
    }

    /// Compute the digest of an ordered difference list
    pub fn hash(&self, differences: &[FieldDifference]) -> Result<ReportDigest, ReportError> {
        let serialized =
            bincode::serialize(differences).map_err(|e| ReportError::SerializationFailed {
                reason: format!("Bincode serialization failed: {}", e),
            })?;

        let mut hasher = Blake3Hasher::new();
        hasher.update(&serialized);
        Ok(ReportDigest(*hasher.finalize().as_bytes()))
    }

    /// Combine several digests into one, order-sensitive
    pub fn combine(&self, digests: &[ReportDigest]) -> ReportDigest {
        let mut hasher = Blake3Hasher::new();
        for digest in digests {
            hasher.update(&digest.0);
        }
        ReportDigest(*hasher.finalize().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(path: &str, a: &str, b: &str) -> FieldDifference {
        FieldDifference::new(path.split('.').map(str::to_string).collect(), a, b)
    }

    #[test]
    fn test_hash_consistency() {
        let hasher = ReportHasher::new();
        let diffs = vec![diff("a.b", "1", "2")];

        assert_eq!(hasher.hash(&diffs).unwrap(), hasher.hash(&diffs).unwrap());
    }

    #[test]
    fn test_hash_distinguishes_values_and_order() {
        let hasher = ReportHasher::new();
        let first = diff("a", "1", "2");
        let second = diff("b", "3", "4");

        let forward = hasher.hash(&[first.clone(), second.clone()]).unwrap();
        let backward = hasher.hash(&[second, first.clone()]).unwrap();
        let changed = hasher.hash(&[diff("a", "1", "5")]).unwrap();

        assert_ne!(forward, backward);
        assert_ne!(hasher.hash(&[first]).unwrap(), changed);
    }

    #[test]
    fn test_empty_digest_is_stable() {
        let hasher = ReportHasher::new();
        let empty = hasher.hash(&[]).unwrap();

        assert_eq!(empty.to_string().len(), 64);
        assert_eq!(empty, hasher.hash(&Vec::new()).unwrap());
    }

    #[test]
    fn test_combine_order_matters() {
        let hasher = ReportHasher::new();
        let a = hasher.hash(&[diff("a", "1", "2")]).unwrap();
        let b = hasher.hash(&[diff("b", "1", "2")]).unwrap();

        assert_ne!(hasher.combine(&[a, b]), hasher.combine(&[b, a]));
    }
}
