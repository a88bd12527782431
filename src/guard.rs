//! Cycle protection for strict comparisons
//!
//! The descent stack holds the identity of every record currently being
//! compared. Re-entering a record already on the stack is treated as equal,
//! which keeps cyclic graphs finite without proving them isomorphic.

use crate::traits::Record;
use std::any::TypeId;

/// Opaque identity of a record: its runtime type and its address
///
/// A record and a field stored at offset zero share an address, so the type
/// is part of the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectIdentity {
    type_id: TypeId,
    address: usize,
}

impl ObjectIdentity {
    pub fn of(type_id: TypeId, record: &dyn Record) -> Self {
        Self {
            type_id,
            address: (record as *const (dyn Record + '_)).cast::<()>() as usize,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn address(&self) -> usize {
        self.address
    }
}

#[derive(Debug, Clone, Copy)]
struct StackEntry {
    identity: ObjectIdentity,
    type_name: &'static str,
}

/// The chain of records on the current recursion path
#[derive(Debug, Clone, Default)]
pub struct DescentStack {
    entries: Vec<StackEntry>,
}

impl DescentStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership by identity, never by value
    pub fn contains(&self, identity: ObjectIdentity) -> bool {
        self.entries.iter().any(|entry| entry.identity == identity)
    }

    pub fn push(&mut self, identity: ObjectIdentity, type_name: &'static str) {
        self.entries.push(StackEntry { identity, type_name });
    }

    pub fn pop(&mut self) -> Option<ObjectIdentity> {
        self.entries.pop().map(|entry| entry.identity)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `Type@0xaddress` line per live record, outermost first
    pub fn render(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| format!("{}@{:#x}", entry.type_name, entry.identity.address()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Leaf {
        value: i32,
    }

    crate::impl_record!(Leaf { value });

    #[derive(Debug, PartialEq)]
    struct Wrapper {
        leaf: Leaf,
    }

    crate::impl_record!(Wrapper { leaf });

    fn identity<T: Record + 'static>(record: &T) -> ObjectIdentity {
        ObjectIdentity::of(TypeId::of::<T>(), record)
    }

    #[test]
    fn test_identity_is_by_address() {
        let a = Leaf { value: 1 };
        let b = Leaf { value: 1 };

        assert_eq!(identity(&a), identity(&a));
        assert_ne!(identity(&a), identity(&b));
    }

    #[test]
    fn test_field_at_same_address_is_distinct() {
        let wrapper = Wrapper {
            leaf: Leaf { value: 1 },
        };
        let outer = identity(&wrapper);
        let inner = identity(&wrapper.leaf);

        assert_eq!(outer.address(), inner.address());
        assert_ne!(outer, inner);

        let mut stack = DescentStack::new();
        stack.push(outer, "Wrapper");
        assert!(!stack.contains(inner));
    }

    #[test]
    fn test_push_pop_tracks_chain() {
        let a = Leaf { value: 1 };
        let b = Leaf { value: 2 };
        let mut stack = DescentStack::new();

        stack.push(identity(&a), "Leaf");
        stack.push(identity(&b), "Leaf");
        assert!(stack.contains(identity(&a)));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.render().len(), 2);
        assert!(stack.render()[0].starts_with("Leaf@0x"));

        assert_eq!(stack.pop(), Some(identity(&b)));
        assert!(!stack.contains(identity(&b)));
        stack.pop();
        assert!(stack.is_empty());
    }
}
