//! Per-generator cache of derived values keyed by label.

use std::collections::HashMap;

use seedweave_crypto::Label;

/// Derived values keyed by their 16-byte [`Label`].
///
/// Owned exclusively by one generator. The map is not synchronized; a
/// generator shared between threads must be guarded as a whole.
///
/// # Invariants
///
/// - An entry, once inserted, is never replaced by the generator
/// - Keys are the truncated label, so labels agreeing on 16 bytes share an
///   entry
#[derive(Debug, Clone)]
pub struct LabelCache<V> {
    entries: HashMap<Label, V>,
}

impl<V> LabelCache<V> {
    /// Empty cache.
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Cached value for `label`, if any.
    pub fn get(&self, label: &Label) -> Option<&V> {
        self.entries.get(label)
    }

    /// Whether `label` has a cached value.
    pub fn contains(&self, label: &Label) -> bool {
        self.entries.contains_key(label)
    }

    /// Store `value` for `label`, returning the previous value if present.
    pub fn insert(&mut self, label: Label, value: V) -> Option<V> {
        self.entries.insert(label, value)
    }

    /// Number of cached labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<V> Default for LabelCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cache_is_empty() {
        let cache: LabelCache<u8> = LabelCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_then_get() {
        let mut cache = LabelCache::new();
        let label = Label::new(b"key");

        assert!(cache.insert(label, 5u32).is_none());
        assert_eq!(cache.get(&label), Some(&5));
        assert!(cache.contains(&label));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn labels_sharing_first_block_share_entry() {
        let mut cache = LabelCache::new();
        cache.insert(Label::new(b"0123456789abcdefXXX"), 1u8);

        assert_eq!(cache.get(&Label::new(b"0123456789abcdefYYY")), Some(&1));
    }

    #[test]
    fn clear_removes_everything() {
        let mut cache = LabelCache::new();
        cache.insert(Label::new(b"a"), 1u8);
        cache.insert(Label::new(b"b"), 2u8);

        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get(&Label::new(b"a")).is_none());
    }
}
