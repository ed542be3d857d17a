// Bounded working set of resident repositories.
// Insertion-ordered eviction queue: the oldest admitted repository leaves first.

use std::collections::VecDeque;

/// Number of repositories whose heavy payload may be resident at once.
pub const DEFAULT_CAPACITY: usize = 2;

/// FIFO queue of resident repository ids.
///
/// Re-admitting a resident id does not move it; eviction order is admission
/// order, not access order.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    order: VecDeque<String>,
    capacity: usize,
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a working set holding at most `capacity` ids (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record `id` as referenced. Returns the id pushed out to make room, if any.
    pub fn admit(&mut self, id: &str) -> Option<String> {
        if self.contains(id) {
            return None;
        }

        let evicted = if self.order.len() >= self.capacity {
            self.order.pop_front()
        } else {
            None
        };

        self.order.push_back(id.to_string());
        evicted
    }

    pub fn contains(&self, id: &str) -> bool {
        self.order.iter().any(|resident| resident == id)
    }

    /// Resident ids, oldest first.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(set: &WorkingSet) -> Vec<&str> {
        set.ids().collect()
    }

    #[test]
    fn test_admit_until_full() {
        let mut set = WorkingSet::new();

        assert_eq!(set.admit("a"), None);
        assert_eq!(set.admit("b"), None);
        assert_eq!(ids(&set), vec!["a", "b"]);
    }

    #[test]
    fn test_third_admission_evicts_oldest() {
        let mut set = WorkingSet::new();
        set.admit("a");
        set.admit("b");

        assert_eq!(set.admit("c"), Some("a".to_string()));
        assert_eq!(ids(&set), vec!["b", "c"]);
    }

    #[test]
    fn test_readmission_does_not_reorder() {
        let mut set = WorkingSet::new();
        set.admit("a");
        set.admit("b");

        // "a" is referenced again but stays oldest
        assert_eq!(set.admit("a"), None);
        assert_eq!(ids(&set), vec!["a", "b"]);

        assert_eq!(set.admit("c"), Some("a".to_string()));
    }

    #[test]
    fn test_size_never_exceeds_capacity() {
        let mut set = WorkingSet::new();
        for id in ["a", "b", "a", "c", "d", "d", "b", "e", "a"] {
            set.admit(id);
            assert!(set.len() <= DEFAULT_CAPACITY);
        }
        assert_eq!(set.len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut set = WorkingSet::with_capacity(0);
        assert_eq!(set.capacity(), 1);

        set.admit("a");
        assert_eq!(set.admit("b"), Some("a".to_string()));
        assert_eq!(ids(&set), vec!["b"]);
    }
}
