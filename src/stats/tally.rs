//! Insertion-ordered frequency counting.
//!
//! Every tie-break in the aggregators is "first seen wins", so counts are kept
//! in the order keys were first observed rather than in a hash or sorted order.

use std::hash::Hash;

use indexmap::IndexMap;

/// Counts occurrences of keys while remembering first-occurrence order.
#[derive(Debug, Clone)]
pub struct Tally<K: Eq + Hash> {
    counts: IndexMap<K, usize>,
}

impl<K: Eq + Hash> Tally<K> {
    pub fn new() -> Self {
        Self {
            counts: IndexMap::new(),
        }
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// The most frequent key; among equal counts, the one seen first.
    pub fn most_common(&self) -> Option<(&K, usize)> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in self.counts.iter() {
            match best {
                Some((_, c)) if count <= c => {}
                _ => best = Some((key, count)),
            }
        }
        best
    }

    /// All `(key, count)` pairs by descending count, ties in first-seen order.
    pub fn into_sorted(self) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> = self.counts.into_iter().collect();
        // stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<K: Eq + Hash> Default for Tally<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tally_has_no_mode() {
        let t: Tally<&str> = Tally::new();
        assert!(t.is_empty());
        assert_eq!(t.most_common(), None);
    }

    #[test]
    fn test_counts() {
        let t: Tally<_> = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(t.len(), 3);
        assert_eq!(t.count(&"a"), 3);
        assert_eq!(t.count(&"c"), 1);
        assert_eq!(t.count(&"z"), 0);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let t: Tally<_> = ["b", "a", "a", "b"].into_iter().collect();
        assert_eq!(t.most_common(), Some((&"b", 2)));

        let t: Tally<_> = ["z", "y", "x"].into_iter().collect();
        assert_eq!(t.most_common(), Some((&"z", 1)));
    }

    #[test]
    fn test_repeated_key_keeps_first_slot() {
        let mut t = Tally::new();
        t.add("late");
        t.add("early");
        t.add("early");
        t.add("late");
        t.add("early");
        assert_eq!(t.len(), 2);
        assert_eq!(t.most_common(), Some((&"early", 3)));
        assert_eq!(t.into_sorted(), vec![("early", 3), ("late", 2)]);
    }

    #[test]
    fn test_into_sorted_is_stable() {
        let t: Tally<_> = ["c", "a", "b", "a", "b", "d"].into_iter().collect();
        assert_eq!(
            t.into_sorted(),
            vec![("a", 2), ("b", 2), ("c", 1), ("d", 1)]
        );
    }
}
