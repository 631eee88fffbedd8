//! Insertion-ordered frequency counting
//!
//! `most_common` sorts by descending count and breaks ties by the order in
//! which items were first seen.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize)>,
}

impl FrequencyCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: impl Into<String>) {
        let item = item.into();
        if let Some(&slot) = self.index.get(&item) {
            self.entries[slot].1 += 1;
        } else {
            self.index.insert(item.clone(), self.entries.len());
            self.entries.push((item, 1));
        }
    }

    pub fn count(&self, item: &str) -> usize {
        self.index.get(item).map_or(0, |&slot| self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top `limit` items; `None` returns all of them
    pub fn most_common(mut self, limit: Option<usize>) -> Vec<(String, usize)> {
        // Stable sort keeps first-seen order among equal counts
        self.entries.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            self.entries.truncate(limit);
        }
        self.entries
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyCounter {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut counter = Self::new();
        for item in iter {
            counter.add(item);
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_orders() {
        let counter: FrequencyCounter = ["b", "a", "b", "c", "a", "b"].into_iter().collect();
        assert_eq!(counter.count("b"), 3);
        assert_eq!(counter.count("z"), 0);
        assert_eq!(
            counter.most_common(None),
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let counter: FrequencyCounter = ["x", "y", "z", "y", "x", "z"].into_iter().collect();
        let words: Vec<String> = counter
            .most_common(None)
            .into_iter()
            .map(|(w, _)| w)
            .collect();
        assert_eq!(words, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_limit_truncates() {
        let counter: FrequencyCounter = ["a", "b", "c", "d"].into_iter().collect();
        assert_eq!(counter.len(), 4);
        assert_eq!(counter.most_common(Some(2)).len(), 2);
        assert!(FrequencyCounter::new().most_common(Some(10)).is_empty());
    }
}
