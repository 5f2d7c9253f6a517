//! Bounded most-recently-used list of launches

use crate::models::{ConfigRef, HistoryEntry};

/// Maximum number of entries kept per launch mode
pub const MAX_HISTORY_SIZE: usize = 5;

/// Outcome of appending a restored entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Append {
    Appended,
    Duplicate,
    Full,
}

/// Ordered launch entries for one mode, index 0 is the most recent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_HISTORY_SIZE + 1),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Index of the entry referring to the same configuration content
    pub fn position<F>(&self, reference: &ConfigRef, same: F) -> Option<usize>
    where
        F: Fn(&ConfigRef, &ConfigRef) -> bool,
    {
        self.entries
            .iter()
            .position(|entry| same(&entry.configuration, reference))
    }

    pub fn contains<F>(&self, reference: &ConfigRef, same: F) -> bool
    where
        F: Fn(&ConfigRef, &ConfigRef) -> bool,
    {
        self.position(reference, same).is_some()
    }

    /// Move `entry` to the front and return whatever fell off the tail.
    ///
    /// An equivalent entry already at the front is left untouched.
    pub(crate) fn promote<F>(&mut self, entry: HistoryEntry, same: F) -> Option<HistoryEntry>
    where
        F: Fn(&ConfigRef, &ConfigRef) -> bool,
    {
        match self.position(&entry.configuration, same) {
            Some(0) => return None,
            Some(index) => {
                self.entries.remove(index);
            }
            None => {}
        }
        self.entries.insert(0, entry);

        if self.entries.len() > MAX_HISTORY_SIZE {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Append at the tail, keeping the list invariants
    pub(crate) fn append(&mut self, entry: HistoryEntry) -> Append {
        if self.contains(&entry.configuration, |a, b| a == b) {
            return Append::Duplicate;
        }
        if self.entries.len() >= MAX_HISTORY_SIZE {
            return Append::Full;
        }
        self.entries.push(entry);
        Append::Appended
    }

    /// Remove an exact entry, returning whether it was present
    pub(crate) fn remove(&mut self, entry: &HistoryEntry) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e != entry);
        self.entries.len() != before
    }

    /// Keep entries matching the predicate, returning how many were dropped
    pub(crate) fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&HistoryEntry) -> bool,
    {
        let before = self.entries.len();
        self.entries.retain(keep);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LaunchMode;

    fn entry(name: &str) -> HistoryEntry {
        HistoryEntry::new(ConfigRef::from(name), LaunchMode::Run, name)
    }

    fn names(list: &HistoryList) -> Vec<&str> {
        list.iter().map(|e| e.configuration.as_str()).collect()
    }

    fn same(a: &ConfigRef, b: &ConfigRef) -> bool {
        a == b
    }

    #[test]
    fn test_promote_inserts_at_front() {
        let mut list = HistoryList::new();
        assert!(list.promote(entry("a"), same).is_none());
        assert!(list.promote(entry("b"), same).is_none());
        assert_eq!(names(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_promote_existing_moves_without_duplicating() {
        let mut list = HistoryList::new();
        for name in ["a", "b", "c"] {
            list.promote(entry(name), same);
        }
        list.promote(entry("a"), same);
        assert_eq!(names(&list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_promote_head_keeps_old_label() {
        let mut list = HistoryList::new();
        list.promote(entry("a"), same);
        let relabeled = HistoryEntry::new(ConfigRef::from("a"), LaunchMode::Run, "renamed");
        assert!(list.promote(relabeled, same).is_none());
        assert_eq!(list.entries()[0].label, "a");
    }

    #[test]
    fn test_overflow_evicts_tail() {
        let mut list = HistoryList::new();
        for name in ["a", "b", "c", "d", "e"] {
            assert!(list.promote(entry(name), same).is_none());
        }
        let evicted = list.promote(entry("f"), same).unwrap();
        assert_eq!(evicted.configuration.as_str(), "a");
        assert_eq!(list.len(), MAX_HISTORY_SIZE);
    }

    #[test]
    fn test_append_respects_invariants() {
        let mut list = HistoryList::new();
        assert_eq!(list.append(entry("a")), Append::Appended);
        assert_eq!(list.append(entry("a")), Append::Duplicate);
        for name in ["b", "c", "d", "e"] {
            list.append(entry(name));
        }
        assert_eq!(list.append(entry("f")), Append::Full);
        assert_eq!(names(&list), vec!["a", "b", "c", "d", "e"]);
    }
}
