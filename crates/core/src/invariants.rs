//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible history states during
//! development. These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::history::{LaunchHistory, MAX_HISTORY_SIZE};
use crate::models::{HistoryEntry, LaunchMode};

/// Validate that a single mode's list is bounded, unique and homogeneous
pub fn assert_list_invariants(mode: LaunchMode, entries: &[HistoryEntry]) {
    debug_assert!(
        entries.len() <= MAX_HISTORY_SIZE,
        "{} history has {} entries, limit is {}",
        mode,
        entries.len(),
        MAX_HISTORY_SIZE
    );

    let mut seen = HashSet::new();
    for entry in entries {
        debug_assert!(
            seen.insert(&entry.configuration),
            "{} history lists {} twice",
            mode,
            entry.configuration
        );
        debug_assert!(
            entry.mode == mode,
            "{} history holds a {} entry for {}",
            mode,
            entry.mode,
            entry.configuration
        );
    }
}

/// Validate both lists of a history
pub fn assert_history_invariants(history: &LaunchHistory) {
    for mode in LaunchMode::ALL {
        assert_list_invariants(mode, history.history(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfigRef;

    fn entry(name: &str, mode: LaunchMode) -> HistoryEntry {
        HistoryEntry::new(ConfigRef::from(name), mode, name)
    }

    #[test]
    fn test_valid_list() {
        let entries = vec![entry("a", LaunchMode::Run), entry("b", LaunchMode::Run)];
        assert_list_invariants(LaunchMode::Run, &entries);
    }

    #[test]
    fn test_empty_history() {
        assert_history_invariants(&LaunchHistory::new());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "twice")]
    fn test_duplicate_detected() {
        let entries = vec![entry("a", LaunchMode::Run), entry("a", LaunchMode::Run)];
        assert_list_invariants(LaunchMode::Run, &entries);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "holds a debug entry")]
    fn test_wrong_mode_detected() {
        let entries = vec![entry("a", LaunchMode::Debug)];
        assert_list_invariants(LaunchMode::Run, &entries);
    }
}
