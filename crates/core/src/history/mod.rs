//! Launch history
//!
//! Two most-recently-used lists, one per launch mode, plus a pointer to the
//! latest launch. The history holds configuration references only; the
//! configurations themselves live in a [`ConfigurationStore`].
//!
//! There is no internal locking. A single owner mutates the history (see
//! [`crate::service`]).

mod document;
mod file;
mod list;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::invariants::assert_history_invariants;
use crate::models::{ConfigRef, HistoryEntry, LaunchEvent, LaunchMode};
use crate::storage::ConfigurationStore;

pub use file::{HistoryFile, HISTORY_FILENAME};
pub use list::{HistoryList, MAX_HISTORY_SIZE};

/// Run and debug launch histories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchHistory {
    run: HistoryList,
    debug: HistoryList,
    most_recent: Option<HistoryEntry>,
}

impl LaunchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for a mode, most recent first
    pub fn history(&self, mode: LaunchMode) -> &[HistoryEntry] {
        self.list(mode).entries()
    }

    pub fn list(&self, mode: LaunchMode) -> &HistoryList {
        match mode {
            LaunchMode::Run => &self.run,
            LaunchMode::Debug => &self.debug,
        }
    }

    fn list_mut(&mut self, mode: LaunchMode) -> &mut HistoryList {
        match mode {
            LaunchMode::Run => &mut self.run,
            LaunchMode::Debug => &mut self.debug,
        }
    }

    /// The latest recorded launch, if any
    pub fn most_recent(&self) -> Option<&HistoryEntry> {
        self.most_recent.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.run.is_empty() && self.debug.is_empty() && self.most_recent.is_none()
    }

    pub fn record<S>(&mut self, store: &S, event: &LaunchEvent) -> bool
    where
        S: ConfigurationStore + ?Sized,
    {
        self.record_launch(store, &event.configuration, event.mode, &event.label)
    }

    /// Record that `reference` was launched under `mode`.
    ///
    /// Only the list for `mode` changes. Missing, private and unsupported
    /// configurations are ignored. Returns whether the launch was recorded.
    pub fn record_launch<S>(
        &mut self,
        store: &S,
        reference: &ConfigRef,
        mode: LaunchMode,
        label: &str,
    ) -> bool
    where
        S: ConfigurationStore + ?Sized,
    {
        let configuration = match store.resolve(reference) {
            Ok(Some(configuration)) => configuration,
            Ok(None) => {
                debug!(memento = %reference, %mode, "Launched configuration no longer exists");
                return false;
            }
            Err(e) => {
                warn!(memento = %reference, %mode, error = %e, "Could not resolve launched configuration");
                return false;
            }
        };

        if configuration.is_private() {
            debug!(memento = %reference, "Private configuration kept out of history");
            return false;
        }
        if !configuration.supports_mode(mode) {
            debug!(memento = %reference, %mode, "Configuration does not support launch mode");
            return false;
        }

        let entry = HistoryEntry::new(configuration.memento().clone(), mode, label);
        let evicted = self
            .list_mut(mode)
            .promote(entry.clone(), |a, b| store.contents_equal(a, b));
        self.most_recent = Some(entry);

        if let Some(evicted) = evicted {
            self.release_evicted(store, mode, evicted);
        }

        assert_history_invariants(self);
        true
    }

    /// Delete an evicted transient configuration unless the other list still uses it.
    ///
    /// Deletion is best effort; failures are logged and the eviction stands.
    fn release_evicted<S>(&self, store: &S, mode: LaunchMode, evicted: HistoryEntry)
    where
        S: ConfigurationStore + ?Sized,
    {
        let reference = &evicted.configuration;
        if self
            .list(mode.other())
            .contains(reference, |a, b| store.contents_equal(a, b))
        {
            debug!(memento = %reference, %mode, "Evicted configuration still in other history");
            return;
        }

        match store.resolve(reference) {
            Ok(Some(configuration)) if configuration.is_transient() => {
                match store.delete(&configuration) {
                    Ok(()) => info!(memento = %reference, "Deleted transient configuration"),
                    Err(e) => {
                        warn!(memento = %reference, error = %e, "Failed to delete transient configuration")
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(memento = %reference, error = %e, "Could not resolve evicted configuration")
            }
        }
    }

    /// Remove an entry from both lists. Absent entries are ignored.
    ///
    /// Entries match on memento, mode and label together. A relaunch of the
    /// head entry refreshes only the most-recent label, so removing the
    /// most-recent entry then clears the pointer and leaves the list entry
    /// with its older label in place.
    pub fn remove_entry(&mut self, entry: &HistoryEntry) {
        let removed_run = self.run.remove(entry);
        let removed_debug = self.debug.remove(entry);
        if self.most_recent.as_ref() == Some(entry) {
            self.most_recent = None;
        }
        debug!(
            memento = %entry.configuration,
            removed = removed_run || removed_debug,
            "Removed history entry"
        );
    }

    /// Forget every entry for a configuration that was deleted
    pub fn remove_configuration(&mut self, reference: &ConfigRef) -> usize {
        let removed = self.run.retain(|e| &e.configuration != reference)
            + self.debug.retain(|e| &e.configuration != reference);
        if self
            .most_recent
            .as_ref()
            .is_some_and(|e| &e.configuration == reference)
        {
            self.most_recent = None;
        }
        if removed > 0 {
            debug!(memento = %reference, removed, "Dropped deleted configuration from history");
        }
        removed
    }

    /// Drop entries whose configuration no longer resolves.
    ///
    /// Entries that fail to resolve because of a store error are kept.
    pub fn prune_missing<S>(&mut self, store: &S) -> usize
    where
        S: ConfigurationStore + ?Sized,
    {
        let exists = |reference: &ConfigRef| !matches!(store.resolve(reference), Ok(None));

        let dropped = self.run.retain(|e| exists(&e.configuration))
            + self.debug.retain(|e| exists(&e.configuration));
        if self
            .most_recent
            .as_ref()
            .is_some_and(|e| !exists(&e.configuration))
        {
            self.most_recent = None;
        }
        if dropped > 0 {
            info!(dropped, "Pruned history entries for missing configurations");
        }
        dropped
    }

    /// Serialize both lists and the latest launch as an XML document
    pub fn persist(&self) -> Result<String> {
        document::write(self)
    }

    /// Rebuild a history from a document produced by [`LaunchHistory::persist`]
    pub fn restore(document: &str) -> Result<Self> {
        let history = document::read(document)?;
        assert_history_invariants(&history);
        Ok(history)
    }
}
