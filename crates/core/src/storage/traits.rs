//! Storage repository traits
//!
//! The launch history never owns configurations. It reaches them through
//! this trait, which may be backed by SQLite, a mock, or a host application.

use crate::error::Result;
use crate::models::{ConfigRef, LaunchConfiguration};

/// Launch configuration backing store
pub trait ConfigurationStore {
    /// Look up a configuration by memento, `None` if it no longer exists
    fn resolve(&self, reference: &ConfigRef) -> Result<Option<LaunchConfiguration>>;

    /// Delete a configuration
    fn delete(&self, configuration: &LaunchConfiguration) -> Result<()>;

    /// Whether two references describe the same configuration content
    fn contents_equal(&self, a: &ConfigRef, b: &ConfigRef) -> bool {
        a == b
    }
}

impl<T: ConfigurationStore + ?Sized> ConfigurationStore for &T {
    fn resolve(&self, reference: &ConfigRef) -> Result<Option<LaunchConfiguration>> {
        (**self).resolve(reference)
    }

    fn delete(&self, configuration: &LaunchConfiguration) -> Result<()> {
        (**self).delete(configuration)
    }

    fn contents_equal(&self, a: &ConfigRef, b: &ConfigRef) -> bool {
        (**self).contents_equal(a, b)
    }
}
