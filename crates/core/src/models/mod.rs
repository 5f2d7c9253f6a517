//! Data models for relaunch

mod configuration;
mod entry;
mod mode;

pub use configuration::*;
pub use entry::*;
pub use mode::*;
