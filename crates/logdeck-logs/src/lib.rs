//! Log processing for logdeck
//!
//! This crate provides the filter/sort engine, the multi-row selection
//! engine and the view that keeps them consistent.

mod filter;
mod selection;
mod view;

pub use filter::FilterState;
pub use selection::{ClickModifiers, MenuScope, Selection};
pub use view::{LevelCounts, LogView};

// Re-export types used in our public API
pub use logdeck_types::{LogEntry, LogLevel, SortOrder};
