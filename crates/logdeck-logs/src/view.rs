use logdeck_types::{LogEntry, LogLevel, SortOrder};
use tracing::debug;

use crate::filter::FilterState;
use crate::selection::{ClickModifiers, MenuScope, Selection};

/// The full entry set plus everything derived from it for display.
///
/// Every mutation that can change the displayed rows goes through here, so
/// the selection is always reset alongside the recompute.
#[derive(Debug, Default)]
pub struct LogView {
    /// Entries as returned by the backend
    entries: Vec<LogEntry>,

    /// Current filter settings
    filter: FilterState,

    /// Positions into `entries`, in display order
    displayed: Vec<usize>,

    /// Selection over display indices
    selection: Selection,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full entry set
    pub fn set_entries(&mut self, entries: Vec<LogEntry>) {
        self.entries = entries;
        self.recompute();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search_term(&mut self, term: &str) {
        if self.filter.set_search_term(term) {
            self.recompute();
        }
    }

    pub fn toggle_level(&mut self, level: LogLevel) {
        self.filter.toggle_level(level);
        self.recompute();
    }

    pub fn select_all_levels(&mut self) {
        self.filter.enable_all_levels();
        self.recompute();
    }

    pub fn deselect_all_levels(&mut self) {
        self.filter.disable_all_levels();
        self.recompute();
    }

    pub fn cycle_sort(&mut self) -> SortOrder {
        let order = self.filter.cycle_sort();
        self.recompute();
        order
    }

    fn recompute(&mut self) {
        self.displayed = self.filter.apply(&self.entries);
        self.selection.clear();
        debug!(
            total = self.entries.len(),
            shown = self.displayed.len(),
            filter = ?self.filter,
            "recomputed displayed logs"
        );
    }

    /// Number of displayed rows
    pub fn len(&self) -> usize {
        self.displayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displayed.is_empty()
    }

    /// Entry at a display index
    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.displayed.get(index).map(|&i| &self.entries[i])
    }

    /// Displayed entries in display order
    pub fn displayed(&self) -> impl Iterator<Item = &LogEntry> + '_ {
        self.displayed.iter().map(|&i| &self.entries[i])
    }

    /// Get displayed entries in a range (for virtual scrolling)
    pub fn range(
        &self,
        start: usize,
        count: usize,
    ) -> impl Iterator<Item = (usize, &LogEntry)> + '_ {
        self.displayed().enumerate().skip(start).take(count)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Route a row click into the selection
    pub fn click(&mut self, index: usize, modifiers: ClickModifiers) -> bool {
        self.selection.click(index, modifiers, self.displayed.len())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn menu_scope(&self, index: usize) -> MenuScope {
        self.selection.menu_scope(index)
    }

    /// Selected entries, in ascending display order
    pub fn selected_entries(&self) -> Vec<LogEntry> {
        self.selection
            .indices()
            .filter_map(|i| self.get(i))
            .cloned()
            .collect()
    }

    /// Clipboard text for the selection, or None when nothing is selected
    pub fn selected_copy_text(&self) -> Option<String> {
        let lines: Vec<String> = self
            .selection
            .indices()
            .filter_map(|i| self.get(i))
            .map(LogEntry::copy_line)
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }

    /// Clipboard text for a single displayed row
    pub fn copy_text_at(&self, index: usize) -> Option<String> {
        self.get(index).map(LogEntry::copy_line)
    }

    /// Get entry count per log level across the full entry set
    pub fn level_counts(&self) -> LevelCounts {
        let mut counts = LevelCounts::default();

        for entry in &self.entries {
            match entry.effective_level() {
                LogLevel::Trace => counts.trace += 1,
                LogLevel::Debug => counts.debug += 1,
                LogLevel::Info => counts.info += 1,
                LogLevel::Warning => counts.warning += 1,
                LogLevel::Error => counts.error += 1,
                LogLevel::Fatal => counts.fatal += 1,
                LogLevel::Unknown => counts.unknown += 1,
            }
        }

        counts
    }
}

/// Counts per log level
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelCounts {
    pub trace: usize,
    pub debug: usize,
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub fatal: usize,
    pub unknown: usize,
}

impl LevelCounts {
    pub fn get(&self, level: LogLevel) -> usize {
        match level {
            LogLevel::Trace => self.trace,
            LogLevel::Debug => self.debug,
            LogLevel::Info => self.info,
            LogLevel::Warning => self.warning,
            LogLevel::Error => self.error,
            LogLevel::Fatal => self.fatal,
            LogLevel::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.trace + self.debug + self.info + self.warning + self.error + self.fatal + self.unknown
    }
}
