use std::cmp::Reverse;
use std::collections::HashSet;

use logdeck_types::{LogEntry, LogLevel, SortOrder};

/// Search, level and sort settings that derive the displayed rows
#[derive(Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Search text as typed
    search_term: String,

    /// Lowercased search text, matched against messages
    search_lower: String,

    /// Levels that are shown
    enabled_levels: HashSet<LogLevel>,

    /// Timestamp sort direction
    sort_order: SortOrder,
}

impl FilterState {
    /// A filter that shows everything in backend order
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            search_lower: String::new(),
            enabled_levels: LogLevel::ALL.into_iter().collect(),
            sort_order: SortOrder::None,
        }
    }

    /// Set the search text, returning whether it changed
    pub fn set_search_term(&mut self, term: &str) -> bool {
        if self.search_term == term {
            return false;
        }
        self.search_term = term.to_string();
        self.search_lower = term.to_lowercase();
        true
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Flip a single level on or off
    pub fn toggle_level(&mut self, level: LogLevel) {
        if !self.enabled_levels.remove(&level) {
            self.enabled_levels.insert(level);
        }
    }

    pub fn enable_all_levels(&mut self) {
        self.enabled_levels = LogLevel::ALL.into_iter().collect();
    }

    pub fn disable_all_levels(&mut self) {
        self.enabled_levels.clear();
    }

    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        self.enabled_levels.contains(&level)
    }

    pub fn enabled_levels(&self) -> &HashSet<LogLevel> {
        &self.enabled_levels
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = order;
    }

    /// Advance the sort order one step and return the new value
    pub fn cycle_sort(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.next();
        self.sort_order
    }

    /// Check if a log entry passes the level and search filters
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if !self.enabled_levels.contains(&entry.effective_level()) {
            return false;
        }

        entry.message.to_lowercase().contains(&self.search_lower)
            || entry.timestamp.contains(&self.search_term)
    }

    /// Positions in `entries` of the rows to display, in display order
    pub fn apply(&self, entries: &[LogEntry]) -> Vec<usize> {
        let mut visible: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(e))
            .map(|(i, _)| i)
            .collect();

        // Both sorts are stable so equal timestamps keep backend order
        match self.sort_order {
            SortOrder::None => {}
            SortOrder::Ascending => {
                visible.sort_by_cached_key(|&i| timestamp_key(&entries[i].timestamp));
            }
            SortOrder::Descending => {
                visible.sort_by_cached_key(|&i| Reverse(timestamp_key(&entries[i].timestamp)));
            }
        }

        visible
    }

    /// Check if the filter hides nothing
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.enabled_levels.len() == LogLevel::ALL.len()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterState")
            .field("search_term", &self.search_term)
            .field("enabled_levels", &self.enabled_levels)
            .field("sort_order", &self.sort_order)
            .finish()
    }
}

/// Collation key in root-locale order: whitespace, then punctuation and
/// symbols, then digits, then letters ignoring case. Case only breaks ties,
/// lowercase first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TimestampKey {
    primary: Vec<(CharClass, char)>,
    uppercase: Vec<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Space,
    Punctuation,
    Digit,
    Letter,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Self::Space
        } else if c.is_numeric() {
            Self::Digit
        } else if c.is_alphabetic() {
            Self::Letter
        } else {
            Self::Punctuation
        }
    }
}

fn timestamp_key(timestamp: &str) -> TimestampKey {
    TimestampKey {
        primary: timestamp
            .chars()
            .map(|c| (CharClass::of(c), c.to_lowercase().next().unwrap_or(c)))
            .collect(),
        uppercase: timestamp.chars().map(char::is_uppercase).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LogEntry> {
        vec![
            LogEntry::new("10:00", Some(LogLevel::Error), "boom"),
            LogEntry::new("10:01", Some(LogLevel::Info), "ok"),
        ]
    }

    #[test]
    fn test_default_shows_everything_in_order() {
        let filter = FilterState::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()), vec![0, 1]);
    }

    #[test]
    fn test_level_filter() {
        let mut filter = FilterState::new();
        filter.disable_all_levels();
        filter.toggle_level(LogLevel::Info);
        assert_eq!(filter.apply(&sample()), vec![1]);
    }

    #[test]
    fn test_search_message_case_insensitive() {
        let mut filter = FilterState::new();
        filter.set_search_term("BOO");
        assert_eq!(filter.apply(&sample()), vec![0]);
    }

    #[test]
    fn test_search_timestamp_case_sensitive() {
        let entries = vec![
            LogEntry::new("2024-01-15T10:00", Some(LogLevel::Info), "first"),
            LogEntry::new("2024-01-16t10:00", Some(LogLevel::Info), "second"),
        ];
        let mut filter = FilterState::new();
        filter.set_search_term("T10");
        assert_eq!(filter.apply(&entries), vec![0]);
    }

    #[test]
    fn test_absent_level_filters_as_unknown() {
        let entries = vec![LogEntry::new("10:00", None, "no level")];
        let mut filter = FilterState::new();
        assert_eq!(filter.apply(&entries), vec![0]);

        filter.toggle_level(LogLevel::Unknown);
        assert!(filter.apply(&entries).is_empty());
    }

    #[test]
    fn test_sort_is_stable_both_ways() {
        let entries = vec![
            LogEntry::new("b", Some(LogLevel::Info), "1"),
            LogEntry::new("a", Some(LogLevel::Info), "2"),
            LogEntry::new("b", Some(LogLevel::Info), "3"),
            LogEntry::new("c", Some(LogLevel::Info), "4"),
        ];
        let mut filter = FilterState::new();

        filter.set_sort_order(SortOrder::Ascending);
        assert_eq!(filter.apply(&entries), vec![1, 0, 2, 3]);

        filter.set_sort_order(SortOrder::Descending);
        assert_eq!(filter.apply(&entries), vec![3, 0, 2, 1]);
    }

    #[test]
    fn test_sort_ignores_case_first() {
        let entries = vec![
            LogEntry::new("B", Some(LogLevel::Info), ""),
            LogEntry::new("a", Some(LogLevel::Info), ""),
        ];
        let mut filter = FilterState::new();
        filter.set_sort_order(SortOrder::Ascending);
        assert_eq!(filter.apply(&entries), vec![1, 0]);
    }

    #[test]
    fn test_sort_punctuation_digits_letters() {
        let entries: Vec<LogEntry> = ["10:00", "1:00", "A", "a"]
            .into_iter()
            .map(|ts| LogEntry::new(ts, Some(LogLevel::Info), ""))
            .collect();
        let mut filter = FilterState::new();

        filter.set_sort_order(SortOrder::Ascending);
        assert_eq!(filter.apply(&entries), vec![1, 0, 3, 2]);

        filter.set_sort_order(SortOrder::Descending);
        assert_eq!(filter.apply(&entries), vec![2, 3, 0, 1]);
    }

    #[test]
    fn test_sort_space_before_punctuation_before_digit() {
        let entries = vec![
            LogEntry::new("2024-01-01 9", Some(LogLevel::Info), ""),
            LogEntry::new("2024-01-01T9", Some(LogLevel::Info), ""),
            LogEntry::new("2024-01-01_9", Some(LogLevel::Info), ""),
            LogEntry::new("2024-01-0119", Some(LogLevel::Info), ""),
        ];
        let mut filter = FilterState::new();
        filter.set_sort_order(SortOrder::Ascending);
        assert_eq!(filter.apply(&entries), vec![0, 2, 3, 1]);
    }

    #[test]
    fn test_filter_is_empty_tracks_search_and_levels() {
        let mut filter = FilterState::new();
        filter.set_sort_order(SortOrder::Descending);
        assert!(filter.is_empty());

        filter.set_search_term("boom");
        assert!(!filter.is_empty());
        filter.set_search_term("");
        filter.toggle_level(LogLevel::Debug);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_deselect_then_select_all_restores_levels() {
        let mut filter = FilterState::new();
        filter.toggle_level(LogLevel::Debug);
        filter.disable_all_levels();
        assert!(filter.enabled_levels().is_empty());
        filter.enable_all_levels();
        assert_eq!(filter.enabled_levels().len(), LogLevel::ALL.len());
    }

    #[test]
    fn test_set_search_term_reports_change() {
        let mut filter = FilterState::new();
        assert!(filter.set_search_term("x"));
        assert!(!filter.set_search_term("x"));
    }
}
