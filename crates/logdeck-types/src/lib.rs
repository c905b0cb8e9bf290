//! Shared types for logdeck
//!
//! This crate contains data structures used across multiple logdeck crates.

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Sentinel the backend uses when a line carried no timestamp
pub const UNKNOWN_TIMESTAMP: &str = "UNKNOWN";

// ============================================================================
// Log Types
// ============================================================================

/// Log severity level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
    Unknown,
}

impl LogLevel {
    /// Every level, in display order
    pub const ALL: [LogLevel; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Fatal,
        Self::Unknown,
    ];

    /// Parse a level name, ignoring case. Anything unrecognised is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Self::Trace,
            "DEBUG" => Self::Debug,
            "INFO" => Self::Info,
            "WARN" | "WARNING" => Self::Warning,
            "ERROR" => Self::Error,
            "FATAL" => Self::Fatal,
            _ => Self::Unknown,
        }
    }

    /// Uppercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Get display color for this level
    pub fn color(&self) -> Color {
        match self {
            Self::Trace => Color::Magenta,
            Self::Debug => Color::Green,
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Fatal => Color::LightRed,
            Self::Unknown => Color::Gray,
        }
    }

    /// Single glyph shown in the level badge
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Trace => "◌",
            Self::Debug => "⚙",
            Self::Info => "ℹ",
            Self::Warning => "⚠",
            Self::Error => "✖",
            Self::Fatal => "☠",
            Self::Unknown => "?",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Timestamp sort direction for the log table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep the order the backend returned
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortOrder {
    /// Cycle none → ascending → descending → none
    pub fn next(&self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }

    /// Indicator drawn next to the timestamp column header
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::None => "–",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// A single analysed log entry, as returned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp text, or [`UNKNOWN_TIMESTAMP`]
    #[serde(default = "unknown_timestamp", deserialize_with = "deserialize_timestamp")]
    pub timestamp: String,

    /// Detected level; `None` when the backend sent null or nothing
    #[serde(default, deserialize_with = "deserialize_level")]
    pub level: Option<LogLevel>,

    /// Message body, possibly empty
    #[serde(default, deserialize_with = "deserialize_message")]
    pub message: String,
}

impl LogEntry {
    pub fn new(
        timestamp: impl Into<String>,
        level: Option<LogLevel>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level,
            message: message.into(),
        }
    }

    /// Level used for filtering; an absent level counts as `Unknown`
    pub fn effective_level(&self) -> LogLevel {
        self.level.unwrap_or(LogLevel::Unknown)
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp != UNKNOWN_TIMESTAMP
    }

    /// Timestamp as shown in the table ("-" when unknown)
    pub fn display_timestamp(&self) -> &str {
        if self.has_timestamp() {
            &self.timestamp
        } else {
            "-"
        }
    }

    /// Render as `<timestamp>[ [<LEVEL>]] <message>` for the clipboard
    pub fn copy_line(&self) -> String {
        match self.level {
            Some(level) => format!("{} [{}] {}", self.timestamp, level, self.message),
            None => format!("{} {}", self.timestamp, self.message),
        }
    }
}

fn unknown_timestamp() -> String {
    UNKNOWN_TIMESTAMP.to_string()
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_timestamp))
}

fn deserialize_level<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<LogLevel>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(|s| LogLevel::parse(&s)))
}

fn deserialize_message<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
