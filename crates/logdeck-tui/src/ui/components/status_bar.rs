use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::ui::Theme;

/// Status bar showing keyboard shortcuts, or a transient notice in their place
pub struct StatusBar<'a> {
    hints: Vec<(&'a str, &'a str)>,
    notice: Option<&'a str>,
    right_text: Option<String>,
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self {
            hints: Vec::new(),
            notice: None,
            right_text: None,
        }
    }

    /// Add keyboard hints as (key, description) pairs
    pub fn hints<I>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.hints = hints.into_iter().collect();
        self
    }

    /// Show a message instead of the hints
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    /// Set text to display on the right side
    pub fn right<S: Into<String>>(mut self, text: S) -> Self {
        self.right_text = Some(text.into());
        self
    }
}

impl Default for StatusBar<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Fill background
        buf.set_style(area, Theme::status_bar());

        let line = match self.notice {
            Some(notice) => Line::from(vec![
                Span::styled(notice.to_string(), Theme::notice()),
                Span::styled("  [x] dismiss", Theme::status_bar()),
            ]),
            None => {
                let mut spans = Vec::new();
                for (i, (key, desc)) in self.hints.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled("  ", Theme::status_bar()));
                    }
                    spans.push(Span::styled(format!("[{}]", key), Theme::status_bar_key()));
                    spans.push(Span::styled(format!(" {}", desc), Theme::status_bar()));
                }
                Line::from(spans)
            }
        };
        let line_width = line.width() as u16;

        // Left side
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(2));

        // Right side, only when it does not overlap
        if let Some(right) = self.right_text {
            let right_width = right.width() as u16;
            let right_span = Span::styled(&right, Theme::status_bar());
            let right_x = area.x + area.width.saturating_sub(right_width + 2);
            if right_x > area.x + line_width + 2 {
                buf.set_span(right_x, area.y, &right_span, right_width);
            }
        }
    }
}

/// Hints while the log table has focus
pub fn table_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Enter", "Select"),
        ("Space", "Toggle"),
        ("m", "Menu"),
        ("y", "Copy"),
        ("/", "Search"),
        ("o", "Sort"),
        ("i", "Ingest"),
        ("?", "Help"),
    ]
}

/// Hints while the ingest panel has focus
pub fn ingest_hints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab", "Switch mode"),
        ("Ctrl+S", "Submit"),
        ("Ctrl+U", "Clear"),
        ("Esc", "Close panel"),
    ]
}

/// Hints while typing a search term
pub fn search_hints() -> Vec<(&'static str, &'static str)> {
    vec![("Enter", "Done"), ("Ctrl+U", "Clear")]
}

/// Hints while the context menu is open
pub fn menu_hints() -> Vec<(&'static str, &'static str)> {
    vec![("↑/↓", "Move"), ("Enter", "Choose"), ("Esc", "Close")]
}
