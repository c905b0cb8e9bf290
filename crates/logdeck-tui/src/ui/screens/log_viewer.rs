use logdeck_logs::{LogEntry, LogLevel};
use ratatui::{
    Frame,
    layout::{Constraint, Layout as RatatuiLayout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState,
        Table, Wrap,
    },
};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::app::{AppState, LevelButton, SubmitStatus};
use crate::config::KeyContext;
use crate::ui::components::{
    IngestPanel, StatusBar, ingest_hints, menu_hints, search_hints, table_hints,
};
use crate::ui::{Layout, Theme};

const EMPTY_MESSAGE: &str = "No logs available. Please ingest data to view logs.";
const NO_MATCH_MESSAGE: &str = "No logs match the current filters.";

/// Level badge: glyph, space, longest level name
const LEVEL_WIDTH: u16 = 9;
const MIN_TIMESTAMP_WIDTH: u16 = 11;
const MAX_TIMESTAMP_WIDTH: u16 = 32;

/// Main screen: ingest panel, filters and the log table
pub struct LogViewerScreen;

impl LogViewerScreen {
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let areas = Layout::log_viewer(frame.area(), IngestPanel::height(state));

        Self::render_header(frame, areas.header, state);
        IngestPanel::render(frame, areas.ingest, state);
        Self::render_search_bar(frame, areas.search, state);
        Self::render_level_bar(frame, areas.levels, state);
        Self::render_table(frame, areas.table, state);
        Self::render_status_bar(frame, areas.status, state);
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![
            Span::styled("logdeck", Theme::title()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(state.backend_url.as_str(), Theme::text()),
            Span::styled(" │ ", Theme::text_dim()),
            Span::styled(
                format!("{} logs", state.view.entries().len()),
                Theme::text_highlight(),
            ),
        ];

        if let SubmitStatus::Submitting(_) = state.status {
            spans.push(Span::styled(" │ ", Theme::text_dim()));
            spans.push(Span::styled(
                "Processing...",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

        frame.render_widget(header, area);
    }

    fn render_search_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let active = state.ui_state.search_active;
        let filter = state.view.filter();
        let term = filter.search_term();
        let title = if filter.is_empty() {
            " Search "
        } else {
            " Search (filters active) "
        };

        let mut spans = vec![];
        if active {
            spans.push(Span::styled(
                " /",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                state.ui_state.search_input.clone(),
                Theme::text_highlight(),
            ));
            spans.push(Span::styled(
                "█",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::SLOW_BLINK),
            ));
        } else if term.is_empty() {
            spans.push(Span::styled(
                " Press / to search messages and timestamps",
                Theme::text_dim(),
            ));
        } else {
            spans.push(Span::styled(" Search: ", Theme::text_dim()));
            spans.push(Span::styled(term.to_string(), Theme::text_highlight()));
            spans.push(Span::styled("  [/] Edit", Theme::text_dim()));
        }

        let search_bar = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if active {
                    Style::default().fg(Color::Yellow)
                } else {
                    Theme::border()
                })
                .title(Span::styled(title, Theme::title())),
        );

        frame.render_widget(search_bar, area);
    }

    /// One button per level plus select all / none, recorded for mouse clicks
    fn render_level_bar(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let counts = state.view.level_counts();
        let filter = state.view.filter();

        let mut spans = vec![Span::styled(" Levels ", Theme::text_dim())];
        let mut buttons = Vec::new();
        let mut x = area.x + spans[0].width() as u16;

        let mut push_button =
            |spans: &mut Vec<Span<'static>>, label: String, style: Style, button| {
                let width = label.width() as u16;
                buttons.push((Rect::new(x, area.y, width, 1), button));
                spans.push(Span::styled(label, style));
                spans.push(Span::raw(" "));
                x = x.saturating_add(width + 1);
            };

        for (n, level) in LogLevel::ALL.iter().enumerate() {
            let label = format!(
                " {} {} {} ",
                n + 1,
                level.as_str(),
                counts.get(*level)
            );
            let style = Theme::level_button(*level, filter.is_level_enabled(*level));
            push_button(&mut spans, label, style, LevelButton::Level(*level));
        }
        push_button(&mut spans, " All ".to_string(), Theme::button(), LevelButton::SelectAll);
        push_button(&mut spans, " None ".to_string(), Theme::button(), LevelButton::DeselectAll);

        // Buttons cut off by a narrow terminal are not clickable
        buttons.retain(|(rect, _)| rect.right() <= area.right());
        state.ui_state.hit_areas.level_buttons = buttons;

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
        let total = state.view.entries().len();
        let shown = state.view.len();
        let selected = state.view.selection().len();

        let mut title = if shown == total {
            format!(" Logs ({}) ", total)
        } else {
            format!(" Logs ({} of {}) ", shown, total)
        };
        if selected > 0 {
            title.push_str(&format!("· {} selected ", selected));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border())
            .title(Span::styled(title, Theme::title()));
        let inner = block.inner(area);

        if shown == 0 {
            let message = if total == 0 { EMPTY_MESSAGE } else { NO_MATCH_MESSAGE };
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(message, Theme::text_dim())).centered(),
            ])
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(empty, area);

            let hit_areas = &mut state.ui_state.hit_areas;
            hit_areas.table_rows = Rect::default();
            hit_areas.timestamp_header = Rect::default();
            state.ui_state.viewport_rows = 0;
            return;
        }

        // Header row takes the first inner line
        let viewport = inner.height.saturating_sub(1) as usize;
        state.ui_state.viewport_rows = viewport;
        let max_scroll = shown.saturating_sub(viewport);
        if state.ui_state.scroll > max_scroll {
            state.ui_state.scroll = max_scroll;
        }
        state.scroll_to_cursor();

        let scroll = state.ui_state.scroll;
        let cursor = state.ui_state.cursor;
        let highlighter = search_regex(state.view.filter().search_term());
        let sort = state.view.filter().sort_order();

        let visible: Vec<(usize, &LogEntry)> = state.view.range(scroll, viewport).collect();
        let timestamp_width = visible
            .iter()
            .map(|(_, entry)| entry.display_timestamp().width() as u16)
            .max()
            .unwrap_or(0)
            .clamp(MIN_TIMESTAMP_WIDTH, MAX_TIMESTAMP_WIDTH);

        let widths = [
            Constraint::Length(timestamp_width),
            Constraint::Length(LEVEL_WIDTH),
            Constraint::Fill(1),
        ];

        let rows: Vec<Row> = visible
            .iter()
            .map(|(index, entry)| {
                let is_selected = state.view.selection().contains(*index);
                let mut style = Style::default();
                if is_selected {
                    style = style.patch(Theme::row_selected());
                }
                if *index == cursor {
                    style = if is_selected {
                        style.add_modifier(Modifier::BOLD)
                    } else {
                        style.patch(Theme::row_cursor())
                    };
                }

                Row::new(vec![
                    timestamp_cell(entry),
                    level_cell(entry.level),
                    Cell::from(highlight_message(&entry.message, highlighter.as_ref())),
                ])
                .style(style)
            })
            .collect();

        let header = Row::new(vec![
            Cell::from(format!("Timestamp {}", sort.indicator())),
            Cell::from("Level"),
            Cell::from("Message"),
        ])
        .style(Theme::table_header());

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(block);
        frame.render_widget(table, area);

        // Column rects mirror the table's own layout
        let header_area = Rect { height: 1, ..inner };
        let columns = RatatuiLayout::horizontal(widths)
            .spacing(1)
            .split(header_area);
        let hit_areas = &mut state.ui_state.hit_areas;
        hit_areas.timestamp_header = columns[0];
        hit_areas.table_rows = Rect {
            y: inner.y + 1,
            height: (shown - scroll).min(viewport) as u16,
            ..inner
        };

        if shown > viewport {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut scrollbar_state = ScrollbarState::default()
                .content_length(max_scroll)
                .position(scroll.min(max_scroll));

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = match KeyContext::for_state(state) {
            KeyContext::IngestInput => ingest_hints(),
            KeyContext::SearchInput => search_hints(),
            KeyContext::ContextMenu => menu_hints(),
            _ => table_hints(),
        };

        let counts = state.view.level_counts();
        let right = format!(
            "E:{} W:{} I:{} | {}/{} logs",
            counts.error + counts.fatal,
            counts.warning,
            counts.info,
            state.view.len(),
            counts.total()
        );

        let status = StatusBar::new()
            .hints(hints)
            .notice(state.ui_state.notice.as_deref())
            .right(right);
        frame.render_widget(status, area);
    }
}

fn timestamp_cell(entry: &LogEntry) -> Cell<'static> {
    let style = if entry.has_timestamp() {
        Theme::text()
    } else {
        Theme::text_dim()
    };
    Cell::from(Span::styled(entry.display_timestamp().to_string(), style))
}

fn level_cell(level: Option<LogLevel>) -> Cell<'static> {
    match level {
        Some(level) => Cell::from(Span::styled(
            format!("{} {}", level.glyph(), level.as_str()),
            Theme::level_badge(level),
        )),
        None => Cell::from(Span::styled("-", Theme::text_dim())),
    }
}

/// Case-insensitive matcher for the literal search term
fn search_regex(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", regex::escape(term))).ok()
}

/// Message text on one line, with search matches highlighted
fn highlight_message(message: &str, highlighter: Option<&Regex>) -> Line<'static> {
    let message: String = message
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();

    let Some(re) = highlighter else {
        return Line::from(Span::styled(message, Theme::text()));
    };

    let mut spans = Vec::new();
    let mut last_end = 0;
    for m in re.find_iter(&message) {
        if m.start() > last_end {
            spans.push(Span::styled(
                message[last_end..m.start()].to_string(),
                Theme::text(),
            ));
        }
        spans.push(Span::styled(m.as_str().to_string(), Theme::search_match()));
        last_end = m.end();
    }
    if last_end < message.len() {
        spans.push(Span::styled(message[last_end..].to_string(), Theme::text()));
    }

    Line::from(spans)
}
