use logdeck_client::IngestMode;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{AppState, RequestKind, SubmitStatus};
use crate::ui::Theme;

const COLLAPSED_HEIGHT: u16 = 3;
const FILE_HEIGHT: u16 = 8;
const PASTE_HEIGHT: u16 = 13;

/// Collapsible panel for uploading a file or pasting raw logs
pub struct IngestPanel;

impl IngestPanel {
    /// Rows the panel needs in its current state
    pub fn height(state: &AppState) -> u16 {
        if !state.ui_state.ingest_open {
            return COLLAPSED_HEIGHT;
        }
        match state.ingest.mode {
            IngestMode::File => FILE_HEIGHT,
            IngestMode::Paste => PASTE_HEIGHT,
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, state: &mut AppState) {
        if state.ui_state.ingest_open {
            Self::render_open(frame, area, state);
            // Only the title row toggles an open panel
            state.ui_state.hit_areas.ingest_header = Rect { height: 1, ..area };
        } else {
            Self::render_collapsed(frame, area, state);
            state.ui_state.hit_areas.ingest_header = area;
        }
    }

    fn render_collapsed(frame: &mut Frame, area: Rect, state: &AppState) {
        let summary = if state.view.entries().is_empty() {
            Span::styled("Press i to ingest logs", Theme::text_dim())
        } else {
            Span::styled(
                format!("{} logs loaded · press i to ingest more", state.view.entries().len()),
                Theme::text_dim(),
            )
        };

        let panel = Paragraph::new(Line::from(vec![Span::raw(" "), summary])).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(" ▸ Ingest Logs ", Theme::title())),
        );
        frame.render_widget(panel, area);
    }

    fn render_open(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(Span::styled(" ▾ Ingest Logs ", Theme::title()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tabs
                Constraint::Min(3),    // Input
                Constraint::Length(1), // Error / submit line
            ])
            .split(inner);

        Self::render_tabs(frame, chunks[0], state.ingest.mode);
        Self::render_input(frame, chunks[1], state);
        Self::render_footer(frame, chunks[2], state);
    }

    fn render_tabs(frame: &mut Frame, area: Rect, mode: IngestMode) {
        let mut spans = vec![Span::raw(" ")];
        for tab in [IngestMode::File, IngestMode::Paste] {
            let style = if tab == mode {
                Theme::tab_active()
            } else {
                Theme::tab_inactive()
            };
            spans.push(Span::styled(format!(" {} ", tab.label()), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("[Tab] switch", Theme::text_dim()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_input(frame: &mut Frame, area: Rect, state: &AppState) {
        let cursor = Span::styled(
            "█",
            Style::default()
                .fg(Theme::HIGHLIGHT)
                .add_modifier(Modifier::SLOW_BLINK),
        );

        let (title, lines) = match state.ingest.mode {
            IngestMode::File => {
                let line = if state.ingest.file_path.is_empty() {
                    Line::from(vec![
                        cursor,
                        Span::styled(" path to a log file", Theme::text_dim()),
                    ])
                } else {
                    Line::from(vec![
                        Span::styled(state.ingest.file_path.clone(), Theme::text_highlight()),
                        cursor,
                    ])
                };
                (" File ", vec![line])
            }
            IngestMode::Paste => {
                // Keep the tail of the text visible
                let visible = area.height.saturating_sub(2) as usize;
                let text = &state.ingest.pasted;
                let mut lines: Vec<Line> = text
                    .split('\n')
                    .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
                    .collect();
                if let Some(last) = lines.last_mut() {
                    last.push_span(cursor);
                }
                let skip = lines.len().saturating_sub(visible);
                (" Paste your logs here ", lines.into_iter().skip(skip).collect())
            }
        };

        let input = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border())
                .title(Span::styled(title, Theme::text_dim())),
        );
        frame.render_widget(input, area);
    }

    fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
        let mut spans = vec![Span::raw(" ")];
        match state.status {
            SubmitStatus::Submitting(RequestKind::Ingest) => {
                spans.push(Span::styled("Processing...", Theme::text_highlight()));
            }
            _ => {
                spans.push(Span::styled("[Ctrl+S]", Theme::status_bar_key()));
                spans.push(Span::styled(" Submit", Theme::text()));
            }
        }
        if let Some(error) = &state.ui_state.ingest_error {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("⚠ {}", error), Theme::error()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
