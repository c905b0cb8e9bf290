use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::Layout;

/// Help overlay showing keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame) {
        let popup_area = Layout::centered(frame.area(), 54, 36);

        // Clear the background
        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(Span::styled(
                "Keybindings",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Self::section("Table"),
            Self::key_line("j/↓ k/↑", "Move cursor"),
            Self::key_line("Ctrl+d/u", "Page down / up"),
            Self::key_line("g / G", "Go to top / bottom"),
            Self::key_line("Enter", "Select only this row"),
            Self::key_line("Space", "Toggle row in selection"),
            Self::key_line("Shift+↑/↓", "Extend selection"),
            Self::key_line("Esc", "Clear selection"),
            Line::from(""),
            Self::section("Filter & sort"),
            Self::key_line("/", "Search messages and timestamps"),
            Self::key_line("1-7", "Toggle a level"),
            Self::key_line("= / -", "All levels / no levels"),
            Self::key_line("o", "Cycle timestamp sort"),
            Line::from(""),
            Self::section("Actions"),
            Self::key_line("m", "Row menu"),
            Self::key_line("y", "Copy selected logs"),
            Self::key_line("Y", "Copy this log"),
            Self::key_line("A", "Analyse selected logs"),
            Self::key_line("i", "Show / hide ingest panel"),
            Self::key_line("?", "Toggle this help"),
            Self::key_line("q", "Quit"),
            Line::from(""),
            Self::section("Mouse"),
            Self::key_line("Click", "Select row"),
            Self::key_line("Ctrl+Click", "Toggle row"),
            Self::key_line("Shift+Click", "Select range"),
            Self::key_line("Right click", "Row menu"),
        ];

        let help_widget = Paragraph::new(help_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(Span::styled(
                    " Help ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
        );

        frame.render_widget(help_widget, popup_area);
    }

    fn section(title: &str) -> Line<'_> {
        Line::from(Span::styled(title, Style::default().fg(Color::Yellow)))
    }

    fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!("  {:>11}", key), Style::default().fg(Color::Green)),
            Span::styled(format!("  {}", desc), Style::default().fg(Color::White)),
        ])
    }
}
