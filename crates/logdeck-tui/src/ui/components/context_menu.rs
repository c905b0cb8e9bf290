use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::app::AppState;
use crate::ui::{Layout, Theme};

/// Popup menu for a table row
pub struct ContextMenuPopup;

impl ContextMenuPopup {
    /// Draw the open menu, if any, and record where it landed
    pub fn render(frame: &mut Frame, state: &mut AppState) {
        let Some(menu) = state.ui_state.context_menu.as_ref() else {
            state.ui_state.hit_areas.menu = Rect::default();
            return;
        };

        let items = menu.items();
        let width = items
            .iter()
            .map(|item| item.label().width() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let height = items.len() as u16 + 2;
        let area = Layout::anchored(frame.area(), menu.x, menu.y, width, height);

        let lines: Vec<Line> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if i == menu.highlighted {
                    Theme::menu_item_highlighted()
                } else {
                    Theme::menu_item()
                };
                let label = format!(" {:<w$} ", item.label(), w = width as usize - 4);
                Line::from(Span::styled(label, style))
            })
            .collect();

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Theme::border_focused()),
            ),
            area,
        );

        state.ui_state.hit_areas.menu = area;
    }
}
