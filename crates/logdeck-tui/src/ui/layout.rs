use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// Regions of the log viewer screen, top to bottom
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerAreas {
    pub header: Rect,
    pub ingest: Rect,
    pub search: Rect,
    pub levels: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// Layout helper for consistent screen layouts
pub struct Layout;

impl Layout {
    /// Split the screen for the log viewer; the ingest panel takes `ingest_height` rows
    pub fn log_viewer(area: Rect, ingest_height: u16) -> ViewerAreas {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),             // Header
                Constraint::Length(ingest_height), // Ingest panel
                Constraint::Length(3),             // Search bar
                Constraint::Length(1),             // Level filter buttons
                Constraint::Min(3),                // Log table
                Constraint::Length(1),             // Status bar
            ])
            .split(area);

        ViewerAreas {
            header: chunks[0],
            ingest: chunks[1],
            search: chunks[2],
            levels: chunks[3],
            table: chunks[4],
            status: chunks[5],
        }
    }

    /// A centered popup of at most `width` x `height`, leaving a margin
    pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(4));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }

    /// A popup anchored at (x, y), shifted to stay inside `bounds`
    pub fn anchored(bounds: Rect, x: u16, y: u16, width: u16, height: u16) -> Rect {
        let width = width.min(bounds.width);
        let height = height.min(bounds.height);
        let x = x.clamp(bounds.x, bounds.right().saturating_sub(width));
        let y = y.clamp(bounds.y, bounds.bottom().saturating_sub(height));
        Rect::new(x, y, width, height)
    }
}
