use logdeck_client::{IngestError, IngestForm, IngestPayload};
use logdeck_logs::{LogEntry, LogLevel, LogView, MenuScope};
use ratatui::layout::{Position, Rect};
use tracing::debug;

/// Which outbound request is in flight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Ingest,
    AnalyseSelected,
}

/// Ingestion state machine: idle → submitting → idle (with data or error)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting(RequestKind),
}

/// Entries of the row context menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    CopySelected,
    AnalyseSelected,
    CopyThis,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CopySelected => "Copy Selected Logs",
            Self::AnalyseSelected => "Analyse Selected Logs",
            Self::CopyThis => "Copy This Log",
        }
    }
}

/// An open context menu for one displayed row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextMenu {
    /// Display index the menu was opened on
    pub index: usize,
    /// Screen position of the top-left corner
    pub x: u16,
    pub y: u16,
    pub scope: MenuScope,
    /// Highlighted item
    pub highlighted: usize,
}

impl ContextMenu {
    pub fn items(&self) -> Vec<MenuItem> {
        match self.scope {
            MenuScope::Selected => vec![
                MenuItem::CopySelected,
                MenuItem::AnalyseSelected,
                MenuItem::CopyThis,
            ],
            MenuScope::Single => vec![MenuItem::CopyThis],
        }
    }

    pub fn highlighted_item(&self) -> Option<MenuItem> {
        self.items().get(self.highlighted).copied()
    }
}

/// Clickable buttons in the level bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LevelButton {
    Level(LogLevel),
    SelectAll,
    DeselectAll,
}

/// Screen regions recorded during render, used for mouse hit-testing
#[derive(Clone, Debug, Default)]
pub struct HitAreas {
    /// Whole ingest panel (including its title bar)
    pub ingest_header: Rect,
    /// Area covered by data rows of the log table
    pub table_rows: Rect,
    /// Timestamp column header cell
    pub timestamp_header: Rect,
    pub level_buttons: Vec<(Rect, LevelButton)>,
    /// Rendered context menu, one row per item
    pub menu: Rect,
}

/// UI-specific transient state
pub struct UiState {
    /// Is the ingest panel expanded?
    pub ingest_open: bool,

    /// Inline ingest validation or upload error
    pub ingest_error: Option<String>,

    /// Is search input active?
    pub search_active: bool,

    /// Current search input text
    pub search_input: String,

    /// Is help overlay visible?
    pub help_visible: bool,

    /// Transient message in the status bar
    pub notice: Option<String>,

    /// Keyboard cursor, as a display index
    pub cursor: usize,

    /// First display index in the viewport
    pub scroll: usize,

    /// Number of data rows that fit in the table
    pub viewport_rows: usize,

    /// Open row context menu
    pub context_menu: Option<ContextMenu>,

    /// Regions recorded on the last render
    pub hit_areas: HitAreas,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            // Ingest panel starts open so there is something to do
            ingest_open: true,
            ingest_error: None,
            search_active: false,
            search_input: String::new(),
            help_visible: false,
            notice: None,
            cursor: 0,
            scroll: 0,
            viewport_rows: 0,
            context_menu: None,
            hit_areas: HitAreas::default(),
        }
    }
}

/// Global application state
pub struct AppState {
    /// Backend address shown in the header
    pub backend_url: String,

    /// Entries, filter and selection
    pub view: LogView,

    /// Ingest form input
    pub ingest: IngestForm,

    /// Outbound request state
    pub status: SubmitStatus,

    /// UI state
    pub ui_state: UiState,

    /// Whether app should quit
    pub should_quit: bool,
}

impl AppState {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
            view: LogView::new(),
            ingest: IngestForm::new(),
            status: SubmitStatus::Idle,
            ui_state: UiState::default(),
            should_quit: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.status, SubmitStatus::Submitting(_))
    }

    /// Validate the ingest form and move to submitting.
    /// Returns None when the input is invalid or a request is already out.
    pub fn begin_ingest(&mut self) -> Option<IngestPayload> {
        if self.is_submitting() {
            self.show_notice("A request is already in progress");
            return None;
        }

        match self.ingest.payload() {
            Ok(payload) => {
                self.ui_state.ingest_error = None;
                self.status = SubmitStatus::Submitting(RequestKind::Ingest);
                Some(payload)
            }
            Err(e) => {
                self.reject_ingest(e);
                None
            }
        }
    }

    fn reject_ingest(&mut self, error: IngestError) {
        debug!(%error, "ingest rejected locally");
        self.ui_state.ingest_error = Some(error.to_string());
    }

    /// Collect the selected entries and move to submitting.
    /// Returns None when nothing is selected or a request is already out.
    pub fn begin_analyse(&mut self) -> Option<Vec<LogEntry>> {
        if self.is_submitting() {
            self.show_notice("A request is already in progress");
            return None;
        }

        let selected = self.view.selected_entries();
        if selected.is_empty() {
            self.show_notice("No logs selected");
            return None;
        }

        self.status = SubmitStatus::Submitting(RequestKind::AnalyseSelected);
        Some(selected)
    }

    /// Apply the outcome of a finished request and return to idle
    pub fn finish_request(&mut self, kind: RequestKind, result: Result<Vec<LogEntry>, String>) {
        self.status = SubmitStatus::Idle;

        match result {
            Ok(logs) => {
                self.load_entries(logs);
                if kind == RequestKind::Ingest {
                    self.ui_state.ingest_open = false;
                    self.ui_state.ingest_error = None;
                }
            }
            Err(e) => {
                let message = format!("Error uploading data: {}", e);
                match kind {
                    RequestKind::Ingest => self.ui_state.ingest_error = Some(message),
                    RequestKind::AnalyseSelected => self.show_notice(message),
                }
            }
        }
    }

    /// Replace the full entry set and reset table position
    pub fn load_entries(&mut self, logs: Vec<LogEntry>) {
        self.view.set_entries(logs);
        self.close_context_menu();
        self.reset_table_position();
    }

    /// Cursor and scroll go back to the top whenever the rows change
    pub fn reset_table_position(&mut self) {
        self.ui_state.cursor = 0;
        self.ui_state.scroll = 0;
    }

    /// Move the keyboard cursor by `delta` rows, clamped to the table
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.view.len();
        if len == 0 {
            self.ui_state.cursor = 0;
            return;
        }
        let cursor = self.ui_state.cursor as isize + delta;
        self.ui_state.cursor = cursor.clamp(0, len as isize - 1) as usize;
        self.scroll_to_cursor();
    }

    pub fn cursor_to(&mut self, index: usize) {
        self.ui_state.cursor = index.min(self.view.len().saturating_sub(1));
        self.scroll_to_cursor();
    }

    /// Keep the cursor inside the viewport
    pub fn scroll_to_cursor(&mut self) {
        let rows = self.ui_state.viewport_rows.max(1);
        let cursor = self.ui_state.cursor;
        if cursor < self.ui_state.scroll {
            self.ui_state.scroll = cursor;
        } else if cursor >= self.ui_state.scroll + rows {
            self.ui_state.scroll = cursor + 1 - rows;
        }
    }

    pub fn open_context_menu(&mut self, index: usize, x: u16, y: u16) {
        if index >= self.view.len() {
            return;
        }
        self.ui_state.context_menu = Some(ContextMenu {
            index,
            x,
            y,
            scope: self.view.menu_scope(index),
            highlighted: 0,
        });
    }

    pub fn close_context_menu(&mut self) {
        self.ui_state.context_menu = None;
    }

    /// Display index of the table row at a screen position
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.ui_state.hit_areas.table_rows;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.ui_state.scroll + (row - area.y) as usize;
        (index < self.view.len()).then_some(index)
    }

    /// Level bar button at a screen position
    pub fn level_button_at(&self, column: u16, row: u16) -> Option<LevelButton> {
        self.ui_state
            .hit_areas
            .level_buttons
            .iter()
            .find(|(rect, _)| rect.contains(Position::new(column, row)))
            .map(|(_, button)| *button)
    }

    /// Context menu item at a screen position
    pub fn menu_item_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.ui_state.hit_areas.menu;
        let menu = self.ui_state.context_menu.as_ref()?;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        // One border row above the items
        let item = (row - area.y).checked_sub(1)? as usize;
        (item < menu.items().len()).then_some(item)
    }

    /// Show a status bar message
    pub fn show_notice(&mut self, msg: impl Into<String>) {
        self.ui_state.notice = Some(msg.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.ui_state.notice = None;
    }

    /// Start search input mode, editing the current term
    pub fn start_search(&mut self) {
        self.ui_state.search_active = true;
        self.ui_state.search_input = self.view.filter().search_term().to_string();
    }

    /// Leave search input, keeping the applied term
    pub fn finish_search(&mut self) {
        self.ui_state.search_active = false;
    }

    /// Clear the search term entirely
    pub fn clear_search(&mut self) {
        self.ui_state.search_input.clear();
        self.apply_search();
    }

    pub fn search_input_char(&mut self, c: char) {
        self.ui_state.search_input.push(c);
        self.apply_search();
    }

    pub fn search_input_backspace(&mut self) {
        self.ui_state.search_input.pop();
        self.apply_search();
    }

    /// Search applies as the user types
    fn apply_search(&mut self) {
        let before = self.view.filter().search_term().to_string();
        self.view.set_search_term(&self.ui_state.search_input);
        if before != self.ui_state.search_input {
            self.after_filter_change();
        }
    }

    /// Reset position state that referred to the old displayed rows
    pub fn after_filter_change(&mut self) {
        self.close_context_menu();
        self.reset_table_position();
    }
}
