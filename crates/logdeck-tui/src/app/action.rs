use logdeck_logs::{ClickModifiers, LogLevel};

use crate::app::MenuItem;

/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,

    // UI toggles
    ToggleHelp,
    ToggleIngestPanel,

    // Ingest panel
    IngestSwitchMode,
    IngestInput(char),
    IngestNewline,
    IngestBackspace,
    IngestClear,
    IngestPaste(String),
    Submit,

    // Search
    OpenSearch,
    CloseSearch,
    SearchInput(char),
    SearchBackspace,
    SearchClear,

    // Level filter
    ToggleLevel(LogLevel),
    SelectAllLevels,
    DeselectAllLevels,

    // Sort
    CycleSort,

    // Table navigation
    CursorUp,
    CursorDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    // Selection
    ClickRow {
        index: usize,
        modifiers: ClickModifiers,
    },
    /// Click the cursor row with the given modifiers
    ClickCursor(ClickModifiers),
    /// Shift-click one row up or down from the cursor
    ExtendUp,
    ExtendDown,
    ClearSelection,

    // Context menu
    OpenContextMenu {
        index: usize,
        x: u16,
        y: u16,
    },
    OpenContextMenuAtCursor,
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuClose,
    MenuActivate(MenuItem),

    // Copy / analyse
    CopySelected,
    CopyRow(usize),
    /// Copy the row under the keyboard cursor
    CopyCursorRow,
    AnalyseSelected,

    // Status messages
    DismissNotice,

    // Render request
    Render,
}
