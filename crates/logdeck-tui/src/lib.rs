//! TUI components for logdeck
//!
//! This crate provides the terminal user interface for logdeck,
//! including state management, keybindings, event handling, and UI components.

pub mod app;
pub mod config;
pub mod tui;
pub mod ui;

pub use app::{
    Action, AppState, Clipboard, ClipboardError, MemoryClipboard, Request, RequestKind,
    SubmitStatus, SystemClipboard, UiState, handle_action, mouse_action,
};
pub use config::{KeyBinding, KeyBindings, KeyContext};
pub use tui::{Event, EventHandler, Tui};
pub use ui::components::{ContextMenuPopup, HelpOverlay, IngestPanel, StatusBar};
pub use ui::screens::LogViewerScreen;
pub use ui::{Layout, Theme};
