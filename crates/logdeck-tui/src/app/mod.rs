//! Application state and actions

mod action;
mod clipboard;
mod handler;
mod state;

pub use action::Action;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use handler::{Request, handle_action, mouse_action};
pub use state::{
    AppState, ContextMenu, HitAreas, LevelButton, MenuItem, RequestKind, SubmitStatus, UiState,
};
