mod context_menu;
mod help_overlay;
mod ingest_panel;
mod status_bar;

pub use context_menu::ContextMenuPopup;
pub use help_overlay::HelpOverlay;
pub use ingest_panel::IngestPanel;
pub use status_bar::{StatusBar, ingest_hints, menu_hints, search_hints, table_hints};
