//! Action dispatch: applies user intents to the state and reports any
//! network work the event loop has to start.

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use logdeck_client::{IngestMode, IngestPayload};
use logdeck_logs::{ClickModifiers, LogEntry};
use tracing::{info, warn};

use super::Action;
use super::clipboard::Clipboard;
use super::state::{AppState, LevelButton, MenuItem};

/// Outbound requests produced by an action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Ingest(IngestPayload),
    AnalyseSelected(Vec<LogEntry>),
}

/// Apply an action to the state
pub fn handle_action(
    state: &mut AppState,
    clipboard: &mut dyn Clipboard,
    action: Action,
) -> Option<Request> {
    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::ToggleHelp => {
            state.ui_state.help_visible = !state.ui_state.help_visible;
        }
        Action::ToggleIngestPanel => {
            state.ui_state.ingest_open = !state.ui_state.ingest_open;
        }

        // Ingest panel
        Action::IngestSwitchMode => {
            state.ingest.mode = state.ingest.mode.toggle();
            state.ui_state.ingest_error = None;
        }
        Action::IngestInput(c) => {
            state.ingest.active_input_mut().push(c);
            state.ui_state.ingest_error = None;
        }
        Action::IngestNewline => {
            // Enter submits a path; in paste mode it is just a newline
            if state.ingest.mode == IngestMode::File {
                return state.begin_ingest().map(Request::Ingest);
            }
            state.ingest.pasted.push('\n');
        }
        Action::IngestBackspace => {
            state.ingest.active_input_mut().pop();
        }
        Action::IngestClear => {
            state.ingest.active_input_mut().clear();
        }
        Action::IngestPaste(text) => match state.ingest.mode {
            IngestMode::Paste => state.ingest.pasted.push_str(&text),
            IngestMode::File => {
                let path = text.lines().next().unwrap_or_default().trim();
                state.ingest.file_path.push_str(path);
            }
        },
        Action::Submit => {
            return state.begin_ingest().map(Request::Ingest);
        }

        // Search
        Action::OpenSearch => state.start_search(),
        Action::CloseSearch => state.finish_search(),
        Action::SearchInput(c) => state.search_input_char(c),
        Action::SearchBackspace => state.search_input_backspace(),
        Action::SearchClear => state.clear_search(),

        // Level filter
        Action::ToggleLevel(level) => {
            state.view.toggle_level(level);
            state.after_filter_change();
        }
        Action::SelectAllLevels => {
            state.view.select_all_levels();
            state.after_filter_change();
        }
        Action::DeselectAllLevels => {
            state.view.deselect_all_levels();
            state.after_filter_change();
        }

        Action::CycleSort => {
            state.view.cycle_sort();
            state.after_filter_change();
        }

        // Table navigation
        Action::CursorUp => state.move_cursor(-1),
        Action::CursorDown => state.move_cursor(1),
        Action::PageUp => {
            let page = state.ui_state.viewport_rows.max(1) as isize;
            state.move_cursor(-page);
        }
        Action::PageDown => {
            let page = state.ui_state.viewport_rows.max(1) as isize;
            state.move_cursor(page);
        }
        Action::ScrollToTop => state.cursor_to(0),
        Action::ScrollToBottom => state.cursor_to(usize::MAX),

        // Selection
        Action::ClickRow { index, modifiers } => {
            state.close_context_menu();
            if state.view.click(index, modifiers) {
                state.cursor_to(index);
            }
        }
        Action::ClickCursor(modifiers) => {
            let cursor = state.ui_state.cursor;
            state.view.click(cursor, modifiers);
        }
        Action::ExtendUp => {
            state.move_cursor(-1);
            let cursor = state.ui_state.cursor;
            state.view.click(cursor, ClickModifiers::shift());
        }
        Action::ExtendDown => {
            state.move_cursor(1);
            let cursor = state.ui_state.cursor;
            state.view.click(cursor, ClickModifiers::shift());
        }
        Action::ClearSelection => state.view.clear_selection(),

        // Context menu
        Action::OpenContextMenu { index, x, y } => state.open_context_menu(index, x, y),
        Action::OpenContextMenuAtCursor => {
            let rows = state.ui_state.hit_areas.table_rows;
            let offset = state.ui_state.cursor.saturating_sub(state.ui_state.scroll) as u16;
            let (x, y) = (rows.x + 2, rows.y.saturating_add(offset).saturating_add(1));
            state.open_context_menu(state.ui_state.cursor, x, y);
        }
        Action::MenuUp => {
            if let Some(menu) = state.ui_state.context_menu.as_mut() {
                let len = menu.items().len();
                menu.highlighted = (menu.highlighted + len - 1) % len;
            }
        }
        Action::MenuDown => {
            if let Some(menu) = state.ui_state.context_menu.as_mut() {
                menu.highlighted = (menu.highlighted + 1) % menu.items().len();
            }
        }
        Action::MenuSelect => {
            let item = state
                .ui_state
                .context_menu
                .as_ref()
                .and_then(|menu| menu.highlighted_item());
            if let Some(item) = item {
                return handle_action(state, clipboard, Action::MenuActivate(item));
            }
        }
        Action::MenuClose => state.close_context_menu(),
        Action::MenuActivate(item) => {
            let menu = state.ui_state.context_menu.take()?;
            match item {
                MenuItem::CopySelected => copy_selected(state, clipboard),
                MenuItem::CopyThis => copy_row(state, clipboard, menu.index),
                MenuItem::AnalyseSelected => {
                    return state.begin_analyse().map(Request::AnalyseSelected);
                }
            }
        }

        // Copy / analyse
        Action::CopySelected => copy_selected(state, clipboard),
        Action::CopyRow(index) => copy_row(state, clipboard, index),
        Action::CopyCursorRow => {
            let cursor = state.ui_state.cursor;
            copy_row(state, clipboard, cursor);
        }
        Action::AnalyseSelected => {
            return state.begin_analyse().map(Request::AnalyseSelected);
        }

        Action::DismissNotice => state.dismiss_notice(),
        Action::Render => {}
    }

    None
}

fn copy_selected(state: &mut AppState, clipboard: &mut dyn Clipboard) {
    let Some(text) = state.view.selected_copy_text() else {
        return;
    };
    let count = state.view.selection().len();
    if write_clipboard(clipboard, &text) {
        info!(count, "selected logs copied to clipboard");
        state.show_notice(format!(
            "Copied {} log{} to clipboard",
            count,
            if count == 1 { "" } else { "s" }
        ));
    }
}

fn copy_row(state: &mut AppState, clipboard: &mut dyn Clipboard, index: usize) {
    let Some(text) = state.view.copy_text_at(index) else {
        return;
    };
    if write_clipboard(clipboard, &text) {
        info!(index, "single log copied to clipboard");
        state.show_notice("Copied log to clipboard");
    }
}

/// Clipboard failures are logged and otherwise ignored
fn write_clipboard(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.set_text(text) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to copy logs");
            false
        }
    }
}

/// Translate a mouse event into an action using the last render's layout
pub fn mouse_action(state: &AppState, event: MouseEvent) -> Option<Action> {
    let (column, row) = (event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if state.ui_state.context_menu.is_some() {
                let menu = state.ui_state.context_menu.as_ref()?;
                return match state.menu_item_at(column, row) {
                    Some(i) => menu.items().get(i).copied().map(Action::MenuActivate),
                    None => Some(Action::MenuClose),
                };
            }

            let position = ratatui::layout::Position::new(column, row);
            let areas = &state.ui_state.hit_areas;
            if areas.ingest_header.contains(position) {
                return Some(Action::ToggleIngestPanel);
            }
            if areas.timestamp_header.contains(position) {
                return Some(Action::CycleSort);
            }
            if let Some(button) = state.level_button_at(column, row) {
                return Some(match button {
                    LevelButton::Level(level) => Action::ToggleLevel(level),
                    LevelButton::SelectAll => Action::SelectAllLevels,
                    LevelButton::DeselectAll => Action::DeselectAllLevels,
                });
            }

            let index = state.row_at(column, row)?;
            Some(Action::ClickRow {
                index,
                modifiers: click_modifiers(event.modifiers),
            })
        }
        MouseEventKind::Down(MouseButton::Right) => {
            let index = state.row_at(column, row)?;
            Some(Action::OpenContextMenu {
                index,
                x: column,
                y: row,
            })
        }
        MouseEventKind::ScrollUp => Some(Action::CursorUp),
        MouseEventKind::ScrollDown => Some(Action::CursorDown),
        _ => None,
    }
}

fn click_modifiers(modifiers: KeyModifiers) -> ClickModifiers {
    ClickModifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        ctrl: modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{MemoryClipboard, RequestKind, SubmitStatus};
    use logdeck_logs::LogLevel;
    use ratatui::layout::Rect;

    fn loaded_state() -> AppState {
        let mut state = AppState::new("http://backend");
        state.load_entries(vec![
            LogEntry::new("10:00", Some(LogLevel::Error), "boom"),
            LogEntry::new("10:01", Some(LogLevel::Info), "ok"),
            LogEntry::new("10:02", None, "plain"),
        ]);
        state.ui_state.viewport_rows = 10;
        state
    }

    fn click(index: usize, modifiers: ClickModifiers) -> Action {
        Action::ClickRow { index, modifiers }
    }

    #[test]
    fn test_quit() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();
        handle_action(&mut state, &mut clipboard, Action::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_shift_click_range_then_copy() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();

        handle_action(&mut state, &mut clipboard, click(0, ClickModifiers::NONE));
        handle_action(&mut state, &mut clipboard, click(2, ClickModifiers::shift()));
        handle_action(&mut state, &mut clipboard, Action::CopySelected);

        assert_eq!(
            clipboard.contents.as_deref(),
            Some("10:00 [ERROR] boom\n10:01 [INFO] ok\n10:02 plain")
        );
        assert_eq!(state.ui_state.notice.as_deref(), Some("Copied 3 logs to clipboard"));
    }

    #[test]
    fn test_clipboard_failure_is_not_fatal() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard {
            contents: None,
            fail: true,
        };

        handle_action(&mut state, &mut clipboard, click(1, ClickModifiers::NONE));
        let request = handle_action(&mut state, &mut clipboard, Action::CopySelected);

        assert!(request.is_none());
        assert!(clipboard.contents.is_none());
        assert!(state.ui_state.notice.is_none());
        assert_eq!(state.view.selection().len(), 1);
    }

    #[test]
    fn test_copy_with_empty_selection_writes_nothing() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();
        handle_action(&mut state, &mut clipboard, Action::CopySelected);
        assert!(clipboard.contents.is_none());
    }

    #[test]
    fn test_context_menu_copy_this_log() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();

        handle_action(
            &mut state,
            &mut clipboard,
            Action::OpenContextMenu { index: 1, x: 3, y: 4 },
        );
        handle_action(&mut state, &mut clipboard, Action::MenuSelect);

        assert_eq!(clipboard.contents.as_deref(), Some("10:01 [INFO] ok"));
        assert!(state.ui_state.context_menu.is_none());
    }

    #[test]
    fn test_context_menu_analyse_selected() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();

        handle_action(&mut state, &mut clipboard, click(2, ClickModifiers::NONE));
        handle_action(&mut state, &mut clipboard, click(0, ClickModifiers::ctrl()));
        handle_action(
            &mut state,
            &mut clipboard,
            Action::OpenContextMenu { index: 0, x: 0, y: 0 },
        );
        handle_action(&mut state, &mut clipboard, Action::MenuDown);
        let request = handle_action(&mut state, &mut clipboard, Action::MenuSelect);

        match request {
            Some(Request::AnalyseSelected(logs)) => {
                let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(messages, vec!["boom", "plain"]);
            }
            other => panic!("unexpected request: {:?}", other),
        }
        assert_eq!(
            state.status,
            SubmitStatus::Submitting(RequestKind::AnalyseSelected)
        );
    }

    #[test]
    fn test_submit_paste_produces_request() {
        let mut state = AppState::new("http://backend");
        let mut clipboard = MemoryClipboard::default();

        handle_action(&mut state, &mut clipboard, Action::IngestSwitchMode);
        handle_action(&mut state, &mut clipboard, Action::IngestPaste("a\nb".to_string()));
        handle_action(&mut state, &mut clipboard, Action::IngestNewline);
        let request = handle_action(&mut state, &mut clipboard, Action::Submit);

        assert_eq!(request, Some(Request::Ingest(IngestPayload::Text("a\nb\n".to_string()))));
        // A second submit while the first is out goes nowhere
        assert_eq!(handle_action(&mut state, &mut clipboard, Action::Submit), None);
    }

    #[test]
    fn test_enter_in_file_mode_submits() {
        let mut state = AppState::new("http://backend");
        let mut clipboard = MemoryClipboard::default();
        for c in "app.log".chars() {
            handle_action(&mut state, &mut clipboard, Action::IngestInput(c));
        }
        let request = handle_action(&mut state, &mut clipboard, Action::IngestNewline);
        assert_eq!(request, Some(Request::Ingest(IngestPayload::File("app.log".into()))));
    }

    #[test]
    fn test_level_toggle_resets_selection() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();

        handle_action(&mut state, &mut clipboard, click(1, ClickModifiers::NONE));
        handle_action(&mut state, &mut clipboard, Action::ToggleLevel(LogLevel::Error));

        assert!(state.view.selection().is_empty());
        assert_eq!(state.view.len(), 2);
    }

    #[test]
    fn test_extend_down_from_anchor() {
        let mut state = loaded_state();
        let mut clipboard = MemoryClipboard::default();

        handle_action(&mut state, &mut clipboard, Action::ClickCursor(ClickModifiers::NONE));
        handle_action(&mut state, &mut clipboard, Action::ExtendDown);
        handle_action(&mut state, &mut clipboard, Action::ExtendDown);

        let selected: Vec<usize> = state.view.selection().indices().collect();
        assert_eq!(selected, vec![0, 1, 2]);
        assert_eq!(state.ui_state.cursor, 2);
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16, modifiers: KeyModifiers) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers,
        }
    }

    #[test]
    fn test_mouse_click_modifiers() {
        let mut state = loaded_state();
        state.ui_state.hit_areas.table_rows = Rect::new(0, 10, 80, 5);

        let action = mouse_action(
            &state,
            mouse(
                MouseEventKind::Down(MouseButton::Left),
                4,
                12,
                KeyModifiers::SHIFT | KeyModifiers::CONTROL,
            ),
        );
        assert_eq!(
            action,
            Some(click(
                2,
                ClickModifiers {
                    shift: true,
                    ctrl: true
                }
            ))
        );

        let action = mouse_action(
            &state,
            mouse(MouseEventKind::Down(MouseButton::Right), 4, 11, KeyModifiers::NONE),
        );
        assert_eq!(action, Some(Action::OpenContextMenu { index: 1, x: 4, y: 11 }));

        // Below the last row
        let action = mouse_action(
            &state,
            mouse(MouseEventKind::Down(MouseButton::Left), 4, 14, KeyModifiers::NONE),
        );
        assert_eq!(action, None);
    }

    #[test]
    fn test_mouse_header_and_level_buttons() {
        let mut state = loaded_state();
        state.ui_state.hit_areas.timestamp_header = Rect::new(1, 9, 20, 1);
        state.ui_state.hit_areas.level_buttons = vec![
            (Rect::new(1, 7, 7, 1), LevelButton::Level(LogLevel::Trace)),
            (Rect::new(30, 7, 5, 1), LevelButton::DeselectAll),
        ];

        let left = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            mouse_action(&state, mouse(left, 5, 9, KeyModifiers::NONE)),
            Some(Action::CycleSort)
        );
        assert_eq!(
            mouse_action(&state, mouse(left, 3, 7, KeyModifiers::NONE)),
            Some(Action::ToggleLevel(LogLevel::Trace))
        );
        assert_eq!(
            mouse_action(&state, mouse(left, 31, 7, KeyModifiers::NONE)),
            Some(Action::DeselectAllLevels)
        );
    }

    #[test]
    fn test_mouse_click_outside_menu_closes_it() {
        let mut state = loaded_state();
        state.open_context_menu(0, 10, 10);
        state.ui_state.hit_areas.menu = Rect::new(10, 10, 24, 3);

        let left = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            mouse_action(&state, mouse(left, 12, 11, KeyModifiers::NONE)),
            Some(Action::MenuActivate(MenuItem::CopyThis))
        );
        assert_eq!(
            mouse_action(&state, mouse(left, 0, 0, KeyModifiers::NONE)),
            Some(Action::MenuClose)
        );
    }
}
