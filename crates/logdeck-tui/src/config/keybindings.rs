use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use logdeck_logs::{ClickModifiers, LogLevel};

use crate::app::{Action, AppState};

/// A key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context for keybindings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Global,
    LogTable,
    SearchInput,
    IngestInput,
    ContextMenu,
    Help,
}

impl KeyContext {
    /// The context that receives keys in the current state
    pub fn for_state(state: &AppState) -> Self {
        if state.ui_state.help_visible {
            Self::Help
        } else if state.ui_state.context_menu.is_some() {
            Self::ContextMenu
        } else if state.ui_state.search_active {
            Self::SearchInput
        } else if state.ui_state.ingest_open {
            Self::IngestInput
        } else {
            Self::LogTable
        }
    }

    /// Whether unbound printable characters are text input
    fn takes_text(&self) -> bool {
        matches!(self, Self::SearchInput | Self::IngestInput)
    }
}

/// Keybinding configuration
pub struct KeyBindings {
    bindings: HashMap<KeyContext, HashMap<KeyBinding, Action>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // Global bindings
        let mut global = HashMap::new();
        global.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        global.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        global.insert(KeyBinding::new(KeyCode::Char('q')), Action::Quit);
        bindings.insert(KeyContext::Global, global);

        // Log table bindings
        let mut table = HashMap::new();
        table.insert(KeyBinding::new(KeyCode::Char('j')), Action::CursorDown);
        table.insert(KeyBinding::new(KeyCode::Down), Action::CursorDown);
        table.insert(KeyBinding::new(KeyCode::Char('k')), Action::CursorUp);
        table.insert(KeyBinding::new(KeyCode::Up), Action::CursorUp);
        table.insert(KeyBinding::ctrl(KeyCode::Char('d')), Action::PageDown);
        table.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::PageUp);
        table.insert(KeyBinding::new(KeyCode::PageDown), Action::PageDown);
        table.insert(KeyBinding::new(KeyCode::PageUp), Action::PageUp);
        table.insert(KeyBinding::new(KeyCode::Char('g')), Action::ScrollToTop);
        table.insert(KeyBinding::shift(KeyCode::Char('G')), Action::ScrollToBottom);
        table.insert(KeyBinding::new(KeyCode::Home), Action::ScrollToTop);
        table.insert(KeyBinding::new(KeyCode::End), Action::ScrollToBottom);
        // Selection mirrors mouse clicks on the cursor row
        table.insert(
            KeyBinding::new(KeyCode::Enter),
            Action::ClickCursor(ClickModifiers::NONE),
        );
        table.insert(
            KeyBinding::new(KeyCode::Char(' ')),
            Action::ClickCursor(ClickModifiers::ctrl()),
        );
        table.insert(KeyBinding::shift(KeyCode::Up), Action::ExtendUp);
        table.insert(KeyBinding::shift(KeyCode::Down), Action::ExtendDown);
        table.insert(KeyBinding::shift(KeyCode::Char('K')), Action::ExtendUp);
        table.insert(KeyBinding::shift(KeyCode::Char('J')), Action::ExtendDown);
        table.insert(KeyBinding::new(KeyCode::Esc), Action::ClearSelection);
        // Level filter: 1-7 in severity order
        for (n, level) in LogLevel::ALL.iter().enumerate() {
            if let Some(digit) = char::from_digit(n as u32 + 1, 10) {
                table.insert(
                    KeyBinding::new(KeyCode::Char(digit)),
                    Action::ToggleLevel(*level),
                );
            }
        }
        table.insert(KeyBinding::new(KeyCode::Char('=')), Action::SelectAllLevels);
        table.insert(KeyBinding::new(KeyCode::Char('-')), Action::DeselectAllLevels);
        table.insert(KeyBinding::new(KeyCode::Char('o')), Action::CycleSort);
        table.insert(KeyBinding::new(KeyCode::Char('/')), Action::OpenSearch);
        table.insert(KeyBinding::new(KeyCode::Char('i')), Action::ToggleIngestPanel);
        table.insert(KeyBinding::new(KeyCode::Char('m')), Action::OpenContextMenuAtCursor);
        table.insert(KeyBinding::new(KeyCode::Char('y')), Action::CopySelected);
        table.insert(KeyBinding::shift(KeyCode::Char('Y')), Action::CopyCursorRow);
        table.insert(KeyBinding::shift(KeyCode::Char('A')), Action::AnalyseSelected);
        table.insert(KeyBinding::new(KeyCode::Char('x')), Action::DismissNotice);
        bindings.insert(KeyContext::LogTable, table);

        // Search bar bindings
        let mut search = HashMap::new();
        search.insert(KeyBinding::new(KeyCode::Enter), Action::CloseSearch);
        search.insert(KeyBinding::new(KeyCode::Esc), Action::CloseSearch);
        search.insert(KeyBinding::new(KeyCode::Backspace), Action::SearchBackspace);
        search.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::SearchClear);
        search.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyContext::SearchInput, search);

        // Ingest panel bindings
        let mut ingest = HashMap::new();
        ingest.insert(KeyBinding::new(KeyCode::Tab), Action::IngestSwitchMode);
        ingest.insert(KeyBinding::new(KeyCode::BackTab), Action::IngestSwitchMode);
        ingest.insert(KeyBinding::shift(KeyCode::BackTab), Action::IngestSwitchMode);
        ingest.insert(KeyBinding::ctrl(KeyCode::Char('s')), Action::Submit);
        ingest.insert(KeyBinding::new(KeyCode::Enter), Action::IngestNewline);
        ingest.insert(KeyBinding::new(KeyCode::Backspace), Action::IngestBackspace);
        ingest.insert(KeyBinding::ctrl(KeyCode::Char('u')), Action::IngestClear);
        ingest.insert(KeyBinding::new(KeyCode::Esc), Action::ToggleIngestPanel);
        ingest.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyContext::IngestInput, ingest);

        // Context menu bindings
        let mut menu = HashMap::new();
        menu.insert(KeyBinding::new(KeyCode::Up), Action::MenuUp);
        menu.insert(KeyBinding::new(KeyCode::Down), Action::MenuDown);
        menu.insert(KeyBinding::new(KeyCode::Char('k')), Action::MenuUp);
        menu.insert(KeyBinding::new(KeyCode::Char('j')), Action::MenuDown);
        menu.insert(KeyBinding::new(KeyCode::Enter), Action::MenuSelect);
        menu.insert(KeyBinding::new(KeyCode::Esc), Action::MenuClose);
        menu.insert(KeyBinding::new(KeyCode::Char('m')), Action::MenuClose);
        bindings.insert(KeyContext::ContextMenu, menu);

        // Help overlay swallows everything but these
        let mut help = HashMap::new();
        help.insert(KeyBinding::new(KeyCode::Esc), Action::ToggleHelp);
        help.insert(KeyBinding::new(KeyCode::Char('?')), Action::ToggleHelp);
        help.insert(KeyBinding::new(KeyCode::Char('q')), Action::ToggleHelp);
        bindings.insert(KeyContext::Help, help);

        Self { bindings }
    }

    /// Look up action for key event in given context
    pub fn get_action(&self, context: KeyContext, key: &KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(key);

        // First check context-specific bindings
        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|context_bindings| context_bindings.get(&binding))
        {
            return Some(action.clone());
        }

        // Text inputs turn plain characters into input
        if context.takes_text() {
            return text_input_action(context, key);
        }

        if context == KeyContext::Help {
            return None;
        }

        // Fall back to global bindings
        self.bindings
            .get(&KeyContext::Global)?
            .get(&binding)
            .cloned()
    }

    /// Resolve a key against whatever currently has focus
    pub fn dispatch(&self, state: &AppState, key: &KeyEvent) -> Option<Action> {
        self.get_action(KeyContext::for_state(state), key)
    }
}

fn text_input_action(context: KeyContext, key: &KeyEvent) -> Option<Action> {
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    if !(key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT) {
        return None;
    }
    match context {
        KeyContext::SearchInput => Some(Action::SearchInput(c)),
        KeyContext::IngestInput => Some(Action::IngestInput(c)),
        _ => None,
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}
