use std::collections::BTreeSet;

/// Modifier keys held during a row click
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickModifiers {
    pub shift: bool,
    /// Ctrl on Linux/Windows, Cmd on macOS
    pub ctrl: bool,
}

impl ClickModifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
        }
    }

    pub fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
        }
    }
}

/// Which copy actions a context menu offers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuScope {
    /// Clicked row is not selected: only "copy this log"
    Single,
    /// Clicked row is part of the selection: bulk actions too
    Selected,
}

/// Multi-row selection over the displayed rows
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Selected display indices, kept ascending
    selected: BTreeSet<usize>,

    /// Pivot for shift-click ranges
    anchor: Option<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a click at `index` over `len` displayed rows.
    /// Returns false when the index is out of range and nothing changed.
    pub fn click(&mut self, index: usize, modifiers: ClickModifiers, len: usize) -> bool {
        if index >= len {
            return false;
        }

        // Shift wins over ctrl; without an anchor it is a plain click
        match (modifiers.shift, self.anchor) {
            (true, Some(anchor)) => {
                let (start, end) = (anchor.min(index), anchor.max(index));
                self.selected.extend(start..=end);
            }
            _ if modifiers.ctrl && !modifiers.shift => {
                if !self.selected.remove(&index) {
                    self.selected.insert(index);
                }
            }
            _ => {
                self.selected.clear();
                self.selected.insert(index);
            }
        }

        self.anchor = Some(index);
        true
    }

    /// Drop the selection and the anchor
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Selected indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Context menu mode for a right-click on `index`
    pub fn menu_scope(&self, index: usize) -> MenuScope {
        if self.selected.contains(&index) {
            MenuScope::Selected
        } else {
            MenuScope::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(sel: &Selection) -> Vec<usize> {
        sel.indices().collect()
    }

    #[test]
    fn test_plain_click_replaces_selection() {
        let mut sel = Selection::new();
        sel.click(0, ClickModifiers::NONE, 5);
        sel.click(3, ClickModifiers::NONE, 5);
        assert_eq!(selected(&sel), vec![3]);
        assert_eq!(sel.anchor(), Some(3));
    }

    #[test]
    fn test_shift_click_selects_range() {
        let mut sel = Selection::new();
        sel.click(0, ClickModifiers::NONE, 5);
        sel.click(2, ClickModifiers::shift(), 5);
        assert_eq!(selected(&sel), vec![0, 1, 2]);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn test_shift_click_range_upwards_keeps_existing() {
        let mut sel = Selection::new();
        sel.click(4, ClickModifiers::NONE, 6);
        sel.click(0, ClickModifiers::ctrl(), 6);
        sel.click(2, ClickModifiers::shift(), 6);
        assert_eq!(selected(&sel), vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_shift_without_anchor_is_plain_click() {
        let mut sel = Selection::new();
        sel.click(3, ClickModifiers::shift(), 5);
        assert_eq!(selected(&sel), vec![3]);
        assert_eq!(sel.anchor(), Some(3));
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let mut sel = Selection::new();
        sel.click(1, ClickModifiers::NONE, 5);
        sel.click(1, ClickModifiers::ctrl(), 5);
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), Some(1));

        sel.click(3, ClickModifiers::ctrl(), 5);
        sel.click(0, ClickModifiers::ctrl(), 5);
        assert_eq!(selected(&sel), vec![0, 3]);
    }

    #[test]
    fn test_shift_takes_priority_over_ctrl() {
        let mut sel = Selection::new();
        sel.click(1, ClickModifiers::NONE, 5);
        let both = ClickModifiers {
            shift: true,
            ctrl: true,
        };
        sel.click(3, both, 5);
        assert_eq!(selected(&sel), vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_click_ignored() {
        let mut sel = Selection::new();
        assert!(!sel.click(5, ClickModifiers::NONE, 5));
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
    }

    #[test]
    fn test_menu_scope() {
        let mut sel = Selection::new();
        sel.click(2, ClickModifiers::NONE, 5);
        assert_eq!(sel.menu_scope(2), MenuScope::Selected);
        assert_eq!(sel.menu_scope(0), MenuScope::Single);
    }
}
