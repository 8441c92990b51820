use std::collections::HashMap;

use crate::input::KeyToken;

/// Where in the tree the focused node sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The root node.
    TopLevel,
    /// Any submenu.
    Submenu,
}

/// Operation performed in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move to the next item. With `carry_open`, an open submenu on the item
    /// being left is carried over to the new item.
    FocusNext { wrap: bool, carry_open: bool },
    /// Move to the previous item.
    FocusPrevious { wrap: bool, carry_open: bool },
    FocusFirst,
    FocusLast,
    /// Move to the next item whose label starts with the typed character.
    Search,
    /// Open a submenu and move into its first item, or activate a plain item.
    Activate,
    /// Open or close a submenu leaving focus in place, or activate a plain item.
    ToggleSubmenu,
    /// Open the current item's submenu and focus its first item.
    OpenFirst,
    /// Open the current item's submenu and focus its last item.
    OpenLast,
    /// Enter the current submenu, or move to the next top-level item.
    EnterOrNextTopLevel,
    /// Return to the parent item, or move to the previous top-level item.
    BackOrPreviousTopLevel,
    /// Close this submenu and focus the item that opened it.
    CloseToParent,
    /// Close an open child submenu, or fall back to [`Action::CloseToParent`].
    CloseOpenOrParent,
    /// Close everything and let focus leave the menu.
    Exit,
    NextVisible,
    PreviousVisible,
    FirstVisible,
    LastVisible,
    /// Expand a collapsed submenu, or enter an expanded one.
    ExpandOrEnter,
    /// Collapse an expanded submenu, or move to the parent item.
    CollapseOrParent,
    /// Expand every submenu at the current level.
    ExpandSiblings,
    /// Close the controller and return focus to it.
    CloseController,
}

/// Key table for one flavor.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    binds: HashMap<(Scope, KeyToken), Action>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key in one scope. Later binds replace earlier ones.
    pub fn bind(&mut self, scope: Scope, key: KeyToken, action: Action) {
        self.binds.insert((scope, key), action);
    }

    /// Bind a key in both scopes.
    pub fn bind_all(&mut self, key: KeyToken, action: Action) {
        self.bind(Scope::TopLevel, key, action);
        self.bind(Scope::Submenu, key, action);
    }

    pub fn lookup(&self, scope: Scope, key: KeyToken) -> Option<Action> {
        self.binds.get(&(scope, key)).copied()
    }
}
