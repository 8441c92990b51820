//! Per-flavor policy: key tables, toggle hooks and accessibility roles.

mod keymap;

use std::fmt;

pub use keymap::{Action, KeyMap, Scope};

use crate::input::KeyToken;

/// The kind of navigation menu being driven.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Show/hide disclosure navigation.
    #[default]
    Disclosure,
    /// Horizontal application-style menubar.
    Menubar,
    /// Expandable tree.
    Treeview,
}

/// ARIA roles a flavor stamps onto its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub root: &'static str,
    pub submenu: &'static str,
    pub item: &'static str,
    pub link: &'static str,
    /// Stamp `aria-haspopup` on submenu toggles.
    pub haspopup: bool,
}

impl Flavor {
    pub fn name(self) -> &'static str {
        match self {
            Flavor::Disclosure => "disclosure",
            Flavor::Menubar => "menubar",
            Flavor::Treeview => "treeview",
        }
    }

    /// Opening a submenu closes the other submenus at the same level.
    pub fn closes_siblings(self) -> bool {
        matches!(self, Flavor::Disclosure | Flavor::Menubar)
    }

    /// Only one link at the top level sits in the tab order.
    pub fn uses_roving_tabindex(self) -> bool {
        matches!(self, Flavor::Menubar | Flavor::Treeview)
    }

    pub fn roles(self) -> Option<Roles> {
        match self {
            Flavor::Disclosure => None,
            Flavor::Menubar => Some(Roles {
                root: "menubar",
                submenu: "menu",
                item: "none",
                link: "menuitem",
                haspopup: true,
            }),
            Flavor::Treeview => Some(Roles {
                root: "tree",
                submenu: "group",
                item: "none",
                link: "treeitem",
                haspopup: false,
            }),
        }
    }

    /// Build the key table for this flavor.
    ///
    /// `optional_keys` enables arrow and Home/End navigation for disclosure
    /// menus; the other flavors always have it.
    pub fn keymap(self, optional_keys: bool) -> KeyMap {
        let mut keys = KeyMap::new();
        match self {
            Flavor::Disclosure => {
                keys.bind_all(KeyToken::Enter, Action::ToggleSubmenu);
                keys.bind_all(KeyToken::Space, Action::ToggleSubmenu);
                keys.bind_all(KeyToken::Escape, Action::CloseOpenOrParent);
                if optional_keys {
                    let next = Action::FocusNext {
                        wrap: false,
                        carry_open: false,
                    };
                    let previous = Action::FocusPrevious {
                        wrap: false,
                        carry_open: false,
                    };
                    keys.bind_all(KeyToken::ArrowDown, next);
                    keys.bind_all(KeyToken::ArrowRight, next);
                    keys.bind_all(KeyToken::ArrowUp, previous);
                    keys.bind_all(KeyToken::ArrowLeft, previous);
                    keys.bind_all(KeyToken::Home, Action::FocusFirst);
                    keys.bind_all(KeyToken::End, Action::FocusLast);
                }
            }
            Flavor::Menubar => {
                use Scope::{Submenu, TopLevel};

                keys.bind(
                    TopLevel,
                    KeyToken::ArrowRight,
                    Action::FocusNext {
                        wrap: true,
                        carry_open: true,
                    },
                );
                keys.bind(
                    TopLevel,
                    KeyToken::ArrowLeft,
                    Action::FocusPrevious {
                        wrap: true,
                        carry_open: true,
                    },
                );
                keys.bind(TopLevel, KeyToken::ArrowDown, Action::OpenFirst);
                keys.bind(TopLevel, KeyToken::ArrowUp, Action::OpenLast);
                keys.bind(TopLevel, KeyToken::Escape, Action::CloseController);

                keys.bind(
                    Submenu,
                    KeyToken::ArrowDown,
                    Action::FocusNext {
                        wrap: true,
                        carry_open: false,
                    },
                );
                keys.bind(
                    Submenu,
                    KeyToken::ArrowUp,
                    Action::FocusPrevious {
                        wrap: true,
                        carry_open: false,
                    },
                );
                keys.bind(Submenu, KeyToken::ArrowRight, Action::EnterOrNextTopLevel);
                keys.bind(Submenu, KeyToken::ArrowLeft, Action::BackOrPreviousTopLevel);
                keys.bind(Submenu, KeyToken::Escape, Action::CloseToParent);

                keys.bind_all(KeyToken::Enter, Action::Activate);
                keys.bind_all(KeyToken::Space, Action::Activate);
                keys.bind_all(KeyToken::Home, Action::FocusFirst);
                keys.bind_all(KeyToken::End, Action::FocusLast);
                keys.bind_all(KeyToken::Character, Action::Search);
                keys.bind_all(KeyToken::Tab, Action::Exit);
            }
            Flavor::Treeview => {
                keys.bind_all(KeyToken::ArrowDown, Action::NextVisible);
                keys.bind_all(KeyToken::ArrowUp, Action::PreviousVisible);
                keys.bind_all(KeyToken::ArrowRight, Action::ExpandOrEnter);
                keys.bind_all(KeyToken::ArrowLeft, Action::CollapseOrParent);
                keys.bind_all(KeyToken::Home, Action::FirstVisible);
                keys.bind_all(KeyToken::End, Action::LastVisible);
                keys.bind_all(KeyToken::Enter, Action::ToggleSubmenu);
                keys.bind_all(KeyToken::Space, Action::ToggleSubmenu);
                keys.bind_all(KeyToken::Asterisk, Action::ExpandSiblings);
                keys.bind_all(KeyToken::Character, Action::Search);
                keys.bind_all(KeyToken::Tab, Action::Exit);
            }
        }
        keys
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
