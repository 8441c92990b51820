//! Shared state enums for menu nodes and toggles.

use std::fmt;

use serde::Deserialize;

/// Where focus logically lives relative to a menu node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// Focus is neither in this node nor in any descendant.
    #[default]
    None,
    /// Focus is on one of this node's own items.
    Within,
    /// Focus is somewhere in a descendant node.
    Child,
}

impl fmt::Display for FocusState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FocusState::None => "none",
            FocusState::Within => "self",
            FocusState::Child => "child",
        };
        f.write_str(name)
    }
}

/// Which input source last drove interaction with a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Modality {
    #[default]
    None,
    Mouse,
    Keyboard,
    /// Typed-character search.
    Character,
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modality::None => "none",
            Modality::Mouse => "mouse",
            Modality::Keyboard => "keyboard",
            Modality::Character => "character",
        };
        f.write_str(name)
    }
}

/// How pointer hovering drives submenus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    /// Hovering does nothing.
    #[default]
    Off,
    /// Hovering selects items and previews/closes submenus.
    On,
    /// Hovering follows focus, and previews submenus once one has been opened.
    Dynamic,
}

/// Visual transition phase of a toggle's controlled menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl TransitionPhase {
    /// The phase this one settles into once its transition completes.
    pub fn settled(self) -> Self {
        match self {
            TransitionPhase::Opening | TransitionPhase::Open => TransitionPhase::Open,
            TransitionPhase::Closing | TransitionPhase::Closed => TransitionPhase::Closed,
        }
    }
}
