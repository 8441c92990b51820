//! Observable side effects handed to the host.

use crate::document::ElementId;
use crate::menu::{ItemId, ToggleId};

/// Something the host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// A submenu (or the controlled container) started opening.
    Expanded {
        toggle: ToggleId,
        /// The toggle element.
        element: ElementId,
    },
    /// A submenu (or the controlled container) started closing.
    Collapsed { toggle: ToggleId, element: ElementId },
    /// A plain item was chosen with the pointer or keyboard.
    Activated {
        item: ItemId,
        /// The item's link element.
        element: ElementId,
    },
}
