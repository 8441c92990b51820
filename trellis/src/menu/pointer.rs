//! Pointer and focus input.

use std::time::Duration;

use crate::input::PointerKind;
use crate::state::{FocusState, HoverMode, Modality};

use super::tasks::{HoverAction, Task};
use super::{ItemId, Menu, NodeId, ToggleId};

impl Menu {
    /// The pointer moved onto an item.
    ///
    /// Only mouse pointers hover; pen and touch input is ignored.
    pub fn pointer_enter(&mut self, item: ItemId, pointer: PointerKind) {
        if pointer != PointerKind::Mouse {
            return;
        }
        let node = self.item(item).node;
        let index = self.item_index(item) as isize;
        let toggle = self.item(item).toggle;

        match self.config.hover_mode {
            HoverMode::Off => {}
            HoverMode::On => {
                self.set_modality(node, Modality::Mouse);
                self.set_selection(node, index);
                if let Some(toggle) = toggle {
                    let delay = self.enter_delay();
                    self.schedule_hover(node, delay, HoverAction::Preview(toggle));
                }
            }
            HoverMode::Dynamic => {
                self.set_selection(node, index);
                if !self.is_top_level(node) || self.node(node).focus != FocusState::None {
                    self.set_modality(node, Modality::Mouse);
                    self.focus_current_child(node);
                }
                if let Some(toggle) = toggle
                    && (!self.is_top_level(node) || self.has_opened)
                {
                    self.set_modality(node, Modality::Mouse);
                    let delay = self.enter_delay();
                    self.schedule_hover(node, delay, HoverAction::Preview(toggle));
                }
            }
        }
    }

    /// The pointer moved off an item. Only submenu items react.
    pub fn pointer_leave(&mut self, item: ItemId, pointer: PointerKind) {
        if pointer != PointerKind::Mouse {
            return;
        }
        let Some(toggle) = self.item(item).toggle else {
            return;
        };
        let node = self.item(item).node;

        match self.config.hover_mode {
            HoverMode::Off => {}
            HoverMode::On => {
                let delay = self.leave_delay();
                self.schedule_hover(node, delay, HoverAction::Close(toggle));
            }
            HoverMode::Dynamic => {
                if self.toggle_state(toggle).open {
                    let delay = self.leave_delay();
                    self.schedule_hover(node, delay, HoverAction::Modality);
                }
            }
        }
    }

    /// Replace the node's hover timer. A zero delay runs the action now.
    fn schedule_hover(&mut self, node: NodeId, delay: Duration, action: HoverAction) {
        if let Some(pending) = self.node_mut(node).hover_timer.take()
            && self.scheduler.cancel(pending)
        {
            log::trace!("Cancelled hover timer on node {}", node.0);
        }

        if delay.is_zero() {
            self.run_hover(node, action);
            return;
        }

        log::trace!("Hover timer on node {} in {:?}: {:?}", node.0, delay, action);
        let id = self.scheduler.after(delay, Task::Hover { node, action });
        self.node_mut(node).hover_timer = Some(id);
    }

    pub(super) fn run_hover(&mut self, node: NodeId, action: HoverAction) {
        match action {
            HoverAction::Preview(toggle) => self.preview(toggle),
            HoverAction::Close(toggle) => {
                self.set_modality(node, Modality::Mouse);
                self.close(toggle);
            }
            HoverAction::Modality => self.set_modality(node, Modality::Mouse),
        }
    }

    /// A pointer was released over an item.
    ///
    /// Plain items are activated. Submenu items toggle their submenu, with
    /// focus kept on the item rather than moved into the submenu.
    pub fn pointer_up(&mut self, item: ItemId) {
        let node = self.item(item).node;
        let index = self.item_index(item) as isize;

        self.set_modality(Self::ROOT, Modality::Mouse);
        self.focus_child(node, index);

        match self.item(item).toggle {
            Some(toggle) => self.toggle_in_place(Some(node), toggle),
            None => self.activate(item),
        }
    }

    /// A pointer was released over the controller element.
    pub fn pointer_up_controller(&mut self) -> bool {
        let Some(controller) = self.controller else {
            return false;
        };
        self.set_modality(Self::ROOT, Modality::Mouse);
        self.toggle_in_place(None, controller);
        true
    }

    pub(super) fn toggle_in_place(&mut self, node: Option<NodeId>, toggle: ToggleId) {
        self.toggle(toggle);
        if self.toggle_state(toggle).open {
            if let Some(node) = node {
                self.set_focus_state(node, FocusState::Within);
            }
            let controlled = self.toggle_state(toggle).controlled;
            self.set_focus_state(controlled, FocusState::None);
        }
    }

    /// A pointer was released somewhere outside the menu.
    ///
    /// If focus was in the menu, everything closes and dynamic hover has to
    /// be re-armed by another manual open. Returns true if anything changed.
    pub fn pointer_up_outside(&mut self) -> bool {
        if self.node(Self::ROOT).focus == FocusState::None {
            return false;
        }
        self.set_modality(Self::ROOT, Modality::Mouse);
        self.close_children(Self::ROOT);
        self.blur_children(Self::ROOT);
        self.blur_node(Self::ROOT);
        if let Some(controller) = self.controller {
            self.close(controller);
        }
        self.has_opened = false;
        true
    }

    /// An item's link received DOM focus.
    pub fn focus_in(&mut self, item: ItemId) {
        let node = self.item(item).node;
        let index = self.item_index(item) as isize;
        self.set_focus_state(node, FocusState::Within);
        self.set_selection(node, index);
    }
}
