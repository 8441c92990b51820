//! Keyboard dispatch through the flavor's key table.

use crate::flavor::{Action, Scope};
use crate::input::{KeyPress, KeyToken};
use crate::state::{FocusState, Modality};

use super::{ItemId, Menu, NodeId, ToggleId};

impl Menu {
    /// The deepest node that logically holds focus.
    pub fn focused_node(&self) -> Option<NodeId> {
        self.nodes()
            .filter(|&node| self.node(node).focus == FocusState::Within)
            .max_by_key(|&node| self.node(node).depth)
    }

    /// Handle a key press on the focused node.
    ///
    /// Returns true if the key was consumed and default handling should be
    /// suppressed.
    pub fn key_down(&mut self, key: KeyPress) -> bool {
        let Some(node) = self.focused_node() else {
            return false;
        };
        self.set_modality(Self::ROOT, Modality::Keyboard);

        let scope = if self.is_top_level(node) {
            Scope::TopLevel
        } else {
            Scope::Submenu
        };
        let Some(action) = self.keymap.lookup(scope, key.token) else {
            return false;
        };
        if key.token == KeyToken::Character {
            self.set_modality(node, Modality::Character);
        }

        log::trace!("Key {:?} on node {}: {:?}", key.token, node.0, action);
        self.perform(node, action, key)
    }

    fn perform(&mut self, node: NodeId, action: Action, key: KeyPress) -> bool {
        match action {
            Action::FocusNext { wrap, carry_open } => {
                let carried = carry_open && self.current_toggle_open(node);
                self.focus_next_child(node, wrap);
                if carried {
                    self.carry_open(node);
                }
                true
            }
            Action::FocusPrevious { wrap, carry_open } => {
                let carried = carry_open && self.current_toggle_open(node);
                self.focus_previous_child(node, wrap);
                if carried {
                    self.carry_open(node);
                }
                true
            }
            Action::FocusFirst => {
                self.focus_first_child(node);
                true
            }
            Action::FocusLast => {
                self.focus_last_child(node);
                true
            }
            Action::Search => {
                if let Some(character) = key.character {
                    self.focus_next_child_with_character(node, character);
                }
                true
            }
            Action::Activate => {
                let Some(item) = self.current_item(node) else {
                    return false;
                };
                match self.item(item).toggle {
                    Some(toggle) => self.open_into(toggle, false),
                    None => self.activate(item),
                }
                true
            }
            Action::ToggleSubmenu => {
                let Some(item) = self.current_item(node) else {
                    return false;
                };
                match self.item(item).toggle {
                    Some(toggle) => self.toggle_in_place(Some(node), toggle),
                    None => self.activate(item),
                }
                true
            }
            Action::OpenFirst | Action::OpenLast => {
                let Some(toggle) = self.current_toggle(node) else {
                    return false;
                };
                self.open_into(toggle, action == Action::OpenLast);
                true
            }
            Action::EnterOrNextTopLevel => {
                if let Some(toggle) = self.current_toggle(node) {
                    self.open_into(toggle, false);
                } else {
                    self.close_children(Self::ROOT);
                    self.focus_next_child(Self::ROOT, true);
                    self.preview_current(Self::ROOT);
                }
                true
            }
            Action::BackOrPreviousTopLevel => {
                if self.node(node).parent == Some(Self::ROOT) {
                    self.close_children(Self::ROOT);
                    self.focus_previous_child(Self::ROOT, true);
                    self.preview_current(Self::ROOT);
                    true
                } else {
                    self.close_to_parent(node)
                }
            }
            Action::CloseToParent => self.close_to_parent(node),
            Action::CloseOpenOrParent => {
                let any_open = self
                    .node(node)
                    .submenu_toggles
                    .iter()
                    .any(|&toggle| self.toggle_state(toggle).open);
                if any_open {
                    self.close_children(node);
                    self.focus_current_child(node);
                    true
                } else if self.node(node).parent.is_some() {
                    self.close_to_parent(node)
                } else {
                    self.close_controller()
                }
            }
            Action::Exit => {
                self.close_children(Self::ROOT);
                self.blur_node(Self::ROOT);
                false
            }
            Action::NextVisible | Action::PreviousVisible | Action::FirstVisible | Action::LastVisible => {
                let visible = self.visible_items();
                let position = self
                    .current_item(node)
                    .and_then(|current| visible.iter().position(|&item| item == current));
                let target = match (action, position) {
                    (Action::FirstVisible, _) => visible.first(),
                    (Action::LastVisible, _) => visible.last(),
                    (_, None) => visible.first(),
                    (Action::NextVisible, Some(position)) => {
                        visible.get(position + 1).or(visible.get(position))
                    }
                    (_, Some(position)) => visible.get(position.saturating_sub(1)),
                };
                if let Some(&target) = target {
                    self.move_to_item(node, target);
                }
                true
            }
            Action::ExpandOrEnter => {
                let Some(toggle) = self.current_toggle(node) else {
                    return false;
                };
                if self.toggle_state(toggle).open {
                    let child = self.toggle_state(toggle).controlled;
                    self.blur_current_child(node);
                    self.focus_first_child(child);
                } else {
                    self.preview(toggle);
                }
                true
            }
            Action::CollapseOrParent => {
                if let Some(toggle) = self.current_toggle(node)
                    && self.toggle_state(toggle).open
                {
                    self.close(toggle);
                    return true;
                }
                let Some(parent) = self.node(node).parent else {
                    return false;
                };
                self.blur_current_child(node);
                self.focus_current_child(parent);
                true
            }
            Action::ExpandSiblings => {
                for toggle in self.node(node).submenu_toggles.clone() {
                    self.preview(toggle);
                }
                true
            }
            Action::CloseController => self.close_controller(),
        }
    }

    fn current_toggle(&self, node: NodeId) -> Option<ToggleId> {
        self.current_item(node).and_then(|item| self.item(item).toggle)
    }

    fn current_toggle_open(&self, node: NodeId) -> bool {
        self.current_toggle(node)
            .is_some_and(|toggle| self.toggle_state(toggle).open)
    }

    /// After moving along a level with a submenu open, open the new item's
    /// submenu instead, or close everything if it has none.
    fn carry_open(&mut self, node: NodeId) {
        match self.current_toggle(node) {
            Some(toggle) => self.preview(toggle),
            None => self.close_children(node),
        }
    }

    fn preview_current(&mut self, node: NodeId) {
        if let Some(toggle) = self.current_toggle(node) {
            self.preview(toggle);
        }
    }

    /// Open a submenu and focus its first or last item.
    fn open_into(&mut self, toggle: ToggleId, last: bool) {
        self.open(toggle);
        let child = self.toggle_state(toggle).controlled;
        if last {
            self.focus_last_child(child);
        } else {
            self.focus_first_child(child);
        }
    }

    fn close_to_parent(&mut self, node: NodeId) -> bool {
        let (Some(parent), Some(toggle)) = (self.node(node).parent, self.controlling_toggle(node)) else {
            return false;
        };
        self.close(toggle);
        self.focus_current_child(parent);
        true
    }

    fn close_controller(&mut self) -> bool {
        let Some(controller) = self.controller else {
            return false;
        };
        self.close(controller);
        self.focus_controller()
    }

    /// Items in visual order, descending into open submenus.
    pub fn visible_items(&self) -> Vec<ItemId> {
        let mut visible = Vec::new();
        self.collect_visible(Self::ROOT, &mut visible);
        visible
    }

    fn collect_visible(&self, node: NodeId, visible: &mut Vec<ItemId>) {
        for &item in &self.node(node).items {
            visible.push(item);
            if let Some(toggle) = self.item(item).toggle
                && self.toggle_state(toggle).open
            {
                self.collect_visible(self.toggle_state(toggle).controlled, visible);
            }
        }
    }

    fn move_to_item(&mut self, from: NodeId, target: ItemId) {
        let node = self.item(target).node;
        let index = self.item_index(target) as isize;
        if node != from {
            self.blur_current_child(from);
        }

        // Ancestors point at the items leading down to the target.
        let mut child = node;
        while let Some((parent, opener)) = self.opener(child) {
            self.set_selection(parent, opener as isize);
            child = parent;
        }

        self.focus_child(node, index);
    }
}
