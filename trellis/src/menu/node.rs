//! Node state: selection, focus state, modality and focus movement.

use crate::aria;
use crate::state::{FocusState, Modality};

use super::{Menu, NodeId};

impl Menu {
    /// Nodes opened by this node's submenu toggles.
    fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .submenu_toggles
            .iter()
            .map(|&toggle| self.toggle_state(toggle).controlled)
            .collect()
    }

    /// Set the selected item index, clamped to `-1..items.len()`.
    ///
    /// When the node is driven by the pointer or by character search, the
    /// parent's selection follows to the item that opens this node, all the
    /// way up to the root.
    pub fn set_selection(&mut self, node: NodeId, value: isize) {
        let last = self.node(node).items.len() as isize - 1;
        let selection = value.min(last).max(-1);
        self.node_mut(node).selection = selection;

        if node == Self::ROOT && self.flavor.uses_roving_tabindex() {
            self.refresh_tabindex();
        }

        self.sync_parent_selection(node);
    }

    fn sync_parent_selection(&mut self, node: NodeId) {
        let modality = self.node(node).modality;
        if !matches!(modality, Modality::Mouse | Modality::Character) {
            return;
        }
        let Some((parent, index)) = self.opener(node) else {
            return;
        };

        log::trace!(
            "Node {} selection propagates to parent {} index {}",
            node.0,
            parent.0,
            index
        );
        self.set_modality(parent, modality);
        self.set_selection(parent, index as isize);
    }

    /// The parent node and the index of the item in it that opens `node`.
    pub(super) fn opener(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.node(node).parent?;
        let toggle = self.controlling_toggle(node)?;
        let index = self
            .node(parent)
            .items
            .iter()
            .position(|&item| self.item(item).toggle == Some(toggle))?;
        Some((parent, index))
    }

    pub(super) fn refresh_tabindex(&self) {
        let root = self.node(Self::ROOT);
        let links: Vec<_> = root.items.iter().map(|&item| self.item(item).link).collect();
        let nested: Vec<_> = self
            .items
            .iter()
            .filter(|item| item.node != Self::ROOT)
            .map(|item| item.link)
            .collect();
        let selection = usize::try_from(root.selection).ok();
        aria::stamp_roving_tabindex(&self.document, &links, &nested, selection);
    }

    /// Set where focus lives relative to the node.
    ///
    /// `Within` and `None` clear focus from every descendant. `Within` and
    /// `Child` mark the parent as `Child`, which carries on up to the root.
    pub fn set_focus_state(&mut self, node: NodeId, state: FocusState) {
        self.node_mut(node).focus = state;

        if matches!(state, FocusState::Within | FocusState::None) {
            for child in self.child_nodes(node) {
                self.set_focus_state(child, FocusState::None);
            }
        }

        if matches!(state, FocusState::Within | FocusState::Child)
            && let Some(parent) = self.node(node).parent
        {
            self.set_focus_state(parent, FocusState::Child);
        }
    }

    /// Set the input modality of the node and every node below it.
    pub fn set_modality(&mut self, node: NodeId, modality: Modality) {
        self.node_mut(node).modality = modality;
        for child in self.child_nodes(node) {
            self.set_modality(child, modality);
        }
    }

    /// Give the node itself focus.
    pub fn focus_node(&mut self, node: NodeId) {
        self.set_focus_state(node, FocusState::Within);
        if self.should_focus(node) {
            self.document.focus(self.node(node).element);
        }
    }

    /// Take focus away from the node.
    pub fn blur_node(&mut self, node: NodeId) {
        self.set_focus_state(node, FocusState::None);
        if self.should_focus(node) {
            self.document.blur(self.node(node).element);
        }
    }

    pub fn focus_current_child(&mut self, node: NodeId) {
        self.set_focus_state(node, FocusState::Within);
        if let Some(item) = self.current_item(node) {
            self.focus_item(item);
        }
    }

    pub fn blur_current_child(&mut self, node: NodeId) {
        self.set_focus_state(node, FocusState::None);
        if let Some(item) = self.current_item(node) {
            self.blur_item(item);
        }
    }

    /// Move focus to the item at `index`.
    pub fn focus_child(&mut self, node: NodeId, index: isize) {
        self.blur_current_child(node);
        self.set_selection(node, index);
        self.focus_current_child(node);
    }

    pub fn focus_first_child(&mut self, node: NodeId) {
        self.focus_child(node, 0);
    }

    pub fn focus_last_child(&mut self, node: NodeId) {
        let last = self.node(node).items.len() as isize - 1;
        self.focus_child(node, last);
    }

    /// Move to the next item. At the end, wrap to the first or stay put.
    pub fn focus_next_child(&mut self, node: NodeId, wrap: bool) {
        let selection = self.node(node).selection;
        let last = self.node(node).items.len() as isize - 1;
        if selection < last {
            self.focus_child(node, selection + 1);
        } else if wrap {
            self.focus_first_child(node);
        } else {
            self.focus_current_child(node);
        }
    }

    /// Move to the previous item. At the start, wrap to the last or stay put.
    pub fn focus_previous_child(&mut self, node: NodeId, wrap: bool) {
        let selection = self.node(node).selection;
        if selection > 0 {
            self.focus_child(node, selection - 1);
        } else if wrap {
            self.focus_last_child(node);
        } else {
            self.focus_current_child(node);
        }
    }

    /// Focus the next item after the selection whose label starts with `character`.
    ///
    /// Whitespace in labels is ignored and matching is case-insensitive. The
    /// search does not wrap. Returns true if an item matched.
    pub fn focus_next_child_with_character(&mut self, node: NodeId, character: char) -> bool {
        let wanted: Vec<char> = character.to_lowercase().collect();
        let start = usize::try_from(self.node(node).selection + 1).unwrap_or(0);

        let found = self.node(node).items[start.min(self.node(node).items.len())..]
            .iter()
            .position(|&item| {
                let label = self.document.text_content(self.item(item).link);
                label
                    .chars()
                    .find(|c| !c.is_whitespace())
                    .is_some_and(|first| first.to_lowercase().eq(wanted.iter().copied()))
            });

        match found {
            Some(offset) => {
                self.focus_child(node, (start + offset) as isize);
                true
            }
            None => false,
        }
    }

    /// Close every submenu opened from this node.
    pub fn close_children(&mut self, node: NodeId) {
        for toggle in self.node(node).submenu_toggles.clone() {
            self.close(toggle);
        }
    }

    /// Blur every item in this node and below.
    pub fn blur_children(&mut self, node: NodeId) {
        for item in self.node(node).items.clone() {
            self.blur_item(item);
            if let Some(child) = self.item(item).child {
                self.blur_children(child);
            }
        }
    }

    /// Hand focus back to the controller element, if there is one.
    pub fn focus_controller(&mut self) -> bool {
        let Some(controller) = self.controller else {
            return false;
        };
        self.set_focus_state(Self::ROOT, FocusState::None);
        if self.should_focus(Self::ROOT) {
            self.document.focus(self.toggle_state(controller).element);
        }
        true
    }
}
