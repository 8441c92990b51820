//! The menu coordination engine.
//!
//! A [`Menu`] is an arena holding every node, item and toggle of one menu
//! tree. Nodes refer to their parent and toggles to their nodes by index, so
//! ownership only flows downward from the menu itself. Settings such as hover
//! mode, delays and transition classes live once on the menu and apply to
//! the whole tree.

mod build;
mod item;
mod keyboard;
mod node;
mod pointer;
mod tasks;
mod toggle;

use std::time::Duration;

use crate::config::MenuConfig;
use crate::document::{Document, ElementId};
use crate::flavor::{Flavor, KeyMap};
use crate::notify::Notification;
use crate::scheduler::{Scheduler, TaskId};
use crate::state::{FocusState, HoverMode, Modality, TransitionPhase};

use tasks::Task;

/// Index of a node in its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Index of an item in its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

/// Index of a toggle in its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToggleId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl ToggleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct NodeState {
    element: ElementId,
    items: Vec<ItemId>,
    submenu_toggles: Vec<ToggleId>,
    parent: Option<NodeId>,
    selection: isize,
    focus: FocusState,
    modality: Modality,
    hover_timer: Option<TaskId>,
    depth: usize,
}

#[derive(Debug)]
struct ItemState {
    element: ElementId,
    link: ElementId,
    node: NodeId,
    toggle: Option<ToggleId>,
    child: Option<NodeId>,
}

#[derive(Debug)]
struct ToggleState {
    /// The element the user activates.
    element: ElementId,
    /// The element whose classes are swapped on open and close.
    target: ElementId,
    controlled: NodeId,
    parent: Option<NodeId>,
    open: bool,
    phase: TransitionPhase,
    generation: u64,
    transition_timer: Option<TaskId>,
}

/// One menu tree bound to a document.
#[derive(Debug)]
pub struct Menu {
    document: Document,
    flavor: Flavor,
    keymap: KeyMap,
    config: MenuConfig,
    nodes: Vec<NodeState>,
    items: Vec<ItemState>,
    toggles: Vec<ToggleState>,
    controller: Option<ToggleId>,
    has_opened: bool,
    scheduler: Scheduler<Task>,
    notifications: Vec<Notification>,
}

impl Menu {
    const ROOT: NodeId = NodeId(0);

    /// The root node.
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    fn node(&self, node: NodeId) -> &NodeState {
        &self.nodes[node.0]
    }

    fn node_mut(&mut self, node: NodeId) -> &mut NodeState {
        &mut self.nodes[node.0]
    }

    fn item(&self, item: ItemId) -> &ItemState {
        &self.items[item.0]
    }

    fn toggle_state(&self, toggle: ToggleId) -> &ToggleState {
        &self.toggles[toggle.0]
    }

    fn toggle_state_mut(&mut self, toggle: ToggleId) -> &mut ToggleState {
        &mut self.toggles[toggle.0]
    }

    // Node structure

    /// Walk parent links up to the node with no parent.
    pub fn root_of(&self, node: NodeId) -> NodeId {
        let mut current = node;
        while let Some(parent) = self.node(current).parent {
            current = parent;
        }
        current
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn is_top_level(&self, node: NodeId) -> bool {
        self.node(node).parent.is_none()
    }

    /// Nesting depth, zero for the root.
    pub fn depth(&self, node: NodeId) -> usize {
        self.node(node).depth
    }

    pub fn element(&self, node: NodeId) -> ElementId {
        self.node(node).element
    }

    pub fn items(&self, node: NodeId) -> &[ItemId] {
        &self.node(node).items
    }

    pub fn submenu_toggles(&self, node: NodeId) -> &[ToggleId] {
        &self.node(node).submenu_toggles
    }

    /// The item at the node's current selection.
    pub fn current_item(&self, node: NodeId) -> Option<ItemId> {
        let state = self.node(node);
        usize::try_from(state.selection)
            .ok()
            .and_then(|index| state.items.get(index).copied())
    }

    pub fn selection(&self, node: NodeId) -> isize {
        self.node(node).selection
    }

    pub fn focus_state(&self, node: NodeId) -> FocusState {
        self.node(node).focus
    }

    pub fn modality(&self, node: NodeId) -> Modality {
        self.node(node).modality
    }

    /// Returns true if a hover timer is waiting on this node.
    pub fn has_pending_hover(&self, node: NodeId) -> bool {
        self.node(node)
            .hover_timer
            .is_some_and(|id| self.scheduler.is_pending(id))
    }

    // Items

    pub fn item_element(&self, item: ItemId) -> ElementId {
        self.item(item).element
    }

    pub fn item_link(&self, item: ItemId) -> ElementId {
        self.item(item).link
    }

    /// The node that owns the item.
    pub fn item_node(&self, item: ItemId) -> NodeId {
        self.item(item).node
    }

    pub fn is_submenu_item(&self, item: ItemId) -> bool {
        self.item(item).toggle.is_some()
    }

    pub fn item_toggle(&self, item: ItemId) -> Option<ToggleId> {
        self.item(item).toggle
    }

    pub fn item_child(&self, item: ItemId) -> Option<NodeId> {
        self.item(item).child
    }

    /// Position of the item inside its node.
    pub fn item_index(&self, item: ItemId) -> usize {
        let node = self.item(item).node;
        self.node(node)
            .items
            .iter()
            .position(|&candidate| candidate == item)
            .unwrap_or(0)
    }

    /// Find the item whose element contains `element`, preferring the deepest.
    pub fn item_containing(&self, element: ElementId) -> Option<ItemId> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.document.contains(item.element, element))
            .max_by_key(|(_, item)| self.node(item.node).depth)
            .map(|(index, _)| ItemId(index))
    }

    // Toggles

    pub fn toggle_element(&self, toggle: ToggleId) -> ElementId {
        self.toggle_state(toggle).element
    }

    pub fn controlled_node(&self, toggle: ToggleId) -> NodeId {
        self.toggle_state(toggle).controlled
    }

    pub fn toggle_parent(&self, toggle: ToggleId) -> Option<NodeId> {
        self.toggle_state(toggle).parent
    }

    pub fn is_open(&self, toggle: ToggleId) -> bool {
        self.toggle_state(toggle).open
    }

    pub fn transition_phase(&self, toggle: ToggleId) -> TransitionPhase {
        self.toggle_state(toggle).phase
    }

    /// The toggle that shows and hides the whole menu, if configured.
    pub fn controller(&self) -> Option<ToggleId> {
        self.controller
    }

    /// The toggle in the parent node that controls `node`.
    pub fn controlling_toggle(&self, node: NodeId) -> Option<ToggleId> {
        let parent = self.node(node).parent?;
        self.node(parent)
            .submenu_toggles
            .iter()
            .copied()
            .find(|&toggle| self.toggle_state(toggle).controlled == node)
    }

    // Root settings

    pub fn hover_mode(&self) -> HoverMode {
        self.config.hover_mode
    }

    pub fn set_hover_mode(&mut self, mode: HoverMode) {
        self.config.hover_mode = mode;
    }

    pub fn enter_delay(&self) -> Duration {
        self.config.resolved_enter_delay()
    }

    pub fn leave_delay(&self) -> Duration {
        self.config.resolved_leave_delay()
    }

    /// True once any submenu in the tree has been opened.
    pub fn has_opened(&self) -> bool {
        self.has_opened
    }

    /// Whether DOM focus may follow logical focus for this node.
    pub fn should_focus(&self, node: NodeId) -> bool {
        match self.node(node).modality {
            Modality::Keyboard | Modality::Character => true,
            Modality::Mouse => self.config.hover_mode == HoverMode::Dynamic,
            Modality::None => false,
        }
    }

    // Host interface

    /// Notifications produced since the last drain.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Current position of the menu's clock.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until the next timer is due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Returns true if a paint boundary has work queued.
    pub fn needs_paint(&self) -> bool {
        self.scheduler.has_frame_work()
    }

    /// Move the clock forward, running every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.settle(until);
    }

    /// Run one paint boundary. Work requested during it waits for the next.
    pub fn paint(&mut self) {
        for task in self.scheduler.take_frame() {
            self.run_task(task);
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
