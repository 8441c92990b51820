//! Tree assembly from the document.

use crate::aria;
use crate::config::{MenuConfig, ParsedSelectors};
use crate::document::{Document, ElementId};
use crate::error::MenuError;
use crate::flavor::Flavor;
use crate::scheduler::Scheduler;
use crate::state::{FocusState, Modality, TransitionPhase};

use super::{ItemId, ItemState, Menu, NodeId, NodeState, ToggleId, ToggleState};

impl Menu {
    /// Validate the configuration and assemble the whole tree.
    ///
    /// Nothing is returned unless every node, item and toggle was built.
    /// Accessibility attributes are stamped and toggles take their starting
    /// state from the classes already on their elements; no notifications
    /// are produced while doing so.
    pub fn new(document: Document, flavor: Flavor, config: MenuConfig) -> Result<Self, MenuError> {
        let prepared = config.validate(&document)?;

        let mut menu = Self {
            keymap: flavor.keymap(config.optional_key_support),
            document,
            flavor,
            config,
            nodes: Vec::new(),
            items: Vec::new(),
            toggles: Vec::new(),
            controller: None,
            has_opened: false,
            scheduler: Scheduler::new(),
            notifications: Vec::new(),
        };

        let root = menu.build_node(prepared.menu, None, 0, &prepared.selectors)?;

        if let (Some(controller), Some(container)) = (prepared.controller, prepared.container) {
            let toggle = menu.push_toggle(controller, container, root, None);
            menu.controller = Some(toggle);
        }

        menu.stamp();
        for index in 0..menu.toggles.len() {
            menu.init_toggle(ToggleId(index));
        }

        log::debug!(
            "Built {} menu: {} nodes, {} items, {} toggles",
            menu.flavor,
            menu.nodes.len(),
            menu.items.len(),
            menu.toggles.len()
        );
        Ok(menu)
    }

    fn build_node(
        &mut self,
        element: ElementId,
        parent: Option<NodeId>,
        depth: usize,
        selectors: &ParsedSelectors,
    ) -> Result<NodeId, MenuError> {
        let node = NodeId(self.nodes.len());
        self.nodes.push(NodeState {
            element,
            items: Vec::new(),
            submenu_toggles: Vec::new(),
            parent,
            selection: -1,
            focus: FocusState::None,
            modality: Modality::None,
            hover_timer: None,
            depth,
        });

        for item_element in self.document.query_children(element, &selectors.menu_items) {
            let link = self
                .document
                .query_child(item_element, &selectors.menu_links)
                .ok_or_else(|| MenuError::MissingLink {
                    item: item_element,
                    selector: selectors.menu_links.to_string(),
                })?;

            let (toggle, child) = if self.document.matches(item_element, &selectors.submenu_items) {
                let toggle_element = self
                    .document
                    .query_child(item_element, &selectors.submenu_toggles)
                    .ok_or_else(|| MenuError::MissingToggle {
                        item: item_element,
                        selector: selectors.submenu_toggles.to_string(),
                    })?;
                let submenu = self
                    .document
                    .query_child(item_element, &selectors.submenus)
                    .ok_or_else(|| MenuError::MissingSubmenu {
                        item: item_element,
                        selector: selectors.submenus.to_string(),
                    })?;

                let child = self.build_node(submenu, Some(node), depth + 1, selectors)?;
                let toggle = self.push_toggle(toggle_element, submenu, child, Some(node));
                self.nodes[node.0].submenu_toggles.push(toggle);
                (Some(toggle), Some(child))
            } else {
                (None, None)
            };

            let item = ItemId(self.items.len());
            self.items.push(ItemState {
                element: item_element,
                link,
                node,
                toggle,
                child,
            });
            self.nodes[node.0].items.push(item);
        }

        Ok(node)
    }

    fn push_toggle(
        &mut self,
        element: ElementId,
        target: ElementId,
        controlled: NodeId,
        parent: Option<NodeId>,
    ) -> ToggleId {
        let toggle = ToggleId(self.toggles.len());
        self.toggles.push(ToggleState {
            element,
            target,
            controlled,
            parent,
            open: false,
            phase: TransitionPhase::Closed,
            generation: 0,
            transition_timer: None,
        });
        toggle
    }

    fn stamp(&self) {
        let prefix = &self.config.prefix;
        for toggle in &self.toggles {
            aria::stamp_toggle(&self.document, toggle.element, toggle.target, prefix);
        }

        let Some(roles) = self.flavor.roles() else {
            return;
        };
        for (index, node) in self.nodes.iter().enumerate() {
            let items: Vec<_> = node
                .items
                .iter()
                .map(|&item| (self.item(item).element, self.item(item).link))
                .collect();
            aria::stamp_roles(&self.document, &roles, node.element, index == Self::ROOT.0, &items);
        }
        if roles.haspopup {
            for toggle in self.toggles.iter().filter(|toggle| toggle.parent.is_some()) {
                aria::stamp_haspopup(&self.document, toggle.element);
            }
        }
        if self.flavor.uses_roving_tabindex() {
            self.refresh_tabindex();
        }
    }
}
