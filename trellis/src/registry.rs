//! Page-level table of mounted menus.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::aria;
use crate::config::MenuConfig;
use crate::document::{Document, ElementId};
use crate::flavor::Flavor;
use crate::menu::Menu;
use crate::notify::Notification;

/// Registry of root menus, keyed by the id of their menu element.
///
/// Mounting is the boundary where construction failures stop: a menu that
/// fails to build is logged and skipped, and every other menu keeps working.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Menu>,

    /// Mount order, used for iteration.
    order: Vec<String>,
}

impl MenuRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a menu.
    ///
    /// Returns the menu's key, or `None` if it failed to build. A menu
    /// mounted under an existing key replaces the old one.
    pub fn mount(&mut self, document: &Document, flavor: Flavor, config: MenuConfig) -> Option<String> {
        let prefix = config.prefix.clone();
        let menu = match Menu::new(document.clone(), flavor, config) {
            Ok(menu) => menu,
            Err(e) => {
                log::error!("Failed to initialize {} menu: {}", flavor, e);
                return None;
            }
        };

        let key = aria::ensure_id(document, menu.element(menu.root()), &prefix, "menu");
        if self.menus.insert(key.clone(), menu).is_some() {
            log::warn!("Menu `{}` mounted twice, replacing the previous instance", key);
            self.order.retain(|existing| *existing != key);
        }
        self.order.push(key.clone());
        log::debug!("Mounted {} menu `{}`", flavor, key);
        Some(key)
    }

    /// Parse a JSON options object and mount the menu it describes.
    pub fn mount_json(&mut self, document: &Document, flavor: Flavor, options: &Value) -> Option<String> {
        match MenuConfig::from_json(options, document) {
            Ok(config) => self.mount(document, flavor, config),
            Err(e) => {
                log::error!("Failed to initialize {} menu: {}", flavor, e);
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Menu> {
        self.menus.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Menu> {
        self.menus.get_mut(key)
    }

    /// Remove a menu. Returns it if it was registered.
    pub fn remove(&mut self, key: &str) -> Option<Menu> {
        self.order.retain(|existing| existing != key);
        self.menus.remove(key)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Keys in mount order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Advance every menu's clock.
    pub fn advance(&mut self, by: Duration) {
        for menu in self.menus.values_mut() {
            menu.advance(by);
        }
    }

    /// Run one paint boundary on every menu.
    pub fn paint(&mut self) {
        for menu in self.menus.values_mut() {
            menu.paint();
        }
    }

    /// Earliest timer deadline across all menus.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.menus.values().filter_map(Menu::next_deadline).min()
    }

    /// Returns true if any menu has paint-boundary work queued.
    pub fn needs_paint(&self) -> bool {
        self.menus.values().any(Menu::needs_paint)
    }

    /// Key of the menu whose tree contains `element`.
    pub fn menu_containing(&self, element: ElementId) -> Option<&str> {
        self.order
            .iter()
            .find(|key| {
                self.menus.get(key.as_str()).is_some_and(|menu| {
                    let root = menu.element(menu.root());
                    menu.document().contains(root, element)
                        || menu
                            .controller()
                            .is_some_and(|controller| menu.toggle_element(controller) == element)
                })
            })
            .map(String::as_str)
    }

    /// Take the notifications of every menu, tagged with the menu's key.
    pub fn drain_notifications(&mut self) -> Vec<(String, Notification)> {
        let mut drained = Vec::new();
        for key in &self.order {
            if let Some(menu) = self.menus.get_mut(key) {
                drained.extend(
                    menu.drain_notifications()
                        .into_iter()
                        .map(|notification| (key.clone(), notification)),
                );
            }
        }
        drained
    }
}
