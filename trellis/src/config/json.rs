//! Reading a [`MenuConfig`] from an untyped JSON options object.

use std::time::Duration;

use serde_json::{Map, Value};

use super::{ClassList, Delay, MenuConfig};
use crate::document::{Document, ElementId};
use crate::error::{ConfigErrors, MenuError};
use crate::state::HoverMode;

const KNOWN_KEYS: &[&str] = &[
    "menuElement",
    "containerElement",
    "controllerElement",
    "menuItemSelector",
    "menuLinkSelector",
    "submenuItemSelector",
    "submenuToggleSelector",
    "submenuSelector",
    "openClass",
    "closeClass",
    "transitionClass",
    "transitionDuration",
    "openDuration",
    "closeDuration",
    "hoverType",
    "hoverDelay",
    "enterDelay",
    "leaveDelay",
    "optionalKeySupport",
    "prefix",
];

struct Reader<'a> {
    object: &'a Map<String, Value>,
    document: &'a Document,
    errors: ConfigErrors,
}

impl<'a> Reader<'a> {
    fn value(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn element(&mut self, key: &str) -> Option<ElementId> {
        let value = self.value(key)?;
        let Some(id) = value.as_str() else {
            self.errors.push(key, format!("expected an element id string, found {value}"));
            return None;
        };
        let found = self.document.get_element_by_id(id);
        if found.is_none() {
            self.errors.push(key, format!("no element with id `{id}`"));
        }
        found
    }

    fn string(&mut self, key: &str) -> Option<String> {
        let value = self.value(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.errors.push(key, format!("expected a string, found {value}"));
                None
            }
        }
    }

    fn classes(&mut self, key: &str) -> Option<ClassList> {
        match self.value(key)? {
            Value::String(classes) => Some(ClassList::parse(classes)),
            Value::Array(entries) => {
                let mut classes = Vec::with_capacity(entries.len());
                for entry in entries {
                    match entry.as_str() {
                        Some(class) => classes.push(class.to_string()),
                        None => {
                            self.errors.push(
                                key,
                                format!("expected an array of strings, found element {entry}"),
                            );
                            return None;
                        }
                    }
                }
                Some(ClassList::from(classes))
            }
            other => {
                self.errors
                    .push(key, format!("expected a string or array of strings, found {other}"));
                None
            }
        }
    }

    fn integer(&mut self, key: &str) -> Option<i64> {
        let value = self.value(key)?;
        match value.as_i64() {
            Some(n) => Some(n),
            None => {
                self.errors.push(key, format!("expected an integer, found {value}"));
                None
            }
        }
    }

    fn millis(&mut self, key: &str) -> Option<Duration> {
        let millis = self.integer(key)?;
        match u64::try_from(millis) {
            Ok(millis) => Some(Duration::from_millis(millis)),
            Err(_) => {
                self.errors
                    .push(key, format!("must be a non-negative number of milliseconds, found {millis}"));
                None
            }
        }
    }

    fn delay(&mut self, key: &str) -> Option<Delay> {
        let millis = self.integer(key)?;
        let delay = Delay::from_millis(millis);
        if delay.is_none() {
            self.errors
                .push(key, format!("must be -1 or a non-negative number of milliseconds, found {millis}"));
        }
        delay
    }

    fn hover_mode(&mut self, key: &str) -> Option<HoverMode> {
        let value = self.value(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(mode) => Some(mode),
            Err(e) => {
                self.errors.push(key, e.to_string());
                None
            }
        }
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        let value = self.value(key)?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.errors.push(key, format!("expected a boolean, found {value}"));
                None
            }
        }
    }
}

impl MenuConfig {
    /// Build a config from a JSON options object.
    ///
    /// Element options are element ids looked up in `document`. Durations
    /// and delays are integer milliseconds, with `-1` meaning "inherit" for
    /// the options that support it. Every malformed option is reported in one
    /// [`MenuError::InvalidConfig`].
    pub fn from_json(value: &Value, document: &Document) -> Result<Self, MenuError> {
        let Some(object) = value.as_object() else {
            let mut errors = ConfigErrors::new();
            errors.push("options", format!("expected an object, found {value}"));
            return Err(MenuError::InvalidConfig(errors));
        };

        for key in object.keys() {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                log::warn!("Ignoring unknown menu option `{}`", key);
            }
        }

        let mut reader = Reader {
            object,
            document,
            errors: ConfigErrors::new(),
        };
        let mut config = MenuConfig::default();

        if reader.value("menuElement").is_none() {
            reader.errors.push("menuElement", "is required");
        }
        config.menu_element = reader.element("menuElement");
        config.container_element = reader.element("containerElement");
        config.controller_element = reader.element("controllerElement");

        if let Some(selector) = reader.string("menuItemSelector") {
            config.selectors.menu_items = selector;
        }
        if let Some(selector) = reader.string("menuLinkSelector") {
            config.selectors.menu_links = selector;
        }
        if let Some(selector) = reader.string("submenuItemSelector") {
            config.selectors.submenu_items = selector;
        }
        if let Some(selector) = reader.string("submenuToggleSelector") {
            config.selectors.submenu_toggles = selector;
        }
        if let Some(selector) = reader.string("submenuSelector") {
            config.selectors.submenus = selector;
        }

        if let Some(classes) = reader.classes("openClass") {
            config.open_class = classes;
        }
        if let Some(classes) = reader.classes("closeClass") {
            config.close_class = classes;
        }
        if let Some(classes) = reader.classes("transitionClass") {
            config.transition_class = classes;
        }

        if let Some(duration) = reader.millis("transitionDuration") {
            config.transition_duration = duration;
        }
        if let Some(delay) = reader.delay("openDuration") {
            config.open_duration = delay;
        }
        if let Some(delay) = reader.delay("closeDuration") {
            config.close_duration = delay;
        }

        if let Some(mode) = reader.hover_mode("hoverType") {
            config.hover_mode = mode;
        }
        if let Some(delay) = reader.millis("hoverDelay") {
            config.hover_delay = delay;
        }
        if let Some(delay) = reader.delay("enterDelay") {
            config.enter_delay = delay;
        }
        if let Some(delay) = reader.delay("leaveDelay") {
            config.leave_delay = delay;
        }

        if let Some(enabled) = reader.boolean("optionalKeySupport") {
            config.optional_key_support = enabled;
        }
        if let Some(prefix) = reader.string("prefix") {
            config.prefix = prefix;
        }

        reader.errors.into_result(config)
    }
}
