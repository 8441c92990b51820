//! Menu configuration and pre-flight validation.

mod json;

use std::time::Duration;

use crate::document::{Document, ElementId, Selector};
use crate::error::{ConfigErrors, MenuError};
use crate::state::HoverMode;

/// A duration that may defer to another setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delay {
    /// Use the setting this one falls back to.
    #[default]
    Inherit,
    Fixed(Duration),
}

impl Delay {
    pub fn resolve(self, fallback: Duration) -> Duration {
        match self {
            Delay::Inherit => fallback,
            Delay::Fixed(duration) => duration,
        }
    }

    /// `-1` means inherit; other negative values are rejected.
    pub fn from_millis(millis: i64) -> Option<Self> {
        match millis {
            -1 => Some(Delay::Inherit),
            0.. => Some(Delay::Fixed(Duration::from_millis(millis.unsigned_abs()))),
            _ => None,
        }
    }
}

impl From<Duration> for Delay {
    fn from(duration: Duration) -> Self {
        Delay::Fixed(duration)
    }
}

/// An ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    /// Split a whitespace-separated class string.
    pub fn parse(classes: &str) -> Self {
        Self(classes.split_whitespace().map(str::to_string).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for ClassList {
    fn from(classes: &str) -> Self {
        Self::parse(classes)
    }
}

impl From<Vec<String>> for ClassList {
    fn from(classes: Vec<String>) -> Self {
        Self(classes)
    }
}

/// Structural selectors used to discover a menu's parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    pub menu_items: String,
    pub menu_links: String,
    pub submenu_items: String,
    pub submenu_toggles: String,
    pub submenus: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_items: "li".into(),
            menu_links: "a".into(),
            submenu_items: "li:has(ul)".into(),
            submenu_toggles: "a".into(),
            submenus: "ul".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedSelectors {
    pub(crate) menu_items: Selector,
    pub(crate) menu_links: Selector,
    pub(crate) submenu_items: Selector,
    pub(crate) submenu_toggles: Selector,
    pub(crate) submenus: Selector,
}

/// Elements and selectors resolved by a successful validation pass.
#[derive(Debug, Clone)]
pub(crate) struct Prepared {
    pub(crate) menu: ElementId,
    pub(crate) container: Option<ElementId>,
    pub(crate) controller: Option<ElementId>,
    pub(crate) selectors: ParsedSelectors,
}

/// Settings for one menu tree. Only the root reads these; submenus defer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub menu_element: Option<ElementId>,
    pub container_element: Option<ElementId>,
    pub controller_element: Option<ElementId>,
    pub selectors: Selectors,
    pub open_class: ClassList,
    pub close_class: ClassList,
    pub transition_class: ClassList,
    pub transition_duration: Duration,
    pub open_duration: Delay,
    pub close_duration: Delay,
    pub hover_mode: HoverMode,
    pub hover_delay: Duration,
    pub enter_delay: Delay,
    pub leave_delay: Delay,
    pub optional_key_support: bool,
    /// Prefix for generated element ids.
    pub prefix: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            menu_element: None,
            container_element: None,
            controller_element: None,
            selectors: Selectors::default(),
            open_class: ClassList::parse("show"),
            close_class: ClassList::parse("hide"),
            transition_class: ClassList::parse("transitioning"),
            transition_duration: Duration::from_millis(250),
            open_duration: Delay::Inherit,
            close_duration: Delay::Inherit,
            hover_mode: HoverMode::Off,
            hover_delay: Duration::from_millis(250),
            enter_delay: Delay::Inherit,
            leave_delay: Delay::Inherit,
            optional_key_support: false,
            prefix: "am-".into(),
        }
    }
}

impl MenuConfig {
    /// Create a config for the given menu element.
    pub fn new(menu_element: ElementId) -> Self {
        Self {
            menu_element: Some(menu_element),
            ..Default::default()
        }
    }

    /// Attach a controller button and the container it shows and hides.
    pub fn controller(mut self, controller: ElementId, container: ElementId) -> Self {
        self.controller_element = Some(controller);
        self.container_element = Some(container);
        self
    }

    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn open_class(mut self, classes: impl Into<ClassList>) -> Self {
        self.open_class = classes.into();
        self
    }

    pub fn close_class(mut self, classes: impl Into<ClassList>) -> Self {
        self.close_class = classes.into();
        self
    }

    /// Set the transition marker. An empty list disables staged transitions.
    pub fn transition_class(mut self, classes: impl Into<ClassList>) -> Self {
        self.transition_class = classes.into();
        self
    }

    pub fn transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    pub fn open_duration(mut self, duration: impl Into<Delay>) -> Self {
        self.open_duration = duration.into();
        self
    }

    pub fn close_duration(mut self, duration: impl Into<Delay>) -> Self {
        self.close_duration = duration.into();
        self
    }

    pub fn hover_mode(mut self, mode: HoverMode) -> Self {
        self.hover_mode = mode;
        self
    }

    pub fn hover_delay(mut self, delay: Duration) -> Self {
        self.hover_delay = delay;
        self
    }

    pub fn enter_delay(mut self, delay: impl Into<Delay>) -> Self {
        self.enter_delay = delay.into();
        self
    }

    pub fn leave_delay(mut self, delay: impl Into<Delay>) -> Self {
        self.leave_delay = delay.into();
        self
    }

    pub fn optional_key_support(mut self, enabled: bool) -> Self {
        self.optional_key_support = enabled;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Open duration with inheritance applied.
    pub fn resolved_open_duration(&self) -> Duration {
        self.open_duration.resolve(self.transition_duration)
    }

    /// Close duration with inheritance applied.
    pub fn resolved_close_duration(&self) -> Duration {
        self.close_duration.resolve(self.transition_duration)
    }

    /// Enter delay with inheritance applied.
    pub fn resolved_enter_delay(&self) -> Duration {
        self.enter_delay.resolve(self.hover_delay)
    }

    /// Leave delay with inheritance applied.
    pub fn resolved_leave_delay(&self) -> Duration {
        self.leave_delay.resolve(self.hover_delay)
    }

    /// Check the configuration against a document.
    ///
    /// Element type failures are returned immediately. Every other problem is
    /// collected and reported together.
    pub(crate) fn validate(&self, document: &Document) -> Result<Prepared, MenuError> {
        let mut errors = ConfigErrors::new();

        let menu = match self.menu_element {
            Some(menu) => {
                check_element(document, menu, "menuElement", &["ul", "ol", "menu"], "<ul>, <ol> or <menu>")?;
                Some(menu)
            }
            None => {
                errors.push("menuElement", "is required");
                None
            }
        };

        if let Some(controller) = self.controller_element {
            check_element(document, controller, "controllerElement", &["button", "a"], "<button> or <a>")?;
        }
        if let Some(container) = self.container_element
            && !document.exists(container)
        {
            return Err(MenuError::MissingElement("containerElement"));
        }
        match (self.controller_element, self.container_element) {
            (Some(_), None) => errors.push(
                "containerElement",
                "is required when a controller element is given",
            ),
            (None, Some(_)) => errors.push(
                "controllerElement",
                "is required when a container element is given",
            ),
            _ => {}
        }

        let selectors = &self.selectors;
        let menu_items = parse_selector(&mut errors, "menuItemSelector", &selectors.menu_items);
        let menu_links = parse_selector(&mut errors, "menuLinkSelector", &selectors.menu_links);
        let submenu_items =
            parse_selector(&mut errors, "submenuItemSelector", &selectors.submenu_items);
        let submenu_toggles =
            parse_selector(&mut errors, "submenuToggleSelector", &selectors.submenu_toggles);
        let submenus = parse_selector(&mut errors, "submenuSelector", &selectors.submenus);

        check_classes(&mut errors, "openClass", &self.open_class);
        check_classes(&mut errors, "closeClass", &self.close_class);
        check_classes(&mut errors, "transitionClass", &self.transition_class);

        if self.prefix.chars().any(char::is_whitespace) {
            errors.push("prefix", "must not contain whitespace");
        }

        let (
            Some(menu),
            Some(menu_items),
            Some(menu_links),
            Some(submenu_items),
            Some(submenu_toggles),
            Some(submenus),
        ) = (menu, menu_items, menu_links, submenu_items, submenu_toggles, submenus)
        else {
            return Err(MenuError::InvalidConfig(errors));
        };
        errors.into_result(Prepared {
            menu,
            container: self.container_element,
            controller: self.controller_element,
            selectors: ParsedSelectors {
                menu_items,
                menu_links,
                submenu_items,
                submenu_toggles,
                submenus,
            },
        })
    }
}

fn check_element(
    document: &Document,
    element: ElementId,
    option: &'static str,
    tags: &[&str],
    expected: &'static str,
) -> Result<(), MenuError> {
    if !document.exists(element) {
        return Err(MenuError::MissingElement(option));
    }
    let tag = document.tag(element);
    if tags.contains(&tag.as_str()) {
        Ok(())
    } else {
        Err(MenuError::InvalidElement {
            option,
            expected,
            found: tag,
        })
    }
}

fn parse_selector(errors: &mut ConfigErrors, option: &str, source: &str) -> Option<Selector> {
    match Selector::parse(source) {
        Ok(selector) => Some(selector),
        Err(err) => {
            errors.push(option, err.to_string());
            None
        }
    }
}

fn check_classes(errors: &mut ConfigErrors, option: &str, classes: &ClassList) {
    for class in classes.iter() {
        if class.is_empty() {
            errors.push(option, "class names must not be empty");
        } else if class.chars().any(char::is_whitespace) {
            errors.push(option, format!("class name `{class}` contains whitespace"));
        }
    }
}
