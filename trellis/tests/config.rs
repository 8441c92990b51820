use std::time::Duration;

use serde_json::json;
use trellis::{
    ClassList, Delay, Document, Flavor, HoverMode, Markup, Menu, MenuConfig, MenuError,
    MenuRegistry, Notification, Selectors,
};

fn nav(id: &str) -> Markup {
    Markup::ul().id(id).children([
        Markup::li().child(Markup::link("Home")),
        Markup::li().child(Markup::link("About")).child(Markup::ul().children([
            Markup::li().child(Markup::link("Team")),
            Markup::li().child(Markup::link("Contact")),
        ])),
        Markup::li().child(Markup::link("Blog")),
    ])
}

fn page() -> Document {
    let document = Document::new();
    document.mount(
        None,
        Markup::new("div").id("page").children([
            Markup::button("Menu").id("toggle"),
            Markup::new("div").id("container").child(nav("nav")),
            Markup::new("div").id("sidebar"),
        ]),
    );
    document
}

fn invalid_options(error: MenuError) -> Vec<String> {
    match error {
        MenuError::InvalidConfig(errors) => errors.iter().map(|issue| issue.option.clone()).collect(),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults() {
    let config = MenuConfig::default();

    assert_eq!(config.selectors, Selectors::default());
    assert_eq!(config.selectors.submenu_items, "li:has(ul)");
    assert_eq!(config.open_class, ClassList::from("show"));
    assert_eq!(config.close_class, ClassList::from("hide"));
    assert_eq!(config.transition_class, ClassList::from("transitioning"));
    assert_eq!(config.hover_mode, HoverMode::Off);
    assert_eq!(config.prefix, "am-");
    assert_eq!(config.resolved_open_duration(), Duration::from_millis(250));
    assert_eq!(config.resolved_enter_delay(), Duration::from_millis(250));
}

#[test]
fn test_delays_inherit_until_set() {
    let config = MenuConfig::default()
        .transition_duration(Duration::from_millis(400))
        .close_duration(Duration::from_millis(50))
        .hover_delay(Duration::from_millis(120))
        .leave_delay(Duration::ZERO);

    assert_eq!(config.resolved_open_duration(), Duration::from_millis(400));
    assert_eq!(config.resolved_close_duration(), Duration::from_millis(50));
    assert_eq!(config.resolved_enter_delay(), Duration::from_millis(120));
    assert_eq!(config.resolved_leave_delay(), Duration::ZERO);
}

#[test]
fn test_delay_from_millis() {
    assert_eq!(Delay::from_millis(-1), Some(Delay::Inherit));
    assert_eq!(Delay::from_millis(0), Some(Delay::Fixed(Duration::ZERO)));
    assert_eq!(
        Delay::from_millis(75),
        Some(Delay::Fixed(Duration::from_millis(75)))
    );
    assert_eq!(Delay::from_millis(-2), None);
}

// ============================================================================
// JSON options
// ============================================================================

#[test]
fn test_from_json_reads_every_option() {
    let document = page();
    let options = json!({
        "menuElement": "nav",
        "containerElement": "container",
        "controllerElement": "toggle",
        "openClass": ["is-open", "visible"],
        "closeClass": "is-closed",
        "transitionClass": "",
        "transitionDuration": 300,
        "openDuration": -1,
        "closeDuration": 100,
        "hoverType": "dynamic",
        "hoverDelay": 150,
        "enterDelay": 0,
        "leaveDelay": -1,
        "optionalKeySupport": true,
        "prefix": "site-",
    });

    let config = MenuConfig::from_json(&options, &document).unwrap();

    assert_eq!(config.menu_element, document.get_element_by_id("nav"));
    assert_eq!(config.container_element, document.get_element_by_id("container"));
    assert_eq!(config.controller_element, document.get_element_by_id("toggle"));
    assert_eq!(
        config.open_class.iter().collect::<Vec<_>>(),
        vec!["is-open", "visible"]
    );
    assert!(config.transition_class.is_empty());
    assert_eq!(config.resolved_open_duration(), Duration::from_millis(300));
    assert_eq!(config.resolved_close_duration(), Duration::from_millis(100));
    assert_eq!(config.hover_mode, HoverMode::Dynamic);
    assert_eq!(config.resolved_enter_delay(), Duration::ZERO);
    assert_eq!(config.resolved_leave_delay(), Duration::from_millis(150));
    assert!(config.optional_key_support);
    assert_eq!(config.prefix, "site-");
}

#[test]
fn test_from_json_requires_menu_element() {
    let document = page();
    let error = MenuConfig::from_json(&json!({}), &document).unwrap_err();
    assert_eq!(invalid_options(error), vec!["menuElement"]);
}

#[test]
fn test_from_json_unknown_element_id() {
    let document = page();
    let error = MenuConfig::from_json(&json!({ "menuElement": "missing" }), &document).unwrap_err();
    assert_eq!(invalid_options(error), vec!["menuElement"]);
}

#[test]
fn test_from_json_collects_every_bad_option() {
    let document = page();
    let options = json!({
        "menuElement": "nav",
        "hoverType": "sometimes",
        "hoverDelay": -5,
        "enterDelay": "fast",
        "openClass": [1, 2],
        "optionalKeySupport": "yes",
    });

    let error = MenuConfig::from_json(&options, &document).unwrap_err();
    let options = invalid_options(error);

    assert_eq!(options.len(), 5);
    for option in ["hoverType", "hoverDelay", "enterDelay", "openClass", "optionalKeySupport"] {
        assert!(options.iter().any(|found| found == option), "{option} not reported");
    }
}

#[test]
fn test_from_json_reports_hover_type_values() {
    let document = page();
    for (value, expected) in [
        (json!("sometimes"), "expected one of `off`, `on`, `dynamic`"),
        (json!(3), "invalid type: integer `3`"),
    ] {
        let options = json!({ "menuElement": "nav", "hoverType": value });
        let Err(MenuError::InvalidConfig(errors)) = MenuConfig::from_json(&options, &document) else {
            panic!("expected InvalidConfig for {value}");
        };
        let issue = errors.iter().next().unwrap();
        assert_eq!(issue.option, "hoverType");
        assert!(issue.message.contains(expected), "{}", issue.message);
    }

    let options = json!({ "menuElement": "nav", "hoverType": "on" });
    let config = MenuConfig::from_json(&options, &document).unwrap();
    assert_eq!(config.hover_mode, HoverMode::On);
}

#[test]
fn test_from_json_rejects_non_object() {
    let document = page();
    assert!(matches!(
        MenuConfig::from_json(&json!("nav"), &document),
        Err(MenuError::InvalidConfig(_))
    ));
}

#[test]
fn test_from_json_ignores_unknown_keys() {
    let document = page();
    let options = json!({ "menuElement": "nav", "dropdownStyle": "fancy" });
    assert!(MenuConfig::from_json(&options, &document).is_ok());
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_menu_element_must_be_a_list() {
    let document = page();
    let sidebar = document.get_element_by_id("sidebar").unwrap();

    let error = Menu::new(document, Flavor::Disclosure, MenuConfig::new(sidebar)).unwrap_err();
    assert_eq!(
        error,
        MenuError::InvalidElement {
            option: "menuElement",
            expected: "<ul>, <ol> or <menu>",
            found: "div".into(),
        }
    );
}

#[test]
fn test_controller_must_be_button_or_link() {
    let document = page();
    let nav = document.get_element_by_id("nav").unwrap();
    let sidebar = document.get_element_by_id("sidebar").unwrap();
    let container = document.get_element_by_id("container").unwrap();

    let config = MenuConfig::new(nav).controller(sidebar, container);
    let error = Menu::new(document, Flavor::Menubar, config).unwrap_err();
    assert!(matches!(
        error,
        MenuError::InvalidElement {
            option: "controllerElement",
            ..
        }
    ));
}

#[test]
fn test_controller_needs_container() {
    let document = page();
    let nav = document.get_element_by_id("nav").unwrap();
    let mut config = MenuConfig::new(nav);
    config.controller_element = document.get_element_by_id("toggle");

    let error = Menu::new(document, Flavor::Menubar, config).unwrap_err();
    assert_eq!(invalid_options(error), vec!["containerElement"]);
}

#[test]
fn test_bad_selectors_reported_together() {
    let document = page();
    let nav = document.get_element_by_id("nav").unwrap();
    let config = MenuConfig::new(nav).selectors(Selectors {
        menu_items: "li > a".into(),
        submenus: "ul:first-child".into(),
        ..Selectors::default()
    });

    let error = Menu::new(document, Flavor::Disclosure, config).unwrap_err();
    assert_eq!(invalid_options(error), vec!["menuItemSelector", "submenuSelector"]);
}

#[test]
fn test_class_names_with_whitespace_rejected() {
    let document = page();
    let nav = document.get_element_by_id("nav").unwrap();
    let config = MenuConfig::new(nav)
        .open_class(vec!["is open".to_string()])
        .close_class(vec![String::new()])
        .prefix("my prefix");

    let error = Menu::new(document, Flavor::Disclosure, config).unwrap_err();
    assert_eq!(invalid_options(error), vec!["openClass", "closeClass", "prefix"]);
}

#[test]
fn test_item_without_link_fails() {
    let document = Document::new();
    let root = document.mount(
        None,
        Markup::ul().children([
            Markup::li().child(Markup::link("Home")),
            Markup::li().text("Plain text"),
        ]),
    );

    let error = Menu::new(document, Flavor::Disclosure, MenuConfig::new(root)).unwrap_err();
    assert!(matches!(error, MenuError::MissingLink { .. }));
    assert!(error.to_string().contains("`a`"));
}

#[test]
fn test_custom_selectors_discover_tree() {
    let document = Document::new();
    let root = document.mount(
        None,
        Markup::ul().children([
            Markup::li().class("entry").child(Markup::link("Home")),
            Markup::li().class("ignored").child(Markup::link("Hidden")),
            Markup::li()
                .class("entry")
                .child(Markup::button("More").class("opener"))
                .child(Markup::ul().children([Markup::li().class("entry").child(Markup::link("Deep"))])),
        ]),
    );
    let config = MenuConfig::new(root).selectors(Selectors {
        menu_items: "li.entry".into(),
        menu_links: "a, button".into(),
        submenu_toggles: "button.opener".into(),
        ..Selectors::default()
    });

    let menu = Menu::new(document, Flavor::Disclosure, config).unwrap();
    let items = menu.items(menu.root());

    assert_eq!(items.len(), 2);
    assert!(menu.is_submenu_item(items[1]));
    assert_eq!(menu.node_count(), 2);
    assert_eq!(menu.document().tag(menu.toggle_element(menu.item_toggle(items[1]).unwrap())), "button");
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_registry_skips_broken_menus() {
    let document = page();
    document.mount(None, Markup::new("div").id("broken"));
    let mut registry = MenuRegistry::new();

    let good = registry.mount_json(&document, Flavor::Menubar, &json!({ "menuElement": "nav" }));
    let bad = registry.mount_json(&document, Flavor::Menubar, &json!({ "menuElement": "broken" }));

    assert_eq!(good.as_deref(), Some("nav"));
    assert_eq!(bad, None);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["nav"]);
}

#[test]
fn test_registry_generates_keys() {
    let document = Document::new();
    let root = document.mount(None, nav("nav").attr("id", ""));
    let mut registry = MenuRegistry::new();

    let key = registry
        .mount(&document, Flavor::Disclosure, MenuConfig::new(root))
        .unwrap();

    assert!(key.starts_with("am-menu-"));
    assert_eq!(document.attribute(root, "id"), Some(key.clone()));
    assert!(registry.get(&key).is_some());
}

#[test]
fn test_registry_finds_menu_for_element() {
    let document = page();
    let mut registry = MenuRegistry::new();
    let options = json!({
        "menuElement": "nav",
        "containerElement": "container",
        "controllerElement": "toggle",
    });
    let key = registry.mount_json(&document, Flavor::Menubar, &options).unwrap();

    let menu = registry.get(&key).unwrap();
    let team = menu.item_link(menu.items(menu.item_child(menu.items(menu.root())[1]).unwrap())[0]);
    let button = document.get_element_by_id("toggle").unwrap();
    let sidebar = document.get_element_by_id("sidebar").unwrap();

    assert_eq!(registry.menu_containing(team), Some(key.as_str()));
    assert_eq!(registry.menu_containing(button), Some(key.as_str()));
    assert_eq!(registry.menu_containing(sidebar), None);
}

#[test]
fn test_registry_tags_notifications() {
    let document = page();
    let mut registry = MenuRegistry::new();
    let key = registry
        .mount_json(&document, Flavor::Disclosure, &json!({ "menuElement": "nav" }))
        .unwrap();

    let menu = registry.get_mut(&key).unwrap();
    let blog = menu.items(menu.root())[2];
    menu.pointer_up(blog);

    let drained = registry.drain_notifications();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].0, key);
    assert!(matches!(drained[0].1, Notification::Activated { item, .. } if item == blog));
    assert!(registry.drain_notifications().is_empty());

    assert!(registry.remove(&key).is_some());
    assert!(registry.is_empty());
}
