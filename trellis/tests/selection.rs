use trellis::{Document, Flavor, ItemId, Markup, Menu, MenuConfig, Modality, NodeId};

fn nav() -> Markup {
    Markup::ul().id("nav").children([
        Markup::li().child(Markup::link("Home")),
        Markup::li().child(Markup::link("About")).child(Markup::ul().children([
            Markup::li().child(Markup::link("Team")),
            Markup::li().child(Markup::link("History")).child(Markup::ul().children([
                Markup::li().child(Markup::link("Founding")),
                Markup::li().child(Markup::link("Today")),
            ])),
            Markup::li().child(Markup::link("Contact")),
        ])),
        Markup::li().child(Markup::link("Services")).child(Markup::ul().children([
            Markup::li().child(Markup::link("Design")),
            Markup::li().child(Markup::link("Build")),
        ])),
        Markup::li().child(Markup::link("Blog")),
    ])
}

fn build(flavor: Flavor) -> Menu {
    let document = Document::new();
    let root = document.mount(None, nav());
    Menu::new(document, flavor, MenuConfig::new(root)).unwrap()
}

fn item(menu: &Menu, node: NodeId, index: usize) -> ItemId {
    menu.items(node)[index]
}

fn submenu(menu: &Menu, node: NodeId, index: usize) -> NodeId {
    menu.item_child(item(menu, node, index)).unwrap()
}

// ============================================================================
// Clamping
// ============================================================================

#[test]
fn test_selection_starts_unset() {
    let menu = build(Flavor::Disclosure);
    for node in menu.nodes() {
        assert_eq!(menu.selection(node), -1);
        assert_eq!(menu.current_item(node), None);
    }
}

#[test]
fn test_selection_clamps_to_item_range() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();
    let last = menu.items(root).len() as isize - 1;

    for value in -10..=10 {
        menu.set_selection(root, value);
        assert_eq!(menu.selection(root), value.min(last).max(-1), "value {value}");
    }
}

#[test]
fn test_selection_on_empty_node() {
    let document = Document::new();
    let root = document.mount(None, Markup::ul().id("empty"));
    let mut menu = Menu::new(document, Flavor::Disclosure, MenuConfig::new(root)).unwrap();

    menu.set_selection(menu.root(), 3);
    assert_eq!(menu.selection(menu.root()), -1);
}

#[test]
fn test_current_item_follows_selection() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();

    menu.set_selection(root, 2);
    assert_eq!(menu.current_item(root), Some(item(&menu, root, 2)));
    assert!(menu.is_submenu_item(item(&menu, root, 2)));
}

// ============================================================================
// Parent propagation
// ============================================================================

#[test]
fn test_mouse_selection_propagates_to_parent() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();
    let about = submenu(&menu, root, 1);
    let about_toggle = menu.item_toggle(item(&menu, root, 1)).unwrap();

    menu.set_selection(root, 2);
    menu.set_modality(root, Modality::Mouse);
    menu.open(about_toggle);

    menu.set_selection(about, 0);
    assert_eq!(menu.selection(root), 1);
}

#[test]
fn test_propagation_walks_to_root() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();
    let about = submenu(&menu, root, 1);
    let history = submenu(&menu, about, 1);

    menu.set_selection(root, 3);
    menu.set_selection(about, 2);
    menu.set_modality(history, Modality::Character);
    menu.set_selection(history, 1);

    assert_eq!(menu.selection(about), 1);
    assert_eq!(menu.selection(root), 1);
    assert_eq!(menu.modality(about), Modality::Character);
    assert_eq!(menu.modality(root), Modality::Character);
}

#[test]
fn test_keyboard_selection_does_not_propagate() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();
    let about = submenu(&menu, root, 1);

    menu.set_selection(root, 3);
    menu.set_modality(root, Modality::Keyboard);
    menu.set_selection(about, 2);

    assert_eq!(menu.selection(root), 3);
}

#[test]
fn test_repeated_selection_still_propagates() {
    let mut menu = build(Flavor::Disclosure);
    let root = menu.root();
    let services = submenu(&menu, root, 2);

    menu.set_modality(root, Modality::Mouse);
    menu.set_selection(services, 1);
    assert_eq!(menu.selection(root), 2);

    // Same value again after the parent moved away.
    menu.set_selection(root, 0);
    menu.set_selection(services, 1);
    assert_eq!(menu.selection(root), 2);
}

// ============================================================================
// Roving tabindex
// ============================================================================

#[test]
fn test_roving_tabindex_follows_root_selection() {
    let mut menu = build(Flavor::Menubar);
    let root = menu.root();
    let document = menu.document().clone();
    let tabindex = |menu: &Menu, node, index| {
        document.attribute(menu.item_link(item(menu, node, index)), "tabindex")
    };

    assert_eq!(tabindex(&menu, root, 0).as_deref(), Some("0"));
    assert_eq!(tabindex(&menu, root, 3).as_deref(), Some("-1"));
    let about = submenu(&menu, root, 1);
    assert_eq!(tabindex(&menu, about, 0).as_deref(), Some("-1"));

    menu.set_selection(root, 3);
    assert_eq!(tabindex(&menu, root, 0).as_deref(), Some("-1"));
    assert_eq!(tabindex(&menu, root, 3).as_deref(), Some("0"));
}

#[test]
fn test_disclosure_has_no_tabindex() {
    let menu = build(Flavor::Disclosure);
    let link = menu.item_link(item(&menu, menu.root(), 0));
    assert_eq!(menu.document().attribute(link, "tabindex"), None);
}
