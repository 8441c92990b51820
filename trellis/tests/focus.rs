use trellis::{
    Document, FocusState, Flavor, HoverMode, ItemId, Markup, Menu, MenuConfig, Modality, NodeId,
};

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

fn build() -> Menu {
    let document = Document::new();
    let root = document.mount(None, nav());
    Menu::new(document, Flavor::Disclosure, MenuConfig::new(root)).unwrap()
}

fn item(menu: &Menu, node: NodeId, index: usize) -> ItemId {
    menu.items(node)[index]
}

fn submenu(menu: &Menu, node: NodeId, index: usize) -> NodeId {
    menu.item_child(item(menu, node, index)).unwrap()
}

fn descendants(menu: &Menu, node: NodeId) -> Vec<NodeId> {
    let mut found = Vec::new();
    for &toggle in menu.submenu_toggles(node) {
        let child = menu.controlled_node(toggle);
        found.push(child);
        found.extend(descendants(menu, child));
    }
    found
}

// ============================================================================
// Focus state
// ============================================================================

#[test]
fn test_within_marks_ancestors_as_child() {
    let mut menu = build();
    let root = menu.root();
    let about = submenu(&menu, root, 1);
    let history = submenu(&menu, about, 1);

    menu.set_focus_state(history, FocusState::Within);

    assert_eq!(menu.focus_state(history), FocusState::Within);
    assert_eq!(menu.focus_state(about), FocusState::Child);
    assert_eq!(menu.focus_state(root), FocusState::Child);
}

#[test]
fn test_within_and_none_clear_every_descendant() {
    for state in [FocusState::Within, FocusState::None] {
        let mut menu = build();
        let root = menu.root();
        let about = submenu(&menu, root, 1);
        let history = submenu(&menu, about, 1);
        let services = submenu(&menu, root, 2);

        menu.set_focus_state(history, FocusState::Within);
        menu.set_focus_state(services, FocusState::Child);
        menu.set_focus_state(root, state);

        assert_eq!(menu.focus_state(root), state);
        for node in descendants(&menu, root) {
            assert_eq!(menu.focus_state(node), FocusState::None, "{state} on root");
        }
    }
}

#[test]
fn test_child_leaves_descendants_alone() {
    let mut menu = build();
    let root = menu.root();
    let about = submenu(&menu, root, 1);
    let history = submenu(&menu, about, 1);

    menu.set_focus_state(history, FocusState::Within);
    menu.set_focus_state(about, FocusState::Child);

    assert_eq!(menu.focus_state(history), FocusState::Within);
    assert_eq!(menu.focus_state(root), FocusState::Child);
}

// ============================================================================
// Modality
// ============================================================================

#[test]
fn test_modality_fans_out_downward() {
    let mut menu = build();
    let root = menu.root();
    let about = submenu(&menu, root, 1);
    let history = submenu(&menu, about, 1);
    let services = submenu(&menu, root, 2);

    menu.set_modality(about, Modality::Keyboard);
    assert_eq!(menu.modality(about), Modality::Keyboard);
    assert_eq!(menu.modality(history), Modality::Keyboard);
    assert_eq!(menu.modality(root), Modality::None);
    assert_eq!(menu.modality(services), Modality::None);

    menu.set_modality(root, Modality::Mouse);
    for node in menu.nodes().collect::<Vec<_>>() {
        assert_eq!(menu.modality(node), Modality::Mouse);
    }
}

#[test]
fn test_should_focus_truth_table() {
    let mut menu = build();
    let root = menu.root();

    for hover in [HoverMode::Off, HoverMode::On, HoverMode::Dynamic] {
        menu.set_hover_mode(hover);
        for modality in [
            Modality::None,
            Modality::Mouse,
            Modality::Keyboard,
            Modality::Character,
        ] {
            menu.set_modality(root, modality);
            let expected = matches!(modality, Modality::Keyboard | Modality::Character)
                || (modality == Modality::Mouse && hover == HoverMode::Dynamic);
            assert_eq!(menu.should_focus(root), expected, "{modality} with {hover:?}");
        }
    }
}

// ============================================================================
// DOM focus
// ============================================================================

#[test]
fn test_item_focus_waits_for_paint() {
    let mut menu = build();
    let root = menu.root();
    menu.set_modality(root, Modality::Keyboard);

    menu.focus_child(root, 1);
    assert_eq!(menu.document().active_element(), None);
    assert!(menu.needs_paint());

    menu.paint();
    let link = menu.item_link(item(&menu, root, 1));
    assert_eq!(menu.document().active_element(), Some(link));
    assert_eq!(menu.focus_state(root), FocusState::Within);
}

#[test]
fn test_mouse_without_dynamic_hover_never_moves_focus() {
    let mut menu = build();
    let root = menu.root();
    menu.set_hover_mode(HoverMode::On);
    menu.set_modality(root, Modality::Mouse);

    menu.focus_child(root, 2);
    menu.paint();
    assert_eq!(menu.document().active_element(), None);
    assert_eq!(menu.selection(root), 2);
}

#[test]
fn test_focus_moves_between_items() {
    let mut menu = build();
    let root = menu.root();
    menu.set_modality(root, Modality::Keyboard);

    menu.focus_child(root, 0);
    menu.paint();
    menu.focus_next_child(root, false);
    menu.paint();
    assert_eq!(
        menu.document().active_element(),
        Some(menu.item_link(item(&menu, root, 1)))
    );

    menu.focus_last_child(root);
    menu.focus_next_child(root, false);
    assert_eq!(menu.selection(root), 3);
    menu.focus_next_child(root, true);
    assert_eq!(menu.selection(root), 0);
    menu.focus_previous_child(root, true);
    assert_eq!(menu.selection(root), 3);
}

#[test]
fn test_character_search() {
    let mut menu = build();
    let root = menu.root();
    menu.set_modality(root, Modality::Character);
    menu.set_selection(root, 0);

    assert!(menu.focus_next_child_with_character(root, 'S'));
    assert_eq!(menu.selection(root), 2);

    // No wrap-around back to the start.
    assert!(!menu.focus_next_child_with_character(root, 'h'));
    assert_eq!(menu.selection(root), 2);

    assert!(menu.focus_next_child_with_character(root, 'b'));
    assert_eq!(menu.selection(root), 3);
}

#[test]
fn test_node_focus_is_immediate() {
    let mut menu = build();
    let root = menu.root();
    menu.set_modality(root, Modality::Keyboard);

    menu.focus_node(root);
    assert_eq!(menu.document().active_element(), Some(menu.element(root)));
    menu.blur_node(root);
    assert_eq!(menu.document().active_element(), None);
    assert_eq!(menu.focus_state(root), FocusState::None);
}
