//! Accessibility attribute stamping.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::document::{Document, ElementId};
use crate::flavor::Roles;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

fn generate_id(prefix: &str, kind: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{kind}-{id}")
}

/// Return the element's id, assigning a generated one if it has none.
pub fn ensure_id(document: &Document, element: ElementId, prefix: &str, kind: &str) -> String {
    if let Some(id) = document.attribute(element, "id").filter(|id| !id.is_empty()) {
        return id;
    }
    let id = generate_id(prefix, kind);
    document.set_attribute(element, "id", id.clone());
    id
}

/// Link a toggle to the element it shows and hides.
pub fn stamp_toggle(document: &Document, toggle: ElementId, controlled: ElementId, prefix: &str) {
    let toggle_id = ensure_id(document, toggle, prefix, "toggle");
    let controlled_id = ensure_id(document, controlled, prefix, "menu");
    document.set_attribute(toggle, "aria-controls", controlled_id);
    document.set_attribute(controlled, "aria-labelledby", toggle_id);
    stamp_expanded(document, toggle, false);
}

pub fn stamp_expanded(document: &Document, toggle: ElementId, expanded: bool) {
    document.set_attribute(toggle, "aria-expanded", if expanded { "true" } else { "false" });
}

/// Stamp a node's role and the roles of its items and links.
pub fn stamp_roles(
    document: &Document,
    roles: &Roles,
    menu: ElementId,
    top_level: bool,
    items: &[(ElementId, ElementId)],
) {
    let role = if top_level { roles.root } else { roles.submenu };
    document.set_attribute(menu, "role", role);
    for &(item, link) in items {
        document.set_attribute(item, "role", roles.item);
        document.set_attribute(link, "role", roles.link);
    }
}

pub fn stamp_haspopup(document: &Document, toggle: ElementId) {
    document.set_attribute(toggle, "aria-haspopup", "true");
}

/// Put exactly one top-level link in the tab order.
///
/// `links` are the top-level links in order; `nested` are every other link.
/// With no selection the first top-level link keeps the stop.
pub fn stamp_roving_tabindex(
    document: &Document,
    links: &[ElementId],
    nested: &[ElementId],
    selection: Option<usize>,
) {
    let active = selection.filter(|&index| index < links.len()).unwrap_or(0);
    for (index, &link) in links.iter().enumerate() {
        document.set_attribute(link, "tabindex", if index == active { "0" } else { "-1" });
    }
    for &link in nested {
        document.set_attribute(link, "tabindex", "-1");
    }
}
