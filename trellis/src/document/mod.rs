//! In-memory element tree the menus are bound to.
//!
//! [`Document`] is a cheap-to-clone handle over a shared element arena. Menus
//! hold a clone and mutate attributes, classes and focus through it; the host
//! reads the same tree back to render.

mod markup;
mod selector;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub use markup::Markup;
pub use selector::{Selector, SelectorError};

use selector::Compound;

/// Identifier of an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Arena index of the element.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct ElementData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

#[derive(Debug, Default)]
struct DocumentInner {
    elements: Vec<ElementData>,
    active: Option<ElementId>,
}

impl DocumentInner {
    fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id.0)
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.elements.get_mut(id.0)
    }

    fn matches_compound(&self, id: ElementId, compound: &Compound) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        if let Some(tag) = &compound.tag
            && *tag != element.tag
        {
            return false;
        }
        if let Some(expected) = &compound.id
            && element.attributes.get("id") != Some(expected)
        {
            return false;
        }
        if !compound
            .classes
            .iter()
            .all(|class| element.classes.contains(class))
        {
            return false;
        }
        let attributes_match = compound.attributes.iter().all(|test| {
            match (element.attributes.get(&test.name), &test.value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            }
        });
        if !attributes_match {
            return false;
        }
        compound
            .has
            .iter()
            .all(|selector| self.has_descendant(id, selector))
    }

    fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        selector
            .alternatives()
            .iter()
            .any(|compound| self.matches_compound(id, compound))
    }

    fn has_descendant(&self, id: ElementId, selector: &Selector) -> bool {
        let Some(element) = self.get(id) else {
            return false;
        };
        element
            .children
            .iter()
            .any(|&child| self.matches(child, selector) || self.has_descendant(child, selector))
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };
        if let Some(text) = &element.text {
            out.push_str(text);
        }
        for &child in &element.children {
            self.collect_text(child, out);
        }
    }
}

/// Shared handle to an element tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    inner: Rc<RefCell<DocumentInner>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.elements.len());
        inner.elements.push(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });
        id
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&self, parent: ElementId, child: ElementId) {
        let mut inner = self.inner.borrow_mut();
        if inner.get(parent).is_none() || parent == child {
            return;
        }
        if let Some(previous) = inner.get(child).and_then(|element| element.parent)
            && let Some(previous) = inner.get_mut(previous)
        {
            previous.children.retain(|&id| id != child);
        }
        let Some(element) = inner.get_mut(child) else {
            return;
        };
        element.parent = Some(parent);
        if let Some(parent) = inner.get_mut(parent) {
            parent.children.push(child);
        }
    }

    /// Mount a markup subtree, optionally under `parent`. Returns the subtree root.
    pub fn mount(&self, parent: Option<ElementId>, markup: Markup) -> ElementId {
        let id = self.create_element(&markup.tag);
        {
            let mut inner = self.inner.borrow_mut();
            if let Some(element) = inner.get_mut(id) {
                element.attributes.extend(markup.attributes);
                element.classes = markup.classes;
                element.text = markup.text;
            }
        }
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        for child in markup.children {
            self.mount(Some(id), child);
        }
        id
    }

    /// Returns true if the id refers to an element of this document.
    pub fn exists(&self, id: ElementId) -> bool {
        self.inner.borrow().get(id).is_some()
    }

    /// Lowercase tag name, empty for unknown ids.
    pub fn tag(&self, id: ElementId) -> String {
        self.inner
            .borrow()
            .get(id)
            .map(|element| element.tag.clone())
            .unwrap_or_default()
    }

    /// Attribute names are case-insensitive.
    pub fn attribute(&self, id: ElementId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.inner
            .borrow()
            .get(id)
            .and_then(|element| element.attributes.get(&name).cloned())
    }

    pub fn set_attribute(&self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.inner.borrow_mut().get_mut(id) {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.into());
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.inner
            .borrow()
            .get(id)
            .is_some_and(|element| element.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&self, id: ElementId, class: &str) {
        if let Some(element) = self.inner.borrow_mut().get_mut(id)
            && !element.classes.iter().any(|c| c == class)
        {
            element.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, id: ElementId, class: &str) {
        if let Some(element) = self.inner.borrow_mut().get_mut(id) {
            element.classes.retain(|c| c != class);
        }
    }

    pub fn add_classes<'a>(&self, id: ElementId, classes: impl IntoIterator<Item = &'a str>) {
        for class in classes {
            self.add_class(id, class);
        }
    }

    pub fn remove_classes<'a>(&self, id: ElementId, classes: impl IntoIterator<Item = &'a str>) {
        for class in classes {
            self.remove_class(id, class);
        }
    }

    /// Current class list, in insertion order.
    pub fn classes(&self, id: ElementId) -> Vec<String> {
        self.inner
            .borrow()
            .get(id)
            .map(|element| element.classes.clone())
            .unwrap_or_default()
    }

    /// Concatenated text of the element and all its descendants.
    pub fn text_content(&self, id: ElementId) -> String {
        let mut text = String::new();
        self.inner.borrow().collect_text(id, &mut text);
        text
    }

    pub fn set_text(&self, id: ElementId, text: impl Into<String>) {
        if let Some(element) = self.inner.borrow_mut().get_mut(id) {
            element.text = Some(text.into());
        }
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.inner.borrow().get(id).and_then(|element| element.parent)
    }

    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .get(id)
            .map(|element| element.children.clone())
            .unwrap_or_default()
    }

    /// Returns true if `other` is `id` or one of its descendants.
    pub fn contains(&self, id: ElementId, other: ElementId) -> bool {
        let inner = self.inner.borrow();
        let mut current = Some(other);
        while let Some(candidate) = current {
            if candidate == id {
                return true;
            }
            current = inner.get(candidate).and_then(|element| element.parent);
        }
        false
    }

    /// First element (in creation order) whose `id` attribute equals `value`.
    pub fn get_element_by_id(&self, value: &str) -> Option<ElementId> {
        self.inner
            .borrow()
            .elements
            .iter()
            .position(|element| element.attributes.get("id").is_some_and(|id| id == value))
            .map(ElementId)
    }

    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        self.inner.borrow().matches(id, selector)
    }

    /// Direct children of `id` matching `selector`, in document order.
    pub fn query_children(&self, id: ElementId, selector: &Selector) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        inner
            .get(id)
            .map(|element| {
                element
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| inner.matches(child, selector))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First direct child of `id` matching `selector`.
    pub fn query_child(&self, id: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_children(id, selector).into_iter().next()
    }

    /// Move focus to an element.
    pub fn focus(&self, id: ElementId) {
        let mut inner = self.inner.borrow_mut();
        if inner.get(id).is_some() {
            inner.active = Some(id);
        }
    }

    /// Remove focus from an element if it holds it.
    pub fn blur(&self, id: ElementId) {
        let mut inner = self.inner.borrow_mut();
        if inner.active == Some(id) {
            inner.active = None;
        }
    }

    /// The currently focused element.
    pub fn active_element(&self) -> Option<ElementId> {
        self.inner.borrow().active
    }
}
