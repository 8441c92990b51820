//! Draws a menu tree straight from its document.
//!
//! Submenus are shown whenever their element carries an open or transition
//! class, so what appears on screen is exactly what the class staging did.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use trellis::{FocusState, ItemId, Menu, NodeId};

/// Screen cells occupied by one item.
#[derive(Debug, Clone, Copy)]
struct Span {
    x: u16,
    y: u16,
    width: u16,
    item: ItemId,
}

/// Item lookup by screen position, rebuilt on every draw.
#[derive(Debug, Default)]
pub struct HitMap {
    spans: Vec<Span>,
}

impl HitMap {
    pub fn item_at(&self, x: u16, y: u16) -> Option<ItemId> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.y == y && x >= span.x && x < span.x + span.width)
            .map(|span| span.item)
    }
}

const MENU_ROW: u16 = 1;

pub fn draw(out: &mut impl Write, menu: &Menu, status: &str) -> io::Result<HitMap> {
    let mut hits = HitMap::default();
    queue!(out, Clear(ClearType::All))?;

    let mut x = 2;
    let root = menu.root();
    for (index, &item) in menu.items(root).iter().enumerate() {
        let label = label(menu, item);
        let width = label.chars().count() as u16;
        draw_item(out, menu, root, index, item, x, MENU_ROW, &label)?;
        hits.spans.push(Span {
            x,
            y: MENU_ROW,
            width,
            item,
        });
        if let Some(child) = visible_child(menu, item) {
            draw_column(out, menu, child, x, MENU_ROW + 1, &mut hits)?;
        }
        x += width + 1;
    }

    queue!(
        out,
        MoveTo(2, MENU_ROW + 12),
        SetAttribute(Attribute::Dim),
        Print(status),
        MoveTo(2, MENU_ROW + 13),
        Print("mouse: hover/click   keys: Tab, arrows, Enter, Esc, letters   q/Ctrl+C: quit"),
        SetAttribute(Attribute::Reset),
    )?;
    out.flush()?;
    Ok(hits)
}

fn draw_column(
    out: &mut impl Write,
    menu: &Menu,
    node: NodeId,
    x: u16,
    y: u16,
    hits: &mut HitMap,
) -> io::Result<()> {
    let labels: Vec<_> = menu.items(node).iter().map(|&item| label(menu, item)).collect();
    let width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0) as u16;

    for (index, (&item, label)) in menu.items(node).iter().zip(&labels).enumerate() {
        let row = y + index as u16;
        let padded = format!("{label:<width$}", width = width as usize);
        draw_item(out, menu, node, index, item, x, row, &padded)?;
        hits.spans.push(Span {
            x,
            y: row,
            width,
            item,
        });
        if let Some(child) = visible_child(menu, item) {
            draw_column(out, menu, child, x + width + 1, row, hits)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_item(
    out: &mut impl Write,
    menu: &Menu,
    node: NodeId,
    index: usize,
    item: ItemId,
    x: u16,
    y: u16,
    label: &str,
) -> io::Result<()> {
    let document = menu.document();
    let focused = document.active_element() == Some(menu.item_link(item));
    let selected = menu.selection(node) == index as isize && menu.focus_state(node) != FocusState::None;

    queue!(out, MoveTo(x, y))?;
    if focused {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    } else if selected {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if let Some(child) = menu.item_child(item)
        && menu
            .config()
            .transition_class
            .iter()
            .any(|class| document.has_class(menu.element(child), class))
    {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    queue!(out, Print(label), SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn label(menu: &Menu, item: ItemId) -> String {
    let text = menu.document().text_content(menu.item_link(item));
    if menu.is_submenu_item(item) {
        format!(" {} > ", text.trim())
    } else {
        format!(" {} ", text.trim())
    }
}

/// The item's submenu, if its element is currently shown.
fn visible_child(menu: &Menu, item: ItemId) -> Option<NodeId> {
    let child = menu.item_child(item)?;
    let element = menu.element(child);
    let document = menu.document();
    let config = menu.config();
    let shown = (!config.open_class.is_empty()
        && config.open_class.iter().all(|class| document.has_class(element, class)))
        || config
            .transition_class
            .iter()
            .any(|class| document.has_class(element, class));
    shown.then_some(child)
}
