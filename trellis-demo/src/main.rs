//! Interactive terminal demo: a menubar driven by mouse and keyboard.
//!
//! The engine's virtual clock is advanced with wall-clock time, and paint
//! boundaries run on a fixed frame tick while transition stages are queued.

mod render;
mod terminal;

use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use log::{debug, error, info};
use serde_json::json;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::time::{MissedTickBehavior, sleep_until};
use trellis::{
    Document, Flavor, ItemId, KeyPress, KeyToken, Markup, Menu, MenuRegistry, Modality,
    Notification, PointerKind,
};

use render::HitMap;
use terminal::TerminalGuard;

const FRAME: Duration = Duration::from_millis(16);

fn site() -> Document {
    let document = Document::new();
    document.mount(
        None,
        Markup::new("div").id("page").child(
            Markup::new("nav").child(Markup::ul().id("site-menu").children([
                Markup::li().child(Markup::link("Home")),
                Markup::li().child(Markup::link("About")).child(Markup::ul().children([
                    Markup::li().child(Markup::link("Team")),
                    Markup::li().child(Markup::link("History")).child(Markup::ul().children([
                        Markup::li().child(Markup::link("Founding")),
                        Markup::li().child(Markup::link("Milestones")),
                        Markup::li().child(Markup::link("Today")),
                    ])),
                    Markup::li().child(Markup::link("Careers")),
                ])),
                Markup::li().child(Markup::link("Services")).child(Markup::ul().children([
                    Markup::li().child(Markup::link("Design")),
                    Markup::li().child(Markup::link("Development")),
                    Markup::li().child(Markup::link("Support")),
                ])),
                Markup::li().child(Markup::link("Blog")),
                Markup::li().child(Markup::link("Contact")),
            ])),
        ),
    );
    document
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let log_file = File::create("trellis-demo.log")?;
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("Failed to initialize logger: {e}");
    }

    let document = site();
    let mut registry = MenuRegistry::new();
    let options = json!({
        "menuElement": "site-menu",
        "hoverType": "dynamic",
        "hoverDelay": 150,
        "transitionDuration": 200,
    });
    let Some(key) = registry.mount_json(&document, Flavor::Menubar, &options) else {
        return Err(io::Error::other("menu failed to initialize, see trellis-demo.log"));
    };

    let mut terminal = TerminalGuard::new()?;
    run(&mut terminal, &document, &mut registry, &key).await
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(tokio::time::Instant::from_std(d)).await,
        None => std::future::pending::<()>().await,
    }
}

async fn run(
    terminal: &mut TerminalGuard,
    document: &Document,
    registry: &mut MenuRegistry,
    key: &str,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut frames = tokio::time::interval(FRAME);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut clock = Instant::now();
    let mut hovered: Vec<ItemId> = Vec::new();
    let mut status = String::from("Ready");

    loop {
        let now = Instant::now();
        registry.advance(now - clock);
        clock = now;

        for (menu, notification) in registry.drain_notifications() {
            status = describe(document, &notification);
            info!("{}: {}", menu, status);
        }

        let Some(menu) = registry.get(key) else {
            error!("Menu `{}` disappeared from the registry", key);
            return Ok(());
        };
        let hits = render::draw(terminal.stdout(), menu, &status)?;

        let deadline = registry.next_deadline().map(|d| Instant::now() + d);
        let needs_paint = registry.needs_paint();

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    let Some(menu) = registry.get_mut(key) else {
                        return Ok(());
                    };
                    if !handle_event(event, menu, &hits, &mut hovered) {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Some(Err(e)) => error!("Event stream error: {}", e),
                None => return Ok(()),
            },

            _ = frames.tick(), if needs_paint => {
                registry.paint();
            }

            _ = sleep_until_optional(deadline) => {
                debug!("Timer deadline reached");
            }
        }
    }
}

/// Feed one terminal event to the menu. Returns false to quit.
fn handle_event(event: Event, menu: &mut Menu, hits: &HitMap, hovered: &mut Vec<ItemId>) -> bool {
    match event {
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved => {
                let chain = hits
                    .item_at(mouse.column, mouse.row)
                    .map(|item| hover_chain(menu, item))
                    .unwrap_or_default();
                // Items whose element still contains the pointer see neither event.
                for &item in hovered.iter().rev().filter(|&&item| !chain.contains(&item)) {
                    menu.pointer_leave(item, PointerKind::Mouse);
                }
                for &item in chain.iter().filter(|&&item| !hovered.contains(&item)) {
                    menu.pointer_enter(item, PointerKind::Mouse);
                }
                *hovered = chain;
            }
            MouseEventKind::Up(MouseButton::Left) => match hits.item_at(mouse.column, mouse.row) {
                Some(item) => menu.pointer_up(item),
                None => {
                    menu.pointer_up_outside();
                }
            },
            _ => {}
        },
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return false;
            }
            if menu.focused_node().is_none() {
                if key.code == KeyCode::Char('q') {
                    return false;
                }
                // Tab lands on the menubar's single tab stop.
                if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
                    let root = menu.root();
                    let index = menu.selection(root).max(0);
                    menu.set_modality(root, Modality::Keyboard);
                    menu.focus_child(root, index);
                }
                return true;
            }
            if let Some(press) = key_press(key.code) {
                let consumed = menu.key_down(press);
                debug!("Key {:?} consumed: {}", key.code, consumed);
            }
        }
        _ => {}
    }
    true
}

/// The item under the pointer and every item containing it, outermost first.
fn hover_chain(menu: &Menu, target: ItemId) -> Vec<ItemId> {
    let document = menu.document();
    let element = menu.item_element(target);
    let mut chain: Vec<ItemId> = menu
        .nodes()
        .flat_map(|node| menu.items(node).iter().copied())
        .filter(|&item| document.contains(menu.item_element(item), element))
        .collect();
    chain.sort_by_key(|&item| menu.depth(menu.item_node(item)));
    chain
}

fn key_press(code: KeyCode) -> Option<KeyPress> {
    let token = match code {
        KeyCode::Enter => KeyToken::Enter,
        KeyCode::Esc => KeyToken::Escape,
        KeyCode::Up => KeyToken::ArrowUp,
        KeyCode::Down => KeyToken::ArrowDown,
        KeyCode::Left => KeyToken::ArrowLeft,
        KeyCode::Right => KeyToken::ArrowRight,
        KeyCode::Home => KeyToken::Home,
        KeyCode::End => KeyToken::End,
        KeyCode::Tab | KeyCode::BackTab => KeyToken::Tab,
        KeyCode::Char(' ') => KeyToken::Space,
        KeyCode::Char('*') => KeyToken::Asterisk,
        KeyCode::Char(c) => return Some(KeyPress::character(c)),
        _ => return None,
    };
    Some(KeyPress::new(token))
}

fn describe(document: &Document, notification: &Notification) -> String {
    match *notification {
        Notification::Expanded { element, .. } => {
            format!("Opened {}", document.text_content(element).trim())
        }
        Notification::Collapsed { element, .. } => {
            format!("Closed {}", document.text_content(element).trim())
        }
        Notification::Activated { element, .. } => {
            format!("Chose {}", document.text_content(element).trim())
        }
    }
}
