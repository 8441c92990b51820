pub mod aria;
pub mod config;
pub mod document;
pub mod error;
pub mod flavor;
pub mod input;
pub mod menu;
pub mod notify;
pub mod registry;
pub mod scheduler;
pub mod state;

pub use config::{ClassList, Delay, MenuConfig, Selectors};
pub use document::{Document, ElementId, Markup, Selector, SelectorError};
pub use error::{ConfigErrors, ConfigIssue, MenuError};
pub use flavor::{Action, Flavor, KeyMap, Roles, Scope};
pub use input::{KeyPress, KeyToken, PointerKind};
pub use menu::{ItemId, Menu, NodeId, ToggleId};
pub use notify::Notification;
pub use registry::MenuRegistry;
pub use scheduler::{Scheduler, TaskId};
pub use state::{FocusState, HoverMode, Modality, TransitionPhase};
