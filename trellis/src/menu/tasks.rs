//! Deferred work scheduled by the engine.

use crate::document::ElementId;

use super::{Menu, NodeId, ToggleId};

/// What a hover timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HoverAction {
    Preview(ToggleId),
    Close(ToggleId),
    /// Record a pointer modality change without closing anything.
    Modality,
}

/// One step of a staged transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Stage {
    /// Remove the class of the state being left.
    RemovePrevious,
    /// Apply the class of the state being entered.
    ApplyTarget,
    /// Remove the transition marker.
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Task {
    Hover {
        node: NodeId,
        action: HoverAction,
    },
    Stage {
        toggle: ToggleId,
        generation: u64,
        opening: bool,
        stage: Stage,
    },
    Focus(ElementId),
    Blur(ElementId),
}

impl Menu {
    pub(super) fn run_task(&mut self, task: Task) {
        match task {
            Task::Hover { node, action } => {
                self.node_mut(node).hover_timer = None;
                log::trace!("Hover timer fired on node {}: {:?}", node.0, action);
                self.run_hover(node, action);
            }
            Task::Stage {
                toggle,
                generation,
                opening,
                stage,
            } => self.run_stage(toggle, generation, opening, stage),
            Task::Focus(element) => self.document.focus(element),
            Task::Blur(element) => self.document.blur(element),
        }
    }
}
