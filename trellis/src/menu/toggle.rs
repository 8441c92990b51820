//! Toggle open/close state machine and transition staging.
//!
//! Without a transition marker, state classes change synchronously. With
//! one, an expand or collapse runs as:
//!
//! 1. add the marker
//! 2. next paint boundary: remove the class of the state being left
//! 3. the boundary after: add the class of the state being entered
//! 4. after the open or close duration: remove the marker
//!
//! Every start bumps the toggle's generation. Stages carry the generation
//! they were scheduled under and do nothing once it is stale, so the most
//! recent expand or collapse always decides the final class set.

use crate::aria;
use crate::document::ElementId;
use crate::notify::Notification;
use crate::state::{FocusState, TransitionPhase};

use super::tasks::{Stage, Task};
use super::{Menu, ToggleId};

impl Menu {
    /// Open the submenu and move logical focus into it.
    pub fn open(&mut self, toggle: ToggleId) {
        if self.flavor.closes_siblings() {
            self.close_siblings(toggle);
        }
        let controlled = self.toggle_state(toggle).controlled;
        self.set_focus_state(controlled, FocusState::Within);
        if !self.toggle_state(toggle).open {
            self.expand(toggle);
            self.toggle_state_mut(toggle).open = true;
        }
    }

    /// Open the submenu while keeping logical focus in the parent node.
    pub fn preview(&mut self, toggle: ToggleId) {
        if self.flavor.closes_siblings() {
            self.close_siblings(toggle);
        }
        if let Some(parent) = self.toggle_state(toggle).parent {
            self.set_focus_state(parent, FocusState::Within);
        }
        if !self.toggle_state(toggle).open {
            self.expand(toggle);
            self.toggle_state_mut(toggle).open = true;
        }
    }

    /// Close the submenu and everything opened below it. No-op when closed.
    pub fn close(&mut self, toggle: ToggleId) {
        if !self.toggle_state(toggle).open {
            return;
        }
        self.close_toggle_children(toggle);
        let controlled = self.toggle_state(toggle).controlled;
        self.blur_node(controlled);
        if let Some(parent) = self.toggle_state(toggle).parent {
            self.set_focus_state(parent, FocusState::Within);
        }
        self.collapse(toggle);
        self.toggle_state_mut(toggle).open = false;
    }

    pub fn toggle(&mut self, toggle: ToggleId) {
        if self.toggle_state(toggle).open {
            self.close(toggle);
        } else {
            self.open(toggle);
        }
    }

    /// Close every other toggle owned by the same parent node.
    pub fn close_siblings(&mut self, toggle: ToggleId) {
        let Some(parent) = self.toggle_state(toggle).parent else {
            return;
        };
        for sibling in self.node(parent).submenu_toggles.clone() {
            if sibling != toggle {
                self.close(sibling);
            }
        }
    }

    /// Close every toggle owned by the controlled node.
    pub fn close_toggle_children(&mut self, toggle: ToggleId) {
        let controlled = self.toggle_state(toggle).controlled;
        self.close_children(controlled);
    }

    fn expand(&mut self, toggle: ToggleId) {
        let element = self.toggle_state(toggle).element;
        aria::stamp_expanded(&self.document, element, true);
        self.has_opened = true;
        self.start_transition(toggle, true);
        log::debug!("Toggle {} expanded", toggle.0);
        self.notify(Notification::Expanded { toggle, element });
    }

    fn collapse(&mut self, toggle: ToggleId) {
        let element = self.toggle_state(toggle).element;
        aria::stamp_expanded(&self.document, element, false);
        self.start_transition(toggle, false);
        log::debug!("Toggle {} collapsed", toggle.0);
        self.notify(Notification::Collapsed { toggle, element });
    }

    fn start_transition(&mut self, toggle: ToggleId, opening: bool) {
        let state = self.toggle_state_mut(toggle);
        state.generation += 1;
        let generation = state.generation;
        let target = state.target;
        let pending = state.transition_timer.take();
        if let Some(timer) = pending {
            self.scheduler.cancel(timer);
        }

        if self.config.transition_class.is_empty() {
            self.apply_state_classes(target, opening);
            self.toggle_state_mut(toggle).phase = if opening {
                TransitionPhase::Open
            } else {
                TransitionPhase::Closed
            };
            return;
        }

        self.document
            .add_classes(target, self.config.transition_class.iter());
        self.toggle_state_mut(toggle).phase = if opening {
            TransitionPhase::Opening
        } else {
            TransitionPhase::Closing
        };
        self.scheduler.next_frame(Task::Stage {
            toggle,
            generation,
            opening,
            stage: Stage::RemovePrevious,
        });
    }

    fn apply_state_classes(&self, target: ElementId, opening: bool) {
        let (add, remove) = if opening {
            (&self.config.open_class, &self.config.close_class)
        } else {
            (&self.config.close_class, &self.config.open_class)
        };
        self.document.add_classes(target, add.iter());
        self.document.remove_classes(target, remove.iter());
    }

    pub(super) fn run_stage(&mut self, toggle: ToggleId, generation: u64, opening: bool, stage: Stage) {
        if self.toggle_state(toggle).generation != generation {
            log::trace!("Skipping stale {:?} stage for toggle {}", stage, toggle.0);
            return;
        }
        let target = self.toggle_state(toggle).target;
        match stage {
            Stage::RemovePrevious => {
                let previous = if opening {
                    &self.config.close_class
                } else {
                    &self.config.open_class
                };
                self.document.remove_classes(target, previous.iter());
                self.scheduler.next_frame(Task::Stage {
                    toggle,
                    generation,
                    opening,
                    stage: Stage::ApplyTarget,
                });
            }
            Stage::ApplyTarget => {
                let (classes, duration) = if opening {
                    (&self.config.open_class, self.config.resolved_open_duration())
                } else {
                    (&self.config.close_class, self.config.resolved_close_duration())
                };
                self.document.add_classes(target, classes.iter());
                let timer = self.scheduler.after(
                    duration,
                    Task::Stage {
                        toggle,
                        generation,
                        opening,
                        stage: Stage::Finish,
                    },
                );
                self.toggle_state_mut(toggle).transition_timer = Some(timer);
            }
            Stage::Finish => {
                self.document
                    .remove_classes(target, self.config.transition_class.iter());
                let state = self.toggle_state_mut(toggle);
                state.transition_timer = None;
                state.phase = state.phase.settled();
            }
        }
    }

    /// Apply the toggle's starting state from the classes already present,
    /// without staging or notifications.
    pub(super) fn init_toggle(&mut self, toggle: ToggleId) {
        let (element, target) = {
            let state = self.toggle_state(toggle);
            (state.element, state.target)
        };
        let open = !self.config.open_class.is_empty()
            && self
                .config
                .open_class
                .iter()
                .all(|class| self.document.has_class(target, class));

        self.apply_state_classes(target, open);
        aria::stamp_expanded(&self.document, element, open);
        let state = self.toggle_state_mut(toggle);
        state.open = open;
        state.phase = if open {
            TransitionPhase::Open
        } else {
            TransitionPhase::Closed
        };
    }
}
