use crate::notify::Notification;

use super::tasks::Task;
use super::{ItemId, Menu};

impl Menu {
    /// Focus the item's link at the next paint boundary, if the owning node
    /// allows DOM focus to move.
    pub fn focus_item(&mut self, item: ItemId) {
        let (node, link) = (self.item(item).node, self.item(item).link);
        if self.should_focus(node) {
            self.scheduler.next_frame(Task::Focus(link));
        }
    }

    /// Blur the item's link at the next paint boundary, if the owning node
    /// allows DOM focus to move.
    pub fn blur_item(&mut self, item: ItemId) {
        let (node, link) = (self.item(item).node, self.item(item).link);
        if self.should_focus(node) {
            self.scheduler.next_frame(Task::Blur(link));
        }
    }

    /// Report that a plain item was chosen.
    pub(super) fn activate(&mut self, item: ItemId) {
        let link = self.item(item).link;
        log::debug!("Item {} activated", item.0);
        self.notify(Notification::Activated {
            item,
            element: link,
        });
    }
}
