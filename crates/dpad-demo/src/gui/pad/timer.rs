use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// The one scheduled callback behind center long-press detection. Follows the
/// pad's deadline and is removed from the main loop when dropped.
#[derive(Default)]
pub struct LongPressTimer {
    deadline: Option<Instant>,
    // Shared with the callback so a fired source is never removed twice.
    source: Rc<RefCell<Option<glib::SourceId>>>,
}

impl LongPressTimer {
    pub fn sync(&mut self, deadline: Option<Instant>, on_fire: impl FnOnce() + 'static) {
        if self.deadline == deadline && self.is_armed() {
            return;
        }
        self.cancel();

        let Some(deadline) = deadline else {
            return;
        };
        self.deadline = Some(deadline);

        let delay = deadline.saturating_duration_since(Instant::now());
        let slot = self.source.clone();
        let id = glib::timeout_add_local_once(delay, move || {
            slot.borrow_mut().take();
            on_fire();
        });
        *self.source.borrow_mut() = Some(id);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
        if let Some(id) = self.source.borrow_mut().take() {
            id.remove();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.source.borrow().is_some()
    }
}

impl Drop for LongPressTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
