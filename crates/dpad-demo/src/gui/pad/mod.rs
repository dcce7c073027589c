use dpad::{DPadEvent, TouchAction};

pub mod timer;
pub mod view;

pub use timer::LongPressTimer;
pub use view::{IconCache, draw};

pub const DEFAULT_PAD_SIZE: i32 = 320;

/// Status line shown under the pad for a continuous press event.
pub fn describe(event: &DPadEvent) -> Option<String> {
    match event {
        DPadEvent::DirectionPress { zone, action } => {
            Some(format!("Direction:\t{zone}\nAction:\t{action}"))
        }
        DPadEvent::DirectionClick(_) | DPadEvent::CenterLongPress => None,
    }
}

/// Tracks one drag so the `end` signal GTK emits after `cancel` is not
/// replayed as a release.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragState {
    cancelled: bool,
}

impl DragState {
    /// Returns whether a sample with `action` belongs to the live drag.
    pub fn accept(&mut self, action: TouchAction) -> bool {
        match action {
            TouchAction::Down => {
                self.cancelled = false;
                true
            }
            TouchAction::Move | TouchAction::Up => !self.cancelled,
            TouchAction::Cancel => !std::mem::replace(&mut self.cancelled, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpad::Zone;

    #[test]
    fn test_describe_press() {
        let text = describe(&DPadEvent::DirectionPress {
            zone: Zone::Up,
            action: TouchAction::Move,
        });
        assert_eq!(text.as_deref(), Some("Direction:\tUP\nAction:\tMove"));
    }

    #[test]
    fn test_discrete_events_keep_status() {
        assert_eq!(describe(&DPadEvent::DirectionClick(Zone::Left)), None);
        assert_eq!(describe(&DPadEvent::CenterLongPress), None);
    }

    #[test]
    fn test_end_after_cancel_is_dropped() {
        let mut drag = DragState::default();
        assert!(drag.accept(TouchAction::Down));
        assert!(drag.accept(TouchAction::Move));
        assert!(drag.accept(TouchAction::Cancel));
        assert!(!drag.accept(TouchAction::Up));
        assert!(!drag.accept(TouchAction::Cancel));

        assert!(drag.accept(TouchAction::Down));
        assert!(drag.accept(TouchAction::Up));
    }
}
