use crate::geometry::Point;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    LongPress,
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    start_pos: Point,
    /// Pending long-press deadline; cleared once it fires or the pointer
    /// leaves the tap region.
    deadline: Option<Instant>,
    moved_beyond_slop: bool,
    long_press_recognized: bool,
}

/// Single-pointer tap and long-press recognition for the center button.
#[derive(Debug, Clone, Default)]
pub struct TapDetector {
    tracking: Option<Tracking>,
}

impl TapDetector {
    pub fn down(&mut self, pos: Point, time: Instant, long_press_timeout: Duration) {
        self.tracking = Some(Tracking {
            start_pos: pos,
            // An unrepresentable deadline disarms the long-press.
            deadline: time.checked_add(long_press_timeout),
            moved_beyond_slop: false,
            long_press_recognized: false,
        });
    }

    pub fn moved(&mut self, pos: Point, slop: f64) {
        let Some(t) = self.tracking.as_mut() else {
            return;
        };
        if t.moved_beyond_slop {
            return;
        }
        let (dx, dy) = (pos.x - t.start_pos.x, pos.y - t.start_pos.y);
        if dx * dx + dy * dy > slop * slop {
            t.moved_beyond_slop = true;
            t.deadline = None;
        }
    }

    /// Ends the gesture, yielding a tap when it qualifies as one.
    pub fn up(&mut self) -> Option<Gesture> {
        self.tracking
            .take()
            .filter(|t| !t.moved_beyond_slop && !t.long_press_recognized)
            .map(|_| Gesture::Tap)
    }

    pub fn cancel(&mut self) {
        self.tracking = None;
    }

    /// Recognizes the long-press once `now` reaches the armed deadline.
    pub fn expire(&mut self, now: Instant) -> Option<Gesture> {
        let t = self.tracking.as_mut()?;
        match t.deadline {
            Some(deadline) if now >= deadline => {
                t.deadline = None;
                t.long_press_recognized = true;
                Some(Gesture::LongPress)
            }
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.tracking.as_ref().and_then(|t| t.deadline)
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }
}
