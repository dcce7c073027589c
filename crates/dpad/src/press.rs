use crate::geometry::{Point, Zone};
use std::time::Instant;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

impl TouchAction {
    /// Whether the pointer is still on the surface after this action.
    pub fn is_touching(&self) -> bool {
        matches!(self, Self::Down | Self::Move)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub pos: Point,
    pub action: TouchAction,
    pub time: Instant,
}

impl TouchSample {
    pub fn new(x: f64, y: f64, action: TouchAction, time: Instant) -> Self {
        Self {
            pos: Point::new(x, y),
            action,
            time,
        }
    }
}

/// Which zone is currently held. At most one flag is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PressState {
    center: bool,
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl PressState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn press(&mut self, zone: Zone) {
        self.clear();
        *self.flag_mut(zone) = true;
    }

    pub fn release(&mut self, zone: Zone) {
        *self.flag_mut(zone) = false;
    }

    pub fn is_pressed(&self, zone: Zone) -> bool {
        match zone {
            Zone::Center => self.center,
            Zone::Up => self.up,
            Zone::Down => self.down,
            Zone::Left => self.left,
            Zone::Right => self.right,
        }
    }

    pub fn current(&self) -> Option<Zone> {
        [Zone::Center, Zone::Up, Zone::Down, Zone::Left, Zone::Right]
            .into_iter()
            .find(|&z| self.is_pressed(z))
    }

    pub fn pressed_count(&self) -> usize {
        [self.center, self.up, self.down, self.left, self.right]
            .iter()
            .filter(|&&b| b)
            .count()
    }

    fn flag_mut(&mut self, zone: Zone) -> &mut bool {
        match zone {
            Zone::Center => &mut self.center,
            Zone::Up => &mut self.up,
            Zone::Down => &mut self.down,
            Zone::Left => &mut self.left,
            Zone::Right => &mut self.right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DPadEvent {
    /// Continuous: the zone is under the pointer with this action.
    DirectionPress { zone: Zone, action: TouchAction },
    /// Discrete: the zone was clicked.
    DirectionClick(Zone),
    CenterLongPress,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchResult {
    pub zone: Option<Zone>,
    pub press_state: PressState,
    pub events: Vec<DPadEvent>,
    /// The host should play a keyboard-tap haptic.
    pub haptic_feedback: bool,
    /// The host should run its generic click handling for the widget.
    pub perform_click: bool,
    /// The sample landed inside the control.
    pub consumed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_press_is_mutually_exclusive() {
        let mut state = PressState::default();
        assert_eq!(state.current(), None);
        for zone in Zone::iter() {
            state.press(zone);
            assert_eq!(state.current(), Some(zone));
            assert_eq!(state.pressed_count(), 1);
        }
        state.release(Zone::Up);
        assert_eq!(state.current(), Some(Zone::Right));
        state.release(Zone::Right);
        assert_eq!(state.pressed_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut state = PressState::default();
        state.press(Zone::Center);
        state.clear();
        assert_eq!(state, PressState::default());
    }

    #[test]
    fn test_touching_actions() {
        assert!(TouchAction::Down.is_touching());
        assert!(TouchAction::Move.is_touching());
        assert!(!TouchAction::Up.is_touching());
        assert!(!TouchAction::Cancel.is_touching());
        assert_eq!("move".parse::<TouchAction>().unwrap(), TouchAction::Move);
    }
}
