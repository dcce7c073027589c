use crate::config::{ConfigError, Configuration};
use crate::geometry::{self, Point, WidgetGeometry, Zone};
use crate::gesture::{Gesture, TapDetector};
use crate::press::{DPadEvent, PressState, TouchAction, TouchResult, TouchSample};
use crate::render::{self, DrawCommand, PaintColors, RenderState};
use std::time::Instant;

pub trait TouchClassifiable {
    fn classify(&self, pos: Point) -> Option<Zone>;
    fn on_touch(&mut self, sample: TouchSample) -> TouchResult;
}

pub trait Drawable {
    fn render(&self) -> Vec<DrawCommand>;
}

/// The directional pad: owns its press state and geometry, reads the applied
/// configuration on every sample.
#[derive(Debug, Clone)]
pub struct DPad {
    config: Configuration,
    geometry: WidgetGeometry,
    press: PressState,
    center_gesture: TapDetector,
}

impl Default for DPad {
    fn default() -> Self {
        Self::with_valid_config(Configuration::default())
    }
}

impl DPad {
    pub fn new(config: Configuration) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: Configuration) -> Self {
        Self {
            geometry: WidgetGeometry::measure(0.0, 0.0, &config),
            config,
            press: PressState::default(),
            center_gesture: TapDetector::default(),
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn geometry(&self) -> &WidgetGeometry {
        &self.geometry
    }

    pub fn press_state(&self) -> PressState {
        self.press
    }

    /// Resolves the available area to a square and returns its side.
    pub fn layout(&mut self, width: f64, height: f64) -> f64 {
        self.geometry = WidgetGeometry::measure(width, height, &self.config);
        self.geometry.size
    }

    /// Replaces the whole configuration at once. An invalid configuration is
    /// rejected and the current one stays in force. Press state is untouched.
    pub fn apply_config(&mut self, config: Configuration) -> Result<(), ConfigError> {
        config.validate()?;
        let size = self.geometry.size;
        self.config = config;
        self.geometry = WidgetGeometry::measure(size, size, &self.config);
        log::debug!("Configuration applied");
        Ok(())
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            press: self.press,
            geometry: self.geometry,
            paints: PaintColors::resolve(&self.press, &self.config),
        }
    }

    /// When the host must call [`DPad::poll_long_press`] next.
    pub fn long_press_deadline(&self) -> Option<Instant> {
        self.center_gesture.deadline()
    }

    pub fn poll_long_press(&mut self, now: Instant) -> Option<DPadEvent> {
        match self.center_gesture.expire(now)? {
            Gesture::LongPress => {
                log::debug!("Center long press");
                self.press.release(Zone::Center);
                Some(DPadEvent::CenterLongPress)
            }
            Gesture::Tap => None,
        }
    }

    fn track_center(&mut self, sample: &TouchSample, events: &mut Vec<DPadEvent>) {
        match sample.action {
            TouchAction::Down => {
                self.center_gesture
                    .down(sample.pos, sample.time, self.config.long_press_timeout)
            }
            TouchAction::Move => self.center_gesture.moved(sample.pos, self.config.touch_slop),
            TouchAction::Up => {
                if let Some(Gesture::Tap) = self.center_gesture.up() {
                    events.push(DPadEvent::DirectionClick(Zone::Center));
                }
            }
            TouchAction::Cancel => self.center_gesture.cancel(),
        }
    }
}

impl TouchClassifiable for DPad {
    fn classify(&self, pos: Point) -> Option<Zone> {
        geometry::classify(pos, &self.geometry, &self.config)
    }

    fn on_touch(&mut self, sample: TouchSample) -> TouchResult {
        let mut events = Vec::new();
        let previous = self.press.current();

        // a deadline that passed before this sample arrived still counts
        events.extend(self.poll_long_press(sample.time));

        let zone = self.classify(sample.pos);
        match zone {
            None => {
                self.center_gesture.cancel();
                if let Some(held) = self.press.current() {
                    events.push(DPadEvent::DirectionPress {
                        zone: held,
                        action: TouchAction::Up,
                    });
                }
                self.press.clear();
            }
            Some(zone) => {
                if zone == Zone::Center {
                    self.track_center(&sample, &mut events);
                } else {
                    self.center_gesture.cancel();
                }

                self.press.press(zone);

                if sample.action == TouchAction::Down && zone.is_direction() {
                    events.push(DPadEvent::DirectionClick(zone));
                }

                let action = if sample.action.is_touching() {
                    sample.action
                } else {
                    TouchAction::Up
                };
                events.push(DPadEvent::DirectionPress { zone, action });

                if !sample.action.is_touching() {
                    self.press.clear();
                }
            }
        }

        let current = self.press.current();
        if current != previous {
            log::debug!("Pressed zone {:?} -> {:?}", previous, current);
        }

        let is_down = sample.action == TouchAction::Down;
        TouchResult {
            zone,
            press_state: self.press,
            events,
            haptic_feedback: is_down && self.config.haptic_feedback_enabled && current.is_some(),
            perform_click: is_down && zone.is_some(),
            consumed: zone.is_some(),
        }
    }
}

impl Drawable for DPad {
    fn render(&self) -> Vec<DrawCommand> {
        render::render(&self.render_state(), &self.config)
    }
}
