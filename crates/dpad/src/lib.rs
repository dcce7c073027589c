//! Touch classification, press tracking and render model for a circular
//! on-screen directional pad.

use std::time::Duration;

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod macros;
pub mod press;
pub mod render;
pub mod style;
pub mod widget;

pub use config::{ConfigError, Configuration, Settings};
pub use geometry::{Point, WidgetGeometry, Zone};
pub use press::{DPadEvent, PressState, TouchAction, TouchResult, TouchSample};
pub use render::{DrawCommand, PaintColors, RenderState};
pub use widget::{DPad, Drawable, TouchClassifiable};

pub const DEFAULT_PADDING: f64 = 20.0;
pub const DEFAULT_CENTER_CIRCLE_RATIO: f64 = 3.5;
pub const DEFAULT_CENTER_ICON_SIZE: f64 = 24.0;
pub const DEFAULT_CENTER_TEXT_SIZE: f64 = 14.0;
pub const DEFAULT_LONG_PRESS_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_TOUCH_SLOP: f64 = 8.0; // px a tap may wander

// Wedges leave a 2° gap on each side of the sector boundaries.
pub const WEDGE_SWEEP: f64 = 88.0;
pub const DOWN_WEDGE_START: f64 = 46.0;
pub const LEFT_WEDGE_START: f64 = 136.0;
pub const UP_WEDGE_START: f64 = 226.0;
pub const RIGHT_WEDGE_START: f64 = 316.0;
