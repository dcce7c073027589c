use crate::config::Configuration;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum Zone {
    #[strum(serialize = "CENTER", serialize = "c")]
    Center,
    #[strum(serialize = "UP", serialize = "u")]
    Up,
    #[strum(serialize = "DOWN", serialize = "d")]
    Down,
    #[strum(serialize = "LEFT", serialize = "l")]
    Left,
    #[strum(serialize = "RIGHT", serialize = "r")]
    Right,
}

impl Zone {
    pub fn is_direction(&self) -> bool {
        !matches!(self, Self::Center)
    }

    /// Maps an angle in degrees, measured clockwise from the positive x axis
    /// in screen coordinates and normalized to `[0, 360)`, to its wedge.
    ///
    /// Each boundary belongs to the sector below it, except 315° which
    /// belongs to `Up`.
    pub fn from_angle(deg: f64) -> Self {
        if deg > 315.0 || deg <= 45.0 {
            Self::Right
        } else if deg <= 135.0 {
            Self::Down
        } else if deg <= 225.0 {
            Self::Left
        } else {
            Self::Up
        }
    }
}

/// Layout of the square control, recomputed on every layout pass and every
/// configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidgetGeometry {
    pub size: f64,
    pub center: f64,
    pub center_radius: f64,
    pub half_padding: f64,
}

impl WidgetGeometry {
    pub fn measure(width: f64, height: f64, config: &Configuration) -> Self {
        let size = width.min(height).max(0.0);
        let center = size / 2.0;
        Self {
            size,
            center,
            center_radius: (size / config.center_circle_ratio).min(center),
            half_padding: config.padding / 2.0,
        }
    }

    pub fn center_point(&self) -> Point {
        Point::new(self.center, self.center)
    }

    pub fn outer_radius(&self) -> f64 {
        self.center - self.half_padding
    }

    pub fn inner_radius(&self) -> f64 {
        self.center_radius - self.half_padding
    }

    /// Direction of `p` from the middle of the square, in degrees within
    /// `[0, 360)`.
    pub fn angle_of(&self, p: Point) -> f64 {
        let half = self.size / 2.0;
        let deg = (p.y - half).atan2(p.x - half).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }
}

/// Circle membership with a bounding-box reject and an inscribed-diamond
/// accept before falling back to the squared distance.
pub fn is_in_circle(p: Point, center: f64, radius: f64) -> bool {
    let dx = (p.x - center).abs();
    if dx > radius {
        return false;
    }

    let dy = (p.y - center).abs();
    if dy > radius {
        return false;
    }

    if dx + dy <= radius {
        return true;
    }
    dx * dx + dy * dy <= radius * radius
}

pub fn classify(p: Point, geometry: &WidgetGeometry, config: &Configuration) -> Option<Zone> {
    if !is_in_circle(p, geometry.center, geometry.outer_radius()) {
        return None;
    }

    if config.center_circle_enabled
        && config.center_circle_press_enabled
        && is_in_circle(p, geometry.center, geometry.inner_radius())
    {
        return Some(Zone::Center);
    }

    Some(Zone::from_angle(geometry.angle_of(p)))
}
