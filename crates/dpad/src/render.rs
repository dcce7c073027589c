use crate::config::{Configuration, IconSource};
use crate::geometry::{Point, WidgetGeometry, Zone};
use crate::press::PressState;
use crate::style::{CenterIconSizeMode, ResolvedStyle, resolve_style};
use crate::{DOWN_WEDGE_START, LEFT_WEDGE_START, RIGHT_WEDGE_START, UP_WEDGE_START, WEDGE_SWEEP};
use palette::Srgba;

/// Fill color per zone, with the pressed color substituted where the zone is
/// held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintColors {
    pub center: Srgba<f64>,
    pub up: Srgba<f64>,
    pub down: Srgba<f64>,
    pub left: Srgba<f64>,
    pub right: Srgba<f64>,
}

impl PaintColors {
    pub fn resolve(press: &PressState, config: &Configuration) -> Self {
        let direction = |zone| {
            if press.is_pressed(zone) {
                config.pressed_color
            } else {
                config.normal_color
            }
        };
        Self {
            center: if press.is_pressed(Zone::Center) {
                config.center_circle_pressed_color
            } else {
                config.center_circle_normal_color
            },
            up: direction(Zone::Up),
            down: direction(Zone::Down),
            left: direction(Zone::Left),
            right: direction(Zone::Right),
        }
    }

    pub fn get(&self, zone: Zone) -> Srgba<f64> {
        match zone {
            Zone::Center => self.center,
            Zone::Up => self.up,
            Zone::Down => self.down,
            Zone::Left => self.left,
            Zone::Right => self.right,
        }
    }
}

/// Everything the drawing routine needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    pub press: PressState,
    pub geometry: WidgetGeometry,
    pub paints: PaintColors,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconSize {
    Intrinsic,
    Fixed(f64),
}

/// Backend-neutral drawing primitives, in paint order. Angles are degrees,
/// clockwise from the positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Wedge {
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        color: Srgba<f64>,
    },
    Circle {
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    },
    Icon {
        source: IconSource,
        center: Point,
        size: IconSize,
        tint: Option<Srgba<f64>>,
    },
    Text {
        text: String,
        center: Point,
        size: f64,
        color: Srgba<f64>,
        style: ResolvedStyle,
    },
}

const WEDGES: [(Zone, f64); 4] = [
    (Zone::Down, DOWN_WEDGE_START),
    (Zone::Left, LEFT_WEDGE_START),
    (Zone::Up, UP_WEDGE_START),
    (Zone::Right, RIGHT_WEDGE_START),
];

pub fn render(state: &RenderState, config: &Configuration) -> Vec<DrawCommand> {
    let geometry = &state.geometry;
    let center = geometry.center_point();

    let mut commands: Vec<DrawCommand> = WEDGES
        .iter()
        .map(|&(zone, start_angle)| DrawCommand::Wedge {
            center,
            radius: geometry.center,
            start_angle,
            sweep_angle: WEDGE_SWEEP,
            color: state.paints.get(zone),
        })
        .collect();

    if config.center_circle_enabled {
        commands.push(DrawCommand::Circle {
            center,
            radius: geometry.center_radius,
            color: state.paints.center,
        });
    }

    if let Some(source) = &config.center_icon {
        let size = match config.center_icon_size_mode {
            CenterIconSizeMode::Wrap => IconSize::Intrinsic,
            CenterIconSizeMode::Fixed => IconSize::Fixed(config.center_icon_size),
        };
        commands.push(DrawCommand::Icon {
            source: source.clone(),
            center,
            size,
            tint: config.center_icon_tint,
        });
    }

    if let Some(text) = config.center_text.as_ref().filter(|t| !t.is_empty()) {
        commands.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            size: config.center_text_size,
            color: config.center_text_color,
            style: resolve_style(config.center_text_style),
        });
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CenterText;
    use crate::style::TextStyle;

    fn state(press: PressState, config: &Configuration) -> RenderState {
        RenderState {
            press,
            geometry: WidgetGeometry::measure(200.0, 200.0, config),
            paints: PaintColors::resolve(&press, config),
        }
    }

    #[test]
    fn test_pressed_color_only_where_pressed() {
        let config = Configuration::default();
        let mut press = PressState::default();
        press.press(Zone::Left);
        let paints = PaintColors::resolve(&press, &config);
        assert_eq!(paints.left, config.pressed_color);
        assert_eq!(paints.up, config.normal_color);
        assert_eq!(paints.down, config.normal_color);
        assert_eq!(paints.right, config.normal_color);
        assert_eq!(paints.center, config.center_circle_normal_color);

        press.press(Zone::Center);
        let paints = PaintColors::resolve(&press, &config);
        assert_eq!(paints.center, config.center_circle_pressed_color);
        assert_eq!(paints.left, config.normal_color);
    }

    #[test]
    fn test_default_render_is_wedges_and_circle() {
        let config = Configuration::default();
        let commands = render(&state(PressState::default(), &config), &config);
        assert_eq!(commands.len(), 5);

        let starts: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Wedge {
                    start_angle,
                    sweep_angle,
                    radius,
                    ..
                } => {
                    assert_eq!(*sweep_angle, 88.0);
                    assert_eq!(*radius, 100.0);
                    Some(*start_angle)
                }
                _ => None,
            })
            .collect();
        assert_eq!(starts, vec![46.0, 136.0, 226.0, 316.0]);

        match &commands[4] {
            DrawCommand::Circle { center, radius, .. } => {
                assert_eq!(*center, Point::new(100.0, 100.0));
                assert!((radius - 200.0 / 3.5).abs() < 1e-9);
            }
            other => panic!("expected center circle, got {other:?}"),
        }
    }

    #[test]
    fn test_pressed_wedge_uses_pressed_color() {
        let config = Configuration::default();
        let mut press = PressState::default();
        press.press(Zone::Up);
        let commands = render(&state(press, &config), &config);
        match &commands[2] {
            DrawCommand::Wedge {
                start_angle, color, ..
            } => {
                assert_eq!(*start_angle, 226.0);
                assert_eq!(*color, config.pressed_color);
            }
            other => panic!("expected up wedge, got {other:?}"),
        }
    }

    #[test]
    fn test_icon_and_text() {
        let config = Configuration {
            center_circle_enabled: false,
            center_icon: Some(IconSource::new("ok.png")),
            center_icon_size_mode: CenterIconSizeMode::Fixed,
            center_icon_size: 48.0,
            center_text: Some(CenterText::new("OK")),
            center_text_style: TextStyle::BOLD | TextStyle::ITALIC,
            ..Configuration::default()
        };
        let commands = render(&state(PressState::default(), &config), &config);
        assert_eq!(commands.len(), 6);
        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::Circle { .. })));
        match &commands[4] {
            DrawCommand::Icon { size, tint, .. } => {
                assert_eq!(*size, IconSize::Fixed(48.0));
                assert_eq!(*tint, None);
            }
            other => panic!("expected icon, got {other:?}"),
        }
        match &commands[5] {
            DrawCommand::Text { text, style, .. } => {
                assert_eq!(text, "OK");
                assert!(style.bold && style.italic && !style.underline);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_wrap_icon_uses_intrinsic_size() {
        let config = Configuration {
            center_icon: Some(IconSource::new("ok.png")),
            ..Configuration::default()
        };
        let commands = render(&state(PressState::default(), &config), &config);
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::Icon {
                size: IconSize::Intrinsic,
                ..
            })
        ));
    }
}
