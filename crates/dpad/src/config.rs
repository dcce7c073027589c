use crate::style::{CenterIconSizeMode, TextStyle};
use crate::{
    DEFAULT_CENTER_CIRCLE_RATIO, DEFAULT_CENTER_ICON_SIZE, DEFAULT_CENTER_TEXT_SIZE,
    DEFAULT_LONG_PRESS_TIMEOUT, DEFAULT_PADDING, DEFAULT_TOUCH_SLOP,
};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{LinSrgb, Srgba};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Center circle ratio must be a positive number, got {0}")]
    InvalidCenterCircleRatio(f64),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color '{0}' must be #RRGGBB or #RRGGBBAA")]
    Format(String),
}

/// A literal color written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, Deref, From, Into)]
pub struct HexColor(Srgba<f64>);

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !matches!(hex.len(), 6 | 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Format(s.to_string()));
        }
        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::Format(s.to_string()))?;
        let (rgb, alpha) = if hex.len() == 6 {
            (value, 0xff)
        } else {
            (value >> 8, value & 0xff)
        };
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as u8;

        Ok(Self(
            Srgba::new(channel(16), channel(8), channel(0), alpha as u8).into_format(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct CenterText(String);

crate::impl_string_newtype!(CenterText);

/// Path of the image drawn in the middle of the pad.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct IconSource(String);

crate::impl_string_newtype!(IconSource);

/// A number that may arrive as a string. Anything that does not parse to a
/// finite value is replaced by the field's default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        parsed.filter(|v| v.is_finite())
    }

    fn or_default(raw: Option<&Self>, field: &str, default: f64) -> f64 {
        match raw {
            None => default,
            Some(raw) => raw.value().unwrap_or_else(|| {
                log::warn!("Invalid {} {:?}, using default {}", field, raw, default);
                default
            }),
        }
    }
}

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Colors used for any color the host leaves unset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDefaults {
    pub normal: Srgba<f64>,
    pub pressed: Srgba<f64>,
    pub center_circle_normal: Srgba<f64>,
    pub center_circle_pressed: Srgba<f64>,
}

impl Default for ColorDefaults {
    fn default() -> Self {
        Self {
            normal: Srgba::new(0.0, 0.0, 0.0, 0.54),
            pressed: Srgba::new(1.0, 0.251, 0.506, 1.0),
            center_circle_normal: Srgba::new(0.247, 0.318, 0.710, 1.0),
            center_circle_pressed: Srgba::new(0.188, 0.247, 0.624, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub normal_color: Srgba<f64>,
    pub pressed_color: Srgba<f64>,
    pub padding: f64,
    pub center_circle_enabled: bool,
    pub center_circle_press_enabled: bool,
    pub center_circle_normal_color: Srgba<f64>,
    pub center_circle_pressed_color: Srgba<f64>,
    /// The center circle's radius is the widget size divided by this.
    pub center_circle_ratio: f64,
    pub center_icon: Option<IconSource>,
    pub center_icon_tint: Option<Srgba<f64>>,
    pub center_icon_size_mode: CenterIconSizeMode,
    pub center_icon_size: f64,
    pub center_text: Option<CenterText>,
    pub center_text_size: f64,
    pub center_text_color: Srgba<f64>,
    pub center_text_style: TextStyle,
    pub haptic_feedback_enabled: bool,
    pub long_press_timeout: Duration,
    pub touch_slop: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Settings::default().resolve(&ColorDefaults::default())
    }
}

impl Configuration {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratio = self.center_circle_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(ConfigError::InvalidCenterCircleRatio(ratio));
        }
        Ok(())
    }

    pub fn has_center_text(&self) -> bool {
        self.center_text.as_ref().is_some_and(|t| !t.is_empty())
    }
}

/// Readable text color on top of `background`: white on dark, black on light.
pub fn contrasting_text_color(background: Srgba<f64>) -> Srgba<f64> {
    let lin: LinSrgb<f64> = background.color.into_linear();
    let luminance = 0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue;
    if luminance < 0.5 {
        Srgba::new(1.0, 1.0, 1.0, 1.0)
    } else {
        Srgba::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Configuration as supplied by the host, every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub normal_color: Option<HexColor>,
    pub pressed_color: Option<HexColor>,
    #[serde(alias = "image_padding")]
    pub padding: Option<Numeric>,
    #[serde(alias = "center_circle")]
    pub center_circle_enabled: Option<bool>,
    #[serde(alias = "center_circle_press")]
    pub center_circle_press_enabled: Option<bool>,
    pub center_circle_normal_color: Option<HexColor>,
    pub center_circle_pressed_color: Option<HexColor>,
    pub center_circle_ratio: Option<Numeric>,
    pub center_icon: Option<IconSource>,
    pub center_icon_tint: Option<HexColor>,
    pub center_icon_size_mode: Option<CenterIconSizeMode>,
    pub center_icon_size: Option<Numeric>,
    pub center_text: Option<CenterText>,
    pub center_text_size: Option<Numeric>,
    pub center_text_color: Option<HexColor>,
    pub center_text_style: Option<TextStyle>,
    #[serde(alias = "haptic_feedback")]
    pub haptic_feedback_enabled: Option<bool>,
    pub long_press_timeout_ms: Option<Numeric>,
    pub touch_slop: Option<Numeric>,
}

impl Settings {
    pub fn resolve(&self, defaults: &ColorDefaults) -> Configuration {
        let color = |c: Option<HexColor>, fallback: Srgba<f64>| c.map_or(fallback, Into::into);
        let center_circle_normal_color =
            color(self.center_circle_normal_color, defaults.center_circle_normal);
        let long_press_ms = Numeric::or_default(
            self.long_press_timeout_ms.as_ref(),
            "long_press_timeout_ms",
            DEFAULT_LONG_PRESS_TIMEOUT.as_secs_f64() * 1000.0,
        );

        Configuration {
            normal_color: color(self.normal_color, defaults.normal),
            pressed_color: color(self.pressed_color, defaults.pressed),
            padding: Numeric::or_default(self.padding.as_ref(), "padding", DEFAULT_PADDING),
            center_circle_enabled: self.center_circle_enabled.unwrap_or(true),
            center_circle_press_enabled: self.center_circle_press_enabled.unwrap_or(true),
            center_circle_normal_color,
            center_circle_pressed_color: color(
                self.center_circle_pressed_color,
                defaults.center_circle_pressed,
            ),
            center_circle_ratio: Numeric::or_default(
                self.center_circle_ratio.as_ref(),
                "center_circle_ratio",
                DEFAULT_CENTER_CIRCLE_RATIO,
            ),
            center_icon: self.center_icon.clone().filter(|i| !i.is_empty()),
            center_icon_tint: self.center_icon_tint.map(Into::into),
            center_icon_size_mode: self.center_icon_size_mode.unwrap_or_default(),
            center_icon_size: Numeric::or_default(
                self.center_icon_size.as_ref(),
                "center_icon_size",
                DEFAULT_CENTER_ICON_SIZE,
            ),
            center_text: self.center_text.clone().filter(|t| !t.is_empty()),
            center_text_size: Numeric::or_default(
                self.center_text_size.as_ref(),
                "center_text_size",
                DEFAULT_CENTER_TEXT_SIZE,
            ),
            center_text_color: self
                .center_text_color
                .map_or_else(|| contrasting_text_color(center_circle_normal_color), Into::into),
            center_text_style: self.center_text_style.unwrap_or_default(),
            haptic_feedback_enabled: self.haptic_feedback_enabled.unwrap_or(true),
            long_press_timeout: long_press_timeout(long_press_ms),
            touch_slop: Numeric::or_default(self.touch_slop.as_ref(), "touch_slop", DEFAULT_TOUCH_SLOP)
                .max(0.0),
        }
    }
}

fn long_press_timeout(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms.max(0.0) / 1000.0).unwrap_or_else(|_| {
        log::warn!(
            "Invalid long_press_timeout_ms {}, using default {:?}",
            ms,
            DEFAULT_LONG_PRESS_TIMEOUT
        );
        DEFAULT_LONG_PRESS_TIMEOUT
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(json: &str) -> Settings {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.padding, 20.0);
        assert_eq!(config.center_circle_ratio, 3.5);
        assert_eq!(config.center_icon_size, 24.0);
        assert_eq!(config.center_text_size, 14.0);
        assert!(config.center_circle_enabled);
        assert!(config.center_circle_press_enabled);
        assert!(config.haptic_feedback_enabled);
        assert_eq!(config.center_icon, None);
        assert_eq!(config.center_text, None);
        assert_eq!(config.long_press_timeout, Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let config = settings(
            r#"{"padding": "lots", "center_circle_ratio": "", "center_text_size": "NaN"}"#,
        )
        .resolve(&ColorDefaults::default());
        assert_eq!(config.padding, 20.0);
        assert_eq!(config.center_circle_ratio, 3.5);
        assert_eq!(config.center_text_size, 14.0);
    }

    #[test]
    fn test_numeric_strings_and_numbers() {
        let config = settings(
            r#"{"image_padding": "24", "center_circle_ratio": 4, "center_icon_size": " 48.5 ",
                "long_press_timeout_ms": "250", "touch_slop": 12}"#,
        )
        .resolve(&ColorDefaults::default());
        assert_eq!(config.padding, 24.0);
        assert_eq!(config.center_circle_ratio, 4.0);
        assert_eq!(config.center_icon_size, 48.5);
        assert_eq!(config.long_press_timeout, Duration::from_millis(250));
        assert_eq!(config.touch_slop, 12.0);
    }

    #[test]
    fn test_oversized_long_press_timeout_falls_back() {
        let config = settings(r#"{"long_press_timeout_ms": "1e300"}"#)
            .resolve(&ColorDefaults::default());
        assert_eq!(config.long_press_timeout, DEFAULT_LONG_PRESS_TIMEOUT);

        let config = settings(r#"{"long_press_timeout_ms": -40}"#).resolve(&ColorDefaults::default());
        assert_eq!(config.long_press_timeout, Duration::ZERO);
    }

    #[test]
    fn test_zero_ratio_is_parsed_but_invalid() {
        let config = settings(r#"{"center_circle_ratio": "0"}"#).resolve(&ColorDefaults::default());
        assert_eq!(config.center_circle_ratio, 0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidCenterCircleRatio(0.0))
        );

        let config = Configuration {
            center_circle_ratio: -2.0,
            ..Configuration::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hex_colors() {
        let c: HexColor = "#ff0000".parse().unwrap();
        assert_eq!(*c, Srgba::new(1.0, 0.0, 0.0, 1.0));

        let c: HexColor = "00ff0080".parse().unwrap();
        assert_eq!(c.color.green, 1.0);
        assert!((c.alpha - 128.0 / 255.0).abs() < 1e-9);

        for bad in ["", "#fff", "#gg0000", "#+fffff", "#ff00001"] {
            assert!(bad.parse::<HexColor>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_invalid_color_is_a_deserialization_error() {
        assert!(serde_json::from_str::<Settings>(r#"{"normal_color": "blue"}"#).is_err());
    }

    #[test]
    fn test_empty_text_and_icon_disable_the_feature() {
        let config = settings(r#"{"center_text": "", "center_icon": ""}"#)
            .resolve(&ColorDefaults::default());
        assert_eq!(config.center_text, None);
        assert_eq!(config.center_icon, None);
        assert!(!config.has_center_text());
    }

    #[test]
    fn test_text_color_contrasts_center_circle() {
        let dark = settings(r##"{"center_circle_normal_color": "#202020"}"##)
            .resolve(&ColorDefaults::default());
        assert_eq!(dark.center_text_color, Srgba::new(1.0, 1.0, 1.0, 1.0));

        let light = settings(r##"{"center_circle_normal_color": "#f0f0f0"}"##)
            .resolve(&ColorDefaults::default());
        assert_eq!(light.center_text_color, Srgba::new(0.0, 0.0, 0.0, 1.0));

        let explicit = settings(
            r##"{"center_circle_normal_color": "#f0f0f0", "center_text_color": "#ff0000"}"##,
        )
        .resolve(&ColorDefaults::default());
        assert_eq!(explicit.center_text_color, Srgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_full_settings() {
        let config = settings(
            r##"{
                "normal_color": "#101010",
                "pressed_color": "#20202020",
                "center_circle": false,
                "center_circle_press": false,
                "center_icon": "/usr/share/icons/ok.png",
                "center_icon_size_mode": "fixed",
                "center_icon_tint": "#00ff00",
                "center_text": "O K",
                "center_text_style": 5,
                "haptic_feedback": false
            }"##,
        )
        .resolve(&ColorDefaults::default());
        assert!(!config.center_circle_enabled);
        assert!(!config.center_circle_press_enabled);
        assert_eq!(config.center_icon_size_mode, CenterIconSizeMode::Fixed);
        assert_eq!(config.center_icon, Some(IconSource::new("/usr/share/icons/ok.png")));
        assert_eq!(config.center_icon_tint, Some(Srgba::new(0.0, 1.0, 0.0, 1.0)));
        assert_eq!(config.center_text.as_deref().map(String::as_str), Some("O K"));
        assert_eq!(config.center_text_style, TextStyle::BOLD | TextStyle::UNDERLINE);
        assert!(!config.haptic_feedback_enabled);
    }
}
