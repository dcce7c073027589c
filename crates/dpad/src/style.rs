use derive_more::{From, Into};
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Center text style as a combinable bitmask: bold = 1, italic = 2,
/// underline = 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, From, Into)]
#[serde(transparent)]
pub struct TextStyle(u8);

impl TextStyle {
    pub const NORMAL: Self = Self(0);
    pub const BOLD: Self = Self(1);
    pub const ITALIC: Self = Self(2);
    pub const UNDERLINE: Self = Self(4);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for TextStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolvedStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

pub fn resolve_style(style: TextStyle) -> ResolvedStyle {
    ResolvedStyle {
        bold: style.contains(TextStyle::BOLD),
        italic: style.contains(TextStyle::ITALIC),
        underline: style.contains(TextStyle::UNDERLINE),
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum CenterIconSizeMode {
    /// Use the icon's intrinsic size.
    #[default]
    #[strum(serialize = "wrap", serialize = "0")]
    Wrap,
    /// Use the configured icon size.
    #[strum(serialize = "fixed", serialize = "1")]
    Fixed,
}
