//! Theme identifiers.
//!
//! tokenweave builds exactly four theme variants. Every theme is the product
//! of a [`Family`] (`classic`, `advance`) and a [`Mode`] (`light`, `dark`).
//! [`Theme::ALL`] fixes the build order, with [`Theme::ClassicLight`] first
//! and treated as the default theme.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Error returned when a string is not one of the four theme identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown theme `{0}`, expected one of \
     classic-light, classic-dark, advance-light, advance-dark"
)]
pub struct UnknownTheme(pub String);

/// Design family of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Classic,
    Advance,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Classic => "classic",
            Family::Advance => "advance",
        }
    }
}

/// Color mode of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

/// One of the four fixed theme variants.
///
/// # Examples
///
/// ```
/// use tokenweave_core::theme::Theme;
///
/// let theme: Theme = "advance-dark".parse().unwrap();
/// assert_eq!(theme, Theme::AdvanceDark);
/// assert!(!theme.is_default());
/// assert_eq!(theme.pascal_name(), "AdvanceDark");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    ClassicLight,
    ClassicDark,
    AdvanceLight,
    AdvanceDark,
}

impl Theme {
    /// All themes in build order. The first entry is the default theme.
    pub const ALL: [Theme; 4] = [
        Theme::ClassicLight,
        Theme::ClassicDark,
        Theme::AdvanceLight,
        Theme::AdvanceDark,
    ];

    /// The theme that also owns the `:root` selector and canonical file names.
    pub const DEFAULT: Theme = Theme::ClassicLight;

    /// Returns the kebab-case identifier, e.g. `classic-light`.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::ClassicLight => "classic-light",
            Theme::ClassicDark => "classic-dark",
            Theme::AdvanceLight => "advance-light",
            Theme::AdvanceDark => "advance-dark",
        }
    }

    /// Returns `true` for the default theme.
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub fn family(self) -> Family {
        match self {
            Theme::ClassicLight | Theme::ClassicDark => Family::Classic,
            Theme::AdvanceLight | Theme::AdvanceDark => Family::Advance,
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Theme::ClassicLight | Theme::AdvanceLight => Mode::Light,
            Theme::ClassicDark | Theme::AdvanceDark => Mode::Dark,
        }
    }

    /// Returns the snake_case identifier used in Android file names.
    pub fn snake_name(self) -> String {
        self.as_str().replace('-', "_")
    }

    /// Returns the PascalCase identifier used in Swift type names.
    pub fn pascal_name(self) -> String {
        self.as_str()
            .split('-')
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_first() {
        assert_eq!(Theme::ALL[0], Theme::DEFAULT);
        assert!(Theme::ClassicLight.is_default());
        assert_eq!(Theme::ALL.iter().filter(|t| t.is_default()).count(), 1);
    }

    #[test]
    fn test_theme_round_trips_through_str() {
        for theme in Theme::ALL {
            assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
        }
    }

    #[test]
    fn test_unknown_theme() {
        let err = "solarized".parse::<Theme>().unwrap_err();
        assert_eq!(err, UnknownTheme("solarized".to_string()));
    }

    #[test]
    fn test_family_and_mode() {
        assert_eq!(Theme::AdvanceDark.family(), Family::Advance);
        assert_eq!(Theme::AdvanceDark.mode(), Mode::Dark);
        assert_eq!(Theme::ClassicLight.family().as_str(), "classic");
        assert_eq!(Theme::ClassicLight.mode().as_str(), "light");
    }

    #[test]
    fn test_derived_names() {
        assert_eq!(Theme::ClassicDark.snake_name(), "classic_dark");
        assert_eq!(Theme::ClassicDark.pascal_name(), "ClassicDark");
        assert_eq!(Theme::AdvanceLight.to_string(), "advance-light");
    }
}
