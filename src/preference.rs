use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The persisted, user-chosen theme setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Light,
    Dark,
    #[default]
    System,
}

/// The concrete theme a page renders with once `system` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    Light,
    Dark,
}

impl Preference {
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Light => "light",
            Preference::Dark => "dark",
            Preference::System => "system",
        }
    }

    /// Lenient parse used for stored values and DOM attributes.
    ///
    /// Surrounding whitespace is ignored; anything that is not one of the
    /// three modes yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Preference::Light),
            "dark" => Some(Preference::Dark),
            "system" => Some(Preference::System),
            _ => None,
        }
    }
}

impl EffectiveTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectiveTheme::Light => "light",
            EffectiveTheme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(EffectiveTheme::Light),
            "dark" => Some(EffectiveTheme::Dark),
            _ => None,
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            EffectiveTheme::Dark
        } else {
            EffectiveTheme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, EffectiveTheme::Dark)
    }

    pub fn opposite(self) -> Self {
        match self {
            EffectiveTheme::Light => EffectiveTheme::Dark,
            EffectiveTheme::Dark => EffectiveTheme::Light,
        }
    }
}

impl From<EffectiveTheme> for Preference {
    fn from(theme: EffectiveTheme) -> Self {
        match theme {
            EffectiveTheme::Light => Preference::Light,
            EffectiveTheme::Dark => Preference::Dark,
        }
    }
}

impl FromStr for Preference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preference::parse(s).ok_or_else(|| {
            anyhow::anyhow!("unknown theme mode {s:?} (expected light, dark or system)")
        })
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for EffectiveTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves a preference against the current OS theme.
pub fn compute_effective_theme(preference: Preference, system: EffectiveTheme) -> EffectiveTheme {
    match preference {
        Preference::Light => EffectiveTheme::Light,
        Preference::Dark => EffectiveTheme::Dark,
        Preference::System => system,
    }
}
