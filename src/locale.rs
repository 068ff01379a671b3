use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target language of farmer-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[serde(rename = "en")]
    English,
    #[default]
    #[serde(rename = "mr")]
    Marathi,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Marathi => "mr",
        }
    }

    pub fn all() -> [Locale; 2] {
        [Locale::English, Locale::Marathi]
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLocale(pub String);

impl fmt::Display for UnknownLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported locale '{}' (expected 'en' or 'mr')", self.0)
    }
}

impl std::error::Error for UnknownLocale {}

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Accepts the language code, optionally with a region (`mr-IN`), or the
    /// English language name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let primary = lowered.split(['-', '_']).next().unwrap_or("");
        match primary {
            "en" | "english" => Ok(Locale::English),
            "mr" | "marathi" => Ok(Locale::Marathi),
            _ => Err(UnknownLocale(s.to_owned())),
        }
    }
}
