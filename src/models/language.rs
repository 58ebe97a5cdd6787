use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Languages the storefront is published in. Turkish is the primary language:
/// every product must carry a Turkish name and lookups fall back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Tr,
    En,
}

impl Language {
    pub const PRIMARY: Language = Language::Tr;

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }

    /// Parses a query-string or form value, defaulting to the primary language.
    pub fn from_optional(value: Option<&str>) -> Language {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(Language::PRIMARY)
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" => Ok(Language::Tr),
            "en" => Ok(Language::En),
            other => Err(AppError::BadRequest(format!(
                "Unsupported language code '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
