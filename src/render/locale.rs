//! Number formatting conventions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// How money is written: which character groups thousands and which
/// separates cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    /// Brazilian Portuguese: `1.518,00`.
    #[default]
    PtBr,
    /// US English: `1,518.00`.
    EnUs,
}

impl Locale {
    /// The thousands separator.
    pub fn grouping_separator(self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    /// The separator between units and cents.
    pub fn decimal_separator(self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::EnUs => '.',
        }
    }

    /// The identifier accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::PtBr => "pt-br",
            Locale::EnUs => "en-us",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pt-br" => Ok(Locale::PtBr),
            "en-us" => Ok(Locale::EnUs),
            other => Err(EngineError::invalid_input(
                "locale",
                format!("expected pt-br or en-us, got '{}'", other),
            )),
        }
    }
}
