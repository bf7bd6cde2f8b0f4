//! Target language selection for generated drafts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output language for a generated draft.
///
/// A closed set: the selection drives both the UI locale (an external
/// collaborator) and the language directive passed to the generation
/// engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "hi")]
    Hi,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }

    /// Name used in the generation instructions.
    pub fn instruction_name(self) -> &'static str {
        match self {
            Language::En => "ENGLISH",
            Language::Hi => "HINDI (Devnagari script)",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown language: {0} (expected en or hi)")]
pub struct ParseLanguageError(String);

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "hi" | "hindi" => Ok(Language::Hi),
            other => Err(ParseLanguageError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes() {
        assert_eq!(serde_json::to_string(&Language::Hi).unwrap(), r#""hi""#);
        let parsed: Language = serde_json::from_str(r#""en""#).unwrap();
        assert_eq!(parsed, Language::En);
    }

    #[test]
    fn instruction_names() {
        assert_eq!(Language::En.instruction_name(), "ENGLISH");
        assert_eq!(Language::Hi.instruction_name(), "HINDI (Devnagari script)");
    }

    #[test]
    fn parses_codes_and_names() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert_eq!("English".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }
}
