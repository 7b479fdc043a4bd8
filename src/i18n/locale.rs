//! Locale codes as they appear in the `language` attribute of a TS file.
//!
//! TS files use Qt-style codes (`de_DE`, `pt_BR`, `ja`); BCP 47 style
//! (`de-DE`) is accepted too and normalized to the underscore form.

use std::fmt;
use std::str::FromStr;

use crate::i18n::error::CatalogueError;

/// A validated locale: lowercase language plus optional uppercase territory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    /// ISO 639 language code (e.g., "de", "pt")
    language: String,

    /// ISO 3166 territory code (e.g., "DE", "BR") or UN M.49 area code
    territory: Option<String>,
}

impl Locale {
    /// Parse a locale code.
    ///
    /// # Arguments
    /// * `code` - A code such as "de", "de_DE" or "de-DE"
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is well formed
    /// * `Err(CatalogueError::InvalidLocale)` otherwise
    pub fn parse(code: &str) -> Result<Self, CatalogueError> {
        let invalid = || CatalogueError::InvalidLocale(code.to_string());

        let mut parts = code.trim().split(['_', '-']);
        let language = parts.next().filter(|l| is_language(l)).ok_or_else(invalid)?;
        let territory = match parts.next() {
            None => None,
            Some(t) if is_territory(t) => Some(t.to_ascii_uppercase()),
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            territory,
        })
    }

    /// The language subtag (e.g., "de").
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The territory subtag, if any (e.g., "DE").
    pub fn territory(&self) -> Option<&str> {
        self.territory.as_deref()
    }

    /// Canonical Qt-style code (e.g., "de_DE").
    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl FromStr for Locale {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.territory {
            Some(territory) => write!(f, "{}_{}", self.language, territory),
            None => f.write_str(&self.language),
        }
    }
}

fn is_language(s: &str) -> bool {
    (2..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_territory(s: &str) -> bool {
    (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse Tests ====================

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("de").expect("Should succeed");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.territory(), None);
        assert_eq!(locale.code(), "de");
    }

    #[test]
    fn test_parse_with_territory() {
        let locale = Locale::parse("de_DE").expect("Should succeed");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.territory(), Some("DE"));
        assert_eq!(locale.code(), "de_DE");
    }

    #[test]
    fn test_parse_bcp47_dash() {
        let locale = Locale::parse("pt-br").expect("Should succeed");
        assert_eq!(locale.code(), "pt_BR");
    }

    #[test]
    fn test_parse_numeric_area() {
        let locale = Locale::parse("es_419").expect("Should succeed");
        assert_eq!(locale.territory(), Some("419"));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let locale = Locale::parse("DE_de").expect("Should succeed");
        assert_eq!(locale.code(), "de_DE");
    }

    #[test]
    fn test_parse_invalid() {
        for code in ["", "d", "german", "de_", "de_DEU", "de_DE_x", "1e"] {
            let result = Locale::parse(code);
            assert!(result.is_err(), "{code:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = Locale::parse("x!").unwrap_err();
        assert!(err.to_string().contains("x!"));
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_from_str() {
        let locale: Locale = "ru_RU".parse().unwrap();
        assert_eq!(locale.language(), "ru");
    }

    #[test]
    fn test_locale_equality() {
        assert_eq!(Locale::parse("de-DE").unwrap(), Locale::parse("de_DE").unwrap());
        assert_ne!(Locale::parse("de").unwrap(), Locale::parse("de_DE").unwrap());
    }
}
