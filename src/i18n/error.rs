//! Errors raised while loading or writing a translation catalogue.

use std::path::PathBuf;

/// Failure to load, parse or serialize a catalogue.
///
/// Lookup misses are never errors; they surface as `found == false` on a
/// [`Lookup`](crate::i18n::Lookup).
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    /// The document is not well-formed XML.
    #[error("malformed catalogue document: {0}")]
    Parse(String),

    /// The document is well-formed but does not follow the TS layout.
    #[error("invalid <{element}> element: {reason}")]
    Schema {
        element: &'static str,
        reason: String,
    },

    /// A `language` attribute or locale override could not be parsed.
    #[error("invalid locale code: '{0}'")]
    InvalidLocale(String),

    /// The catalogue file could not be read.
    #[error("failed to read catalogue {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalogue could not be written back out.
    #[error("failed to serialize catalogue: {0}")]
    Write(String),
}

impl CatalogueError {
    pub(crate) fn schema(element: &'static str, reason: impl Into<String>) -> Self {
        Self::Schema {
            element,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_element() {
        let err = CatalogueError::schema("message", "missing <source>");
        assert_eq!(err.to_string(), "invalid <message> element: missing <source>");
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = CatalogueError::Io {
            path: PathBuf::from("i18n/missing_de.ts"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("i18n/missing_de.ts"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_invalid_locale_display() {
        let err = CatalogueError::InvalidLocale("x!".to_string());
        assert_eq!(err.to_string(), "invalid locale code: 'x!'");
    }
}
