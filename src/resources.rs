//! Bundled catalogues and configured loading.
//!
//! The German catalogue is compiled into the binary so the plugin works
//! without locating resource files at runtime.

use std::sync::OnceLock;

use tracing::{info, warn};

use crate::config::LoaderConfig;
use crate::i18n::{load_or_empty, load_path, Catalogue, PluralRegistry, Translator};

/// Raw text of the bundled German catalogue.
pub const GERMAN_TS: &str = include_str!("../i18n/chromium_de.ts");

static GERMAN: OnceLock<Translator> = OnceLock::new();

/// The bundled German translator, parsed on first use.
pub fn german() -> &'static Translator {
    GERMAN.get_or_init(|| Translator::new(load_or_empty(GERMAN_TS)))
}

/// Build a translator from configuration.
///
/// Reads `config.catalogue_path` when set, otherwise the bundled German
/// catalogue. A catalogue that fails to load is replaced by an empty one,
/// so every lookup falls back to its source string.
pub fn load_configured(config: &LoaderConfig) -> Translator {
    let mut catalogue = match &config.catalogue_path {
        Some(path) => load_path(path).unwrap_or_else(|e| {
            warn!("Failed to load catalogue, using source strings: {}", e);
            Catalogue::empty()
        }),
        None => load_or_empty(GERMAN_TS),
    };

    if let Some(locale) = &config.locale_override {
        info!("Overriding catalogue language with {}", locale);
        catalogue.language = Some(locale.clone());
    }

    Translator::with_registry(catalogue, PluralRegistry::global())
        .serve_vanished(config.serve_vanished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_german_is_loaded_once() {
        let first = german();
        let second = german();
        assert!(std::ptr::eq(first, second));
        assert!(!first.catalogue().is_empty());
    }

    #[test]
    fn test_german_language_and_rule() {
        let translator = german();
        assert_eq!(translator.catalogue().language.as_deref(), Some("de_DE"));
        assert_eq!(translator.plural_rule().name(), "one-other");
    }

    #[test]
    fn test_load_configured_defaults_to_bundled() {
        let translator = load_configured(&LoaderConfig::default());
        let lookup = translator.translate("BookmarkItem", "Open URL", None);
        assert_eq!(lookup.text, "URL öffnen");
    }

    #[test]
    fn test_load_configured_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoaderConfig {
            catalogue_path: Some(dir.path().join("missing_de.ts")),
            ..Default::default()
        };
        let translator = load_configured(&config);
        assert!(translator.catalogue().is_empty());

        let lookup = translator.translate("BookmarkItem", "Open URL", None);
        assert_eq!(lookup.text, "Open URL");
        assert!(!lookup.found);
    }

    #[test]
    fn test_load_configured_reads_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "<TS version=\"2.1\" language=\"de_DE\"><context><name>X</name>\
             <message><source>Old</source><translation type=\"vanished\">Alt</translation></message>\
             </context></TS>"
        )
        .unwrap();

        let config = LoaderConfig {
            catalogue_path: Some(file.path().to_path_buf()),
            locale_override: Some("ja".to_string()),
            serve_vanished: false,
        };
        let translator = load_configured(&config);
        assert_eq!(translator.plural_rule().name(), "single");
        assert!(!translator.translate("X", "Old", None).found);
    }
}
