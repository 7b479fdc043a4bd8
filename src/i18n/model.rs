//! Typed, ordered representation of a TS translation catalogue.
//!
//! A catalogue is an ordered list of [`Context`]s, each holding an ordered
//! list of [`Message`]s. Order is preserved exactly as read so that a
//! catalogue can be written back out without reshuffling entries, and so
//! that "first match wins" lookups follow document order.

use serde::Serialize;
use std::fmt;

/// TS format version written by current translation tools.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// Review state of a translation, taken from the `type` attribute of
/// `<translation>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No `type` attribute: the translation is approved.
    #[default]
    Finished,
    /// The source string left the UI but the translation is kept for reuse.
    Vanished,
    /// The translation is retired and must not be served.
    Obsolete,
    /// No approved text yet; lookups fall back to the source string.
    Unfinished,
}

impl Status {
    /// Parse a `type` attribute value.
    pub fn from_type_attr(value: &str) -> Option<Self> {
        match value {
            "vanished" => Some(Self::Vanished),
            "obsolete" => Some(Self::Obsolete),
            "unfinished" => Some(Self::Unfinished),
            _ => None,
        }
    }

    /// The `type` attribute value for this status, `None` for finished.
    pub fn type_attr(&self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
            Self::Unfinished => Some("unfinished"),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.type_attr().unwrap_or("finished"))
    }
}

/// Translated text of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationText {
    /// Plain translation of a non-pluralized message.
    Single(String),
    /// Numerus forms of a `numerus="yes"` message, in plural bucket order.
    Numerus(Vec<String>),
}

impl TranslationText {
    /// Whether no usable text is present.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Numerus(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// Iterate over every stored text (one for single, each form for numerus).
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(text) => std::slice::from_ref(text),
            Self::Numerus(forms) => forms,
        };
        slice.iter().map(String::as_str)
    }
}

impl Default for TranslationText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

/// A `<location>` reference to where the source string appears.
///
/// `line` is kept verbatim since TS files may use relative (`+3`) lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub filename: Option<String>,
    pub line: Option<String>,
}

/// One translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Optional `id` attribute.
    pub id: Option<String>,
    /// Source string; the lookup key.
    pub source: String,
    /// Previous source string kept after a merge.
    pub oldsource: Option<String>,
    /// Disambiguation comment.
    pub comment: Option<String>,
    /// Previous disambiguation comment kept after a merge.
    pub oldcomment: Option<String>,
    /// Developer note for translators.
    pub extracomment: Option<String>,
    /// Note left by the translator.
    pub translatorcomment: Option<String>,
    pub locations: Vec<Location>,
    /// Whether the message was declared `numerus="yes"`.
    pub numerus: bool,
    pub translation: TranslationText,
    pub status: Status,
}

impl Message {
    /// A finished, non-pluralized message.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: TranslationText::Single(translation.into()),
            ..Default::default()
        }
    }

    /// A finished `numerus="yes"` message.
    pub fn plural<I, S>(source: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source: source.into(),
            numerus: true,
            translation: TranslationText::Numerus(forms.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A named group of messages, usually one UI component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub messages: Vec<Message>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// First message with the given source string.
    pub fn message(&self, source: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.source == source)
    }
}

/// A whole TS document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    /// `version` attribute of the root element.
    pub version: Option<String>,
    /// Target language code (e.g. `de_DE`).
    pub language: Option<String>,
    /// Source language code, when declared.
    pub sourcelanguage: Option<String>,
    pub contexts: Vec<Context>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::empty()
    }
}

impl Catalogue {
    /// A catalogue with no contexts. Every lookup against it falls back to
    /// the source string.
    pub fn empty() -> Self {
        Self {
            version: Some(DEFAULT_TS_VERSION.to_string()),
            language: None,
            sourcelanguage: None,
            contexts: Vec::new(),
        }
    }

    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::empty()
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// First context with the given name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Every message paired with its context, in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c, m)))
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.message_count() == 0
    }

    /// Count messages per status.
    pub fn summary(&self) -> CatalogueSummary {
        let mut summary = CatalogueSummary {
            language: self.language.clone(),
            contexts: self.contexts.len(),
            ..Default::default()
        };

        for (_, message) in self.messages() {
            summary.messages += 1;
            if message.numerus {
                summary.numerus += 1;
            }
            match message.status {
                Status::Finished => summary.finished += 1,
                Status::Unfinished => summary.unfinished += 1,
                Status::Vanished => summary.vanished += 1,
                Status::Obsolete => summary.obsolete += 1,
            }
        }

        let active = summary.finished + summary.unfinished;
        summary.completion_percent = if active > 0 {
            (summary.finished as f64 / active as f64) * 100.0
        } else {
            100.0
        };

        summary
    }
}

/// Per-status message counts for a catalogue.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogueSummary {
    pub language: Option<String>,
    pub contexts: usize,
    pub messages: usize,
    pub finished: usize,
    pub unfinished: usize,
    pub vanished: usize,
    pub obsolete: usize,
    pub numerus: usize,

    /// Finished share of the messages still in the UI (0-100)
    pub completion_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Status Tests ====================

    #[test]
    fn test_status_from_type_attr() {
        assert_eq!(Status::from_type_attr("vanished"), Some(Status::Vanished));
        assert_eq!(Status::from_type_attr("obsolete"), Some(Status::Obsolete));
        assert_eq!(Status::from_type_attr("unfinished"), Some(Status::Unfinished));
        assert_eq!(Status::from_type_attr("finished"), None);
        assert_eq!(Status::from_type_attr(""), None);
    }

    #[test]
    fn test_status_type_attr_for_finished_is_none() {
        assert_eq!(Status::Finished.type_attr(), None);
        assert_eq!(Status::Unfinished.type_attr(), Some("unfinished"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Finished.to_string(), "finished");
        assert_eq!(Status::Vanished.to_string(), "vanished");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&Status::Obsolete).unwrap();
        assert_eq!(json, "\"obsolete\"");
    }

    // ==================== TranslationText Tests ====================

    #[test]
    fn test_translation_text_is_empty() {
        assert!(TranslationText::Single(String::new()).is_empty());
        assert!(!TranslationText::Single("Profil".into()).is_empty());
        assert!(TranslationText::Numerus(vec![]).is_empty());
        assert!(TranslationText::Numerus(vec![String::new(), String::new()]).is_empty());
        assert!(!TranslationText::Numerus(vec![String::new(), "x".into()]).is_empty());
    }

    #[test]
    fn test_translation_text_texts() {
        let single = TranslationText::Single("a".into());
        assert_eq!(single.texts().collect::<Vec<_>>(), vec!["a"]);

        let numerus = TranslationText::Numerus(vec!["a".into(), "b".into()]);
        assert_eq!(numerus.texts().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    // ==================== Catalogue Tests ====================

    fn sample() -> Catalogue {
        Catalogue::new("de_DE")
            .with_context(
                Context::new("BookmarkItem")
                    .with_message(Message::new("Open URL", "URL öffnen"))
                    .with_message(Message::new("Copy URL to clipboard", "")),
            )
            .with_context(
                Context::new("Plugin")
                    .with_message(
                        Message::plural("%n bookmarks indexed.", ["a", "b"])
                            .with_status(Status::Vanished),
                    )
                    .with_message(Message::new("Gone", "Weg").with_status(Status::Obsolete))
                    .with_message(Message::new("Todo", "").with_status(Status::Unfinished)),
            )
    }

    #[test]
    fn test_message_iteration_keeps_document_order() {
        let catalogue = sample();
        let sources: Vec<&str> = catalogue.messages().map(|(_, m)| m.source.as_str()).collect();
        assert_eq!(
            sources,
            vec![
                "Open URL",
                "Copy URL to clipboard",
                "%n bookmarks indexed.",
                "Gone",
                "Todo"
            ]
        );
    }

    #[test]
    fn test_context_lookup_returns_first() {
        let catalogue = sample()
            .with_context(Context::new("Plugin").with_message(Message::new("Late", "Spät")));
        let plugin = catalogue.context("Plugin").unwrap();
        assert!(plugin.message("Late").is_none());
        assert!(plugin.message("Gone").is_some());
    }

    #[test]
    fn test_empty_catalogue() {
        let catalogue = Catalogue::empty();
        assert!(catalogue.is_empty());
        assert_eq!(catalogue.version.as_deref(), Some(DEFAULT_TS_VERSION));
        assert_eq!(catalogue.language, None);
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample().summary();
        assert_eq!(summary.contexts, 2);
        assert_eq!(summary.messages, 5);
        assert_eq!(summary.finished, 2);
        assert_eq!(summary.vanished, 1);
        assert_eq!(summary.obsolete, 1);
        assert_eq!(summary.unfinished, 1);
        assert_eq!(summary.numerus, 1);
        assert!((summary.completion_percent - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_summary_empty_catalogue_is_complete() {
        let summary = Catalogue::empty().summary();
        assert_eq!(summary.messages, 0);
        assert!((summary.completion_percent - 100.0).abs() < f64::EPSILON);
    }
}
