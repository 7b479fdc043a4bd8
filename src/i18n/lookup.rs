//! Translation lookup.
//!
//! # Resolution
//!
//! 1. Find the first message in document order whose context name and
//!    source string match. Duplicate contexts are searched in order.
//! 2. Retired messages (obsolete, or vanished when vanished messages are not
//!    served) are skipped as if they were not in the catalogue, so a later
//!    duplicate can still answer.
//! 3. Pluralized messages pick a numerus form with the locale's plural rule.
//! 4. Unfinished messages and empty texts fall back to the source string.
//! 5. `%n` is replaced by the count whenever one is given, including in the
//!    fallback text.
//!
//! | Outcome | `text` | `found` |
//! |---------|--------|---------|
//! | Finished/vanished with text | translation | `true` |
//! | Unfinished or empty | source | `false` |
//! | Obsolete | source | `false` |
//! | No such message | source | `false` |

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::i18n::metrics::LookupMetrics;
use crate::i18n::model::{Catalogue, Message, Status, TranslationText};
use crate::i18n::plural::{PluralRegistry, PluralRule};

/// Result of a lookup: the display text and whether a translation was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<'a> {
    pub text: Cow<'a, str>,
    pub found: bool,
}

impl<'a> Lookup<'a> {
    fn found(text: Cow<'a, str>) -> Self {
        Self { text, found: true }
    }

    fn fallback(source: &'a str, count: Option<i64>) -> Self {
        Self {
            text: substitute(source, count),
            found: false,
        }
    }

    pub fn into_string(self) -> String {
        self.text.into_owned()
    }
}

impl fmt::Display for Lookup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Hit,
    Fallback,
    Miss,
    Retired,
}

/// Look up a string by scanning the catalogue directly.
///
/// Uses the plural rule registered for the catalogue's language and serves
/// vanished messages. Hosts doing repeated lookups should build a
/// [`Translator`], which indexes the catalogue once.
pub fn translate<'a>(
    catalogue: &'a Catalogue,
    context: &str,
    source: &'a str,
    count: Option<i64>,
) -> Lookup<'a> {
    let message = catalogue
        .messages()
        .find(|(c, m)| c.name == context && m.source == source && is_live(m, true))
        .map(|(_, m)| m);
    let rule = rule_for_catalogue(catalogue, PluralRegistry::global());
    resolve(message, source, count, rule).0
}

/// Indexed, read-only view of a catalogue.
///
/// Built once after loading; `Send + Sync`, so it can be shared across
/// threads behind an `Arc` or a `static`.
#[derive(Debug)]
pub struct Translator {
    catalogue: Catalogue,
    rule: PluralRule,
    serve_vanished: bool,
    /// context name -> source -> (context index, message index) in document order
    index: HashMap<String, HashMap<String, Vec<(usize, usize)>>>,
    metrics: LookupMetrics,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Catalogue::empty())
    }
}

impl Translator {
    /// Index a catalogue using the built-in plural rule for its language.
    pub fn new(catalogue: Catalogue) -> Self {
        Self::with_registry(catalogue, PluralRegistry::global())
    }

    /// Index a catalogue, resolving its plural rule through `registry`.
    pub fn with_registry(catalogue: Catalogue, registry: &PluralRegistry) -> Self {
        let rule = rule_for_catalogue(&catalogue, registry);
        Self::with_rule(catalogue, rule)
    }

    /// Index a catalogue with an explicit plural rule.
    pub fn with_rule(catalogue: Catalogue, rule: PluralRule) -> Self {
        let mut index: HashMap<String, HashMap<String, Vec<(usize, usize)>>> = HashMap::new();
        for (ci, context) in catalogue.contexts.iter().enumerate() {
            let sources = index.entry(context.name.clone()).or_default();
            for (mi, message) in context.messages.iter().enumerate() {
                sources
                    .entry(message.source.clone())
                    .or_default()
                    .push((ci, mi));
            }
        }

        debug!(
            "Indexed {} contexts with plural rule {}",
            index.len(),
            rule.name()
        );

        Self {
            catalogue,
            rule,
            serve_vanished: true,
            index,
            metrics: LookupMetrics::new(),
        }
    }

    /// Whether vanished translations are served (default `true`).
    ///
    /// When `false`, vanished messages resolve like obsolete ones.
    pub fn serve_vanished(mut self, serve: bool) -> Self {
        self.serve_vanished = serve;
        self
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn plural_rule(&self) -> PluralRule {
        self.rule
    }

    pub fn metrics(&self) -> &LookupMetrics {
        &self.metrics
    }

    /// Translate `source` in `context`.
    ///
    /// # Arguments
    /// * `count` - plural count; selects a numerus form and replaces `%n`
    pub fn translate<'a>(&'a self, context: &str, source: &'a str, count: Option<i64>) -> Lookup<'a> {
        self.lookup(context, source, None, count)
    }

    /// Translate `source` in `context`, matching the disambiguation comment.
    ///
    /// A message with exactly this comment wins; otherwise the first message
    /// without a comment is used.
    pub fn translate_disambiguated<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: &str,
        count: Option<i64>,
    ) -> Lookup<'a> {
        self.lookup(context, source, Some(comment), count)
    }

    /// First servable message matching context, source and (optionally)
    /// comment. Retired messages are passed over.
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        let mut candidates = self
            .candidates(context, source)
            .filter(|m| is_live(m, self.serve_vanished));

        match comment {
            None => candidates.next(),
            Some(comment) => {
                let candidates: Vec<&Message> = candidates.collect();
                candidates
                    .iter()
                    .find(|m| m.comment.as_deref() == Some(comment))
                    .or_else(|| candidates.iter().find(|m| m.comment.is_none()))
                    .copied()
            }
        }
    }

    fn lookup<'a>(
        &'a self,
        context: &str,
        source: &'a str,
        comment: Option<&str>,
        count: Option<i64>,
    ) -> Lookup<'a> {
        let message = self.find(context, source, comment);
        let (lookup, mut outcome) = resolve(message, source, count, self.rule);
        if outcome == Outcome::Miss
            && self
                .candidates(context, source)
                .any(|m| !is_live(m, self.serve_vanished))
        {
            outcome = Outcome::Retired;
        }

        match outcome {
            Outcome::Hit => self.metrics.record_hit(),
            Outcome::Fallback => {
                debug!("Untranslated message in {}: {:?}", context, source);
                self.metrics.record_fallback()
            }
            Outcome::Miss => {
                debug!("No message in {}: {:?}", context, source);
                self.metrics.record_miss()
            }
            Outcome::Retired => self.metrics.record_retired(),
        }

        lookup
    }

    /// Every message with this context and source, in document order.
    fn candidates<'s>(&'s self, context: &str, source: &str) -> impl Iterator<Item = &'s Message> {
        self.index
            .get(context)
            .and_then(|sources| sources.get(source))
            .into_iter()
            .flatten()
            .map(move |&(ci, mi)| &self.catalogue.contexts[ci].messages[mi])
    }
}

/// Whether a message takes part in lookups at all.
fn is_live(message: &Message, serve_vanished: bool) -> bool {
    match message.status {
        Status::Obsolete => false,
        Status::Vanished => serve_vanished,
        Status::Finished | Status::Unfinished => true,
    }
}

fn rule_for_catalogue(catalogue: &Catalogue, registry: &PluralRegistry) -> PluralRule {
    catalogue
        .language
        .as_deref()
        .map(|code| registry.rule_for_code(code))
        .unwrap_or_default()
}

fn resolve<'a>(
    message: Option<&'a Message>,
    source: &'a str,
    count: Option<i64>,
    rule: PluralRule,
) -> (Lookup<'a>, Outcome) {
    let Some(message) = message else {
        return (Lookup::fallback(source, count), Outcome::Miss);
    };

    if message.status == Status::Unfinished {
        return (Lookup::fallback(source, count), Outcome::Fallback);
    }

    let text = select_text(message, count, rule);
    if text.is_empty() {
        return (Lookup::fallback(source, count), Outcome::Fallback);
    }

    (Lookup::found(substitute(text, count)), Outcome::Hit)
}

/// Pick the text a count selects. Without a count a pluralized message uses
/// its last (general plural) form.
fn select_text(message: &Message, count: Option<i64>, rule: PluralRule) -> &str {
    match &message.translation {
        TranslationText::Single(text) => text,
        TranslationText::Numerus(forms) => {
            let index = match count {
                Some(n) => rule.form_index(n.unsigned_abs()),
                None => forms.len().saturating_sub(1),
            };
            forms
                .get(index)
                .or_else(|| forms.last())
                .map(String::as_str)
                .unwrap_or("")
        }
    }
}

fn substitute(text: &str, count: Option<i64>) -> Cow<'_, str> {
    match count {
        Some(n) if text.contains("%n") => Cow::Owned(text.replace("%n", &n.to_string())),
        _ => Cow::Borrowed(text),
    }
}
