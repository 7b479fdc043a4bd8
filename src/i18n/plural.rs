//! Plural rules: which numerus form a count selects, per locale.
//!
//! Numerus forms are stored positionally in the TS file, so a rule is just a
//! function from a count to a form index plus the number of forms the
//! locale expects. The registry keeps the built-in rules in a `OnceLock`
//! singleton; callers that need different rules build their own registry
//! with [`PluralRegistry::with_rule`].

use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::i18n::locale::Locale;

/// Selection function: count to numerus form index.
pub type PluralFn = fn(u64) -> usize;

/// A locale's plural rule.
#[derive(Clone, Copy)]
pub struct PluralRule {
    name: &'static str,
    forms: usize,
    select: PluralFn,
}

impl PluralRule {
    /// Singular only for exactly one (German, English, Dutch, ...).
    pub const ONE_OTHER: PluralRule = PluralRule::new("one-other", 2, one_other);

    /// Singular for zero and one (French, Brazilian Portuguese).
    pub const ZERO_ONE_OTHER: PluralRule = PluralRule::new("zero-one-other", 2, zero_one_other);

    /// A single form for every count (Japanese, Chinese, Korean).
    pub const SINGLE: PluralRule = PluralRule::new("single", 1, single);

    /// Russian, Ukrainian, Belarusian.
    pub const EAST_SLAVIC: PluralRule = PluralRule::new("east-slavic", 3, east_slavic);

    pub const POLISH: PluralRule = PluralRule::new("polish", 3, polish);

    /// Czech and Slovak.
    pub const CZECH: PluralRule = PluralRule::new("czech", 3, czech);

    pub const fn new(name: &'static str, forms: usize, select: PluralFn) -> Self {
        Self {
            name,
            forms,
            select,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of numerus forms a translation for this locale should carry.
    pub fn forms(&self) -> usize {
        self.forms
    }

    /// Form index for `count`, never past the last form.
    pub fn form_index(&self, count: u64) -> usize {
        (self.select)(count).min(self.forms.saturating_sub(1))
    }
}

impl Default for PluralRule {
    fn default() -> Self {
        Self::ONE_OTHER
    }
}

impl fmt::Debug for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluralRule")
            .field("name", &self.name)
            .field("forms", &self.forms)
            .finish()
    }
}

fn one_other(n: u64) -> usize {
    if n == 1 {
        0
    } else {
        1
    }
}

fn zero_one_other(n: u64) -> usize {
    if n <= 1 {
        0
    } else {
        1
    }
}

fn single(_: u64) -> usize {
    0
}

fn east_slavic(n: u64) -> usize {
    let (n10, n100) = (n % 10, n % 100);
    if n10 == 1 && n100 != 11 {
        0
    } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
        1
    } else {
        2
    }
}

fn polish(n: u64) -> usize {
    let (n10, n100) = (n % 10, n % 100);
    if n == 1 {
        0
    } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
        1
    } else {
        2
    }
}

fn czech(n: u64) -> usize {
    match n {
        1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// Built-in locale entry.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// Language code, or language_TERRITORY when the territory matters
    pub code: &'static str,

    /// English name of the language (e.g., "German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch")
    pub native_name: &'static str,

    pub rule: PluralRule,
}

/// Locale to plural rule mapping.
#[derive(Debug, Clone)]
pub struct PluralRegistry {
    builtin: Vec<LocaleConfig>,
    overrides: Vec<(String, PluralRule)>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<PluralRegistry> = OnceLock::new();

impl Default for PluralRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PluralRegistry {
    /// A registry holding the built-in rules only.
    pub fn new() -> Self {
        Self {
            builtin: default_locales(),
            overrides: Vec::new(),
        }
    }

    /// Get the shared registry of built-in rules.
    pub fn global() -> &'static PluralRegistry {
        REGISTRY.get_or_init(PluralRegistry::new)
    }

    /// Register a rule for a locale code, taking precedence over built-ins.
    ///
    /// # Arguments
    /// * `code` - "de" applies to every German territory, "de_CH" only to Switzerland
    pub fn with_rule(mut self, code: impl Into<String>, rule: PluralRule) -> Self {
        self.overrides.push((code.into(), rule));
        self
    }

    /// Built-in metadata for a locale (territory-specific entry first).
    pub fn config(&self, locale: &Locale) -> Option<&LocaleConfig> {
        let code = locale.code();
        self.builtin
            .iter()
            .find(|c| c.code == code)
            .or_else(|| self.builtin.iter().find(|c| c.code == locale.language()))
    }

    /// Rule for a locale.
    ///
    /// Lookup order: override for the full code, override for the language,
    /// built-in for the full code, built-in for the language, then
    /// [`PluralRule::ONE_OTHER`].
    pub fn rule_for(&self, locale: &Locale) -> PluralRule {
        let code = locale.code();
        let overridden = |key: &str| {
            self.overrides
                .iter()
                .rev()
                .find(|(c, _)| c == key)
                .map(|(_, rule)| *rule)
        };

        overridden(code.as_str())
            .or_else(|| overridden(locale.language()))
            .or_else(|| self.config(locale).map(|c| c.rule))
            .unwrap_or_else(|| {
                debug!("No plural rule for {}, using one-other", code);
                PluralRule::default()
            })
    }

    /// Rule for a raw locale code; malformed codes get the default rule.
    pub fn rule_for_code(&self, code: &str) -> PluralRule {
        match Locale::parse(code) {
            Ok(locale) => self.rule_for(&locale),
            Err(e) => {
                debug!("{}, using one-other plural rule", e);
                PluralRule::default()
            }
        }
    }

    /// All built-in locales.
    pub fn list_builtin(&self) -> Vec<&LocaleConfig> {
        self.builtin.iter().collect()
    }
}

fn entry(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    rule: PluralRule,
) -> LocaleConfig {
    LocaleConfig {
        code,
        name,
        native_name,
        rule,
    }
}

/// Built-in locale table.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        entry("de", "German", "Deutsch", PluralRule::ONE_OTHER),
        entry("en", "English", "English", PluralRule::ONE_OTHER),
        entry("nl", "Dutch", "Nederlands", PluralRule::ONE_OTHER),
        entry("sv", "Swedish", "Svenska", PluralRule::ONE_OTHER),
        entry("da", "Danish", "Dansk", PluralRule::ONE_OTHER),
        entry("nb", "Norwegian Bokmål", "Norsk bokmål", PluralRule::ONE_OTHER),
        entry("fi", "Finnish", "Suomi", PluralRule::ONE_OTHER),
        entry("it", "Italian", "Italiano", PluralRule::ONE_OTHER),
        entry("es", "Spanish", "Español", PluralRule::ONE_OTHER),
        entry("pt", "Portuguese", "Português", PluralRule::ONE_OTHER),
        entry(
            "pt_BR",
            "Portuguese (Brazil)",
            "Português (Brasil)",
            PluralRule::ZERO_ONE_OTHER,
        ),
        entry("fr", "French", "Français", PluralRule::ZERO_ONE_OTHER),
        entry("ru", "Russian", "Русский", PluralRule::EAST_SLAVIC),
        entry("uk", "Ukrainian", "Українська", PluralRule::EAST_SLAVIC),
        entry("be", "Belarusian", "Беларуская", PluralRule::EAST_SLAVIC),
        entry("pl", "Polish", "Polski", PluralRule::POLISH),
        entry("cs", "Czech", "Čeština", PluralRule::CZECH),
        entry("sk", "Slovak", "Slovenčina", PluralRule::CZECH),
        entry("ja", "Japanese", "日本語", PluralRule::SINGLE),
        entry("zh", "Chinese", "中文", PluralRule::SINGLE),
        entry("ko", "Korean", "한국어", PluralRule::SINGLE),
    ]
}
