//! Catalogue quality validation.
//!
//! Checks that translations keep the placeholders of their source strings
//! (`%n`, `%1`..`%99`) and that pluralized messages carry as many numerus
//! forms as the target locale's plural rule expects.

use regex::Regex;
use std::sync::OnceLock;

use crate::i18n::model::{Catalogue, Message, Status, TranslationText};
use crate::i18n::plural::PluralRule;

/// Validation report containing errors and warnings about a catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make a served translation wrong
    pub errors: Vec<String>,

    /// Suspicious translations worth a second look
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalogue consistency.
pub struct CatalogueValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogueValidator {
    /// Validate every message that a lookup could serve.
    ///
    /// Obsolete and unfinished messages are skipped: they are never shown.
    pub fn validate(catalogue: &Catalogue, rule: PluralRule) -> ValidationReport {
        let mut report = ValidationReport::new();
        for (context, message) in catalogue.messages() {
            report.merge(Self::validate_message(&context.name, message, rule));
        }
        report
    }

    /// Validate a single message.
    pub fn validate_message(context: &str, message: &Message, rule: PluralRule) -> ValidationReport {
        let mut report = ValidationReport::new();
        if matches!(message.status, Status::Obsolete | Status::Unfinished) {
            return report;
        }

        let label = format!("{}: {:?}", context, message.source);

        if message.translation.is_empty() {
            report
                .warnings
                .push(format!("{} is marked {} but has no text", label, message.status));
            return report;
        }

        if let TranslationText::Numerus(forms) = &message.translation {
            if forms.len() != rule.forms() {
                report.errors.push(format!(
                    "{} has {} numerus forms, locale rule {} expects {}",
                    label,
                    forms.len(),
                    rule.name(),
                    rule.forms()
                ));
            }
        }

        let expected = Self::extract_placeholders(&message.source);
        for text in message.translation.texts().filter(|t| !t.is_empty()) {
            let found = Self::extract_placeholders(text);
            if found != expected {
                report.warnings.push(format!(
                    "{} placeholder mismatch: source has {:?}, translation {:?} has {:?}",
                    label, expected, text, found
                ));
            }
        }

        report
    }

    /// Extract `%n`, `%Ln` and `%1`..`%99` placeholders, sorted.
    fn extract_placeholders(text: &str) -> Vec<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"%(?:L?n|[1-9][0-9]?)").expect("valid placeholder pattern"));

        let mut placeholders: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        placeholders.sort_unstable();
        placeholders
    }
}
