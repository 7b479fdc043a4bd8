//! tsq - inspect a TS translation catalogue
//!
//! Usage:
//!   tsq lookup <context> <source> [count]   # Print the display text for a string
//!   tsq summary                             # Per-status message counts as JSON
//!   tsq validate                            # Placeholder and numerus-form checks
//!   tsq dump                                # Re-serialize the catalogue
//!   tsq locales                             # Built-in locales and plural rules
//!
//! Optional environment variables:
//! - TS_CATALOGUE_PATH (defaults to the bundled German catalogue)
//! - TS_LOCALE (overrides the catalogue's language for plural rules)
//! - TS_SERVE_VANISHED (defaults to true)

use anyhow::{bail, Context, Result};
use chromium_bookmarks_i18n::{
    config::LoaderConfig,
    i18n::{CatalogueValidator, PluralRegistry},
    resources,
};
use std::process::ExitCode;
use tracing::{debug, info};

const USAGE: &str =
    "usage: tsq <lookup <context> <source> [count] | summary | validate | dump | locales>";

fn main() -> Result<ExitCode> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("chromium_bookmarks_i18n=warn".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = LoaderConfig::from_env()?;
    let translator = resources::load_configured(&config);
    info!(
        "Catalogue ready: {} messages",
        translator.catalogue().message_count()
    );

    match args.first().map(String::as_str) {
        Some("lookup") => {
            let (context, source) = match (args.get(1), args.get(2)) {
                (Some(context), Some(source)) => (context, source),
                _ => bail!(USAGE),
            };
            let count = args
                .get(3)
                .map(|v| v.parse::<i64>())
                .transpose()
                .context("count must be an integer")?;

            let lookup = translator.translate(context, source, count);
            println!("{}", lookup.text);
            debug!(
                "Lookup metrics: {}",
                serde_json::to_string(&translator.metrics().report())?
            );
            Ok(if lookup.found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some("summary") => {
            let summary = translator.catalogue().summary();
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(ExitCode::SUCCESS)
        }
        Some("validate") => {
            let report = CatalogueValidator::validate(translator.catalogue(), translator.plural_rule());
            for error in &report.errors {
                println!("error: {}", error);
            }
            for warning in &report.warnings {
                println!("warning: {}", warning);
            }
            if report.is_clean() {
                println!("✓ catalogue is clean");
            }
            Ok(if report.has_errors() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Some("dump") => {
            print!("{}", translator.catalogue().to_ts_string()?);
            Ok(ExitCode::SUCCESS)
        }
        Some("locales") => {
            for locale in PluralRegistry::global().list_builtin() {
                println!(
                    "{:<6} {:<12} {:<12} {} ({} forms)",
                    locale.code,
                    locale.name,
                    locale.native_name,
                    locale.rule.name(),
                    locale.rule.forms()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => bail!(USAGE),
    }
}
