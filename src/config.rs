use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    // Catalogue source; None means the embedded German catalogue
    pub catalogue_path: Option<PathBuf>,

    // Overrides the document's language attribute for plural selection
    pub locale_override: Option<String>,

    // Serve translations marked vanished
    pub serve_vanished: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            catalogue_path: None,
            locale_override: None,
            serve_vanished: true,
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            catalogue_path: std::env::var("TS_CATALOGUE_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            locale_override: std::env::var("TS_LOCALE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            serve_vanished: std::env::var("TS_SERVE_VANISHED")
                .ok()
                .map(|v| parse_flag(&v))
                .transpose()
                .context("TS_SERVE_VANISHED must be true or false")?
                .unwrap_or(true),
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid flag value '{}'", other),
    }
}
