//! Translation catalogue loader for the Chromium bookmarks launcher plugin.
//!
//! Loads TS translation catalogues and resolves UI strings against them,
//! falling back to the source text whenever no approved translation exists.

pub mod config;
pub mod i18n;
pub mod resources;
