//! Translation catalogue loading and lookup.
//!
//! This module reads TS translation catalogues, the XML format the plugin's
//! German strings ship in, and answers `(context, source, count)` lookups
//! with the translated text or a fallback to the source string.
//!
//! # Architecture
//!
//! - `model`: ordered `Catalogue` / `Context` / `Message` records with an explicit `Status`
//! - `parser`: TS document to `Catalogue`
//! - `writer`: `Catalogue` back to a TS document
//! - `locale`: locale codes from the `language` attribute
//! - `plural`: plural rules keyed by locale
//! - `lookup`: indexed `Translator` and the fallback rules
//! - `validator`: placeholder and numerus-form checks
//! - `metrics`: lookup counters
//!
//! # Example
//!
//! ```rust
//! use chromium_bookmarks_i18n::i18n::{load, Translator};
//!
//! let catalogue = load(r#"<TS version="2.1" language="de_DE">
//!   <context>
//!     <name>BookmarkItem</name>
//!     <message>
//!       <source>Open URL</source>
//!       <translation>URL öffnen</translation>
//!     </message>
//!   </context>
//! </TS>"#).unwrap();
//!
//! let translator = Translator::new(catalogue);
//! let lookup = translator.translate("BookmarkItem", "Open URL", None);
//! assert_eq!(lookup.text, "URL öffnen");
//! assert!(lookup.found);
//! ```

mod error;
mod locale;
mod lookup;
mod metrics;
mod model;
mod parser;
mod plural;
mod validator;
mod writer;

pub use error::CatalogueError;
pub use locale::Locale;
pub use lookup::{translate, Lookup, Translator};
pub use metrics::{LookupMetrics, MetricsReport};
pub use model::{
    Catalogue, CatalogueSummary, Context, Location, Message, Status, TranslationText,
    DEFAULT_TS_VERSION,
};
pub use parser::{load, load_or_empty, load_path};
pub use plural::{LocaleConfig, PluralFn, PluralRegistry, PluralRule};
pub use validator::{CatalogueValidator, ValidationReport};
pub use writer::to_ts_string;
