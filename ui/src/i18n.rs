//! Internationalization (i18n) support for `tonelog-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (language selection + asset loading)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/tonelog-ui.ftl   (fallback/reference)
//!   tr-TR/tonelog-ui.ftl
//!   ar-SA/tonelog-ui.ftl   (also switches report digits to Arabic-Indic)
//! ```
//!
//! Usage in a component (after calling `i18n::init()` once at app start):
//! ```ignore
//! use crate::t;
//! let title = t!("dashboard-title-all");
//! ```
//!
//! Bidi isolation marks are disabled on every loader: reports are plain text
//! that users copy around, and the marks show up as stray characters there.
use std::sync::Once;

use i18n_embed::{fluent::FluentLanguageLoader, LanguageLoader};
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::warn;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Ergonomic translation macro routed through the shared loader.
///     t!("nav-dashboard")
///     t!("dashboard-title-user", user = name)
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "tonelog-ui";

const FALLBACK: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `t!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(new_loader);

static INIT: Once = Once::new();

fn new_loader() -> FluentLanguageLoader {
    let fallback: LanguageIdentifier = FALLBACK
        .parse()
        .expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
}

/// Load `requested` into `loader`. Freshly loaded bundles start out isolating,
/// so the flag is cleared after every selection.
fn select_into(
    loader: &FluentLanguageLoader,
    requested: &[LanguageIdentifier],
) -> Result<(), i18n_embed::I18nEmbedError> {
    let result = i18n_embed::select(loader, &Localizations, requested).map(|_| ());
    loader.set_use_isolating(false);
    result
}

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = select_into(&LOADER, &requested) {
            warn!(%err, "failed selecting languages; continuing with fallback");
        }
    });
}

/// Switch language at runtime. If `tag` cannot be parsed it is ignored (Ok returned).
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let lang: LanguageIdentifier = match tag.parse() {
        Ok(l) => l,
        Err(_) => return Ok(()),
    };
    select_into(&LOADER, &[lang])
}

/// Language tag currently served by the shared loader.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Independent loader pinned to `tag` (falls back to en-US when unknown).
pub fn loader_for(tag: &str) -> FluentLanguageLoader {
    let loader = new_loader();
    let requested: Vec<LanguageIdentifier> = tag.parse().into_iter().collect();
    if let Err(err) = select_into(&loader, &requested) {
        warn!(%err, tag, "failed loading requested language");
    }
    loader
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
