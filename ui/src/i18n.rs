//! Localisation for `tfwr-ui`.
//!
//! Every user-facing string on the dashboard (sidebar, headings, table
//! columns, chart notices) is a Fluent message. Bundles are compiled into
//! the binary:
//!
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/tfwr-ui.ftl   (fallback, the reference for every other locale)
//!   fr-FR/tfwr-ui.ftl
//! ```
//!
//! `rust-embed` embeds the folder, `i18n-embed` negotiates the OS locale
//! list against what is embedded, and [`t!`] wraps `i18n_embed_fl::fl!` so
//! message ids and argument names are checked at compile time against the
//! fallback bundle.
//!
//! Call [`init`] before the first render. It may be called again from any
//! component; only the first call negotiates.
//!
//! Adding a locale:
//! 1. Copy `en-US/tfwr-ui.ftl` to `i18n/<lang-id>/tfwr-ui.ftl`.
//! 2. Translate the values. Ids and `{ $variables }` stay as they are.
//! 3. Add the tag to the shipped-locale test below and to
//!    `tests/i18n_missing_keys.rs`.
//!
//! A folder without `tfwr-ui.ftl` is not offered in the language picker.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{debug, info, warn};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Translation lookup through the shared loader.
///
/// ```ignore
/// t!("history-title")
/// t!("last-updated", when = text)
/// ```
///
/// Keys must be literals: `fl!` resolves them while compiling.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent domain; every locale folder holds `{DOMAIN}.ftl`.
const DOMAIN: &str = "tfwr-ui";
const FALLBACK_LANGUAGE: &str = "en-US";

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Shared loader behind [`t!`].
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = FALLBACK_LANGUAGE
        .parse()
        .expect("fallback language tag is well formed");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        let requested = i18n_embed::DesktopLanguageRequester::requested_languages();
        match i18n_embed::select(&*LOADER, &Localizations, &requested) {
            Ok(selected) => info!(?selected, "localisation ready"),
            Err(err) => warn!(error = %err, "language selection failed; using fallback"),
        }
    });
}

/// Tag of the language messages currently resolve in, e.g. `fr-FR`.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Switch to `tag` for every subsequent lookup. Tags that don't parse are
/// ignored; a tag with no bundle leaves the fallback in place.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang])?;
    Ok(())
}

/// Locales with an embedded `tfwr-ui.ftl`, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = Localizations::iter()
        .filter_map(|path| {
            let (lang, file) = path.split_once('/')?;
            let stem = file.strip_suffix(".ftl")?;
            (stem == DOMAIN).then(|| lang.to_string())
        })
        .collect();
    langs.sort();
    langs.dedup();
    langs
}
