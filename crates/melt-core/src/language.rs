//! Wordlist language resolution
//!
//! Maps a user-supplied language token (a locale tag such as `ja` or
//! `zh-Hant`, or an English language name such as `Japanese`) to the
//! BIP-39 wordlist used for encoding and decoding.
//!
//! Resolution is pure. The resulting [`WordlistTag`] is passed explicitly
//! to every mnemonic operation; there is no process-wide active wordlist.

use std::fmt;

use bip39::Language;

use crate::error::{Error, Result};

/// Tag used when no language is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A supported locale: canonical tag, English display name, wordlist.
struct Locale {
    tag: &'static str,
    name: &'static str,
    language: Language,
}

/// Supported locales, scanned in order. First match wins.
const LOCALES: &[Locale] = &[
    Locale { tag: "en", name: "English", language: Language::English },
    Locale { tag: "en-us", name: "American English", language: Language::English },
    Locale { tag: "en-gb", name: "British English", language: Language::English },
    Locale { tag: "zh", name: "Chinese", language: Language::SimplifiedChinese },
    Locale { tag: "zh-hans", name: "Simplified Chinese", language: Language::SimplifiedChinese },
    Locale { tag: "zh-hant", name: "Traditional Chinese", language: Language::TraditionalChinese },
    Locale { tag: "cs", name: "Czech", language: Language::Czech },
    Locale { tag: "fr", name: "French", language: Language::French },
    Locale { tag: "it", name: "Italian", language: Language::Italian },
    Locale { tag: "ja", name: "Japanese", language: Language::Japanese },
    Locale { tag: "ko", name: "Korean", language: Language::Korean },
    Locale { tag: "pt", name: "Portuguese", language: Language::Portuguese },
    Locale { tag: "es", name: "Spanish", language: Language::Spanish },
    Locale { tag: "es-es", name: "European Spanish", language: Language::Spanish },
    Locale { tag: "es-419", name: "Latin American Spanish", language: Language::Spanish },
];

/// The resolved wordlist for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordlistTag {
    tag: &'static str,
    language: Language,
}

impl WordlistTag {
    /// Canonical (lowercase) locale tag, e.g. `zh-hant`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The BIP-39 wordlist backing this tag.
    pub fn language(&self) -> Language {
        self.language
    }

    fn from_locale(locale: &Locale) -> Self {
        Self {
            tag: locale.tag,
            language: locale.language,
        }
    }
}

impl Default for WordlistTag {
    fn default() -> Self {
        Self::from_locale(&LOCALES[0])
    }
}

impl fmt::Display for WordlistTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag)
    }
}

/// Lowercase and replace spaces with hyphens.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(' ', "-")
}

fn by_tag(tag: &str) -> Option<&'static Locale> {
    LOCALES.iter().find(|l| l.tag == tag)
}

fn by_english_name(token: &str) -> Option<&'static Locale> {
    LOCALES.iter().find(|l| normalize(l.name) == token)
}

/// Primary language subtag of a well-formed locale tag.
///
/// Accepts `lang(-subtag)*` where `lang` is 2–3 ASCII letters and each
/// further subtag is 1–8 ASCII alphanumerics.
fn base_subtag(token: &str) -> Option<&str> {
    let mut parts = token.split('-');
    let base = parts.next()?;
    if !(2..=3).contains(&base.len()) || !base.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    let rest_ok = parts.all(|p| (1..=8).contains(&p.len()) && p.bytes().all(|b| b.is_ascii_alphanumeric()));
    rest_ok.then_some(base)
}

/// Resolve a language token to exactly one wordlist.
///
/// Tries, in order: an exact supported tag, an English language name, and
/// finally the base language of a regional tag (`fr-CA` → `fr`).
pub fn resolve(token: &str) -> Result<WordlistTag> {
    let token = normalize(token);

    if let Some(locale) = by_tag(&token).or_else(|| by_english_name(&token)) {
        return Ok(WordlistTag::from_locale(locale));
    }

    match base_subtag(&token).and_then(by_tag) {
        Some(locale) => {
            log::debug!("language {token:?} has no wordlist, using base {:?}", locale.tag);
            Ok(WordlistTag::from_locale(locale))
        }
        None => Err(Error::UnsupportedLanguage(token)),
    }
}

/// Supported `(tag, English name)` pairs, in resolution order.
pub fn supported_languages() -> impl Iterator<Item = (&'static str, &'static str)> {
    LOCALES.iter().map(|l| (l.tag, l.name))
}
