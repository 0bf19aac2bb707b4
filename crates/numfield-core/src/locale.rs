//! # Locale Symbols
//!
//! Decimal and grouping separators for the reference formatter.
//!
//! This is deliberately small: real deployments plug in a full locale engine
//! through [`NumberFormatter`](crate::format::NumberFormatter). The table here
//! covers the separator conventions the frontend ships with.
//!
//! ## Lookup Order
//! ```text
//! "de-CH" ──► exact tag match?  ──yes──► ('.', '’')
//!    │
//!    no
//!    ▼
//! "de"    ──► language match?   ──yes──► (',', '.')
//!    │
//!    no
//!    ▼
//! fallback to en-US             ───────► ('.', ',')
//! ```

use tracing::warn;

/// Separator characters of one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleSymbols {
    pub decimal: char,
    pub grouping: char,
}

impl LocaleSymbols {
    pub const fn new(decimal: char, grouping: char) -> Self {
        LocaleSymbols { decimal, grouping }
    }
}

impl Default for LocaleSymbols {
    fn default() -> Self {
        EN_US
    }
}

const EN_US: LocaleSymbols = LocaleSymbols::new('.', ',');
const COMMA_DOT: LocaleSymbols = LocaleSymbols::new(',', '.');
const COMMA_NBSP: LocaleSymbols = LocaleSymbols::new(',', '\u{a0}');
const COMMA_NNBSP: LocaleSymbols = LocaleSymbols::new(',', '\u{202f}');
const DOT_APOSTROPHE: LocaleSymbols = LocaleSymbols::new('.', '\u{2019}');

/// Region-specific overrides, checked before the language table.
const BY_TAG: &[(&str, LocaleSymbols)] = &[
    ("de-ch", DOT_APOSTROPHE),
    ("de-li", DOT_APOSTROPHE),
    ("it-ch", DOT_APOSTROPHE),
    ("fr-ch", COMMA_NNBSP),
    ("pt-pt", COMMA_NBSP),
    ("es-mx", EN_US),
    ("es-us", EN_US),
];

const BY_LANGUAGE: &[(&str, LocaleSymbols)] = &[
    ("en", EN_US),
    ("ja", EN_US),
    ("zh", EN_US),
    ("ko", EN_US),
    ("he", EN_US),
    ("th", EN_US),
    ("de", COMMA_DOT),
    ("es", COMMA_DOT),
    ("it", COMMA_DOT),
    ("nl", COMMA_DOT),
    ("pt", COMMA_DOT),
    ("da", COMMA_DOT),
    ("id", COMMA_DOT),
    ("tr", COMMA_DOT),
    ("el", COMMA_DOT),
    ("fr", COMMA_NNBSP),
    ("nb", COMMA_NBSP),
    ("no", COMMA_NBSP),
    ("sv", COMMA_NBSP),
    ("fi", COMMA_NBSP),
    ("cs", COMMA_NBSP),
    ("sk", COMMA_NBSP),
    ("pl", COMMA_NBSP),
    ("ru", COMMA_NBSP),
    ("uk", COMMA_NBSP),
    ("hu", COMMA_NBSP),
];

/// Resolves the separators for a BCP 47 locale tag.
///
/// Accepts both `-` and `_` as subtag delimiters and ignores case.
/// Unknown locales fall back to `en-US` with a warning.
pub fn symbols_for(locale: &str) -> LocaleSymbols {
    let tag = locale.trim().replace('_', "-").to_ascii_lowercase();

    if let Some((_, symbols)) = BY_TAG.iter().find(|(t, _)| tag.starts_with(t)) {
        return *symbols;
    }

    let language = tag.split('-').next().unwrap_or_default();
    if let Some((_, symbols)) = BY_LANGUAGE.iter().find(|(l, _)| *l == language) {
        return *symbols;
    }

    warn!(locale = %locale, "Unknown locale, falling back to en-US separators");
    EN_US
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_tag_wins_over_language() {
        assert_eq!(symbols_for("de-CH"), DOT_APOSTROPHE);
        assert_eq!(symbols_for("de-DE"), COMMA_DOT);
    }

    #[test]
    fn test_underscore_and_case_are_normalized() {
        assert_eq!(symbols_for("pt_PT"), COMMA_NBSP);
        assert_eq!(symbols_for("DE"), COMMA_DOT);
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        assert_eq!(symbols_for("xx-YY"), EN_US);
        assert_eq!(symbols_for(""), EN_US);
    }
}
