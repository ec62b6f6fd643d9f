use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Token used when a title leaves nothing slug-worthy behind.
const FALLBACK_SLUG: &str = "item";

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").unwrap());

/// Derives a URL-safe identifier from a display title: lower-cased,
/// diacritics stripped via NFD, non-alphanumeric runs collapsed to a single
/// hyphen, leading and trailing hyphens trimmed.
pub fn slugify(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect();
    let collapsed = NON_ALNUM.replace_all(&folded, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}
