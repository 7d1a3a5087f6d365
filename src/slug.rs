use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Anything that is not a word character, whitespace or a hyphen
const NON_WORD_PATTERN: &str = r"[^\w\s-]";

/// A run of whitespace and/or hyphens, collapsed into a single hyphen
const SEPARATOR_RUN_PATTERN: &str = r"[-\s]+";

static NON_WORD_RE: OnceLock<Regex> = OnceLock::new();
static SEPARATOR_RUN_RE: OnceLock<Regex> = OnceLock::new();

/// Derive a filesystem-safe lowercase token from a clip title.
///
/// Accented letters are decomposed and transliterated to ASCII unless
/// `allow_unicode` keeps them (composed). Disallowed characters are
/// removed, separator runs collapse to a single hyphen, and leading and
/// trailing hyphens and underscores are trimmed.
///
/// A title made only of disallowed characters slugs down to an empty
/// string; the caller then falls back to the bare clip id for the
/// output file name.
pub fn slugify(value: &str, allow_unicode: bool) -> String {
    let normalized: String = if allow_unicode {
        value.nfkc().collect()
    } else {
        value.nfkd().filter(char::is_ascii).collect()
    };

    let lowered = normalized.to_lowercase();

    let non_word = NON_WORD_RE.get_or_init(|| Regex::new(NON_WORD_PATTERN).unwrap());
    let separator_run =
        SEPARATOR_RUN_RE.get_or_init(|| Regex::new(SEPARATOR_RUN_PATTERN).unwrap());

    let kept = non_word.replace_all(&lowered, "");
    let collapsed = separator_run.replace_all(&kept, "-");

    collapsed.trim_matches(['-', '_']).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_become_single_hyphens() {
        assert_eq!(slugify("Coub of the Year", false), "coub-of-the-year");
    }

    #[test]
    fn accents_are_transliterated() {
        assert_eq!(slugify("Ünicode Tïtle", false), "unicode-title");
    }

    #[test]
    fn allow_unicode_keeps_non_ascii_letters() {
        assert_eq!(slugify("Füße", true), "füße");
    }

    #[test]
    fn disallowed_only_title_slugs_to_empty() {
        assert_eq!(slugify("!!!???", false), "");
    }

    #[test]
    fn separator_runs_collapse() {
        assert_eq!(slugify("a  -  b -- c", false), "a-b-c");
    }

    #[test]
    fn leading_and_trailing_separators_are_trimmed() {
        assert_eq!(slugify("  - my title -  ", false), "my-title");
        assert_eq!(slugify("_underscored_", false), "underscored");
    }
}
