//! Title and alt text disambiguation.
//!
//! The trailing text of a directive is either a single title (quoted or not)
//! or two quoted segments, `'title' 'alt'`. Each segment closes with the
//! quote it opened with, so apostrophes inside a double-quoted segment and
//! either quote inside a single-quoted one survive.

use std::sync::LazyLock;

use regex::Regex;

use crate::fields::non_empty;

/// Exactly two quoted segments separated by whitespace.
static TITLE_ALT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:"(?P<t1>.*?)"|'(?P<t2>.*?)')\s+(?:"(?P<a1>.*)"|'(?P<a2>.*)')\s*$"#,
    )
    .unwrap()
});

/// Title and alt text derived from a directive's raw title.
///
/// Whenever `title` is set, `alt` is set too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleAlt {
    pub title: Option<String>,
    pub alt: Option<String>,
}

impl TitleAlt {
    /// Split raw title text into title and alt.
    ///
    /// # Example
    ///
    /// ```
    /// use gram_tag::TitleAlt;
    ///
    /// let pair = TitleAlt::from_raw("'warehouse window title' 'alt text'");
    /// assert_eq!(pair.title.as_deref(), Some("warehouse window title"));
    /// assert_eq!(pair.alt.as_deref(), Some("alt text"));
    ///
    /// let single = TitleAlt::from_raw("'pretty turkey tail fungus'");
    /// assert_eq!(single.alt, single.title);
    /// ```
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if let Some(caps) = TITLE_ALT_RE.captures(raw) {
            let segment = |double: &str, single: &str| {
                caps.name(double)
                    .or_else(|| caps.name(single))
                    .and_then(|m| non_empty(m.as_str()))
            };
            let title = segment("t1", "t2");
            let alt = segment("a1", "a2").or_else(|| title.clone());
            return Self { title, alt };
        }

        let title = non_empty(strip_quotes(raw.trim()));
        Self {
            alt: title.clone(),
            title,
        }
    }
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(title: Option<&str>, alt: Option<&str>) -> TitleAlt {
        TitleAlt {
            title: title.map(str::to_owned),
            alt: alt.map(str::to_owned),
        }
    }

    #[test]
    fn test_single_quoted_title_mirrors_alt() {
        assert_eq!(
            TitleAlt::from_raw("'pretty turkey tail fungus'"),
            pair(
                Some("pretty turkey tail fungus"),
                Some("pretty turkey tail fungus")
            )
        );
    }

    #[test]
    fn test_double_quoted_title() {
        assert_eq!(
            TitleAlt::from_raw(r#""a title""#),
            pair(Some("a title"), Some("a title"))
        );
    }

    #[test]
    fn test_title_and_alt() {
        assert_eq!(
            TitleAlt::from_raw("'warehouse window title' 'alt text'"),
            pair(Some("warehouse window title"), Some("alt text"))
        );
    }

    #[test]
    fn test_title_and_alt_double_quotes() {
        assert_eq!(
            TitleAlt::from_raw(r#""the title"   "the alt""#),
            pair(Some("the title"), Some("the alt"))
        );
    }

    #[test]
    fn test_mixed_quote_styles() {
        assert_eq!(
            TitleAlt::from_raw(r#"'the title' "the alt""#),
            pair(Some("the title"), Some("the alt"))
        );
    }

    #[test]
    fn test_apostrophe_in_double_quoted_pair() {
        assert_eq!(
            TitleAlt::from_raw(r#""it's" "x""#),
            pair(Some("it's"), Some("x"))
        );
    }

    #[test]
    fn test_apostrophe_in_single_quoted_pair() {
        assert_eq!(
            TitleAlt::from_raw("'it's nice' 'alt'"),
            pair(Some("it's nice"), Some("alt"))
        );
    }

    #[test]
    fn test_double_quotes_inside_single_quoted_pair() {
        assert_eq!(
            TitleAlt::from_raw(r#"'say "hi"' 'wave'"#),
            pair(Some(r#"say "hi""#), Some("wave"))
        );
    }

    #[test]
    fn test_inner_quotes_in_single_title() {
        assert_eq!(
            TitleAlt::from_raw("'rock 'n' roll'"),
            pair(Some("rock 'n' roll"), Some("rock 'n' roll"))
        );
    }

    #[test]
    fn test_text_after_pair_is_single_title() {
        assert_eq!(
            TitleAlt::from_raw("'a' 'b' trailing"),
            pair(Some("'a' 'b' trailing"), Some("'a' 'b' trailing"))
        );
    }

    #[test]
    fn test_unquoted_title_kept_raw() {
        assert_eq!(
            TitleAlt::from_raw("  plain title text "),
            pair(Some("plain title text"), Some("plain title text"))
        );
    }

    #[test]
    fn test_unbalanced_quote_kept_raw() {
        assert_eq!(
            TitleAlt::from_raw("'half quoted"),
            pair(Some("'half quoted"), Some("'half quoted"))
        );
    }

    #[test]
    fn test_empty_title_segment_still_sets_alt() {
        assert_eq!(
            TitleAlt::from_raw("'' 'only alt'"),
            pair(None, Some("only alt"))
        );
    }

    #[test]
    fn test_empty_alt_segment_falls_back_to_title() {
        assert_eq!(
            TitleAlt::from_raw("'only title' ''"),
            pair(Some("only title"), Some("only title"))
        );
    }

    #[test]
    fn test_both_segments_empty() {
        assert_eq!(TitleAlt::from_raw("'' ''"), pair(None, None));
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(TitleAlt::from_raw("''"), pair(None, None));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'x'"), "x");
        assert_eq!(strip_quotes(r#""x""#), "x");
        assert_eq!(strip_quotes("'"), "'");
        assert_eq!(strip_quotes(r#"'x""#), r#"'x""#);
        assert_eq!(strip_quotes("x"), "x");
    }
}
