//! Tag syntax scanning: `{% name markup %}`.

const OPEN: &str = "{%";
const CLOSE: &str = "%}";

/// First tag-like construct found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagMatch<'a> {
    /// Well-formed tag spanning `start..end`.
    Tag {
        name: &'a str,
        markup: &'a str,
        start: usize,
        end: usize,
    },
    /// `{% ... %}` whose first word is not a valid tag name.
    Invalid { start: usize, end: usize },
    /// `{%` with no closing `%}` on the same line.
    Unterminated { start: usize },
}

/// Find the first tag in `line`.
///
/// A `%}` inside a quoted argument does not close the tag. If a quote is
/// never closed, the first `%}` does.
///
/// Returns `None` if the line contains no `{%`.
pub(crate) fn find_tag(line: &str) -> Option<TagMatch<'_>> {
    let start = line.find(OPEN)?;
    let inner_start = start + OPEN.len();
    let rest = &line[inner_start..];

    let Some(close) = find_close(rest).or_else(|| rest.find(CLOSE)) else {
        return Some(TagMatch::Unterminated { start });
    };
    let inner_end = inner_start + close;
    let end = inner_end + CLOSE.len();

    let inner = line[inner_start..inner_end].trim();
    let name_end = inner.find(char::is_whitespace).unwrap_or(inner.len());
    let name = &inner[..name_end];

    if !is_valid_tag_name(name) {
        return Some(TagMatch::Invalid { start, end });
    }

    Some(TagMatch::Tag {
        name,
        markup: inner[name_end..].trim(),
        start,
        end,
    })
}

/// Find `%}` outside quoted arguments.
///
/// A quote opens an argument only at the start of a word, so apostrophes
/// inside words are ignored.
fn find_close(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut word_start = true;

    for (i, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if word_start && (c == '\'' || c == '"') => quote = Some(c),
            None if s[i..].starts_with(CLOSE) => return Some(i),
            None => {}
        }
        word_start = c.is_whitespace();
    }
    None
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_tag_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_with_markup() {
        let line = "Look: {% gram pFG7naIZkr t %} nice";
        assert_eq!(
            find_tag(line),
            Some(TagMatch::Tag {
                name: "gram",
                markup: "pFG7naIZkr t",
                start: 6,
                end: 29,
            })
        );
    }

    #[test]
    fn test_tag_without_spaces() {
        assert_eq!(
            find_tag("{%gram abc%}"),
            Some(TagMatch::Tag {
                name: "gram",
                markup: "abc",
                start: 0,
                end: 12,
            })
        );
    }

    #[test]
    fn test_tag_without_markup() {
        assert_eq!(
            find_tag("{% gram %}"),
            Some(TagMatch::Tag {
                name: "gram",
                markup: "",
                start: 0,
                end: 10,
            })
        );
    }

    #[test]
    fn test_markup_keeps_quotes() {
        let Some(TagMatch::Tag { markup, .. }) =
            find_tag("{% gram abc l 400 figure 'pretty turkey tail fungus' %}")
        else {
            panic!("expected tag");
        };
        assert_eq!(markup, "abc l 400 figure 'pretty turkey tail fungus'");
    }

    #[test]
    fn test_first_tag_wins() {
        let Some(TagMatch::Tag { markup, start, .. }) = find_tag("{% gram a %} {% gram b %}")
        else {
            panic!("expected tag");
        };
        assert_eq!(markup, "a");
        assert_eq!(start, 0);
    }

    #[test]
    fn test_no_tag() {
        assert_eq!(find_tag("plain text"), None);
        assert_eq!(find_tag(""), None);
        assert_eq!(find_tag("100% done"), None);
    }

    #[test]
    fn test_empty_tag_is_invalid() {
        assert_eq!(
            find_tag("a {% %} b"),
            Some(TagMatch::Invalid { start: 2, end: 7 })
        );
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            find_tag("{% g@m x %}"),
            Some(TagMatch::Invalid { start: 0, end: 11 })
        );
    }

    #[test]
    fn test_close_inside_quoted_argument_is_skipped() {
        let line = "{% gram abc '100%} fun' %} after";
        assert_eq!(
            find_tag(line),
            Some(TagMatch::Tag {
                name: "gram",
                markup: "abc '100%} fun'",
                start: 0,
                end: 26,
            })
        );
    }

    #[test]
    fn test_apostrophe_inside_word_does_not_open_quote() {
        let Some(TagMatch::Tag { markup, end, .. }) = find_tag("{% gram abc don't %} x") else {
            panic!("expected tag");
        };
        assert_eq!(markup, "abc don't");
        assert_eq!(end, 20);
    }

    #[test]
    fn test_unclosed_quote_falls_back_to_first_close() {
        let Some(TagMatch::Tag { markup, .. }) = find_tag("{% gram abc 'oops %} tail") else {
            panic!("expected tag");
        };
        assert_eq!(markup, "abc 'oops");
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            find_tag("text {% gram abc"),
            Some(TagMatch::Unterminated { start: 5 })
        );
    }

    #[test]
    fn test_is_valid_tag_name() {
        assert!(is_valid_tag_name("gram"));
        assert!(is_valid_tag_name("include_code"));
        assert!(is_valid_tag_name("my-tag2"));
        assert!(!is_valid_tag_name(""));
        assert!(!is_valid_tag_name("a.b"));
    }
}
