//! Directive text tokenizer.
//!
//! Grammar, in positional order:
//!
//! ```text
//! <shortcode> [t|m|l] [digits] [class tokens...] ['title' ['alt'] | "title" ["alt"]]
//! ```
//!
//! Each token after the shortcode is offered to the slots in order. The size
//! slot only accepts `t`, `m` or `l`, the width slot only an ASCII digit run;
//! a token that fails a slot's predicate moves on to the next slot, and every
//! remaining unquoted token joins the class list. The first token starting
//! with a quote begins the title, which runs to the end of the text.

use crate::error::GramError;
use crate::fields::{ParsedFields, Size, non_empty};

/// Positional slot waiting for the next token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Size,
    Width,
    Class,
}

/// Parse directive text (everything after the tag name) into fields.
///
/// # Errors
///
/// Returns [`GramError::MalformedDirective`] when the text holds no shortcode.
///
/// # Example
///
/// ```
/// use gram_tag::{Size, parse_directive};
///
/// let fields = parse_directive("pFI0CAIZna l 400 figure 'pretty turkey tail fungus'").unwrap();
/// assert_eq!(fields.shortcode, "pFI0CAIZna");
/// assert_eq!(fields.size, Some(Size::Large));
/// assert_eq!(fields.width.as_deref(), Some("400"));
/// assert_eq!(fields.class.as_deref(), Some("figure"));
/// ```
pub fn parse_directive(markup: &str) -> Result<ParsedFields, GramError> {
    let (shortcode, mut rest) = next_token(markup).ok_or_else(GramError::malformed)?;
    let mut fields = ParsedFields::new(shortcode);
    let mut slot = Slot::Size;
    let mut classes: Vec<&str> = Vec::new();

    loop {
        let remaining = rest.trim_start();
        if remaining.starts_with(is_quote) {
            fields.title = non_empty(remaining);
            break;
        }
        let Some((token, after)) = next_token(remaining) else {
            break;
        };
        rest = after;

        if slot == Slot::Size {
            slot = Slot::Width;
            if let Some(size) = Size::from_token(token) {
                fields.size = Some(size);
                continue;
            }
        }

        if slot == Slot::Width {
            slot = Slot::Class;
            if is_width(token) {
                fields.width = Some(token.to_owned());
                continue;
            }
        }

        classes.push(token);
    }

    if !classes.is_empty() {
        fields.class = Some(classes.join(" "));
    }

    Ok(fields)
}

/// Split off the first whitespace-delimited token.
///
/// Returns `None` when only whitespace is left.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

fn is_width(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
