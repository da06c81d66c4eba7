//! Field values extracted from a `{% gram %}` directive.
//!
//! Processing moves through three immutable stages:
//!
//! 1. [`ParsedFields`]: everything the parser captured, shortcode included.
//! 2. [`MediaRequest`](crate::MediaRequest) consumes `shortcode` and `size`;
//!    [`DisplayFields`] keeps the rest, with title and alt disambiguated.
//! 3. [`ImgTag`](crate::ImgTag) pairs the display fields with the resolved `src`.

use serde::Serialize;

use crate::title::TitleAlt;

/// Requested media size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Size {
    /// Thumbnail (`t`).
    #[serde(rename = "t")]
    Thumbnail,
    /// Medium (`m`).
    #[serde(rename = "m")]
    Medium,
    /// Large (`l`).
    #[serde(rename = "l")]
    Large,
}

impl Size {
    /// Parse a size token. Only the exact single letters `t`, `m` and `l` match.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "t" => Some(Self::Thumbnail),
            "m" => Some(Self::Medium),
            "l" => Some(Self::Large),
            _ => None,
        }
    }

    /// Value sent as the `size` query parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "t",
            Self::Medium => "m",
            Self::Large => "l",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields captured from the directive text.
///
/// Optional fields are `None` when absent or blank; they never hold empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedFields {
    /// Media identifier, always present.
    pub shortcode: String,
    /// Requested size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Width attribute, a run of ASCII digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Class names, space separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Raw title text, possibly holding a quoted title and alt pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ParsedFields {
    /// Create fields holding only a shortcode.
    #[must_use]
    pub fn new(shortcode: impl Into<String>) -> Self {
        Self {
            shortcode: shortcode.into(),
            size: None,
            width: None,
            class: None,
            title: None,
        }
    }

    /// Fields left for rendering once `shortcode` and `size` are consumed
    /// by media resolution.
    #[must_use]
    pub fn display_fields(&self) -> DisplayFields {
        let title_alt = self
            .title
            .as_deref()
            .map(TitleAlt::from_raw)
            .unwrap_or_default();

        DisplayFields {
            width: self.width.clone(),
            title: title_alt.title,
            alt: title_alt.alt,
            class: self.class.clone(),
        }
    }
}

/// Render-side fields: everything except `shortcode` and `size`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Trim `value` and return it if anything is left.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
