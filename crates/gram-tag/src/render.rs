//! `<img>` tag serialization.

use crate::fields::DisplayFields;

/// Render-ready image element: resolved `src` plus display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgTag {
    src: String,
    fields: DisplayFields,
}

impl ImgTag {
    /// Create an image tag from a resolved media URL and display fields.
    #[must_use]
    pub fn new(src: impl Into<String>, fields: DisplayFields) -> Self {
        Self {
            src: src.into(),
            fields,
        }
    }

    /// Attributes in output order: `src`, `width`, `title`, `alt`, `class`.
    ///
    /// Absent fields are skipped.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let optional = [
            ("width", self.fields.width.as_deref()),
            ("title", self.fields.title.as_deref()),
            ("alt", self.fields.alt.as_deref()),
            ("class", self.fields.class.as_deref()),
        ];

        std::iter::once(("src", self.src.as_str()))
            .chain(
                optional
                    .into_iter()
                    .filter_map(|(name, value)| value.map(|v| (name, v))),
            )
            .collect()
    }

    /// Serialize to `<img src="..." ...>`.
    ///
    /// With `escape` set, attribute values are HTML-escaped; otherwise they
    /// are emitted exactly as written in the directive.
    ///
    /// # Example
    ///
    /// ```
    /// use gram_tag::{DisplayFields, ImgTag};
    ///
    /// let fields = DisplayFields {
    ///     width: Some("400".to_owned()),
    ///     ..Default::default()
    /// };
    /// let tag = ImgTag::new("https://example.com/a.jpg", fields);
    /// assert_eq!(tag.render(true), r#"<img src="https://example.com/a.jpg" width="400">"#);
    /// ```
    #[must_use]
    pub fn render(&self, escape: bool) -> String {
        let mut html = String::from("<img");
        for (name, value) in self.attributes() {
            html.push(' ');
            html.push_str(name);
            html.push_str("=\"");
            if escape {
                html.push_str(&escape_attribute(value));
            } else {
                html.push_str(value);
            }
            html.push('"');
        }
        html.push('>');
        html
    }
}

/// Escape a value for use inside a double-quoted HTML attribute.
#[must_use]
pub fn escape_attribute(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
