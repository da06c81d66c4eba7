//! Error types for gram tag processing.

/// Syntax reminder included in [`GramError::MalformedDirective`] messages.
pub const SYNTAX: &str = r#"{% gram shortcode [size] [width] [class name(s)] [title text | "title text" ["alt text"]] %}"#;

/// Error raised while turning a `{% gram %}` directive into HTML.
#[derive(Debug, thiserror::Error)]
pub enum GramError {
    /// The directive text has no shortcode to anchor on.
    #[error("Error processing input. Expected syntax: {syntax}")]
    MalformedDirective {
        /// Expected directive syntax.
        syntax: &'static str,
    },

    /// The media service reported that the shortcode does not exist.
    #[error("{shortcode} isn't a photo")]
    MediaNotFound {
        /// Shortcode that failed to resolve.
        shortcode: String,
    },

    /// Transport failure or unexpected status from the media service.
    #[error("failed to fetch {url}: {message}")]
    Fetch {
        /// Request URL.
        url: String,
        /// Underlying failure description.
        message: String,
    },
}

impl GramError {
    /// Malformed directive error carrying [`SYNTAX`].
    #[must_use]
    pub fn malformed() -> Self {
        Self::MalformedDirective { syntax: SYNTAX }
    }
}
