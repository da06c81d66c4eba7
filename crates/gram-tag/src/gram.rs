//! The `gram` tag handler.

use std::time::Duration;

use crate::error::GramError;
use crate::media::{DEFAULT_BASE_URL, HttpFetcher, MediaFetcher, MediaRequest, resolve_media};
use crate::parser::parse_directive;
use crate::render::ImgTag;
use crate::tag::{TagContext, TagHandler};

/// Tag name the handler registers under.
pub const GRAM_TAG: &str = "gram";

/// Options for [`GramTag`].
#[derive(Debug, Clone)]
pub struct GramOptions {
    /// Base URL the shortcode is appended to.
    pub base_url: String,
    /// HTML-escape attribute values.
    pub escape_attributes: bool,
}

impl Default for GramOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            escape_attributes: true,
        }
    }
}

/// Handler turning `{% gram ... %}` into an `<img>` tag.
///
/// Each directive is parsed, resolved with one fetch, and rendered; nothing is
/// cached between directives.
#[derive(Debug, Clone)]
pub struct GramTag<F = HttpFetcher> {
    fetcher: F,
    options: GramOptions,
}

impl GramTag<HttpFetcher> {
    /// Create a handler that resolves media over HTTP with the given timeout.
    #[must_use]
    pub fn new(options: GramOptions, timeout: Duration) -> Self {
        Self::with_fetcher(HttpFetcher::new(timeout), options)
    }
}

impl<F: MediaFetcher> GramTag<F> {
    /// Create a handler using a custom fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: F, options: GramOptions) -> Self {
        Self { fetcher, options }
    }

    #[must_use]
    pub fn options(&self) -> &GramOptions {
        &self.options
    }

    /// Parse, resolve and render one directive's markup.
    ///
    /// # Errors
    ///
    /// - [`GramError::MalformedDirective`] if the markup has no shortcode
    /// - [`GramError::MediaNotFound`] if the media service returns 404
    /// - [`GramError::Fetch`] for other fetch failures
    pub fn render_markup(&self, markup: &str) -> Result<String, GramError> {
        let fields = parse_directive(markup)?;
        let request = MediaRequest::new(&self.options.base_url, &fields);
        tracing::debug!(shortcode = %fields.shortcode, url = %request.url, "Resolving gram");

        let src = resolve_media(&self.fetcher, &request)?;
        let tag = ImgTag::new(src, fields.display_fields());
        Ok(tag.render(self.options.escape_attributes))
    }
}

impl<F: MediaFetcher> TagHandler for GramTag<F> {
    fn name(&self) -> &str {
        GRAM_TAG
    }

    fn render(&self, markup: &str, ctx: &TagContext<'_>) -> Result<String, GramError> {
        self.render_markup(markup).inspect_err(|e| {
            tracing::warn!(location = %ctx.location(), error = %e, "gram tag failed");
        })
    }
}
