//! Media URL construction and resolution.
//!
//! A shortcode resolves to its final image URL by requesting
//! `<base_url><shortcode>/media/[?size=<s>]` and following redirects. The URL
//! the request ends up at becomes the `src` of the rendered tag.

use std::time::Duration;

use ureq::{Agent, ResponseExt};

use crate::error::GramError;
use crate::fields::{ParsedFields, Size};

/// Default media endpoint base.
pub const DEFAULT_BASE_URL: &str = "http://instagr.am/p/";

/// Default timeout for a single media lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request for one media item, built from the shortcode and size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub shortcode: String,
    pub size: Option<Size>,
    /// Fully built request URL.
    pub url: String,
}

impl MediaRequest {
    /// Build the request URL for `fields` against `base_url`.
    ///
    /// # Example
    ///
    /// ```
    /// use gram_tag::{MediaRequest, parse_directive};
    ///
    /// let fields = parse_directive("pFG7naIZkr t").unwrap();
    /// let request = MediaRequest::new("http://instagr.am/p/", &fields);
    /// assert_eq!(request.url, "http://instagr.am/p/pFG7naIZkr/media/?size=t");
    /// ```
    #[must_use]
    pub fn new(base_url: &str, fields: &ParsedFields) -> Self {
        let base = base_url.trim_end_matches('/');
        let mut url = format!("{base}/{}/media/", fields.shortcode);
        if let Some(size) = fields.size {
            url.push_str("?size=");
            url.push_str(size.as_str());
        }

        Self {
            shortcode: fields.shortcode.clone(),
            size: fields.size,
            url,
        }
    }
}

/// Outcome of a single fetch: where the request ended up and with what status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// URL after following redirects.
    pub final_url: String,
    /// HTTP status code of the final response.
    pub status: u16,
}

/// Network primitive used to resolve media URLs.
///
/// Implementations perform one blocking request per call with no retry.
pub trait MediaFetcher: Send + Sync {
    /// Fetch `url`, following redirects.
    ///
    /// Error statuses are reported through [`FetchResponse::status`], not as errors.
    fn fetch(&self, url: &str) -> Result<FetchResponse, GramError>;
}

/// [`MediaFetcher`] backed by a `ureq` agent with a global timeout.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    /// Create a fetcher whose requests give up after `timeout`.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: create_agent(timeout),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl MediaFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, GramError> {
        let response = self.agent.get(url).call().map_err(|e| GramError::Fetch {
            url: url.to_owned(),
            message: e.to_string(),
        })?;

        Ok(FetchResponse {
            final_url: response.get_uri().to_string(),
            status: response.status().as_u16(),
        })
    }
}

/// Create HTTP agent with the specified timeout.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Resolve `request` to its final media URL.
///
/// # Errors
///
/// - [`GramError::MediaNotFound`] on a 404 status
/// - [`GramError::Fetch`] on any other error status or transport failure
pub fn resolve_media(
    fetcher: &dyn MediaFetcher,
    request: &MediaRequest,
) -> Result<String, GramError> {
    let response = fetcher.fetch(&request.url)?;

    match response.status {
        404 => Err(GramError::MediaNotFound {
            shortcode: request.shortcode.clone(),
        }),
        status if status >= 400 => Err(GramError::Fetch {
            url: request.url.clone(),
            message: format!("HTTP {status}"),
        }),
        _ => {
            tracing::debug!(
                shortcode = %request.shortcode,
                url = %response.final_url,
                "Resolved media"
            );
            Ok(response.final_url)
        }
    }
}
