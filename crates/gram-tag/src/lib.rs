//! Liquid-style `{% gram %}` image tags.
//!
//! A directive such as
//!
//! ```text
//! {% gram rOru21oZpe l 450 test_class instagram 'warehouse window title' 'alt text' %}
//! ```
//!
//! is parsed into [`ParsedFields`], resolved to a concrete image URL through a
//! [`MediaFetcher`], and rendered as
//!
//! ```text
//! <img src="http://..." width="450" title="warehouse window title" alt="alt text" class="test_class instagram">
//! ```
//!
//! # Architecture
//!
//! - [`parser`]: directive tokenizer producing [`ParsedFields`]
//! - [`title`]: title/alt disambiguation
//! - [`media`]: request URL construction and resolution
//! - [`render`]: `<img>` serialization
//! - [`tag`]: `{% name markup %}` document preprocessing with explicit handler registration
//!
//! # Example
//!
//! ```no_run
//! use gram_tag::{GramOptions, GramTag, DEFAULT_TIMEOUT};
//! use gram_tag::tag::TagProcessor;
//!
//! let gram = GramTag::new(GramOptions::default(), DEFAULT_TIMEOUT);
//! let mut processor = TagProcessor::new().with_handler(gram);
//! let html = processor.process("{% gram pFG7naIZkr t %}").unwrap();
//! ```

mod error;
mod fields;
mod gram;
pub mod media;
pub mod parser;
pub mod render;
pub mod tag;
pub mod title;

pub use error::{GramError, SYNTAX};
pub use fields::{DisplayFields, ParsedFields, Size};
pub use gram::{GRAM_TAG, GramOptions, GramTag};
pub use media::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, FetchResponse, HttpFetcher, MediaFetcher, MediaRequest,
    resolve_media,
};
pub use parser::parse_directive;
pub use render::{ImgTag, escape_attribute};
pub use title::TitleAlt;
