//! Liquid-style tag preprocessing for source documents.
//!
//! Documents embed tags as `{% name markup %}`. A [`TagProcessor`] scans each
//! line, hands the markup of every tag to the [`TagHandler`] registered under
//! its name, and splices the returned HTML in place of the tag.
//!
//! Handlers are registered explicitly on the processor; there is no global
//! tag registry.
//!
//! # Example
//!
//! ```
//! use gram_tag::GramError;
//! use gram_tag::tag::{TagContext, TagHandler, TagProcessor};
//!
//! struct Shout;
//!
//! impl TagHandler for Shout {
//!     fn name(&self) -> &str { "shout" }
//!
//!     fn render(&self, markup: &str, _ctx: &TagContext<'_>) -> Result<String, GramError> {
//!         Ok(format!("<strong>{}</strong>", markup.to_uppercase()))
//!     }
//! }
//!
//! let mut processor = TagProcessor::new().with_handler(Shout);
//! let output = processor.process("Say {% shout hello %}!").unwrap();
//! assert_eq!(output, "Say <strong>HELLO</strong>!");
//! ```

mod context;
mod fence;
mod handler;
mod parser;
mod processor;

pub use context::TagContext;
pub use handler::TagHandler;
pub use processor::{ProcessError, TagProcessor};
