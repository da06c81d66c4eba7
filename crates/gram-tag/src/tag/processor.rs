//! Tag processor for source documents.

use std::path::{Path, PathBuf};

use crate::error::GramError;

use super::fence::FenceTracker;
use super::parser::{TagMatch, find_tag};
use super::{TagContext, TagHandler};

/// A tag handler failed; the document cannot be processed.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {{% {tag} %}}: {source}")]
pub struct ProcessError {
    /// Line of the failing tag (1-indexed).
    pub line: usize,
    /// Name of the failing tag.
    pub tag: String,
    /// Error returned by the handler.
    pub source: GramError,
}

/// Processor for `{% name markup %}` tags.
///
/// Tags inside fenced code blocks and tags without a registered handler pass
/// through unchanged.
///
/// # Example
///
/// ```
/// use gram_tag::GramError;
/// use gram_tag::tag::{TagContext, TagHandler, TagProcessor};
///
/// struct Year;
///
/// impl TagHandler for Year {
///     fn name(&self) -> &str { "year" }
///     fn render(&self, _markup: &str, _ctx: &TagContext<'_>) -> Result<String, GramError> {
///         Ok("2014".to_owned())
///     }
/// }
///
/// let mut processor = TagProcessor::new().with_handler(Year);
/// let output = processor.process("(c) {% year %} {% unknown x %}").unwrap();
/// assert_eq!(output, "(c) 2014 {% unknown x %}");
/// ```
#[derive(Default)]
pub struct TagProcessor {
    handlers: Vec<Box<dyn TagHandler>>,
    source_path: Option<PathBuf>,
    fence: FenceTracker,
    warnings: Vec<String>,
    rendered: usize,
}

impl TagProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of the document being processed, reported to handlers.
    #[must_use]
    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Register a tag handler. A later handler with the same name is ignored.
    #[must_use]
    pub fn with_handler<H: TagHandler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Replace every handled tag in `input` with its rendered HTML.
    ///
    /// Line endings are preserved. Warnings and the rendered count are reset
    /// on each call, so they always describe the last document.
    ///
    /// # Errors
    ///
    /// Returns the first handler error, tagged with its line number.
    pub fn process(&mut self, input: &str) -> Result<String, ProcessError> {
        self.fence = FenceTracker::new();
        self.warnings.clear();
        self.rendered = 0;

        let mut output = String::with_capacity(input.len());
        for (idx, line) in input.split_inclusive('\n').enumerate() {
            let (content, ending) = split_line_ending(line);
            let processed = self.process_line(content, idx + 1)?;
            output.push_str(&processed);
            output.push_str(ending);
        }

        if self.fence.in_fence() {
            self.warn("unclosed code fence at end of document".to_owned());
        }

        Ok(output)
    }

    fn process_line(&mut self, line: &str, line_num: usize) -> Result<String, ProcessError> {
        self.fence.update(line);
        if self.fence.in_fence() {
            return Ok(line.to_owned());
        }

        let mut result = String::with_capacity(line.len());
        let mut remaining = line;

        while let Some(found) = find_tag(remaining) {
            match found {
                TagMatch::Tag {
                    name,
                    markup,
                    start,
                    end,
                } => {
                    result.push_str(&remaining[..start]);
                    match self.dispatch(name, markup, line_num)? {
                        Some(html) => result.push_str(&html),
                        None => result.push_str(&remaining[start..end]),
                    }
                    remaining = &remaining[end..];
                }
                TagMatch::Invalid { end, .. } => {
                    result.push_str(&remaining[..end]);
                    remaining = &remaining[end..];
                }
                TagMatch::Unterminated { .. } => {
                    self.warn(format!("line {line_num}: unterminated {{% tag"));
                    break;
                }
            }
        }

        result.push_str(remaining);
        Ok(result)
    }

    /// Render one tag. Returns `None` when no handler is registered for `name`.
    fn dispatch(
        &mut self,
        name: &str,
        markup: &str,
        line_num: usize,
    ) -> Result<Option<String>, ProcessError> {
        let Some(handler) = self.handlers.iter().find(|h| h.name() == name) else {
            return Ok(None);
        };

        let ctx = TagContext {
            source_path: self.source_path.as_deref(),
            line: line_num,
        };
        let html = handler.render(markup, &ctx).map_err(|source| ProcessError {
            line: line_num,
            tag: name.to_owned(),
            source,
        })?;

        self.rendered += 1;
        Ok(Some(html))
    }

    fn warn(&mut self, message: String) {
        match &self.source_path {
            Some(path) => tracing::warn!(path = %path.display(), "{message}"),
            None => tracing::warn!("{message}"),
        }
        self.warnings.push(message);
    }

    /// Path of the document being processed, if set.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Number of tags rendered so far.
    #[must_use]
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Warnings collected during processing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Split a line from `split_inclusive('\n')` into content and line ending.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}
