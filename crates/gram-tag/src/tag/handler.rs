//! Tag handler trait.

use crate::error::GramError;

use super::TagContext;

/// Handler for `{% name markup %}` tags.
///
/// # Thread Safety
///
/// Handlers implement `Send` only (not `Sync`) since each document gets its own
/// processor instance. For parallel document processing, create separate
/// processor instances per thread.
pub trait TagHandler: Send {
    /// Tag name matched against the first word inside `{% ... %}`.
    fn name(&self) -> &str;

    /// Render the tag's markup (the text after the name, trimmed) to HTML.
    ///
    /// An error aborts processing of the containing document.
    fn render(&self, markup: &str, ctx: &TagContext<'_>) -> Result<String, GramError>;
}
