//! Tag processing context.

use std::path::Path;

/// Source location handed to a [`TagHandler`](super::TagHandler) with each tag.
#[derive(Debug, Clone, Copy)]
pub struct TagContext<'a> {
    /// Path to the document being processed (if known).
    pub source_path: Option<&'a Path>,
    /// Line number where the tag appears (1-indexed).
    pub line: usize,
}

impl TagContext<'_> {
    /// Human-readable location, `path:line` or `line N`.
    #[must_use]
    pub fn location(&self) -> String {
        match self.source_path {
            Some(path) => format!("{}:{}", path.display(), self.line),
            None => format!("line {}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_with_path() {
        let ctx = TagContext {
            source_path: Some(Path::new("content/post.md")),
            line: 12,
        };
        assert_eq!(ctx.location(), "content/post.md:12");
    }

    #[test]
    fn test_location_without_path() {
        let ctx = TagContext {
            source_path: None,
            line: 3,
        };
        assert_eq!(ctx.location(), "line 3");
    }
}
