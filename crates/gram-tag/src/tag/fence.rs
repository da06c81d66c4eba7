//! Fenced code block tracking.
//!
//! Tags written inside fenced code blocks are documentation, not directives,
//! and are left as-is.

/// Opening fence of the block currently being skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Tracks whether line-by-line processing is inside a fenced code block.
///
/// Fences open with three or more backticks or tildes. A block closes on a
/// line holding only the same marker, repeated at least as many times.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opened or closed a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();

        match self.open {
            Some(fence) if closes(trimmed, fence) => {
                self.open = None;
                true
            }
            Some(_) => false,
            None => {
                self.open = opening_fence(trimmed);
                self.open.is_some()
            }
        }
    }
}

fn opening_fence(trimmed: &str) -> Option<Fence> {
    let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}

fn closes(trimmed: &str, fence: Fence) -> bool {
    let len = trimmed.chars().take_while(|&c| c == fence.marker).count();
    // Marker chars are ASCII, so `len` is also a byte offset.
    len >= fence.len && trimmed[len..].trim().is_empty()
}
