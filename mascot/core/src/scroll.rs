//! Scroll Synchronizer
//!
//! Keeps the message viewport pinned to its latest content. Pure side-effect
//! state: whenever the content grows, the offset jumps to the maximum.
//! Idempotent - re-syncing unchanged content changes nothing.

/// Bottom-pinned scroll state for the message viewport
#[derive(Clone, Copy, Debug)]
pub struct ScrollSync {
    /// Visible rows in the viewport
    viewport_rows: usize,
    /// Current scroll offset (first visible row)
    offset: usize,
}

impl ScrollSync {
    /// Create a synchronizer for a viewport of the given height
    #[must_use]
    pub fn new(viewport_rows: usize) -> Self {
        Self {
            viewport_rows,
            offset: 0,
        }
    }

    /// Current scroll offset
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Viewport height in rows
    #[must_use]
    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    /// Resize the viewport and re-pin against the given content height
    pub fn set_viewport(&mut self, viewport_rows: usize, content_rows: usize) {
        self.viewport_rows = viewport_rows;
        self.sync(content_rows);
    }

    /// Pin the viewport to the bottom of `content_rows` rows of content.
    ///
    /// Returns the resulting offset.
    pub fn sync(&mut self, content_rows: usize) -> usize {
        self.offset = content_rows.saturating_sub(self.viewport_rows);
        self.offset
    }
}
