use tvtms_model::BookId;

/// Carries the most recently seen explicit book through a row fold.
///
/// Verse-only and chapter-only tokens are resolvable only against the last
/// explicit book on a prior row, so the context is an explicit value
/// threaded through the fold, never shared state. A chunked scheme stays
/// correct as long as each chunk starts from the previous chunk's handoff.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    current_book: Option<BookId>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a context from a prior fold's last-known book.
    pub fn with_book(book: BookId) -> Self {
        Self {
            current_book: Some(book),
        }
    }

    pub fn current_book(&self) -> Option<&BookId> {
        self.current_book.as_ref()
    }

    /// Record an explicitly spelled book; later context-dependent tokens
    /// resolve against it.
    pub fn observe_book(&mut self, book: &BookId) {
        self.current_book = Some(book.clone());
    }
}
