use tvtms_model::{Diagnostic, Reference};

/// What one token parsed into. Failures never surface as errors; they are
/// an empty ref list plus diagnostics for the log sink.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub refs: Vec<Reference>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty() && self.diagnostics.is_empty()
    }

    pub fn single(reference: Reference) -> Self {
        Self {
            refs: vec![reference],
            diagnostics: Vec::new(),
        }
    }
}
