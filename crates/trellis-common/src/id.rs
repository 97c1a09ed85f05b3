//! Unique id generation.
//!
//! Each document owns its own [`IdSequence`], so two documents never share a
//! counter and tests can rewind a sequence with [`IdSequence::reset`].

/// Monotonic generator for `prefix-N` identifiers.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    next: u64,
}

impl IdSequence {
    /// Create a sequence whose first id is `{prefix}-1`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u64 {
        self.next - 1
    }

    /// Rewind the sequence to its first id.
    pub const fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new("trellis")
    }
}
