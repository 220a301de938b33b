use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks which preview read is the newest.
///
/// Every selection takes a ticket; only the holder of the latest ticket may
/// write the preview source, so a slow read of an older file cannot overwrite
/// a newer one.
#[derive(Debug, Default)]
pub struct PreviewGeneration {
    latest: AtomicU64,
}

/// Ticket for one preview read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl PreviewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new read, superseding all earlier tickets
    pub fn begin(&self) -> GenerationTicket {
        GenerationTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_ticket_is_current() {
        let generation = PreviewGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn tickets_are_distinct() {
        let generation = PreviewGeneration::new();
        assert_ne!(generation.begin(), generation.begin());
    }
}
