/// Ticket handed out before a load request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Monotonic counter of the load requests of one collection
///
/// Only the response to the most recently issued request may replace the collection.
#[derive(Debug, Default)]
pub struct RequestGenerations {
    latest: u64,
}

impl RequestGenerations {
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }
}
