use crate::counter::MessageCounter;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default, Debug)]
pub struct InMemoryCounter {
    count: AtomicU64,
}

impl InMemoryCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessageCounter for InMemoryCounter {
    fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn current(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }
}
