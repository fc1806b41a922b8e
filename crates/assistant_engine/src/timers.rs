use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::TimerKey;

struct Entry {
    generation: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct Inner {
    next_generation: u64,
    entries: HashMap<TimerKey, Entry>,
}

/// Live timers and the tokens that stop them.
///
/// Every scheduled timer owns one entry. Cancelling removes the entry; a
/// timer that finishes on its own removes it through `forget`, which only
/// matches its own generation so a newer timer under the same key survives.
#[derive(Clone, Default)]
pub struct TimerTable {
    inner: Arc<Mutex<Inner>>,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token` under `key` and returns its generation. A previous
    /// timer under the same key is cancelled.
    pub fn register(&self, key: TimerKey, token: CancellationToken) -> u64 {
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        if let Some(previous) = inner.entries.insert(key, Entry { generation, token }) {
            previous.token.cancel();
        }
        generation
    }

    pub fn cancel(&self, key: &TimerKey) -> bool {
        match self.lock().entries.remove(key) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn forget(&self, key: &TimerKey, generation: u64) {
        let mut inner = self.lock();
        if inner
            .entries
            .get(key)
            .is_some_and(|entry| entry.generation == generation)
        {
            inner.entries.remove(key);
        }
    }

    pub fn cancel_all(&self) -> usize {
        let drained: Vec<Entry> = self.lock().entries.drain().map(|(_, e)| e).collect();
        for entry in &drained {
            entry.token.cancel();
        }
        drained.len()
    }

    pub fn contains(&self, key: &TimerKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use super::TimerTable;
    use crate::TimerKey;

    fn key(id: &str) -> TimerKey {
        TimerKey::Upload(id.to_string())
    }

    #[test]
    fn cancel_fires_token_and_removes_entry() {
        let table = TimerTable::new();
        let token = CancellationToken::new();
        table.register(key("a"), token.clone());

        assert!(table.cancel(&key("a")));
        assert!(token.is_cancelled());
        assert!(table.is_empty());
        assert!(!table.cancel(&key("a")));
    }

    #[test]
    fn re_registering_cancels_previous_timer() {
        let table = TimerTable::new();
        let first = CancellationToken::new();
        let second = CancellationToken::new();
        let old_generation = table.register(key("a"), first.clone());
        table.register(key("a"), second.clone());

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        // The stale timer finishing must not evict its replacement.
        table.forget(&key("a"), old_generation);
        assert!(table.contains(&key("a")));
    }

    #[test]
    fn cancel_all_drains_every_entry() {
        let table = TimerTable::new();
        let tokens: Vec<_> = (0..3).map(|_| CancellationToken::new()).collect();
        for (i, token) in tokens.iter().enumerate() {
            table.register(key(&i.to_string()), token.clone());
        }

        assert_eq!(table.cancel_all(), 3);
        assert!(tokens.iter().all(CancellationToken::is_cancelled));
        assert_eq!(table.len(), 0);
    }
}
