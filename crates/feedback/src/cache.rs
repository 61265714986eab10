//! Time-bounded cache for the message listing.
//!
//! Holds the last successful `list()` result so repeated dashboard views
//! within the TTL skip the full table scan. Failures are never stored, so a
//! retry always reaches the repository.
//!
//! Every invalidation bumps a generation counter. A listing read before an
//! invalidation is discarded instead of stored, so a slow scan that overlaps
//! a delete cannot resurrect the deleted row.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use feedback_core::message::FeedbackMessage;

#[derive(Debug, Clone)]
struct CachedList {
    messages: Vec<FeedbackMessage>,
    stored_at: Instant,
}

/// Shared listing cache with lazy expiration.
///
/// A zero TTL disables caching entirely.
#[derive(Debug, Clone)]
pub struct ListCache {
    slot: Arc<RwLock<Option<CachedList>>>,
    generation: Arc<AtomicU64>,
    ttl: Duration,
}

impl ListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Returns the cached listing if it is still fresh.
    pub async fn get(&self) -> Option<Vec<FeedbackMessage>> {
        if !self.is_enabled() {
            return None;
        }

        let slot = self.slot.read().await;
        match slot.as_ref() {
            Some(cached) if cached.stored_at.elapsed() < self.ttl => {
                tracing::trace!(count = cached.messages.len(), "List cache hit");
                Some(cached.messages.clone())
            }
            _ => None,
        }
    }

    /// Current invalidation generation. Read it before going to storage and
    /// hand it back to [`ListCache::store`].
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Stores `messages` unless the cache was invalidated after `generation`
    /// was read.
    pub async fn store(&self, generation: u64, messages: &[FeedbackMessage]) {
        if !self.is_enabled() {
            return;
        }

        let mut slot = self.slot.write().await;
        if self.generation() != generation {
            tracing::debug!("Discarding list read from before an invalidation");
            return;
        }

        *slot = Some(CachedList {
            messages: messages.to_vec(),
            stored_at: Instant::now(),
        });
    }

    /// Drops the cached listing so the next read goes to storage.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        if slot.take().is_some() {
            tracing::debug!("List cache invalidated");
        }
    }
}

impl Default for ListCache {
    fn default() -> Self {
        Self::disabled()
    }
}
