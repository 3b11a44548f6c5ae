use crate::cancel::CancellationToken;
use crate::listings::placeholder::fetch_or_placeholder;
use crate::listings::traits::ListingSource;
use crate::models::{Property, PropertyId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

/// Progressive reveal hook, called with everything resolved so far
pub type BatchCallback<'a> = &'a mut (dyn FnMut(&[Property]) + Send);

/// Result of a batched fetch
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub properties: Vec<Property>,
    pub cancelled: bool,
}

/// Resolves listing ids in fixed-size groups with a pause between groups,
/// which keeps us under the feed's rate limit.
pub struct BatchFetcher {
    source: Arc<dyn ListingSource>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchFetcher {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self::with_batching(source, DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY)
    }

    pub fn with_batching(
        source: Arc<dyn ListingSource>,
        batch_size: usize,
        batch_delay: Duration,
    ) -> Self {
        Self {
            source,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetch every id in order, one call at a time.
    ///
    /// Failed lookups become placeholders. `on_batch` fires after each
    /// completed batch. Once `cancel` trips the call in flight is dropped,
    /// no further calls are made, and `on_batch` is not invoked again.
    pub async fn fetch_all(
        &self,
        ids: &[PropertyId],
        cancel: &CancellationToken,
        on_batch: BatchCallback<'_>,
    ) -> FetchOutcome {
        let mut properties = Vec::with_capacity(ids.len());
        let batches = ids.chunks(self.batch_size).count();

        for (n, batch) in ids.chunks(self.batch_size).enumerate() {
            if n > 0 {
                tokio::select! {
                    _ = cancel.cancelled() => return FetchOutcome::cancelled(properties),
                    _ = tokio::time::sleep(self.batch_delay) => {}
                }
            }

            for id in batch {
                if cancel.is_cancelled() {
                    return FetchOutcome::cancelled(properties);
                }
                let property = tokio::select! {
                    _ = cancel.cancelled() => return FetchOutcome::cancelled(properties),
                    property = fetch_or_placeholder(self.source.as_ref(), id) => property,
                };
                properties.push(property);
            }

            if cancel.is_cancelled() {
                return FetchOutcome::cancelled(properties);
            }
            debug!("Batch {}/{} done, {} listings resolved", n + 1, batches, properties.len());
            on_batch(&properties);
        }

        info!(
            "Resolved {} listings from {} in {} batches",
            properties.len(),
            self.source.source_name(),
            batches
        );
        FetchOutcome {
            properties,
            cancelled: false,
        }
    }
}

impl FetchOutcome {
    fn cancelled(properties: Vec<Property>) -> Self {
        info!("Listing fetch cancelled after {} listings", properties.len());
        Self {
            properties,
            cancelled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListingsError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Records call times; fails for ids starting with "bad"
    #[derive(Default)]
    struct Recording {
        calls: Mutex<Vec<(PropertyId, Instant)>>,
    }

    #[async_trait]
    impl ListingSource for Recording {
        async fn fetch(&self, id: &PropertyId) -> Result<Property, ListingsError> {
            self.calls.lock().unwrap().push((id.clone(), Instant::now()));
            if id.as_str().starts_with("bad") {
                return Err(ListingsError::Status {
                    id: id.clone(),
                    status: 500,
                });
            }
            let mut property = Property::new(id.clone());
            property.address = format!("{} Main St", id);
            Ok(property)
        }

        fn source_name(&self) -> &'static str {
            "recording"
        }
    }

    fn ids(n: usize) -> Vec<PropertyId> {
        (0..n).map(|i| PropertyId::new(format!("p{i}"))).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_after_each_batch_and_waits_between() {
        let source = Arc::new(Recording::default());
        let fetcher = BatchFetcher::with_batching(source.clone(), 5, Duration::from_secs(1));
        let mut reveals = Vec::new();
        let mut on_batch = |so_far: &[Property]| reveals.push(so_far.len());

        let start = Instant::now();
        let outcome = fetcher
            .fetch_all(&ids(12), &CancellationToken::new(), &mut on_batch)
            .await;

        assert!(!outcome.cancelled);
        assert_eq!(outcome.properties.len(), 12);
        assert_eq!(reveals, [5, 10, 12]);
        // two pauses, none after the final batch
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(3));

        let calls = source.calls.lock().unwrap();
        let order: Vec<_> = calls.iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(order, ids(12));
        assert!(calls[5].1 - calls[4].1 >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn failures_become_placeholders_in_place() {
        let fetcher = BatchFetcher::new(Arc::new(Recording::default()));
        let wanted = vec![PropertyId::new("good"), PropertyId::new("bad-1")];
        let outcome = fetcher
            .fetch_all(&wanted, &CancellationToken::new(), &mut |_: &[Property]| {})
            .await;

        assert!(!outcome.properties[0].is_placeholder);
        assert!(outcome.properties[1].is_placeholder);
        assert_eq!(outcome.properties[1].id.as_str(), "bad-1");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_delay_stops_further_calls() {
        let source = Arc::new(Recording::default());
        let fetcher = BatchFetcher::with_batching(source.clone(), 2, Duration::from_secs(10));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let mut reveals = 0;
        let mut on_batch = |_: &[Property]| reveals += 1;
        let outcome = fetcher.fetch_all(&ids(6), &cancel, &mut on_batch).await;

        assert!(outcome.cancelled);
        assert_eq!(outcome.properties.len(), 2);
        assert_eq!(reveals, 1);
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }

    /// Never answers
    struct Hanging;

    #[async_trait]
    impl ListingSource for Hanging {
        async fn fetch(&self, _: &PropertyId) -> Result<Property, ListingsError> {
            std::future::pending().await
        }

        fn source_name(&self) -> &'static str {
            "hanging"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_call_in_flight() {
        let fetcher = BatchFetcher::new(Arc::new(Hanging));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let outcome = fetcher
            .fetch_all(&ids(3), &cancel, &mut |_: &[Property]| {})
            .await;

        assert!(outcome.cancelled);
        assert!(outcome.properties.is_empty());
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let source = Arc::new(Recording::default());
        let fetcher = BatchFetcher::new(source.clone());
        let mut reveals = 0;
        let mut on_batch = |_: &[Property]| reveals += 1;
        let outcome = fetcher
            .fetch_all(&[], &CancellationToken::new(), &mut on_batch)
            .await;
        assert!(outcome.properties.is_empty());
        assert_eq!(reveals, 0);
        assert!(source.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let fetcher =
            BatchFetcher::with_batching(Arc::new(Recording::default()), 0, Duration::ZERO);
        assert_eq!(fetcher.batch_size(), 1);
    }
}
