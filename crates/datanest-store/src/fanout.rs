//! Serializer fan-out for harvest batches.
//!
//! Policy: every registered serializer is attempted for every batch, in
//! registration order, even when an earlier one fails. Failures are
//! collected and raised as one aggregate error after all targets have run —
//! fail-loud, but no target is starved by another's failure.

use crate::error::StoreError;
use crate::payload::SerializedPayload;
use crate::ports::PayloadSink;

/// One output format: consumes a batch of typed records, produces the
/// format-specific payload(s).
pub trait BatchSerializer<R>: Send + Sync {
    fn name(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] when the batch cannot be
    /// converted to this serializer's format.
    fn build(&self, batch: &[R]) -> Result<Vec<SerializedPayload>, StoreError>;
}

/// Ordered collection of serializers a batch is fanned out to.
pub struct FanOut<R> {
    serializers: Vec<Box<dyn BatchSerializer<R>>>,
}

impl<R> Default for FanOut<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> FanOut<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            serializers: Vec::new(),
        }
    }

    #[must_use]
    pub fn register(mut self, serializer: Box<dyn BatchSerializer<R>>) -> Self {
        self.serializers.push(serializer);
        self
    }

    /// Serializes `batch` through every registered serializer and stores the
    /// resulting payloads through `sink`.
    ///
    /// The caller guarantees the batch is non-empty; an empty flush is a
    /// bug upstream.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Fanout`] aggregating every serializer/store
    /// failure after all registered serializers have been attempted.
    pub async fn store_batch<S: PayloadSink + Sync>(
        &self,
        sink: &S,
        batch: &[R],
    ) -> Result<(), StoreError> {
        debug_assert!(!batch.is_empty(), "batches are never flushed empty");

        let mut failures: Vec<String> = Vec::new();
        for serializer in &self.serializers {
            match serializer.build(batch) {
                Ok(payloads) => {
                    for payload in payloads {
                        if let Err(e) = sink.store(&payload).await {
                            tracing::error!(
                                serializer = serializer.name(),
                                backend = %payload.backend,
                                error = %e,
                                "payload store failed"
                            );
                            failures.push(format!("{}: {e}", serializer.name()));
                            break;
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        serializer = serializer.name(),
                        error = %e,
                        "batch serialization failed"
                    );
                    failures.push(format!("{}: {e}", serializer.name()));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Fanout {
                attempted: self.serializers.len(),
                failed: failures.len(),
                summary: failures.join("; "),
            })
        }
    }
}
