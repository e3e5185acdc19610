//! Bounded summarization fan-out.
//!
//! Chunks are summarized in parallel with a concurrency cap and a per-call
//! timeout. A failed or timed-out chunk degrades to a placeholder instead of
//! failing the request; results always come back in input order, one per
//! chunk.

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::warn;

use attune_llm::Summarizer;

/// Placeholder substituted for a chunk whose summarization failed.
pub const SUMMARY_UNAVAILABLE: &str = "[Summary unavailable]";

/// Fan-out tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct FanoutConfig {
    /// Maximum summarization calls in flight at once.
    pub concurrency: usize,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Summarize every chunk, degrading failures to [`SUMMARY_UNAVAILABLE`].
///
/// The returned vector has exactly one entry per input chunk, in input
/// order, regardless of completion order or failures.
pub async fn summarize_chunks<S: Summarizer + ?Sized>(
    summarizer: &S,
    chunks: &[String],
    config: &FanoutConfig,
) -> Vec<String> {
    // Collect the (not yet polled) futures eagerly: mapping lazily inside
    // the stream would require the closure to be higher-ranked over the
    // borrow lifetime, which fails axum's handler bound checks downstream.
    let futures: Vec<_> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| summarize_one(summarizer, index, chunk, config))
        .collect();
    stream::iter(futures)
        .buffered(config.concurrency.max(1))
        .collect()
        .await
}

// Named helper instead of an inline async block: an async block capturing
// borrows inside a closure produces a future whose lifetime is not
// universally quantified, which fails axum's handler bound checks downstream.
async fn summarize_one<S: Summarizer + ?Sized>(
    summarizer: &S,
    index: usize,
    chunk: &str,
    config: &FanoutConfig,
) -> String {
    match tokio::time::timeout(config.timeout, summarizer.summarize(chunk, false)).await {
        Ok(Ok(summary)) => summary,
        Ok(Err(e)) => {
            warn!(index, error = %e, "chunk summarization failed");
            SUMMARY_UNAVAILABLE.to_owned()
        }
        Err(_) => {
            warn!(index, timeout_ms = config.timeout.as_millis() as u64, "chunk summarization timed out");
            SUMMARY_UNAVAILABLE.to_owned()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use attune_llm::{LlmError, Result as LlmResult};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails for chunks containing "FAIL", hangs for chunks containing
    /// "HANG", echoes a summary otherwise. Tracks peak concurrency.
    struct FakeSummarizer {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        delay: Duration,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSummarizer {
        fn new(delay: Duration) -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
                delay,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Summarizer for FakeSummarizer {
        async fn summarize(&self, text: &str, _concise: bool) -> LlmResult<String> {
            self.calls.lock().unwrap().push(text.to_owned());
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _ = self.peak.fetch_max(current, Ordering::SeqCst);

            if text.contains("HANG") {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            } else {
                tokio::time::sleep(self.delay).await;
            }

            let _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if text.contains("FAIL") {
                return Err(LlmError::Api {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(format!("summary of {text}"))
        }
    }

    fn chunks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| (*t).to_owned()).collect()
    }

    #[tokio::test]
    async fn results_in_input_order() {
        let summarizer = FakeSummarizer::new(Duration::ZERO);
        let results = summarize_chunks(
            &summarizer,
            &chunks(&["alpha", "beta", "gamma"]),
            &FanoutConfig::default(),
        )
        .await;
        assert_eq!(
            results,
            vec!["summary of alpha", "summary of beta", "summary of gamma"]
        );
    }

    #[tokio::test]
    async fn failed_chunk_degrades_to_placeholder_in_place() {
        let summarizer = FakeSummarizer::new(Duration::ZERO);
        let results = summarize_chunks(
            &summarizer,
            &chunks(&["first", "FAIL middle", "last"]),
            &FanoutConfig::default(),
        )
        .await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], "summary of first");
        assert_eq!(results[1], SUMMARY_UNAVAILABLE);
        assert_eq!(results[2], "summary of last");
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_chunk_degrades_to_placeholder() {
        let summarizer = FakeSummarizer::new(Duration::ZERO);
        let config = FanoutConfig {
            concurrency: 4,
            timeout: Duration::from_secs(30),
        };
        let results =
            summarize_chunks(&summarizer, &chunks(&["ok", "HANG forever"]), &config).await;
        assert_eq!(results, vec!["summary of ok".to_owned(), SUMMARY_UNAVAILABLE.to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrency_is_bounded() {
        let summarizer = FakeSummarizer::new(Duration::from_millis(50));
        let config = FanoutConfig {
            concurrency: 2,
            timeout: Duration::from_secs(30),
        };
        let texts: Vec<String> = (0..8).map(|i| format!("chunk {i}")).collect();
        let results = summarize_chunks(&summarizer, &texts, &config).await;

        assert_eq!(results.len(), 8);
        assert!(summarizer.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn empty_chunks_yield_empty_results() {
        let summarizer = FakeSummarizer::new(Duration::ZERO);
        let results = summarize_chunks(&summarizer, &[], &FanoutConfig::default()).await;
        assert!(results.is_empty());
        assert!(summarizer.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn every_chunk_is_attempted() {
        let summarizer = FakeSummarizer::new(Duration::ZERO);
        let texts = chunks(&["a", "FAIL b", "c"]);
        let _ = summarize_chunks(&summarizer, &texts, &FanoutConfig::default()).await;
        assert_eq!(summarizer.calls.lock().unwrap().len(), 3);
    }
}
