//! Retrying search with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::client::GeoClient;
use crate::error::GeoError;
use crate::models::{Poi, SearchOptions};

/// Suspension point between retry attempts, injectable so tests can
/// observe the delay sequence without real timers.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Retry [`GeoClient::search_communities`] up to `max_retries` times.
///
/// Inter-attempt delays grow as `2^attempt_index` seconds (1s, 2s,
/// 4s, …); the final attempt has no trailing delay. The first success
/// resolves immediately; once the budget is spent the last underlying
/// error is surfaced wrapped in [`GeoError::RetriesExhausted`].
/// `max_retries` below 1 is treated as 1.
pub async fn search_with_retry(
    client: &GeoClient,
    options: &SearchOptions,
    max_retries: u32,
) -> Result<Vec<Poi>, GeoError> {
    search_with_retry_using(client, options, max_retries, &TokioSleeper).await
}

/// [`search_with_retry`] with an injectable [`Sleeper`].
pub async fn search_with_retry_using(
    client: &GeoClient,
    options: &SearchOptions,
    max_retries: u32,
    sleeper: &dyn Sleeper,
) -> Result<Vec<Poi>, GeoError> {
    let max_retries = max_retries.max(1);
    let mut attempt = 0u32;

    loop {
        match client.search_communities(options).await {
            Ok(result) => return Ok(result),
            Err(error) => {
                attempt += 1;
                if attempt >= max_retries {
                    return Err(GeoError::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(error),
                    });
                }

                let delay = Duration::from_secs(1u64 << (attempt - 1));
                warn!(
                    "Search attempt {}/{} failed: {}; retrying in {:?}",
                    attempt, max_retries, error, delay
                );
                sleeper.sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::MockProvider;
    use std::sync::atomic::Ordering;
    use std::sync::{Arc, Mutex};

    /// Records requested delays without sleeping.
    #[derive(Default)]
    struct RecordingSleeper(Mutex<Vec<Duration>>);

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.0.lock().unwrap().push(duration);
        }
    }

    #[tokio::test]
    async fn test_exhaustion_after_exact_attempts_and_delays() {
        let provider = Arc::new(MockProvider::failing(500));
        let client = GeoClient::new(Some(provider.clone()));
        let sleeper = RecordingSleeper::default();

        let err =
            search_with_retry_using(&client, &SearchOptions::default(), 3, &sleeper)
                .await
                .unwrap_err();

        assert_eq!(provider.search_call_count(), 3);
        assert_eq!(
            *sleeper.0.lock().unwrap(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
        match err {
            GeoError::RetriesExhausted { attempts, source } => {
                assert_eq!(attempts, 3);
                assert!(matches!(*source, GeoError::SearchFailed(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let provider =
            MockProvider::with_communities(&[("阳光小区", "金台路1号", 115.81, 39.27)]);
        provider.fail_next.store(1, Ordering::SeqCst);
        let provider = Arc::new(provider);
        let client = GeoClient::new(Some(provider.clone()));
        let sleeper = RecordingSleeper::default();

        let pois = search_with_retry_using(&client, &SearchOptions::default(), 3, &sleeper)
            .await
            .unwrap();

        assert_eq!(pois.len(), 1);
        assert_eq!(provider.search_call_count(), 2);
        assert_eq!(*sleeper.0.lock().unwrap(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_first_success_has_no_delay() {
        let provider = Arc::new(MockProvider::with_communities(&[(
            "阳光小区",
            "金台路1号",
            115.81,
            39.27,
        )]));
        let client = GeoClient::new(Some(provider.clone()));
        let sleeper = RecordingSleeper::default();

        search_with_retry_using(&client, &SearchOptions::default(), 3, &sleeper)
            .await
            .unwrap();

        assert_eq!(provider.search_call_count(), 1);
        assert!(sleeper.0.lock().unwrap().is_empty());
    }
}
