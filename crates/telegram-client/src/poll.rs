//! Long-polling update stream.

use std::collections::VecDeque;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::types::Update;
use crate::TelegramClient;

/// Backoff applied between failed polls.
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Maximum consecutive failures before the stream ends (None = infinite).
    pub max_retries: Option<u32>,
    /// Delay after the first failure.
    pub initial_delay: Duration,
    /// Upper bound on the delay.
    pub max_delay: Duration,
    /// Multiplier applied per consecutive failure.
    pub backoff_multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl BackoffConfig {
    /// Calculate delay for a given attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }

    /// Check if we should retry after the given number of attempts.
    pub fn should_retry(&self, attempts: u32) -> bool {
        self.max_retries.map_or(true, |max| attempts < max)
    }
}

/// A stream of updates. Poll errors are yielded as items. The stream ends
/// once the backoff gives up, or right after an error that retrying cannot
/// fix (revoked token, another poller holding the bot).
pub type UpdateStream = BoxStream<'static, Result<Update, ApiError>>;

struct PollState {
    client: TelegramClient,
    backoff: BackoffConfig,
    offset: Option<i64>,
    pending: VecDeque<Update>,
    failures: u32,
    stopped: bool,
}

impl PollState {
    async fn next(mut self) -> Option<(Result<Update, ApiError>, Self)> {
        loop {
            if self.stopped {
                return None;
            }

            if let Some(update) = self.pending.pop_front() {
                return Some((Ok(update), self));
            }

            if self.failures > 0 {
                if !self.backoff.should_retry(self.failures) {
                    warn!(failures = self.failures, "Giving up on polling");
                    return None;
                }
                let delay = self.backoff.delay_for_attempt(self.failures - 1);
                debug!("Retrying poll in {:?}", delay);
                tokio::time::sleep(delay).await;
            }

            let timeout = self.client.config().poll_timeout;
            match self.client.get_updates(self.offset, timeout).await {
                Ok(updates) => {
                    if self.failures > 0 {
                        info!("Polling recovered");
                    }
                    self.failures = 0;
                    if let Some(last) = updates.last() {
                        self.offset = Some(last.update_id + 1);
                    }
                    debug!(count = updates.len(), "Received updates");
                    self.pending.extend(updates);
                }
                Err(e) if !e.is_transient() => {
                    error!("Poll failed permanently, stopping: {}", e);
                    self.stopped = true;
                    return Some((Err(e), self));
                }
                Err(e) => {
                    self.failures += 1;
                    warn!(failures = self.failures, "Poll failed: {}", e);
                    return Some((Err(e), self));
                }
            }
        }
    }
}

/// Subscribe to updates with the default backoff.
pub fn subscribe(client: &TelegramClient) -> UpdateStream {
    subscribe_with_backoff(client, BackoffConfig::default())
}

/// Subscribe to updates with a custom backoff.
///
/// Each received update advances the offset, so it is acknowledged by the
/// next poll and never delivered twice.
pub fn subscribe_with_backoff(client: &TelegramClient, backoff: BackoffConfig) -> UpdateStream {
    info!("Starting long-poll for updates");
    let state = PollState {
        client: client.clone(),
        backoff,
        offset: None,
        pending: VecDeque::new(),
        failures: 0,
        stopped: false,
    };
    stream::unfold(state, PollState::next).boxed()
}
