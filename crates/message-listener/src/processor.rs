//! Message processor that connects the update stream to the conversation engine.

use checkin_core::{
    transition, DeliveryError, EngineConfig, Messenger, TransitionContext, UserRecord,
};
use checkin_store::{StoreError, UserStore};
use futures::{Stream, StreamExt};
use telegram_client::{ApiError, Update};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::inbound::Inbound;

/// Configuration for the message processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Behaviour switches passed to every transition.
    pub engine: EngineConfig,
}

impl ProcessorConfig {
    pub fn with_engine(engine: EngineConfig) -> Self {
        Self { engine }
    }
}

/// Errors that can occur during message processing.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Saving the user table failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A reply could not be delivered.
    #[error("delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Error from the update stream.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The update stream ended unexpectedly.
    #[error("update stream ended")]
    StreamEnded,
}

/// Result of processing a single update.
#[derive(Debug)]
pub enum ProcessResult {
    /// The event was applied and every reply delivered.
    Responded {
        user_id: String,
        replies: usize,
        saved: bool,
    },
    /// Update was skipped (bot sender, blank text, unknown command or button).
    Skipped { reason: String },
    /// Error occurred during processing.
    Error(ProcessorError),
}

/// Receives updates and runs each one through the engine.
///
/// Updates are handled one at a time: load, transition, save, send.
pub struct MessageProcessor<S: UserStore, M: Messenger> {
    store: S,
    messenger: M,
    config: ProcessorConfig,
}

impl<S: UserStore, M: Messenger> MessageProcessor<S, M> {
    /// Create a new message processor.
    pub fn new(store: S, messenger: M, config: ProcessorConfig) -> Self {
        Self {
            store,
            messenger,
            config,
        }
    }

    /// Create a processor with default configuration.
    pub fn with_defaults(store: S, messenger: M) -> Self {
        Self::new(store, messenger, ProcessorConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Decode and process one raw update.
    pub async fn process_update(&self, update: &Update) -> ProcessResult {
        match Inbound::from_update(update) {
            Ok(inbound) => self.process(&inbound).await,
            Err(reason) => {
                debug!(update_id = update.update_id, "Skipping update: {}", reason);
                ProcessResult::Skipped { reason }
            }
        }
    }

    /// Process a single decoded update and return the result.
    pub async fn process(&self, inbound: &Inbound) -> ProcessResult {
        if let Some(callback_id) = inbound.callback_id() {
            if let Err(e) = self.messenger.acknowledge(callback_id).await {
                warn!(user_id = %inbound.user_id, "Failed to acknowledge button: {}", e);
            }
        }

        let Some(event) = inbound.event() else {
            debug!(user_id = %inbound.user_id, "Skipping unknown button");
            return ProcessResult::Skipped {
                reason: "unknown callback data".to_string(),
            };
        };

        let mut table = self.store.load().await;
        let before = table.get(&inbound.user_id).cloned();

        let mut record = before.clone().unwrap_or_else(UserRecord::new);
        record.chat_id = Some(inbound.chat_id);

        let kind = event.kind();
        let ctx = TransitionContext::new(&self.config.engine, chrono::Utc::now());
        let result = transition(&record, &ctx, event);

        info!(
            user_id = %inbound.user_id,
            event = kind,
            from = ?record.state,
            to = ?result.record.state,
            "Applied event"
        );

        let saved = before.as_ref() != Some(&result.record);
        if saved {
            table.insert(inbound.user_id.clone(), result.record);
            if let Err(e) = self.store.save(&table).await {
                error!(user_id = %inbound.user_id, "Failed to save user table: {}", e);
                return ProcessResult::Error(ProcessorError::Store(e));
            }
        }

        for reply in &result.replies {
            if let Err(e) = self.messenger.send(inbound.chat_id, reply).await {
                error!(
                    user_id = %inbound.user_id,
                    chat_id = %inbound.chat_id,
                    "Failed to send reply: {}",
                    e
                );
                return ProcessResult::Error(ProcessorError::Delivery(e));
            }
        }

        ProcessResult::Responded {
            user_id: inbound.user_id.clone(),
            replies: result.replies.len(),
            saved,
        }
    }

    fn log_result(result: ProcessResult) {
        match result {
            ProcessResult::Responded {
                user_id, replies, ..
            } => {
                debug!("Responded to {} with {} message(s)", user_id, replies);
            }
            ProcessResult::Skipped { reason } => {
                debug!("Skipped: {}", reason);
            }
            ProcessResult::Error(e) => {
                // Log but continue processing
                warn!("Error processing update: {}", e);
            }
        }
    }

    /// Run the processor over `updates` with graceful shutdown support.
    ///
    /// This method runs until either:
    /// - The provided shutdown signal completes
    /// - The update stream ends
    ///
    /// # Example
    ///
    /// ```no_run
    /// use checkin_store::JsonFileStore;
    /// use message_listener::{MessageProcessor, TelegramMessenger};
    /// use telegram_client::{ClientConfig, TelegramClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = TelegramClient::connect(ClientConfig::new("123:token")).await?;
    /// let updates = telegram_client::subscribe(&client);
    /// let processor =
    ///     MessageProcessor::with_defaults(JsonFileStore::default(), TelegramMessenger::new(client));
    ///
    /// let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
    /// # drop(stop);
    /// processor
    ///     .run_with_shutdown(updates, async {
    ///         let _ = stopped.await;
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_with_shutdown<St, F>(
        self,
        updates: St,
        shutdown_signal: F,
    ) -> Result<(), ProcessorError>
    where
        St: Stream<Item = Result<Update, ApiError>> + Send + Unpin,
        F: std::future::Future<Output = ()> + Send,
    {
        info!("Starting message processor (graceful shutdown enabled)");

        let mut updates = updates;
        tokio::pin!(shutdown_signal);

        loop {
            tokio::select! {
                biased;

                // Check for shutdown signal first
                () = &mut shutdown_signal => {
                    info!("Shutdown signal received, stopping message processor");
                    return Ok(());
                }

                // Then handle updates
                result = updates.next() => {
                    match result {
                        Some(Ok(update)) => {
                            Self::log_result(self.process_update(&update).await);
                        }
                        Some(Err(e)) => {
                            error!("Stream error: {}", e);
                            // Continue on stream errors - the poller backs off on its own
                        }
                        None => {
                            warn!("Update stream ended");
                            return Err(ProcessorError::StreamEnded);
                        }
                    }
                }
            }
        }
    }
}
