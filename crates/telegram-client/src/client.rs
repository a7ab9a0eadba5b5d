//! Bot API HTTP client.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::{
    AnswerCallbackQueryParams, GetUpdatesParams, Message, SendMessageParams, Update, User,
};

/// Update kinds the bot asks the server for.
const ALLOWED_UPDATES: [&str; 2] = ["message", "callback_query"];

/// Every Bot API response is wrapped in this envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i32>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Result<T, ApiError> {
        if !self.ok {
            return Err(ApiError::Api {
                code: self.error_code.unwrap_or(-1),
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        self.result
            .ok_or_else(|| ApiError::MissingResult(method.to_string()))
    }
}

/// Client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    config: ClientConfig,
}

impl TelegramClient {
    /// Build a client without contacting the server.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        if config.token.trim().is_empty() {
            return Err(ApiError::Config("bot token is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { http, config })
    }

    /// Build a client and verify the token with `getMe`.
    pub async fn connect(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Self::new(config)?;
        let me = client.get_me().await?;
        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or(""),
            "Connected to Bot API at {}",
            client.config.api_base
        );
        Ok(client)
    }

    /// Identity of the bot behind the token.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.call::<(), _>("getMe", None).await
    }

    /// Long-poll for updates after `offset`.
    ///
    /// `timeout` of zero returns immediately.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: Duration,
    ) -> Result<Vec<Update>, ApiError> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout.as_secs(),
            allowed_updates: ALLOWED_UPDATES.iter().map(|s| s.to_string()).collect(),
        };
        self.call("getUpdates", Some(params)).await
    }

    /// Send a message, optionally with an inline keyboard.
    pub async fn send_message(&self, params: SendMessageParams) -> Result<Message, ApiError> {
        self.call("sendMessage", Some(params)).await
    }

    /// Send plain text to a chat.
    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<Message, ApiError> {
        self.send_message(SendMessageParams::text(chat_id, text))
            .await
    }

    /// Dismiss the loading indicator on a pressed button.
    pub async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), ApiError> {
        let params = AnswerCallbackQueryParams {
            callback_query_id: callback_query_id.to_string(),
            text: None,
        };
        let _: bool = self.call("answerCallbackQuery", Some(params)).await?;
        Ok(())
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Make a Bot API call.
    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<P>,
    ) -> Result<R, ApiError> {
        // The URL embeds the token; log the method only.
        debug!("API call: {}", method);

        let mut request = self.http.post(self.config.method_url(method));
        if let Some(params) = &params {
            request = request.json(params);
        }

        let response = request.send().await.map_err(|e| ApiError::Http(e.without_url()))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| ApiError::Http(e.without_url()))?;
        decode_body(method, status, &body)
    }
}

/// Decode a response body.
///
/// Error answers from the API still carry the JSON envelope. A non-JSON body
/// with a failing status comes from something in front of the API (a proxy
/// or gateway), and is reported with the HTTP status code.
fn decode_body<R: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<R, ApiError> {
    match serde_json::from_slice::<ApiResponse<R>>(body) {
        Ok(envelope) => envelope.into_result(method),
        Err(_) if !status.is_success() => Err(ApiError::Api {
            code: i32::from(status.as_u16()),
            description: status
                .canonical_reason()
                .unwrap_or("non-JSON error response")
                .to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .finish()
    }
}
