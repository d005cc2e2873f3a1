//! HTTP transport for the notes API.

use async_trait::async_trait;
use reqwest::{cookie::Jar, Client, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::{ClientError, ClientResult, NotesApi};
use crate::config::ClientConfig;
use crate::models::{ChatPrompt, ChatReply, Credentials, MessageResponse, NewNote, Note};

/// Configuration for the HTTP notes client
#[derive(Debug, Clone)]
pub struct HttpNotesApiConfig {
    /// Base URL for the notes API (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for HttpNotesApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl From<&ClientConfig> for HttpNotesApiConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            request_timeout_ms: config.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// `reqwest`-backed notes API.
///
/// Two clients are kept: `session` carries the cookie jar and is used where the
/// browser widget sends credentials (list, create, account calls); `anonymous`
/// has no cookie store and is used for delete and chat.
pub struct HttpNotesApi {
    session: Client,
    anonymous: Client,
    config: HttpNotesApiConfig,
}

impl HttpNotesApi {
    /// Create a new client with the given configuration
    pub fn new(config: HttpNotesApiConfig) -> ClientResult<Self> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let jar = Arc::new(Jar::default());

        let session = Client::builder()
            .timeout(timeout)
            .cookie_provider(jar)
            .build()?;
        let anonymous = Client::builder().timeout(timeout).build()?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.clone(),
            error: e.to_string(),
        })?;

        Ok(Self {
            session,
            anonymous,
            config: HttpNotesApiConfig { base_url, ..config },
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &HttpNotesApiConfig {
        &self.config
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.config.base_url)
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/notes/{}", self.config.base_url, urlencoding::encode(id))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    /// GET /notes/{id}
    pub async fn get_note(&self, id: &str) -> ClientResult<Note> {
        let response = self
            .session
            .get(self.note_url(id))
            .send()
            .await
            .map_err(ClientError::transport)?;

        read_json(response).await
    }

    /// PUT /notes/{id}
    pub async fn update_note(&self, id: &str, note: &NewNote) -> ClientResult<()> {
        let response = self
            .session
            .put(self.note_url(id))
            .json(note)
            .send()
            .await
            .map_err(ClientError::transport)?;

        expect_success(response).await
    }

    /// POST /register
    pub async fn register(&self, username: &str, password: &str) -> ClientResult<String> {
        self.account_call("register", username, password).await
    }

    /// POST /login; the session cookie is kept for later credentialed calls
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        self.account_call("login", username, password).await
    }

    /// GET /logout
    pub async fn logout(&self) -> ClientResult<String> {
        let response = self
            .session
            .get(self.url("logout"))
            .send()
            .await
            .map_err(ClientError::transport)?;

        let ack: MessageResponse = read_json(response).await?;
        Ok(ack.message)
    }

    async fn account_call(&self, path: &str, username: &str, password: &str) -> ClientResult<String> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .session
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let ack: MessageResponse = read_json(response).await?;
        tracing::debug!(username = %username, endpoint = %path, "Account call succeeded");
        Ok(ack.message)
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn list_notes(&self) -> ClientResult<Vec<Note>> {
        let response = self
            .session
            .get(self.notes_url())
            .send()
            .await
            .map_err(ClientError::transport)?;

        read_json(response).await
    }

    async fn create_note(&self, note: &NewNote) -> ClientResult<()> {
        let response = self
            .session
            .post(self.notes_url())
            .json(note)
            .send()
            .await
            .map_err(ClientError::transport)?;

        expect_success(response).await
    }

    async fn delete_note(&self, id: &str) -> ClientResult<()> {
        let response = self
            .anonymous
            .delete(self.note_url(id))
            .send()
            .await
            .map_err(ClientError::transport)?;

        expect_success(response).await
    }

    async fn chat(&self, prompt: &ChatPrompt) -> ClientResult<ChatReply> {
        let response = self
            .anonymous
            .post(format!("{}/ai", self.notes_url()))
            .json(prompt)
            .send()
            .await
            .map_err(ClientError::transport)?;

        read_json(response).await
    }
}

/// Turn a non-2xx response into [`ClientError::Status`]
async fn expect_success(response: Response) -> ClientResult<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(status_error(response).await)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }

    let text = response.text().await.map_err(ClientError::transport)?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn status_error(response: Response) -> ClientError {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(alias = "message")]
        error: String,
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}
