//! HTTP client for the chat history and notification endpoints

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::wire::{ChatRecord, HistoryPayload, NotificationRequest};
use crate::application::errors::FetchError;
use crate::domain::entities::{Chat, Message, Session};
use crate::domain::traits::ChatService;

const HISTORY_PATH: &str = "/history";
const NOTIFICATION_PATH: &str = "/notification";

/// Talks to the API gateway over HTTP
pub struct HttpChatService {
    base_url: String,
    client: Client,
}

impl HttpChatService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get_history<T: DeserializeOwned>(&self, session: &Session, query: &[(&str, &str)]) -> Result<T, FetchError> {
        let response = self
            .client
            .get(self.url(HISTORY_PATH))
            .query(query)
            .header(AUTHORIZATION, session.token.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let body = read_body(response).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

/// Map the status class onto [`FetchError`] and return the body on success
async fn read_body(response: Response) -> Result<String, FetchError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound(response.url().path().to_string()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(FetchError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn fetch_chat_list(&self, session: &Session) -> Result<Vec<Chat>, FetchError> {
        let records: Option<Vec<ChatRecord>> = self
            .get_history(session, &[("userId", session.user_id.as_str())])
            .await?;

        Ok(records
            .unwrap_or_default()
            .into_iter()
            .flat_map(ChatRecord::into_chats)
            .collect())
    }

    async fn fetch_chat_messages(&self, session: &Session, chat_id: &str) -> Result<Vec<Message>, FetchError> {
        let payload: Option<HistoryPayload> = self.get_history(session, &[("chatId", chat_id)]).await?;
        Ok(payload.map(HistoryPayload::into_messages).unwrap_or_default())
    }

    async fn send_message(&self, session: &Session, chat_id: &str, message: &Message) -> Result<(), FetchError> {
        let request = NotificationRequest {
            sender: &message.sender,
            chat_id,
            msg: &message.text,
        };

        let response = self
            .client
            .post(self.url(NOTIFICATION_PATH))
            .header(AUTHORIZATION, session.token.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        read_body(response).await?;
        Ok(())
    }
}
