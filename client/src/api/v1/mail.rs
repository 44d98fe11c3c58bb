//! Internal mail API structs and endpoints
use super::users::UserId;
use super::{integer_id, parse_json_response, parse_status_response, timestamp, Result, StatusMessage};
use crate::PortalSession;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

integer_id! {
    /// Primary key of a message
    MessageId
}

/// The sender of a message
///
/// Depending on the endpoint the backend sends either the bare username or a user object.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Sender {
    Username(String),
    User { username: String },
}

impl Sender {
    pub fn username(&self) -> &str {
        match self {
            Sender::Username(username) | Sender::User { username } => username,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Recipient {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub subject: String,
    pub content: String,
    #[serde(default)]
    pub sender_id: Option<UserId>,
    #[serde(default)]
    pub sender: Option<Sender>,
    #[serde(default)]
    pub recipients: Vec<Recipient>,
    #[serde(default, deserialize_with = "timestamp::deserialize_flag")]
    pub is_read: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<NaiveDateTime>,
}

impl Message {
    pub fn sender_name(&self) -> Option<&str> {
        self.sender.as_ref().map(Sender::username)
    }

    /// Comma separated recipient usernames, `None` if there are none
    pub fn recipient_names(&self) -> Option<String> {
        if self.recipients.is_empty() {
            return None;
        }

        let names = self
            .recipients
            .iter()
            .map(|recipient| recipient.username.as_str())
            .collect::<Vec<_>>();

        Some(names.join(", "))
    }
}

/// JSON Body of the responses coming from the mailbox endpoints
#[derive(Debug, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// JSON Body of *POST '/api/v1/mail/send'*
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewMessage {
    pub subject: String,
    pub content: String,
    pub recipients: Vec<UserId>,
}

impl PortalSession {
    /// Calls *GET '/api/v1/mail/inbox*
    pub async fn inbox(&self) -> Result<Vec<Message>> {
        let response = self.get_authenticated("/api/v1/mail/inbox").await?;

        let list: MessageList = parse_json_response(response).await?;
        Ok(list.messages)
    }

    /// Calls *GET '/api/v1/mail/sent*
    pub async fn sent(&self) -> Result<Vec<Message>> {
        let response = self.get_authenticated("/api/v1/mail/sent").await?;

        let list: MessageList = parse_json_response(response).await?;
        Ok(list.messages)
    }

    /// Calls *GET '/api/v1/mail/{id}*
    ///
    /// The backend marks the message as read.
    pub async fn get_message(&self, id: MessageId) -> Result<Message> {
        let response = self
            .get_authenticated(&format!("/api/v1/mail/{}", id))
            .await?;

        parse_json_response(response).await
    }

    /// Calls *POST '/api/v1/mail/send*
    pub async fn send_message(&self, message: &NewMessage) -> Result<StatusMessage> {
        let response = self
            .post_json_authenticated("/api/v1/mail/send", message)
            .await?;

        parse_status_response(response).await
    }

    /// Calls *DELETE '/api/v1/mail/{id}*
    pub async fn delete_message(&self, id: MessageId) -> Result<StatusMessage> {
        let response = self
            .delete_authenticated(&format!("/api/v1/mail/{}", id))
            .await?;

        parse_status_response(response).await
    }
}
