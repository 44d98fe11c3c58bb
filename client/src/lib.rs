//! REST client for the school portal backend
//!
//! A [`PortalSession`] carries the bearer token issued by the portal's login flow and exposes
//! one method per backend endpoint. Page controllers talk to the backend through the
//! [`PortalApi`] trait so they can be driven by other implementations as well.
use crate::api::v1::calendar::{DeleteEvent, Event, EventId, NewEvent};
use crate::api::v1::groups::Group;
use crate::api::v1::mail::{Message, MessageId, NewMessage};
use crate::api::v1::users::User;
use crate::api::v1::{ApiError, Result, StatusMessage};
use reqwest::{Client, Url};
use std::rc::Rc;

pub mod api;

/// The session configuration
#[derive(Debug)]
pub struct Config {
    /// Base URL of the portal backend, e.g. `http://localhost:5000`
    pub portal_url: Url,
}

/// The tokens handed out by the portal's authentication flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// An authenticated session with the portal backend
///
/// Is used to call the API endpoints of the backend.
#[derive(Debug)]
pub struct PortalSession {
    /// Reusable reqwest connection pool
    pub http_client: Client,
    /// Configuration for the session
    pub config: Rc<Config>,
    /// The session's bearer and refresh token
    pub tokens: SessionTokens,
}

impl PortalSession {
    /// Creates a new session from already issued tokens
    pub fn new(config: Rc<Config>, tokens: SessionTokens) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        Ok(PortalSession {
            http_client,
            config,
            tokens,
        })
    }
}

/// The backend operations the portal pages depend on
#[async_trait::async_trait(?Send)]
pub trait PortalApi {
    async fn list_groups(&self) -> Result<Vec<Group>>;
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn create_event(&self, event: &NewEvent) -> Result<StatusMessage>;
    async fn update_event(&self, id: EventId, event: &NewEvent) -> Result<StatusMessage>;
    async fn delete_event(&self, id: EventId, delete: &DeleteEvent) -> Result<StatusMessage>;
    async fn inbox(&self) -> Result<Vec<Message>>;
    async fn sent(&self) -> Result<Vec<Message>>;
    async fn get_message(&self, id: MessageId) -> Result<Message>;
    async fn send_message(&self, message: &NewMessage) -> Result<StatusMessage>;
    async fn delete_message(&self, id: MessageId) -> Result<StatusMessage>;
    async fn all_users(&self) -> Result<Vec<User>>;
}

#[async_trait::async_trait(?Send)]
impl PortalApi for PortalSession {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        PortalSession::list_groups(self).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        PortalSession::list_events(self).await
    }

    async fn create_event(&self, event: &NewEvent) -> Result<StatusMessage> {
        PortalSession::create_event(self, event).await
    }

    async fn update_event(&self, id: EventId, event: &NewEvent) -> Result<StatusMessage> {
        PortalSession::update_event(self, id, event).await
    }

    async fn delete_event(&self, id: EventId, delete: &DeleteEvent) -> Result<StatusMessage> {
        PortalSession::delete_event(self, id, delete).await
    }

    async fn inbox(&self) -> Result<Vec<Message>> {
        PortalSession::inbox(self).await
    }

    async fn sent(&self) -> Result<Vec<Message>> {
        PortalSession::sent(self).await
    }

    async fn get_message(&self, id: MessageId) -> Result<Message> {
        PortalSession::get_message(self, id).await
    }

    async fn send_message(&self, message: &NewMessage) -> Result<StatusMessage> {
        PortalSession::send_message(self, message).await
    }

    async fn delete_message(&self, id: MessageId) -> Result<StatusMessage> {
        PortalSession::delete_message(self, id).await
    }

    async fn all_users(&self) -> Result<Vec<User>> {
        PortalSession::all_users(self).await
    }
}
