use crate::PortalSession;
use reqwest::{Error, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod calendar;
pub mod groups;
pub mod mail;
pub mod users;

mod timestamp;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Defines a newtype around the backend's integer primary keys
macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

pub(crate) use integer_id;

#[derive(Debug)]
pub struct HttpError {
    /// Response status code
    pub status: StatusCode,
    /// Response body
    pub reason: String,
}

/// JSON body the backend sends along with a non-success status
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpError {
    /// The `error` field of the response body, if the backend sent one
    pub fn server_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorBody>(&self.reason)
            .ok()
            .map(|body| body.error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(error {}: {})", self.status, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// URL parsing error
    #[error("Url error: {0}")]
    InvalidUrl(String),
    /// Reqwest error
    #[error("Reqwest error: {0}")]
    ReqwestError(String),
    /// A Non-200 HTTP response
    #[error("Http error: {0}")]
    NonSuccess(HttpError),
}

impl ApiError {
    /// The message the backend attached to a failed request
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::NonSuccess(http_error) => http_error.server_message(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::ReqwestError(e.to_string())
    }
}

/// Body of a successful mutation
///
/// The backend answers writes with a human readable `message`, which is shown to the user.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: Option<String>,
}

pub(crate) async fn parse_json_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(ApiError::NonSuccess(HttpError {
            status: response.status(),
            reason: response.text().await?,
        }));
    }
    Ok(response.json::<T>().await?)
}

/// Like [`parse_json_response`] but tolerates empty or non-JSON success bodies
pub(crate) async fn parse_status_response(response: Response) -> Result<StatusMessage> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::NonSuccess(HttpError {
            status,
            reason: body,
        }));
    }

    Ok(serde_json::from_str(&body).unwrap_or_default())
}

impl PortalSession {
    fn url(&self, url: &str) -> Result<Url> {
        self.config
            .portal_url
            .join(url)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.tokens.access_token)
    }

    async fn get_authenticated(&self, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        log::debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Ok(response)
    }

    async fn post_json_authenticated<T>(&self, path: &str, data: &T) -> Result<Response>
    where
        T: Serialize,
    {
        let url = self.url(path)?;
        log::debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .json(data)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Ok(response)
    }

    async fn put_json_authenticated<T>(&self, path: &str, data: &T) -> Result<Response>
    where
        T: Serialize,
    {
        let url = self.url(path)?;
        log::debug!("PUT {}", url);

        let response = self
            .http_client
            .put(url)
            .json(data)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Ok(response)
    }

    async fn delete_authenticated(&self, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        log::debug!("DELETE {}", url);

        let response = self
            .http_client
            .delete(url)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Ok(response)
    }

    async fn delete_json_authenticated<T>(&self, path: &str, data: &T) -> Result<Response>
    where
        T: Serialize,
    {
        let url = self.url(path)?;
        log::debug!("DELETE {}", url);

        let response = self
            .http_client
            .delete(url)
            .json(data)
            .header("Authorization", self.bearer())
            .send()
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn server_message_from_error_body() {
        let error = HttpError {
            status: StatusCode::FORBIDDEN,
            reason: r#"{"error": "You can only delete your own courses"}"#.to_string(),
        };

        assert_eq!(
            error.server_message().as_deref(),
            Some("You can only delete your own courses")
        );
    }

    #[test]
    fn server_message_from_html_body() {
        let error = ApiError::NonSuccess(HttpError {
            status: StatusCode::BAD_GATEWAY,
            reason: "<html>Bad Gateway</html>".to_string(),
        });

        assert_eq!(error.server_message(), None);
    }
}
