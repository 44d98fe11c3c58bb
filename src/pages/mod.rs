//! Page controllers
//!
//! A controller owns the view state of one page. It loads collections through
//! [`PortalApi`](school_portal_client::PortalApi), keeps them in its state and draws them on a
//! [`Ui`](crate::ui::Ui). Action handlers reload and redraw whatever they changed.
pub mod calendar;
pub mod generation;
pub mod mail;

pub use calendar::CalendarPage;
pub use mail::MailPage;

use school_portal_client::api::v1::ApiError;

/// Alert text of a failed write
///
/// A rejected request shows the backend's message, or `rejected` if it sent none. Requests
/// that never got an answer show `failed`.
pub(crate) fn write_failure(error: &ApiError, rejected: &str, failed: &str) -> String {
    match error {
        ApiError::NonSuccess(_) => error
            .server_message()
            .unwrap_or_else(|| rejected.to_string()),
        _ => failed.to_string(),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use school_portal_client::api::v1::HttpError;

    fn rejected(body: &str) -> ApiError {
        ApiError::NonSuccess(HttpError {
            status: StatusCode::BAD_GATEWAY,
            reason: body.to_string(),
        })
    }

    #[test]
    fn backend_message_wins() {
        assert_eq!(
            write_failure(&rejected(r#"{"error": "Salle occupée"}"#), "rejeté", "échoué"),
            "Salle occupée"
        );
    }

    #[test]
    fn raw_body_is_never_shown() {
        assert_eq!(
            write_failure(&rejected("<html>Bad Gateway</html>"), "rejeté", "échoué"),
            "rejeté"
        );
    }

    #[test]
    fn transport_failure() {
        let error = ApiError::ConnectionError("connection refused".to_string());

        assert_eq!(write_failure(&error, "rejeté", "échoué"), "échoué");
    }
}
