//! User related API structs and endpoints
use super::{integer_id, parse_json_response, Result};
use crate::PortalSession;
use serde::{Deserialize, Serialize};

integer_id! {
    /// Primary key of a user
    UserId
}

/// Public user details
///
/// Is used to choose the recipients of a message.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// `eleve`, `prof` or `admin`
    #[serde(default)]
    pub role: Option<String>,
}

/// JSON Body of the response coming from *GET '/api/v1/users'*
#[derive(Debug, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

impl PortalSession {
    /// Calls *GET '/api/v1/users*
    pub async fn all_users(&self) -> Result<Vec<User>> {
        let response = self.get_authenticated("/api/v1/users").await?;

        let list: UserList = parse_json_response(response).await?;
        Ok(list.users)
    }
}
