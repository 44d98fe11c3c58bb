//! Group related API structs and endpoints
use super::{integer_id, parse_json_response, Result};
use crate::PortalSession;
use serde::Deserialize;

integer_id! {
    /// Primary key of a group (a class or a club)
    GroupId
}

/// A class or club the current user belongs to
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    /// `classe` or `club`
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// JSON Body of the response coming from *GET '/api/v1/groups'*
#[derive(Debug, Deserialize)]
pub struct GroupList {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl PortalSession {
    /// Calls *GET '/api/v1/groups*
    ///
    /// Admins receive every group, everybody else only the groups they are a member of.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let response = self.get_authenticated("/api/v1/groups").await?;

        let list: GroupList = parse_json_response(response).await?;
        Ok(list.groups)
    }
}
