//! Calendar related API structs and endpoints
use super::groups::GroupId;
use super::users::UserId;
use super::{integer_id, parse_json_response, parse_status_response, timestamp, Result, StatusMessage};
use crate::PortalSession;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

integer_id! {
    /// Primary key of a calendar event
    EventId
}

/// How a recurring course repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Weekly,
    Biweekly,
    Monthly,
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        };

        f.write_str(s)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown recurrence type '{0}', expected weekly, biweekly or monthly")]
pub struct UnknownRecurrenceType(String);

impl FromStr for RecurrenceType {
    type Err = UnknownRecurrenceType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(UnknownRecurrenceType(other.to_string())),
        }
    }
}

/// A calendar event (a course) as returned by the backend
///
/// Instances of a recurring series carry the id of the series' first event in
/// `parent_event_id`, the first event itself has `is_recurring` set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub end_time: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_flag")]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_type: Option<RecurrenceType>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub recurrence_end: Option<NaiveDateTime>,
    #[serde(default)]
    pub parent_event_id: Option<EventId>,
}

impl Event {
    /// Returns true if the event is part of a recurring series
    pub fn is_series_member(&self) -> bool {
        self.parent_event_id.is_some() || self.is_recurring
    }

    /// Returns true for instances generated from a recurring event
    pub fn is_recurring_instance(&self) -> bool {
        self.parent_event_id.is_some()
    }
}

/// JSON Body of the response coming from *GET '/api/v1/calendar'*
#[derive(Debug, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<Event>,
}

/// API request parameters to create or modify a course
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub group_ids: Vec<GroupId>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub location: String,
    pub description: String,
    pub is_recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub recurrence_end: Option<NaiveDateTime>,
}

/// JSON Body of *DELETE '/api/v1/calendar/{id}'*
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DeleteEvent {
    /// Delete the whole recurring series instead of the single occurrence
    pub delete_series: bool,
}

impl PortalSession {
    /// Calls *GET '/api/v1/calendar*
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        let response = self.get_authenticated("/api/v1/calendar").await?;

        let list: EventList = parse_json_response(response).await?;
        Ok(list.events)
    }

    /// Calls *POST '/api/v1/calendar*
    pub async fn create_event(&self, event: &NewEvent) -> Result<StatusMessage> {
        let response = self
            .post_json_authenticated("/api/v1/calendar", event)
            .await?;

        parse_status_response(response).await
    }

    /// Calls *PUT '/api/v1/calendar/{id}*
    pub async fn update_event(&self, id: EventId, event: &NewEvent) -> Result<StatusMessage> {
        let response = self
            .put_json_authenticated(&format!("/api/v1/calendar/{}", id), event)
            .await?;

        parse_status_response(response).await
    }

    /// Calls *DELETE '/api/v1/calendar/{id}*
    pub async fn delete_event(&self, id: EventId, delete: &DeleteEvent) -> Result<StatusMessage> {
        let response = self
            .delete_json_authenticated(&format!("/api/v1/calendar/{}", id), delete)
            .await?;

        parse_status_response(response).await
    }
}
