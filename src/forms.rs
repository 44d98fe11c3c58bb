//! Form values of the course and compose dialogs
//!
//! Forms only check that the required fields are filled in. Everything else (overlapping
//! courses, group membership, start before end) is left to the backend.
use crate::view::format;
use chrono::{Datelike, Months, NaiveDate, NaiveTime, Timelike};
use school_portal_client::api::v1::calendar::{Event, EventId, NewEvent, RecurrenceType};
use school_portal_client::api::v1::groups::GroupId;
use school_portal_client::api::v1::mail::NewMessage;
use school_portal_client::api::v1::users::UserId;
use validator::Validate;

/// Values of the add/edit course dialog
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CourseForm {
    /// Set when an existing course is edited
    pub event_id: Option<EventId>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub group_ids: Vec<GroupId>,
    #[validate(required)]
    pub date: Option<NaiveDate>,
    #[validate(required)]
    pub start_time: Option<NaiveTime>,
    #[validate(required)]
    pub end_time: Option<NaiveTime>,
    pub location: String,
    pub description: String,
    pub is_recurring: bool,
    pub recurrence_type: RecurrenceType,
    pub recurrence_end: Option<NaiveDate>,
}

impl CourseForm {
    /// An empty form for a new course on `today`
    pub fn new(today: NaiveDate) -> Self {
        CourseForm {
            event_id: None,
            title: String::new(),
            group_ids: Vec::new(),
            date: Some(today),
            start_time: None,
            end_time: None,
            location: String::new(),
            description: String::new(),
            is_recurring: false,
            recurrence_type: RecurrenceType::Weekly,
            recurrence_end: default_recurrence_end(today),
        }
    }

    /// A form prefilled with an existing course
    pub fn from_event(event: &Event, today: NaiveDate) -> Self {
        CourseForm {
            event_id: Some(event.id),
            title: event.title.clone(),
            group_ids: event.group_id.into_iter().collect(),
            date: Some(event.start_time.date()),
            start_time: Some(event.start_time.time()),
            end_time: Some(event.end_time.time()),
            location: event.location.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            is_recurring: event.is_recurring,
            recurrence_type: event.recurrence_type.unwrap_or(RecurrenceType::Weekly),
            recurrence_end: event
                .recurrence_end
                .map(|end| end.date())
                .or_else(|| default_recurrence_end(today)),
        }
    }

    /// Capitalized French name of the selected day
    pub fn day_name(&self) -> Option<&'static str> {
        self.date.map(|date| format::day_name(date.weekday()))
    }

    /// Builds the request body, `None` if a required field is missing
    pub fn to_request(&self) -> Option<NewEvent> {
        if let Err(e) = self.validate() {
            log::debug!("Course form incomplete: {}", e);
            return None;
        }

        let date = self.date?;
        let start_time = date.and_time(whole_minutes(self.start_time?)?);
        let end_time = date.and_time(whole_minutes(self.end_time?)?);

        let (recurrence_type, recurrence_end) = if self.is_recurring {
            let end = self
                .recurrence_end
                .and_then(|end| end.and_hms_opt(23, 59, 59));
            (Some(self.recurrence_type), end)
        } else {
            (None, None)
        };

        Some(NewEvent {
            title: self.title.clone(),
            group_ids: self.group_ids.clone(),
            start_time,
            end_time,
            location: self.location.clone(),
            description: self.description.clone(),
            is_recurring: self.is_recurring,
            recurrence_type,
            recurrence_end,
        })
    }
}

/// Series end suggested when the recurrence checkbox is ticked
pub fn default_recurrence_end(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_months(Months::new(3))
}

fn whole_minutes(time: NaiveTime) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0)
}

/// Values of the compose dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct ComposeForm {
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub recipients: Vec<UserId>,
}

impl ComposeForm {
    /// Builds the request body, `None` if a field is empty or no recipient is selected
    pub fn to_request(&self) -> Option<NewMessage> {
        if let Err(e) = self.validate() {
            log::debug!("Compose form incomplete: {}", e);
            return None;
        }

        Some(NewMessage {
            subject: self.subject.clone(),
            content: self.content.clone(),
            recipients: self.recipients.clone(),
        })
    }
}
