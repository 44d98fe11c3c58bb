use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use maud::Markup;
use reqwest::StatusCode;
use school_portal::clock::FixedClock;
use school_portal::session::{Session, UserProfile};
use school_portal::ui::{DeleteScope, Region, Ui};
use school_portal_client::api::v1::calendar::{DeleteEvent, Event, EventId, NewEvent};
use school_portal_client::api::v1::groups::{Group, GroupId};
use school_portal_client::api::v1::mail::{Message, MessageId, NewMessage, Recipient, Sender};
use school_portal_client::api::v1::users::{User, UserId};
use school_portal_client::api::v1::{ApiError, HttpError, Result as ApiResult, StatusMessage};
use school_portal_client::{PortalApi, SessionTokens};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

pub fn setup_logging() -> Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .apply()
        .context("Failed to setup logging utility")
}

/// Every test binary runs several tests, only the first one installs the logger
pub fn init() {
    let _ = setup_logging();
}

/// Requests received by the [`FakeBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListGroups,
    ListEvents,
    CreateEvent(NewEvent),
    UpdateEvent(EventId, NewEvent),
    DeleteEvent(EventId, DeleteEvent),
    Inbox,
    Sent,
    GetMessage(MessageId),
    SendMessage(NewMessage),
    DeleteMessage(MessageId),
    AllUsers,
}

#[derive(Debug, Default)]
struct Backend {
    groups: Vec<Group>,
    events: Vec<Event>,
    inbox: Vec<Message>,
    sent: Vec<Message>,
    users: Vec<User>,
    fail_reads: bool,
    write_error: Option<(StatusCode, String)>,
    writes_unreachable: bool,
    success_message: Option<String>,
    calls: Vec<Call>,
}

/// In-memory portal backend
///
/// Clones share their state, so a test can keep a handle while a page owns another one.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend(Rc<RefCell<Backend>>);

impl FakeBackend {
    pub fn with_groups(self, groups: Vec<Group>) -> Self {
        self.0.borrow_mut().groups = groups;
        self
    }

    pub fn with_events(self, events: Vec<Event>) -> Self {
        self.0.borrow_mut().events = events;
        self
    }

    pub fn with_inbox(self, messages: Vec<Message>) -> Self {
        self.0.borrow_mut().inbox = messages;
        self
    }

    pub fn with_sent(self, messages: Vec<Message>) -> Self {
        self.0.borrow_mut().sent = messages;
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.0.borrow_mut().users = users;
        self
    }

    pub fn with_success_message(self, message: &str) -> Self {
        self.0.borrow_mut().success_message = Some(message.to_string());
        self
    }

    /// Every read fails with a 500
    pub fn failing_reads(self) -> Self {
        self.0.borrow_mut().fail_reads = true;
        self
    }

    /// Every write is answered with `status` and `body`
    pub fn rejecting_writes(self, status: StatusCode, body: &str) -> Self {
        self.0.borrow_mut().write_error = Some((status, body.to_string()));
        self
    }

    /// Every write fails before reaching the backend
    pub fn unreachable_for_writes(self) -> Self {
        self.0.borrow_mut().writes_unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().calls.clone()
    }

    /// Requests that would change something on the backend
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call,
                    Call::CreateEvent(..)
                        | Call::UpdateEvent(..)
                        | Call::DeleteEvent(..)
                        | Call::SendMessage(..)
                        | Call::DeleteMessage(..)
                )
            })
            .collect()
    }

    pub fn set_events(&self, events: Vec<Event>) {
        self.0.borrow_mut().events = events;
    }

    fn read<T>(&self, call: Call, select: impl FnOnce(&Backend) -> T) -> ApiResult<T> {
        let mut backend = self.0.borrow_mut();
        backend.calls.push(call);

        if backend.fail_reads {
            return Err(http_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ));
        }

        Ok(select(&backend))
    }

    fn write(&self, call: Call) -> ApiResult<StatusMessage> {
        let mut backend = self.0.borrow_mut();
        backend.calls.push(call);

        if backend.writes_unreachable {
            return Err(ApiError::ConnectionError("connection refused".to_string()));
        }

        match &backend.write_error {
            Some((status, body)) => Err(http_error(*status, body)),
            None => Ok(StatusMessage {
                message: backend.success_message.clone(),
            }),
        }
    }
}

fn http_error(status: StatusCode, body: &str) -> ApiError {
    ApiError::NonSuccess(HttpError {
        status,
        reason: body.to_string(),
    })
}

#[async_trait::async_trait(?Send)]
impl PortalApi for FakeBackend {
    async fn list_groups(&self) -> ApiResult<Vec<Group>> {
        self.read(Call::ListGroups, |b| b.groups.clone())
    }

    async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.read(Call::ListEvents, |b| b.events.clone())
    }

    async fn create_event(&self, event: &NewEvent) -> ApiResult<StatusMessage> {
        self.write(Call::CreateEvent(event.clone()))
    }

    async fn update_event(&self, id: EventId, event: &NewEvent) -> ApiResult<StatusMessage> {
        self.write(Call::UpdateEvent(id, event.clone()))
    }

    async fn delete_event(&self, id: EventId, delete: &DeleteEvent) -> ApiResult<StatusMessage> {
        self.write(Call::DeleteEvent(id, *delete))
    }

    async fn inbox(&self) -> ApiResult<Vec<Message>> {
        self.read(Call::Inbox, |b| b.inbox.clone())
    }

    async fn sent(&self) -> ApiResult<Vec<Message>> {
        self.read(Call::Sent, |b| b.sent.clone())
    }

    async fn get_message(&self, id: MessageId) -> ApiResult<Message> {
        let found = self.read(Call::GetMessage(id), |b| {
            b.inbox
                .iter()
                .chain(b.sent.iter())
                .find(|message| message.id == id)
                .cloned()
        })?;

        found.ok_or_else(|| http_error(StatusCode::NOT_FOUND, r#"{"error": "Message introuvable"}"#))
    }

    async fn send_message(&self, message: &NewMessage) -> ApiResult<StatusMessage> {
        self.write(Call::SendMessage(message.clone()))
    }

    async fn delete_message(&self, id: MessageId) -> ApiResult<StatusMessage> {
        self.write(Call::DeleteMessage(id))
    }

    async fn all_users(&self) -> ApiResult<Vec<User>> {
        self.read(Call::AllUsers, |b| b.users.clone())
    }
}

/// [`Ui`] that remembers everything and answers prompts with preset answers
#[derive(Debug, Default)]
pub struct RecordingUi {
    pub regions: BTreeMap<Region, String>,
    pub alerts: Vec<String>,
    pub confirmations: Vec<String>,
    pub scope_prompts: Vec<String>,
    pub redirects: Vec<String>,
    pub confirm_answer: bool,
    pub scope_answer: Option<DeleteScope>,
}

impl RecordingUi {
    pub fn confirming() -> Self {
        RecordingUi {
            confirm_answer: true,
            ..Default::default()
        }
    }

    pub fn choosing(scope: Option<DeleteScope>) -> Self {
        RecordingUi {
            scope_answer: scope,
            ..Default::default()
        }
    }

    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }
}

impl Ui for RecordingUi {
    fn render(&mut self, region: Region, markup: Markup) {
        self.regions.insert(region, markup.into_string());
    }

    fn clear(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.confirmations.push(question.to_string());
        self.confirm_answer
    }

    fn choose_delete_scope(&mut self, question: &str) -> Option<DeleteScope> {
        self.scope_prompts.push(question.to_string());
        self.scope_answer
    }

    fn redirect(&mut self, location: &str) {
        self.redirects.push(location.to_string());
    }
}

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid june 2024 timestamp")
}

/// Wednesday 2024-06-12, 08:00
pub fn clock() -> Box<FixedClock> {
    Box::new(FixedClock(at(12, 8, 0)))
}

pub fn session(role: &str, id: i64) -> Session {
    Session::new(
        SessionTokens {
            access_token: "token".to_string(),
            refresh_token: None,
        },
        UserProfile {
            id: Some(UserId(id)),
            username: "mdupont".to_string(),
            role: Some(role.to_string()),
        },
    )
}

pub fn teacher() -> Session {
    session("prof", 7)
}

pub fn group(id: i64, name: &str) -> Group {
    Group {
        id: GroupId(id),
        name: name.to_string(),
        kind: Some("classe".to_string()),
    }
}

/// A single course created by user 7
pub fn course(id: i64, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
    Event {
        id: EventId(id),
        title: title.to_string(),
        description: None,
        start_time: start,
        end_time: end,
        location: Some("B12".to_string()),
        group_id: Some(GroupId(3)),
        group_name: Some("6eA".to_string()),
        created_by: Some(UserId(7)),
        creator_name: Some("mdupont".to_string()),
        is_recurring: false,
        recurrence_type: None,
        recurrence_end: None,
        parent_event_id: None,
    }
}

pub fn message(id: i64, subject: &str, is_read: bool) -> Message {
    Message {
        id: MessageId(id),
        subject: subject.to_string(),
        content: format!("Contenu de {}", subject),
        sender_id: Some(UserId(2)),
        sender: Some(Sender::Username("alice".to_string())),
        recipients: vec![Recipient {
            id: UserId(7),
            username: "mdupont".to_string(),
        }],
        is_read,
        created_at: Some(at(10, 17, 45)),
    }
}

pub fn user(id: i64, username: &str) -> User {
    User {
        id: UserId(id),
        username: username.to_string(),
        email: format!("{}@ecole.fr", username),
        role: None,
    }
}
