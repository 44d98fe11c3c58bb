use crate::forms::{ComposeForm, CourseForm};
use crate::session::UserProfile;
use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use school_portal_client::api::v1::calendar::{EventId, RecurrenceType};
use school_portal_client::api::v1::groups::GroupId;
use school_portal_client::api::v1::mail::MessageId;
use school_portal_client::api::v1::users::UserId;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "school-portal")]
pub struct Args {
    #[structopt(
        short,
        parse(from_occurrences),
        help = "-v => Info, -vv => Debug, -vvv => Trace"
    )]
    pub verbose: u8,

    #[structopt(
        short,
        long,
        default_value = "config.toml",
        help = "Specify path to configuration file"
    )]
    pub config: PathBuf,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "logoutput or \"-\" for stdout"
    )]
    pub logoutput: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug, PartialEq)]
pub enum Command {
    /// Stores the tokens issued by the portal's login flow
    Login {
        #[structopt(long)]
        token: String,
        #[structopt(long)]
        refresh_token: Option<String>,
        /// The user profile as JSON, e.g. `{"id": 7, "username": "mdupont", "role": "prof"}`
        #[structopt(long, parse(try_from_str = serde_json::from_str))]
        profile: Option<UserProfile>,
    },
    /// Forgets the stored session
    Logout,
    /// The weekly course calendar
    Calendar(CalendarCommand),
    /// The mailbox
    Mail(MailCommand),
}

#[derive(StructOpt, Debug, PartialEq)]
pub enum CalendarCommand {
    /// Shows a week
    Week {
        /// Weeks away from the current one, negative values go back
        #[structopt(long, default_value = "0", allow_hyphen_values = true)]
        offset: i64,
    },
    /// Shows the details of a course
    Show { id: EventId },
    /// Adds a course
    Add(CourseArgs),
    /// Changes one of your courses
    Edit {
        id: EventId,
        #[structopt(flatten)]
        course: CourseArgs,
    },
    /// Deletes one of your courses
    Delete { id: EventId },
}

/// Fields of the course dialog
#[derive(StructOpt, Debug, Default, PartialEq)]
pub struct CourseArgs {
    #[structopt(long)]
    pub title: Option<String>,
    /// Class or club, may be repeated
    #[structopt(long = "group")]
    pub groups: Vec<GroupId>,
    /// YYYY-MM-DD
    #[structopt(long)]
    pub date: Option<NaiveDate>,
    /// HH:MM
    #[structopt(long, parse(try_from_str = parse_time))]
    pub start: Option<NaiveTime>,
    /// HH:MM
    #[structopt(long, parse(try_from_str = parse_time))]
    pub end: Option<NaiveTime>,
    #[structopt(long)]
    pub location: Option<String>,
    #[structopt(long)]
    pub description: Option<String>,
    /// Repeats the course until --recurrence-end
    #[structopt(long)]
    pub recurring: bool,
    /// weekly, biweekly or monthly
    #[structopt(long)]
    pub recurrence_type: Option<RecurrenceType>,
    /// YYYY-MM-DD
    #[structopt(long)]
    pub recurrence_end: Option<NaiveDate>,
}

impl CourseArgs {
    /// Overwrites the form fields given on the command line
    pub fn apply_to(self, form: &mut CourseForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if !self.groups.is_empty() {
            form.group_ids = self.groups;
        }
        if self.date.is_some() {
            form.date = self.date;
        }
        if self.start.is_some() {
            form.start_time = self.start;
        }
        if self.end.is_some() {
            form.end_time = self.end;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if self.recurring {
            form.is_recurring = true;
        }
        if let Some(recurrence_type) = self.recurrence_type {
            form.recurrence_type = recurrence_type;
        }
        if self.recurrence_end.is_some() {
            form.recurrence_end = self.recurrence_end;
        }
    }
}

#[derive(StructOpt, Debug, PartialEq)]
pub enum MailCommand {
    /// Lists received messages
    Inbox,
    /// Lists sent messages
    Sent,
    /// Opens a message and marks it read
    Read { id: MessageId },
    /// Shows the compose dialog with the possible recipients
    Compose,
    /// Sends a message
    Send {
        #[structopt(long)]
        subject: Option<String>,
        #[structopt(long)]
        content: Option<String>,
        /// Recipient user id, may be repeated
        #[structopt(long)]
        to: Vec<UserId>,
    },
    /// Deletes a sent message
    Delete { id: MessageId },
}

impl MailCommand {
    /// The compose form of a `send` command
    pub fn compose_form(&self) -> Option<ComposeForm> {
        match self {
            MailCommand::Send {
                subject,
                content,
                to,
            } => Some(ComposeForm {
                subject: subject.clone().unwrap_or_default(),
                content: content.clone().unwrap_or_default(),
                recipients: to.clone(),
            }),
            _ => None,
        }
    }
}

fn parse_time(s: &str) -> chrono::ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

/// Parses the CLI-Arguments into [`Args`]
pub fn parse_args() -> Result<Args> {
    let args = Args::from_args();

    Ok(args)
}
