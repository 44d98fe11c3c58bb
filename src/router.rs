//! Routes a command to its page
//!
//! Pages only run with a session. When the [`SessionGuard`] finds none the router sends the
//! user to the entry page instead and no page logic runs.
use crate::cli::{CalendarCommand, Command, MailCommand};
use crate::clock::Clock;
use crate::pages::mail::Tab;
use crate::pages::{CalendarPage, MailPage};
use crate::session::{self, Session, SessionGuard, Unauthenticated, UserProfile};
use crate::storage::KeyValueStore;
use crate::ui::Ui;
use anyhow::{Context, Result};
use school_portal_client::{PortalApi, SessionTokens};
use url::Url;

/// Path of the entry page on the backend
pub const ENTRY_PAGE: &str = "/";

/// Where the user ends up after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Redirect(Url),
}

pub struct Router<'a, S: ?Sized, U, F> {
    entry_page: Url,
    store: &'a mut S,
    ui: U,
    clock: Box<dyn Clock>,
    connect: F,
}

impl<'a, S, U, F> Router<'a, S, U, F>
where
    S: KeyValueStore + ?Sized,
    U: Ui,
{
    /// `connect` opens a backend session for the logged in user
    pub fn new(
        backend_url: &Url,
        store: &'a mut S,
        ui: U,
        clock: Box<dyn Clock>,
        connect: F,
    ) -> Result<Self> {
        let entry_page = backend_url
            .join(ENTRY_PAGE)
            .context("Failed to build the entry page url")?;

        Ok(Router {
            entry_page,
            store,
            ui,
            clock,
            connect,
        })
    }

    pub async fn dispatch<A>(self, command: Command) -> Result<Navigation>
    where
        F: Fn(&Session) -> Result<A>,
        A: PortalApi,
    {
        match command {
            Command::Login {
                token,
                refresh_token,
                profile,
            } => self.login(token, refresh_token, profile.unwrap_or_default()),
            Command::Logout => self.logout(),
            Command::Calendar(command) => self.calendar(command).await,
            Command::Mail(command) => self.mail(command).await,
        }
    }

    fn login(
        mut self,
        access_token: String,
        refresh_token: Option<String>,
        profile: UserProfile,
    ) -> Result<Navigation> {
        let tokens = SessionTokens {
            access_token,
            refresh_token,
        };

        session::login(&mut *self.store, &tokens, &profile).context("Failed to store the session")?;
        log::info!("Logged in as '{}'", profile.username);

        Ok(Navigation::Stay)
    }

    fn logout(mut self) -> Result<Navigation> {
        session::logout(&mut *self.store).context("Failed to clear the session")?;
        log::info!("Logged out");

        Ok(self.redirect_to_entry())
    }

    fn redirect_to_entry(&mut self) -> Navigation {
        self.ui.redirect(self.entry_page.as_str());
        Navigation::Redirect(self.entry_page.clone())
    }

    /// Runs the session guard, redirects if there is no session
    fn guard(&mut self) -> std::result::Result<Session, Navigation> {
        let checked = SessionGuard::new(&*self.store).check();

        checked.map_err(|Unauthenticated| {
            log::info!("No session stored, redirecting to the entry page");
            self.redirect_to_entry()
        })
    }

    async fn calendar<A>(mut self, command: CalendarCommand) -> Result<Navigation>
    where
        F: Fn(&Session) -> Result<A>,
        A: PortalApi,
    {
        let session = match self.guard() {
            Ok(session) => session,
            Err(navigation) => return Ok(navigation),
        };

        let api = (self.connect)(&session)?;
        let mut page = CalendarPage::new(api, &mut self.ui, self.clock, session);
        page.open().await;

        match command {
            CalendarCommand::Week { offset } => {
                if offset != 0 {
                    page.change_week(offset);
                }
            }
            CalendarCommand::Show { id } => page.view_event_details(id),
            CalendarCommand::Add(course) => {
                let mut form = page.open_add_course();
                course.apply_to(&mut form);
                page.submit_course(&form).await;
            }
            CalendarCommand::Edit { id, course } => {
                if let Some(mut form) = page.open_edit_course(id) {
                    course.apply_to(&mut form);
                    page.submit_course(&form).await;
                }
            }
            CalendarCommand::Delete { id } => page.delete_course(id).await,
        }

        Ok(Navigation::Stay)
    }

    async fn mail<A>(mut self, command: MailCommand) -> Result<Navigation>
    where
        F: Fn(&Session) -> Result<A>,
        A: PortalApi,
    {
        let session = match self.guard() {
            Ok(session) => session,
            Err(navigation) => return Ok(navigation),
        };

        let api = (self.connect)(&session)?;
        let compose_form = command.compose_form();
        let mut page = MailPage::new(api, &mut self.ui, session);

        match command {
            MailCommand::Inbox => page.open(Tab::Inbox).await,
            MailCommand::Sent => page.open(Tab::Sent).await,
            MailCommand::Read { id } => {
                page.open(Tab::Inbox).await;
                page.view_message(id).await;
            }
            MailCommand::Compose => {
                page.render_header();
                page.open_compose().await;
            }
            MailCommand::Send { .. } => {
                page.render_header();
                if let Some(form) = compose_form {
                    page.send_message(&form).await;
                }
            }
            MailCommand::Delete { id } => {
                page.open(Tab::Sent).await;
                page.delete_message(id).await;
            }
        }

        Ok(Navigation::Stay)
    }
}
