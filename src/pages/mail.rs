//! Controller of the mail page
use super::generation::{Generation, RequestGenerations};
use super::write_failure;
use crate::forms::ComposeForm;
use crate::session::Session;
use crate::ui::{Region, Ui};
use crate::view::{self, mail};
use school_portal_client::api::v1::mail::{Message, MessageId};
use school_portal_client::api::v1::users::User;
use school_portal_client::api::v1::ApiError;
use school_portal_client::PortalApi;

pub use crate::view::mail::Tab;

pub const LOAD_ERROR: &str = "Erreur lors du chargement des messages.";
pub const MESSAGE_LOAD_ERROR: &str = "Erreur lors du chargement du message.";
pub const INCOMPLETE_MESSAGE: &str =
    "Veuillez remplir tous les champs et sélectionner au moins un destinataire.";
pub const SENT: &str = "Message envoyé avec succès !";
pub const SEND_FAILED: &str = "Erreur lors de l'envoi du message: ";
pub const SEND_REJECTED: &str = "échec de l'envoi";
pub const DELETED: &str = "Message supprimé avec succès !";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression du message.";
pub const CONFIRM_DELETE: &str = "Êtes-vous sûr de vouloir supprimer ce message ?";

/// Everything the mail page shows
#[derive(Debug, Default)]
pub struct MailState {
    pub tab: Tab,
    /// Content of the active box
    pub messages: Vec<Message>,
    pub users: Vec<User>,
    message_requests: RequestGenerations,
    user_requests: RequestGenerations,
}

pub struct MailPage<A, U> {
    api: A,
    ui: U,
    session: Session,
    state: MailState,
}

impl<A, U> MailPage<A, U>
where
    A: PortalApi,
    U: Ui,
{
    pub fn new(api: A, ui: U, session: Session) -> Self {
        MailPage {
            api,
            ui,
            session,
            state: MailState::default(),
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn state(&self) -> &MailState {
        &self.state
    }

    /// Renders the header and loads the given box
    pub async fn open(&mut self, tab: Tab) {
        self.render_header();
        self.switch_tab(tab).await;
    }

    pub fn render_header(&mut self) {
        self.ui
            .render(Region::UserName, view::user_name(&self.session));
    }

    pub async fn switch_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        self.ui.render(Region::Tabs, mail::tabs(tab));
        self.load_messages().await;
    }

    pub async fn load_inbox(&mut self) {
        self.switch_tab(Tab::Inbox).await;
    }

    pub async fn load_sent(&mut self) {
        self.switch_tab(Tab::Sent).await;
    }

    /// Ticket for a message request issued outside of [`Self::load_messages`]
    pub fn issue_messages_request(&mut self) -> Generation {
        self.state.message_requests.issue()
    }

    /// Loads the active box
    pub async fn load_messages(&mut self) {
        let ticket = self.issue_messages_request();
        let result = match self.state.tab {
            Tab::Inbox => self.api.inbox().await,
            Tab::Sent => self.api.sent().await,
        };
        self.apply_messages(ticket, result);
    }

    /// Stores a message response and redraws the list, returns false if it was discarded
    pub fn apply_messages(
        &mut self,
        ticket: Generation,
        result: Result<Vec<Message>, ApiError>,
    ) -> bool {
        if !self.state.message_requests.is_current(ticket) {
            log::debug!("Discarding stale message response {:?}", ticket);
            return false;
        }

        match result {
            Ok(messages) => {
                log::debug!("Loaded {} messages", messages.len());
                self.state.messages = messages;
                self.ui.render(
                    Region::MessagesContainer,
                    mail::message_list(&self.state.messages, self.state.tab),
                );
            }
            Err(e) => {
                log::error!("Failed to load messages: {}", e);
                self.ui
                    .render(Region::MessagesContainer, view::load_error(LOAD_ERROR));
            }
        }

        true
    }

    /// Opens a message, which marks it read on the backend
    pub async fn view_message(&mut self, id: MessageId) {
        match self.api.get_message(id).await {
            Ok(message) => {
                self.ui.render(Region::Modal, mail::message_modal(&message));

                if self.state.tab == Tab::Inbox {
                    self.load_messages().await;
                }
            }
            Err(e) => {
                log::error!("Failed to load message {}: {}", id, e);
                self.ui.alert(MESSAGE_LOAD_ERROR);
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.ui.clear(Region::Modal);
    }

    /// Loads the recipients and shows an empty compose dialog
    pub async fn open_compose(&mut self) -> ComposeForm {
        self.load_users().await;

        let form = ComposeForm::default();
        self.ui.render(
            Region::ComposeModal,
            mail::compose_modal(&form, &self.state.users, self.session.user_id()),
        );
        form
    }

    pub fn close_compose(&mut self) {
        self.ui.clear(Region::ComposeModal);
    }

    pub async fn load_users(&mut self) {
        let ticket = self.state.user_requests.issue();
        let result = self.api.all_users().await;

        if !self.state.user_requests.is_current(ticket) {
            log::debug!("Discarding stale user response {:?}", ticket);
            return;
        }

        match result {
            Ok(users) => {
                log::debug!("Loaded {} users", users.len());
                self.state.users = users;
                self.ui.render(
                    Region::RecipientOptions,
                    mail::recipient_options(&self.state.users, self.session.user_id()),
                );
            }
            Err(e) => log::error!("Failed to load users: {}", e),
        }
    }

    pub async fn send_message(&mut self, form: &ComposeForm) {
        let request = match form.to_request() {
            Some(request) => request,
            None => {
                self.ui.alert(INCOMPLETE_MESSAGE);
                return;
            }
        };

        match self.api.send_message(&request).await {
            Ok(_) => {
                self.ui.alert(SENT);
                self.close_compose();

                if self.state.tab == Tab::Sent {
                    self.load_messages().await;
                }
            }
            Err(e) => {
                log::error!("Failed to send message: {}", e);
                let reason = write_failure(&e, SEND_REJECTED, SEND_REJECTED);
                self.ui.alert(&format!("{}{}", SEND_FAILED, reason));
            }
        }
    }

    /// Deletes a message after confirmation and reloads the active box
    pub async fn delete_message(&mut self, id: MessageId) {
        if !self.ui.confirm(CONFIRM_DELETE) {
            return;
        }

        match self.api.delete_message(id).await {
            Ok(_) => {
                self.ui.alert(DELETED);
                self.load_messages().await;
            }
            Err(e) => {
                log::error!("Failed to delete message {}: {}", id, e);
                self.ui.alert(DELETE_FAILED);
            }
        }
    }
}
