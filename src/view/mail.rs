//! Fragments of the mail page
use super::format;
use crate::forms::ComposeForm;
use maud::{html, Markup};
use school_portal_client::api::v1::mail::Message;
use school_portal_client::api::v1::users::{User, UserId};

pub const NO_MESSAGES: &str = "Aucun message.";
pub const UNKNOWN_USER: &str = "Inconnu";

const PREVIEW_CHARS: usize = 100;

const ACTIVE_TAB: &str = "px-6 py-2 bg-gradient-to-r from-purple-600 to-pink-600 text-white rounded-lg font-medium transition-all duration-200 shadow-md";
const INACTIVE_TAB: &str = "px-6 py-2 bg-gray-100 text-gray-700 rounded-lg font-medium hover:bg-gray-200 transition-all duration-200";

/// The two mailboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Inbox,
    Sent,
}

impl Default for Tab {
    fn default() -> Self {
        Tab::Inbox
    }
}

pub fn tabs(active: Tab) -> Markup {
    let class = |tab: Tab| if tab == active { ACTIVE_TAB } else { INACTIVE_TAB };

    html! {
        button id="inboxTab" class=(class(Tab::Inbox)) data-tab="inbox" { "Boîte de réception" }
        button id="sentTab" class=(class(Tab::Sent)) data-tab="sent" { "Messages envoyés" }
    }
}

/// First 100 characters of the content, followed by `...` when cut
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let mut preview: String = chars.by_ref().take(PREVIEW_CHARS).collect();

    if chars.next().is_some() {
        preview.push_str("...");
    }

    preview
}

pub fn message_list(messages: &[Message], tab: Tab) -> Markup {
    html! {
        @if messages.is_empty() {
            p class="text-gray-500" { (NO_MESSAGES) }
        }
        @for message in messages {
            (message_row(message, tab))
        }
    }
}

fn message_row(message: &Message, tab: Tab) -> Markup {
    let is_unread = tab == Tab::Inbox && !message.is_read;
    let correspondent = match tab {
        Tab::Inbox => format!("De: {}", message.sender_name().unwrap_or(UNKNOWN_USER)),
        Tab::Sent => format!(
            "À: {}",
            message
                .recipient_names()
                .unwrap_or_else(|| UNKNOWN_USER.to_string())
        ),
    };

    html! {
        div class={ "message border rounded-lg p-4 hover:bg-gray-50 cursor-pointer transition-all" (if is_unread { " bg-purple-50 border-purple-200" } else { "" }) }
            data-message-id=(message.id.0) {
            div class="flex justify-between items-start" {
                div class="flex-1" {
                    div class="flex items-center gap-2" {
                        @if is_unread {
                            span class="unread w-2 h-2 bg-purple-600 rounded-full" {}
                        }
                        h3 class="font-semibold text-lg text-gray-800" { (message.subject) }
                    }
                    p class="text-sm text-gray-600 mt-1" { (correspondent) }
                    p class="text-gray-700 mt-2" { (preview(&message.content)) }
                }
                div class="text-right ml-4" {
                    p class="text-sm text-gray-600" {
                        (message.created_at.map(|ts| format::short_date(ts.date())).unwrap_or_default())
                    }
                    @if tab == Tab::Sent {
                        button class="mt-2 text-red-500 hover:text-red-700 text-sm"
                            data-action="delete-message"
                            data-message-id=(message.id.0) {
                            "🗑️ Supprimer"
                        }
                    }
                }
            }
        }
    }
}

/// Modal showing one message in full
pub fn message_modal(message: &Message) -> Markup {
    let recipients = message
        .recipient_names()
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    html! {
        div class="modal fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center p-4" {
            div class="bg-white rounded-2xl shadow-2xl max-w-2xl w-full p-6 space-y-3" {
                h2 id="modalSubject" class="text-2xl font-bold" { (message.subject) }
                p { "De: " span id="modalSender" { (message.sender_name().unwrap_or(UNKNOWN_USER)) } }
                p { "À: " span id="modalRecipients" { (recipients) } }
                p id="modalDate" class="text-sm text-gray-500" {
                    (message.created_at.map(format::date_time).unwrap_or_default())
                }
                div id="modalContent" class="whitespace-pre-wrap text-gray-800" { (message.content) }
                div class="flex justify-end" {
                    button data-action="close" { "Fermer" }
                }
            }
        }
    }
}

/// Recipient choices of the compose dialog, the current user is left out
pub fn recipient_options(users: &[User], current_user: Option<UserId>) -> Markup {
    html! {
        @for user in users.iter().filter(|user| Some(user.id) != current_user) {
            option value=(user.id.0) { (user.username) " (" (user.email) ")" }
        }
    }
}

/// The compose dialog
pub fn compose_modal(form: &ComposeForm, users: &[User], current_user: Option<UserId>) -> Markup {
    html! {
        div class="modal fixed inset-0 bg-black bg-opacity-50 z-50 flex items-center justify-center p-4" {
            form id="composeForm" class="bg-white rounded-2xl shadow-2xl max-w-2xl w-full p-6 space-y-4" {
                h2 class="text-2xl font-bold" { "Nouveau message" }
                select id="recipientSelect" name="recipients" multiple required {
                    (recipient_options(users, current_user))
                }
                input type="text" id="messageSubject" name="subject" value=(form.subject) required;
                textarea id="messageContent" name="content" required { (form.content) }
                div class="flex justify-end space-x-3" {
                    button type="button" data-action="close" { "Annuler" }
                    button type="submit" { "Envoyer" }
                }
            }
        }
    }
}
