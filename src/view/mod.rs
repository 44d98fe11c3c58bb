//! HTML fragments of the portal pages
//!
//! All fragments are built with [`maud`], which escapes every interpolated value. Fragments
//! are rendered into the page [`Region`](crate::ui::Region)s by the page controllers.
use crate::session::Session;
use maud::{html, Markup};

pub mod calendar;
pub mod format;
pub mod mail;

/// Inline error shown in place of a view that failed to load
pub fn load_error(message: &str) -> Markup {
    html! {
        p class="text-red-500" { (message) }
    }
}

/// Name of the logged in user shown in the page header
pub fn user_name(session: &Session) -> Markup {
    html! {
        span { (session.username()) }
    }
}
