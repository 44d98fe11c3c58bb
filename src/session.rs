//! Session guard
//!
//! Every page starts by asking the [`SessionGuard`] for a [`Session`]. Without a stored token
//! the guard answers with [`Unauthenticated`], which the router turns into a redirect to the
//! entry page. The role found in the stored profile only decides which actions are offered,
//! the backend does the actual permission checks.
use crate::storage::{self, KeyValueStore, StorageKey};
use school_portal_client::api::v1::calendar::Event;
use school_portal_client::api::v1::users::UserId;
use school_portal_client::SessionTokens;
use serde::{Deserialize, Serialize};

/// The user profile stored next to the tokens at login
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Prof,
    Admin,
    /// Students and any role this client does not know about
    Default,
}

impl Role {
    pub fn from_profile(profile: &UserProfile) -> Self {
        match profile.role.as_deref() {
            Some("prof") => Role::Prof,
            Some("admin") => Role::Admin,
            _ => Role::Default,
        }
    }
}

/// Returned by the guard when no credential is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("not logged in")]
pub struct Unauthenticated;

/// The logged in user
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub tokens: SessionTokens,
    pub profile: UserProfile,
    pub role: Role,
}

impl Session {
    pub fn new(tokens: SessionTokens, profile: UserProfile) -> Self {
        let role = Role::from_profile(&profile);

        Session {
            tokens,
            profile,
            role,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.profile.id
    }

    pub fn username(&self) -> &str {
        &self.profile.username
    }

    /// Whether the course actions (add course) are offered
    pub fn can_manage_courses(&self) -> bool {
        matches!(self.role, Role::Prof | Role::Admin)
    }

    /// Only the teacher who created a course may edit or delete it
    pub fn can_modify(&self, event: &Event) -> bool {
        self.role == Role::Prof && self.user_id().is_some() && event.created_by == self.user_id()
    }
}

pub struct SessionGuard<'s, S: ?Sized> {
    store: &'s S,
}

impl<'s, S> SessionGuard<'s, S>
where
    S: KeyValueStore + ?Sized,
{
    pub fn new(store: &'s S) -> Self {
        SessionGuard { store }
    }

    pub fn check(&self) -> Result<Session, Unauthenticated> {
        let access_token = self
            .store
            .get(StorageKey::AccessToken)
            .filter(|token| !token.is_empty())
            .ok_or(Unauthenticated)?;

        let refresh_token = self
            .store
            .get(StorageKey::RefreshToken)
            .filter(|token| !token.is_empty());

        let profile = self
            .store
            .get(StorageKey::User)
            .and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    log::warn!("Ignoring malformed stored user profile: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let tokens = SessionTokens {
            access_token,
            refresh_token,
        };

        Ok(Session::new(tokens, profile))
    }
}

/// Persists the credentials handed out by the authentication flow
pub fn login<S>(store: &mut S, tokens: &SessionTokens, profile: &UserProfile) -> storage::Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.set(StorageKey::AccessToken, tokens.access_token.clone())?;

    match &tokens.refresh_token {
        Some(refresh_token) => store.set(StorageKey::RefreshToken, refresh_token.clone())?,
        None => store.remove(StorageKey::RefreshToken)?,
    }

    // serializing a struct of strings into a string cannot fail
    let profile = serde_json::to_string(profile).unwrap_or_else(|_| "{}".to_string());
    store.set(StorageKey::User, profile)
}

/// Forgets every stored credential
pub fn logout<S>(store: &mut S) -> storage::Result<()>
where
    S: KeyValueStore + ?Sized,
{
    store.clear()
}
