//! Implements a struct that holds the state of the UI server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{api::ExpenseApi, recent::RecentView};

/// The state of the UI server.
#[derive(Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The expense backend collaborator.
    pub api: Arc<dyn ExpenseApi>,

    /// The shared view state behind the recent expense table.
    pub recent_view: Arc<Mutex<RecentView>>,
}

impl AppState {
    /// Create a new [AppState] around the backend collaborator `api`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland"; it is the clock the edit/delete authorization
    /// rules compare dates against.
    pub fn new(api: Arc<dyn ExpenseApi>, cookie_secret: &str, local_timezone: &str) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            local_timezone: local_timezone.to_owned(),
            api,
            recent_view: Arc::new(Mutex::new(RecentView::default())),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
