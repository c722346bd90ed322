//! Log-out route handler that clears the session cookie and redirects users.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{AppState, api::ExpenseApi, auth::clear_session_cookie, endpoints};

/// The state needed to log out.
#[derive(Clone)]
pub struct LogOutState {
    /// The backend collaborator to notify of the log out.
    pub(crate) api: Arc<dyn ExpenseApi>,
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for LogOutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogOutState> for Key {
    fn from_ref(state: &LogOutState) -> Self {
        state.cookie_key.clone()
    }
}

/// Log the user out.
///
/// The remote log out is best-effort: a failure is logged and nothing more.
/// The session cookie is cleared and the client redirected to the log-in
/// page unconditionally, so a network failure can never leave a user stuck
/// logged in locally.
pub async fn get_log_out(State(state): State<LogOutState>, jar: PrivateCookieJar) -> Response {
    if let Err(error) = state.api.log_out().await {
        tracing::warn!("remote log out failed: {error}");
    }

    let jar = clear_session_cookie(jar);

    (jar, Redirect::to(endpoints::LOG_IN_VIEW)).into_response()
}

#[cfg(test)]
mod log_out_tests {
    use std::sync::{Arc, atomic::Ordering};

    use axum::{
        body::Body,
        extract::State,
        http::{Response, StatusCode, header::SET_COOKIE},
    };
    use axum_extra::extract::{
        PrivateCookieJar,
        cookie::{Cookie, Key},
    };
    use sha2::{Digest, Sha512};
    use time::{Duration, OffsetDateTime};

    use crate::{
        auth::{SESSION_COOKIE, set_session_cookie},
        endpoints,
        recent::test_api::FakeExpenseApi,
        user::SessionUser,
    };

    use super::{LogOutState, get_log_out};

    fn get_jar() -> PrivateCookieJar {
        let key = Key::from(&Sha512::digest("42"));
        PrivateCookieJar::new(key)
    }

    fn logged_in_jar() -> PrivateCookieJar {
        set_session_cookie(
            get_jar(),
            &SessionUser {
                username: "alice".to_owned(),
                role: None,
            },
        )
        .unwrap()
    }

    fn state_with(api: Arc<FakeExpenseApi>) -> LogOutState {
        LogOutState {
            api,
            cookie_key: Key::from(&Sha512::digest("42")),
        }
    }

    #[tokio::test]
    async fn log_out_clears_session_cookie_and_redirects() {
        let api = Arc::new(FakeExpenseApi::default());
        let state = state_with(api.clone());

        let response = get_log_out(State(state), logged_in_jar()).await;

        assert_redirect(&response, endpoints::LOG_IN_VIEW);
        assert_cookie_expired(&response);
        assert_eq!(api.log_out_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn log_out_clears_session_even_when_the_backend_fails() {
        let api = Arc::new(FakeExpenseApi::default());
        api.fail_log_out();
        let state = state_with(api.clone());

        let response = get_log_out(State(state), logged_in_jar()).await;

        assert_redirect(&response, endpoints::LOG_IN_VIEW);
        assert_cookie_expired(&response);
        assert_eq!(
            api.log_out_calls.load(Ordering::SeqCst),
            1,
            "the remote log out should still have been attempted"
        );
    }

    fn assert_redirect(response: &Response<Body>, want_location: &str) {
        let redirect_location = response.headers().get("location").unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(redirect_location, want_location);
    }

    fn assert_cookie_expired(response: &Response<Body>) {
        let mut found_session_cookie = false;

        for cookie_header in response.headers().get_all(SET_COOKIE) {
            let cookie_string = cookie_header.to_str().unwrap();
            let cookie = Cookie::parse(cookie_string).unwrap();

            if cookie.name() != SESSION_COOKIE {
                continue;
            }

            found_session_cookie = true;
            assert_eq!(
                cookie.expires_datetime(),
                Some(OffsetDateTime::UNIX_EPOCH),
                "got expires {:?}, want {:?}",
                cookie.expires_datetime(),
                Some(OffsetDateTime::UNIX_EPOCH),
            );
            assert_eq!(
                cookie.max_age(),
                Some(Duration::ZERO),
                "got max age {:?}, want {:?}",
                cookie.max_age(),
                Some(Duration::ZERO),
            );
        }

        assert!(
            found_session_cookie,
            "the response should overwrite the session cookie"
        );
    }
}
