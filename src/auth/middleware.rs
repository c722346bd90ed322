//! Middleware that keeps anonymous requests out of the protected routes.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use axum_htmx::HxRedirect;

use crate::{AppState, auth::cookie::session_user, endpoints};

/// The state needed for the session guard.
#[derive(Clone)]
pub struct GuardState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for GuardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<GuardState> for Key {
    fn from_ref(state: &GuardState) -> Self {
        state.cookie_key.clone()
    }
}

/// Run the request if a session user decodes from the cookie jar, otherwise
/// respond with `get_redirect` pointing at the log-in page.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user): Extension<SessionUser>` to receive the session user.
#[inline]
async fn session_guard_internal(
    state: GuardState,
    request: Request,
    next: Next,
    get_redirect: impl Fn(&str) -> Response,
) -> Response {
    let (mut parts, body) = request.into_parts();
    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(err) => {
            tracing::error!("Error getting cookie jar: {err:?}. Redirecting to log in page.");
            return get_redirect(endpoints::LOG_IN_VIEW);
        }
    };

    let Some(user) = session_user(&jar) else {
        return get_redirect(endpoints::LOG_IN_VIEW);
    };

    parts.extensions.insert(user);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

/// Session guard for full page routes; anonymous requests get a plain
/// redirect to the log-in page.
pub async fn session_guard(
    State(state): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        Redirect::to(redirect_url).into_response()
    })
    .await
}

/// Session guard for htmx endpoints. These must redirect via the
/// `HX-Redirect` header or HTMX will swap the log-in page into the page
/// fragment that triggered the request.
pub async fn session_guard_hx(
    State(state): State<GuardState>,
    request: Request,
    next: Next,
) -> Response {
    session_guard_internal(state, request, next, |redirect_url| {
        (HxRedirect(redirect_url.to_owned()), StatusCode::OK).into_response()
    })
    .await
}
