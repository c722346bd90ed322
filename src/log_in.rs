//! This file defines the routes for displaying the log-in page and handling
//! log-in requests. The auth module handles the session cookie itself.

use std::sync::Arc;

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    api::ExpenseApi,
    auth::set_session_cookie,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base},
};

/// The state needed to perform a log in.
#[derive(Clone)]
pub struct LogInState {
    /// The backend collaborator that verifies credentials.
    pub(crate) api: Arc<dyn ExpenseApi>,
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The credentials posted by the log-in form.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    pub username: String,
    pub password: String,
}

fn log_in_view(error_message: Option<&str>) -> Markup {
    let content = html! {
        div class="flex flex-col items-center justify-center px-6 py-8 mx-auto"
        {
            a href="#" class="flex items-center mb-6 text-2xl font-semibold text-gray-900 dark:text-white"
            {
                img class="w-8 h-8 mr-2" src="/static/favicon-128x128.png" alt="logo";
                "Spendlog"
            }

            div class="w-full bg-white rounded-lg shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1 class="text-xl font-bold leading-tight tracking-tight text-gray-900 md:text-2xl dark:text-white"
                    {
                        "Sign in to your account"
                    }

                    form method="post" action=(endpoints::LOG_IN_API) class="space-y-4"
                    {
                        div
                        {
                            label for="username" class=(FORM_LABEL_STYLE) { "Username" }
                            input
                                type="text"
                                name="username"
                                id="username"
                                class=(FORM_TEXT_INPUT_STYLE)
                                required
                                autofocus;
                        }

                        div
                        {
                            label for="password" class=(FORM_LABEL_STYLE) { "Password" }
                            input
                                type="password"
                                name="password"
                                id="password"
                                placeholder="••••••••"
                                class=(FORM_TEXT_INPUT_STYLE)
                                required;
                        }

                        @if let Some(error_message) = error_message {
                            p class="text-red-500 text-base" data-log-in-error="true"
                            {
                                (error_message)
                            }
                        }

                        button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Sign in" }
                    }
                }
            }
        }
    };

    base("Log in", &content)
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    log_in_view(None).into_response()
}

/// Verify the posted credentials with the backend and open a session.
///
/// On success the session user is written to the private cookie and the
/// client redirected to the home page. Bad credentials re-render the form
/// with an error; a backend outage gets its own message so users do not
/// retype a perfectly good password.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    match state.api.log_in(&form.username, &form.password).await {
        Ok(user) => match set_session_cookie(jar, &user) {
            Ok(jar) => (jar, Redirect::to(endpoints::ROOT)).into_response(),
            Err(error) => {
                tracing::error!("could not store the session: {error}");
                error.into_response()
            }
        },
        Err(Error::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            log_in_view(Some("Incorrect username or password.")),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("log in failed: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                log_in_view(Some(
                    "Could not reach the expense service. Try again later.",
                )),
            )
                .into_response()
        }
    }
}
