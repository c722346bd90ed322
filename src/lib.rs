//! Spendlog is a web UI for a shared expense tracker.
//!
//! This library serves HTML pages for reviewing, editing and deleting the
//! most recent expense entries, with role-aware navigation. The expense data
//! itself lives behind a remote REST backend; this crate renders it and
//! brokers mutations under the authorization rules of the recent table.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod api;
mod app_state;
mod auth;
mod endpoints;
mod entry_form;
mod expense_pages;
mod html;
mod internal_server_error;
mod log_in;
mod log_out;
mod logging;
mod navigation;
mod not_found;
mod recent;
mod routing;
mod timezone;
mod user;

pub use api::{ExpenseApi, RestExpenseApi};
pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{Role, SessionUser};

use crate::{
    alert::AlertTemplate,
    internal_server_error::{InternalServerErrorPageTemplate, render_internal_server_error},
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
///
/// Authorization denials are deliberately not in here: a denied edit or
/// delete is an expected outcome with its own user-facing reason, not an
/// error.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backend rejected the provided username and password.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session user could not be serialized into the cookie.
    #[error("could not serialize the session user: {0}")]
    SessionEncode(String),

    /// A request to the expense backend failed in transport or returned a
    /// failure status.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general notice that the backend is unreachable.
    #[error("the backend request failed: {0}")]
    Backend(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the view state lock.
    #[error("could not acquire the view state lock")]
    StateLock,
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Backend(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => {
                render_internal_server_error(InternalServerErrorPageTemplate {
                    description: "Invalid Timezone Settings",
                    fix: &format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                })
            }
            Error::StateLock => render_internal_server_error(Default::default()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(Default::default())
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezone(timezone) => AlertTemplate::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string"
                ),
            )
            .into_response(StatusCode::INTERNAL_SERVER_ERROR),
            Error::Backend(error) => {
                tracing::error!("A backend request failed: {error}");
                AlertTemplate::error(
                    "Could not reach the expense service",
                    "Try again later or check the logs on the server.",
                )
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                AlertTemplate::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
