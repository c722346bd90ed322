//! Alert fragments for surfacing success and error messages to users.
//!
//! Action buttons carry `hx-target-error="#alert-container"` (via the
//! response-targets extension), so error responses from htmx endpoints render
//! one of these fragments into the fixed alert container.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, Render, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
pub struct AlertTemplate<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    /// Wrap the alert in a response with `status_code`.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.render()).into_response()
    }
}

impl Render for AlertTemplate<'_> {
    fn render(&self) -> Markup {
        let (container_style, icon) = match self.alert_type {
            AlertType::Success => (
                "flex items-start gap-3 p-4 mb-2 rounded-lg border \
                border-green-300 bg-green-50 text-green-800 \
                dark:border-green-800 dark:bg-gray-800 dark:text-green-400",
                "✓",
            ),
            AlertType::Error => (
                "flex items-start gap-3 p-4 mb-2 rounded-lg border \
                border-red-300 bg-red-50 text-red-800 \
                dark:border-red-800 dark:bg-gray-800 dark:text-red-400",
                "!",
            ),
        };

        html! {
            div class=(container_style) role="alert"
            {
                span class="font-bold" { (icon) }

                div
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto text-sm font-semibold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }
}
