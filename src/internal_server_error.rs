//! The 500 internal server error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The copy shown on the internal server error page.
pub struct InternalServerErrorPageTemplate<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerErrorPageTemplate<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

pub fn render_internal_server_error(template: InternalServerErrorPageTemplate) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Error", "500", template.description, template.fix),
    )
        .into_response()
}

/// The handler for the error page users get redirected to after htmx
/// requests fail.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}
