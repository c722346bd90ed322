//! Middleware for logging requests and responses.

use axum::{
    extract::Request,
    http::{Method, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

/// The max number of body bytes to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log each request and response at the `info` level.
///
/// Bodies longer than [LOG_BODY_LENGTH_LIMIT] bytes are truncated at `info`
/// and logged in full at `debug`. The password field of the log-in form is
/// redacted before anything is written.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = body_to_text(axum::body::to_bytes(body, usize::MAX).await);

    let display_text = if parts.method == Method::POST && is_form_content(&parts.headers) {
        redact_field(&body_text, "password")
    } else {
        body_text.clone()
    };
    log_payload("Received request", &format!("{} {}", parts.method, parts.uri), &display_text);

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = body_to_text(axum::body::to_bytes(body, usize::MAX).await);
    log_payload("Sending response", &parts.status.to_string(), &body_text);

    Response::from_parts(parts, body_text.into())
}

fn is_form_content(headers: &axum::http::HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

fn body_to_text(bytes: Result<axum::body::Bytes, axum::Error>) -> String {
    match bytes {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("Could not read body for logging: {error}");
            String::new()
        }
    }
}

fn redact_field(form_text: &str, field_name: &str) -> String {
    let Some(start) = form_text.find(&format!("{field_name}=")) else {
        return form_text.to_string();
    };

    let end = form_text[start..]
        .find('&')
        .map(|offset| start + offset)
        .unwrap_or(form_text.len());

    form_text.replace(&form_text[start..end], &format!("{field_name}=********"))
}

fn log_payload(label: &str, summary: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        // Back off to a char boundary so multi-byte text cannot split.
        let mut end = LOG_BODY_LENGTH_LIMIT;
        while !body.is_char_boundary(end) {
            end -= 1;
        }

        tracing::info!("{label}: {summary} body: {}...", &body[..end]);
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{label}: {summary} body: {body:?}");
    }
}

#[cfg(test)]
mod logging_tests {
    use super::redact_field;

    #[test]
    fn password_field_is_redacted() {
        let redacted = redact_field("username=alice&password=hunter2", "password");

        assert_eq!(redacted, "username=alice&password=********");
    }

    #[test]
    fn password_in_the_middle_is_redacted() {
        let redacted = redact_field("password=hunter2&username=alice", "password");

        assert_eq!(redacted, "password=********&username=alice");
    }

    #[test]
    fn forms_without_a_password_are_unchanged() {
        let redacted = redact_field("username=alice", "password");

        assert_eq!(redacted, "username=alice");
    }
}
