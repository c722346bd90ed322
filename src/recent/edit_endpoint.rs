//! Route handlers that open and discard editing sessions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::AlertTemplate,
    api::ExpenseApi,
    entry_form::entry_form_fragment,
    user::SessionUser,
};

use super::{
    authorization::check_edit,
    models::{EditingSession, ExpenseSummary},
    recent_page::current_local_date,
    view_state::RecentView,
};

/// The state needed to open and discard editing sessions.
#[derive(Clone)]
pub struct EditActionState {
    pub(crate) api: Arc<dyn ExpenseApi>,
    pub(crate) view: Arc<Mutex<RecentView>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl FromRef<AppState> for EditActionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            view: state.recent_view.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The row the edit button pointed at.
#[derive(Debug, Deserialize)]
pub struct EditParams {
    date: Date,
    username: String,
    #[serde(default)]
    order_id: Option<i64>,
}

fn find_record(
    view: &RecentView,
    params: &EditParams,
) -> Option<ExpenseSummary> {
    view.rows()
        .iter()
        .find(|row| {
            if params.order_id.is_some() {
                row.order_id == params.order_id
            } else {
                row.date == Some(params.date)
                    && row.username() == Some(params.username.as_str())
            }
        })
        .cloned()
}

/// Open an editing session for the row named by `params`.
///
/// The authorization rules are re-checked against the current cached rows
/// because the render the click came from may be stale; a denial responds
/// with the specific violated rule. On success the entry form fragment,
/// seeded with the row's line items, is returned for the `#entry-form` swap.
pub async fn initiate_edit_endpoint(
    State(state): State<EditActionState>,
    Extension(user): Extension<SessionUser>,
    Query(params): Query<EditParams>,
) -> Response {
    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let record = {
        let Ok(view) = state.view.lock() else {
            return Error::StateLock.into_alert_response();
        };
        find_record(&view, &params)
    };

    let Some(record) = record else {
        return AlertTemplate::error(
            "Could not edit entry",
            "The entry is no longer in the table. Try refreshing the page.",
        )
        .into_response(StatusCode::NOT_FOUND);
    };

    if let Err(denied) = check_edit(&record, &user.username, today) {
        return AlertTemplate::error("Cannot edit this entry", denied.reason())
            .into_response(StatusCode::FORBIDDEN);
    }

    let order_items = match state
        .api
        .order_items_by_date(params.date, &params.username)
        .await
    {
        Ok(order_items) => order_items,
        Err(error) => {
            tracing::error!(
                "could not fetch order items for {} on {}: {error}",
                params.username,
                params.date
            );
            // No session opens and the page is left as it was.
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    let session = EditingSession {
        date: params.date,
        username: params.username,
        order_items,
        order_id: params.order_id.or(record.order_id),
    };

    {
        let Ok(mut view) = state.view.lock() else {
            return Error::StateLock.into_alert_response();
        };
        view.open_session(session.clone());
    }

    entry_form_fragment(Some(&session)).into_response()
}

/// Discard the active editing session without touching the backend.
pub async fn cancel_edit_endpoint(State(state): State<EditActionState>) -> Response {
    {
        let Ok(mut view) = state.view.lock() else {
            return Error::StateLock.into_alert_response();
        };
        view.close_session();
    }

    entry_form_fragment(None).into_response()
}
