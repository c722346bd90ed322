//! A route handler for deleting all orders for a (date, user) pair.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, alert::AlertTemplate, api::ExpenseApi, user::SessionUser,
};

use super::{
    recent_page::current_local_date,
    view::recent_table_fragment,
    view_state::{RecentView, refresh},
};

/// The state needed to delete orders.
#[derive(Clone)]
pub struct DeleteOrdersState {
    pub(crate) api: Arc<dyn ExpenseApi>,
    pub(crate) view: Arc<Mutex<RecentView>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl FromRef<AppState> for DeleteOrdersState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            view: state.recent_view.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The (date, user) pair whose orders are to be deleted.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    date: Date,
    username: String,
}

/// Delete every order for the given date and user, then refresh the table.
///
/// The destructive-action confirmation happens client side via `hx-confirm`
/// on the delete button, so by the time this handler runs the user has
/// already agreed. On success the response carries the refreshed table for
/// the `#recent-table` swap plus an out-of-band success alert. On failure a
/// generic alert is returned and the cached rows stay untouched.
pub async fn delete_orders_endpoint(
    State(state): State<DeleteOrdersState>,
    Extension(user): Extension<SessionUser>,
    Query(params): Query<DeleteParams>,
) -> Response {
    if let Err(error) = state
        .api
        .delete_orders_by_date(params.date, &params.username)
        .await
    {
        tracing::error!(
            "could not delete orders for {} on {}: {error}",
            params.username,
            params.date
        );
        return AlertTemplate::error(
            "Failed to delete orders",
            "Try again later or check the logs on the server.",
        )
        .into_response(StatusCode::INTERNAL_SERVER_ERROR);
    }

    refresh(&state.view, state.api.as_ref()).await;

    let today = match current_local_date(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let Ok(view) = state.view.lock() else {
        return Error::StateLock.into_alert_response();
    };

    html! {
        (recent_table_fragment(view.rows(), &user, today, view.is_loading()))

        div id="alert-container" hx-swap-oob="innerHTML"
        {
            (AlertTemplate::success("Orders deleted successfully.", ""))
        }
    }
    .into_response()
}
