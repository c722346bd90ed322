//! The item entry form, the collaborator the recent table hands edits to.
//!
//! The recent table only opens and discards editing sessions; committing an
//! edit happens here. On a successful save the form reports back by clearing
//! the session and refreshing the table in the same response.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    alert::AlertTemplate,
    api::{ExpenseApi, ItemCount},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        format_amount,
    },
    recent::{EditingSession, RecentView, current_local_date, recent_table_fragment, refresh},
    user::SessionUser,
};

/// Render the contents of the `#entry-form` element.
///
/// With an editing session the form is seeded with the session's line items;
/// without one a quiet empty state invites picking a row to edit.
pub(crate) fn entry_form_fragment(editing: Option<&EditingSession>) -> Markup {
    match editing {
        Some(session) => edit_form(session),
        None => html! {
            div data-entry-form-empty="true" class="text-center text-gray-500 dark:text-gray-400 py-12"
            {
                p class="font-medium" { "No entry selected" }
                p class="text-sm" { "Use the Edit action on one of today's entries to change it." }
            }
        },
    }
}

fn edit_form(session: &EditingSession) -> Markup {
    html! {
        form
            data-entry-form-edit="true"
            hx-post=(endpoints::UPDATE_ORDER)
            hx-target="#recent-table"
            hx-swap="innerHTML"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            h2 class="text-lg md:text-xl font-bold" { "Edit Entry" }

            @if let Some(order_id) = session.order_id {
                input type="hidden" name="order_id" value=(order_id);
            }
            input type="hidden" name="date" value=(session.date);
            input type="hidden" name="username" value=(session.username);

            div class="flex gap-4"
            {
                div class="flex-1"
                {
                    label class=(FORM_LABEL_STYLE) { "Date" }
                    input class=(FORM_TEXT_INPUT_STYLE) type="text" value=(session.date) disabled;
                }
                div class="flex-1"
                {
                    label class=(FORM_LABEL_STYLE) { "User" }
                    input class=(FORM_TEXT_INPUT_STYLE) type="text" value=(session.username) disabled;
                }
            }

            table class="min-w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead
                {
                    tr
                    {
                        th class="p-2" { "Item" }
                        th class="p-2 text-center" { "Price" }
                        th class="p-2 text-center" { "Count" }
                    }
                }
                tbody
                {
                    @for item in &session.order_items {
                        tr data-order-item="true"
                        {
                            td class="p-2"
                            {
                                input type="hidden" name="item_id" value=(item.id);
                                (item.item_name)
                            }
                            td class="p-2 text-center" { "₹" (format_amount(item.item_price)) }
                            td class="p-2 text-center"
                            {
                                input
                                    class={(FORM_TEXT_INPUT_STYLE) " max-w-20 text-center"}
                                    type="number"
                                    name="count"
                                    value=(item.count)
                                    min="0"
                                    required;
                            }
                        }
                    }
                }
            }

            div class="flex gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save" }

                button
                    type="button"
                    class=(BUTTON_SECONDARY_STYLE)
                    hx-post=(endpoints::CANCEL_EDIT)
                    hx-target="#entry-form"
                    hx-swap="innerHTML"
                {
                    "Cancel"
                }
            }
        }
    }
}

/// The state needed to save the entry form.
#[derive(Clone)]
pub struct UpdateOrderState {
    pub(crate) api: Arc<dyn ExpenseApi>,
    pub(crate) view: Arc<Mutex<RecentView>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl FromRef<AppState> for UpdateOrderState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            view: state.recent_view.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The entry form's fields. `item_id` and `count` repeat once per line item.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderForm {
    #[serde(default)]
    order_id: Option<i64>,
    date: Date,
    username: String,
    #[serde(default)]
    item_id: Vec<i64>,
    #[serde(default)]
    count: Vec<i64>,
}

/// Save the entry form through the backend.
///
/// On success the editing session is discarded and the refreshed table is
/// returned for the `#recent-table` swap, with the entry form reset
/// out-of-band. On failure the session stays open so the user can retry.
pub async fn update_order_endpoint(
    State(state): State<UpdateOrderState>,
    Extension(user): Extension<SessionUser>,
    Form(form): Form<UpdateOrderForm>,
) -> Response {
    let Some(order_id) = form.order_id else {
        return AlertTemplate::error(
            "Could not save entry",
            "The entry has no order attached to it.",
        )
        .into_response(StatusCode::BAD_REQUEST);
    };

    let items: Vec<ItemCount> = form
        .item_id
        .iter()
        .zip(&form.count)
        .map(|(&item_id, &count)| ItemCount { item_id, count })
        .collect();

    if let Err(error) = state
        .api
        .update_order(order_id, form.date, &form.username, &items)
        .await
    {
        tracing::error!("could not update order {order_id}: {error}");
        return AlertTemplate::error(
            "Could not save entry",
            "Try again later or check the logs on the server.",
        )
        .into_response(StatusCode::INTERNAL_SERVER_ERROR);
    }

    {
        let Ok(mut view) = state.view.lock() else {
            return Error::StateLock.into_alert_response();
        };
        view.close_session();
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

        div id="entry-form" hx-swap-oob="innerHTML"
        {
            (entry_form_fragment(None))
        }

        div id="alert-container" hx-swap-oob="innerHTML"
        {
            (AlertTemplate::success("Entry updated.", ""))
        }
    }
    .into_response()
}
