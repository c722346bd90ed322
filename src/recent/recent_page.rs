//! Route handlers for the home page and the recent table fragment.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use time::Date;

use crate::{
    AppState, Error, api::ExpenseApi, timezone::local_date_today, user::SessionUser,
};

use super::{
    view::{home_view, recent_table_fragment},
    view_state::{RecentView, refresh},
};

/// The state needed for the recent table handlers.
#[derive(Clone)]
pub struct RecentPageState {
    /// The backend collaborator serving expense data.
    pub(crate) api: Arc<dyn ExpenseApi>,
    /// The shared view state owning the cached rows and editing session.
    pub(crate) view: Arc<Mutex<RecentView>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub(crate) local_timezone: String,
}

impl FromRef<AppState> for RecentPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            view: state.recent_view.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

pub(crate) fn current_local_date(local_timezone: &str) -> Result<Date, Error> {
    let Some(today) = local_date_today(local_timezone) else {
        tracing::error!("Invalid timezone {}", local_timezone);
        return Err(Error::InvalidTimezone(local_timezone.to_owned()));
    };

    Ok(today)
}

/// Render the home page: sidebar, freshly fetched recent table and the item
/// entry form.
pub async fn get_home_page(
    State(state): State<RecentPageState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    refresh(&state.view, state.api.as_ref()).await;

    let view = state
        .view
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the view lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    Ok(home_view(&user, view.rows(), view.editing(), today, view.is_loading()).into_response())
}

/// Re-fetch the expense list and render the `#recent-table` fragment.
pub async fn get_recent_table(
    State(state): State<RecentPageState>,
    Extension(user): Extension<SessionUser>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    refresh(&state.view, state.api.as_ref()).await;

    let view = state
        .view
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire the view lock: {error}"))
        .map_err(|_| Error::StateLock)?;

    Ok(recent_table_fragment(view.rows(), &user, today, view.is_loading()).into_response())
}

#[cfg(test)]
mod recent_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, response::Response};
    use scraper::{Html, Selector};
    use time::OffsetDateTime;

    use crate::{
        recent::{
            models::{ExpenseSummary, UserRef},
            test_api::FakeExpenseApi,
            view_state::RecentView,
        },
        user::{Role, SessionUser},
    };

    use super::{RecentPageState, get_home_page};

    fn today_utc() -> time::Date {
        OffsetDateTime::now_utc().date()
    }

    fn summary(order_id: i64, username: &str) -> ExpenseSummary {
        ExpenseSummary {
            order_id: Some(order_id),
            id: None,
            date: Some(today_utc()),
            user: Some(UserRef::Username(username.to_owned())),
            total_count: 1,
            total_amount: Some(25.0),
            amount: None,
            is_refunded: false,
        }
    }

    fn state_with_api(api: FakeExpenseApi) -> RecentPageState {
        RecentPageState {
            api: Arc::new(api),
            view: Arc::new(Mutex::new(RecentView::default())),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn regular_user() -> SessionUser {
        SessionUser {
            username: "alice".to_owned(),
            role: None,
        }
    }

    async fn parse_html(response: Response) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[tokio::test]
    async fn home_page_renders_fetched_rows() {
        let api = FakeExpenseApi::default();
        api.set_expenses(vec![summary(1, "alice"), summary(2, "bob")]);
        let state = state_with_api(api);

        let response = get_home_page(State(state), Extension(regular_user()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let rows = Selector::parse("tr[data-expense-row='true']").unwrap();
        assert_eq!(html.select(&rows).count(), 2);
    }

    #[tokio::test]
    async fn home_page_truncates_to_ten_rows() {
        let api = FakeExpenseApi::default();
        api.set_expenses((0..15).map(|i| summary(i, "alice")).collect());
        let state = state_with_api(api);

        let response = get_home_page(State(state), Extension(regular_user()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let rows = Selector::parse("tr[data-expense-row='true']").unwrap();
        assert_eq!(html.select(&rows).count(), 10);
    }

    #[tokio::test]
    async fn home_page_survives_a_failing_backend() {
        let api = FakeExpenseApi::default();
        api.fail_listing();
        let state = state_with_api(api);

        let response = get_home_page(State(state), Extension(regular_user()))
            .await
            .unwrap();

        let html = parse_html(response).await;
        let empty = Selector::parse("td[data-empty-state='true']").unwrap();
        assert!(
            html.select(&empty).next().is_some(),
            "a failed first fetch should fall back to the empty state"
        );
    }

    #[tokio::test]
    async fn sidebar_follows_the_session_role() {
        let api = FakeExpenseApi::default();
        let state = state_with_api(api);
        let admin = SessionUser {
            username: "root".to_owned(),
            role: Some(Role {
                role_name: "Admin".to_owned(),
            }),
        };

        let response = get_home_page(State(state), Extension(admin)).await.unwrap();

        let html = parse_html(response).await;
        let links = Selector::parse("nav[aria-label='Primary'] a").unwrap();
        assert_eq!(html.select(&links).count(), 6);
    }
}
