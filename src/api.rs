//! The expense backend collaborator.
//!
//! The UI never talks to a database of its own; every read and mutation goes
//! through the [ExpenseApi] trait so that page handlers can be tested against
//! an in-memory fake while the server runs against [RestExpenseApi].

use async_trait::async_trait;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    recent::{ExpenseSummary, OrderItem},
    user::SessionUser,
};

/// A line item count submitted from the item entry form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ItemCount {
    pub item_id: i64,
    pub count: i64,
}

/// The remote expense backend.
///
/// Listing is assumed to return rows newest-first; the recent view truncates
/// but does not sort. Mutations are fire-and-forget from the UI's point of
/// view: the caller refreshes its own state after a success instead of
/// patching it from the response.
#[async_trait]
pub trait ExpenseApi: Send + Sync {
    /// Fetch the daily expense summaries, newest first.
    async fn list_expenses(&self) -> Result<Vec<ExpenseSummary>, Error>;

    /// Fetch the order line items recorded on `date` by `username`.
    async fn order_items_by_date(
        &self,
        date: Date,
        username: &str,
    ) -> Result<Vec<OrderItem>, Error>;

    /// Delete every order recorded on `date` by `username`.
    async fn delete_orders_by_date(&self, date: Date, username: &str) -> Result<(), Error>;

    /// Replace the line item counts of `order_id`.
    async fn update_order(
        &self,
        order_id: i64,
        date: Date,
        username: &str,
        items: &[ItemCount],
    ) -> Result<(), Error>;

    /// Exchange credentials for the session user.
    async fn log_in(&self, username: &str, password: &str) -> Result<SessionUser, Error>;

    /// Tell the backend the session is over. Best-effort; callers must not
    /// let a failure here keep local session state alive.
    async fn log_out(&self) -> Result<(), Error>;
}

/// [ExpenseApi] implemented over the backend's REST routes.
#[derive(Debug, Clone)]
pub struct RestExpenseApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LogInResponse {
    user: SessionUser,
}

impl RestExpenseApi {
    /// Create a client for the backend at `base_url`,
    /// e.g. "https://expenses.example.com/api".
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn date_user_query(date: Date, username: &str) -> [(&'static str, String); 2] {
        [
            ("date", date.to_string()),
            ("username", username.to_owned()),
        ]
    }
}

#[async_trait]
impl ExpenseApi for RestExpenseApi {
    async fn list_expenses(&self) -> Result<Vec<ExpenseSummary>, Error> {
        let response = self
            .client
            .get(self.url("/daily-orderitem-summary/"))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn order_items_by_date(
        &self,
        date: Date,
        username: &str,
    ) -> Result<Vec<OrderItem>, Error> {
        let response = self
            .client
            .get(self.url("/orders-by-date/"))
            .query(&Self::date_user_query(date, username))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn delete_orders_by_date(&self, date: Date, username: &str) -> Result<(), Error> {
        self.client
            .delete(self.url("/delete-orders-by-date/"))
            .query(&Self::date_user_query(date, username))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn update_order(
        &self,
        order_id: i64,
        date: Date,
        username: &str,
        items: &[ItemCount],
    ) -> Result<(), Error> {
        self.client
            .put(self.url(&format!("/orders/{order_id}/")))
            .json(&serde_json::json!({
                "date": date.to_string(),
                "username": username,
                "items": items,
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn log_in(&self, username: &str, password: &str) -> Result<SessionUser, Error> {
        let response = self
            .client
            .post(self.url("/login/"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST
            || response.status() == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(Error::InvalidCredentials);
        }

        let body: LogInResponse = response.error_for_status()?.json().await?;

        Ok(body.user)
    }

    async fn log_out(&self) -> Result<(), Error> {
        self.client
            .post(self.url("/logout/"))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
