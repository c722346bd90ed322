//! The data types behind the recent expense table.

use serde::{Deserialize, Serialize};
use time::Date;

fn default_count() -> i64 {
    1
}

/// The user an expense row belongs to.
///
/// The backend is inconsistent here: the daily summary endpoint sends a raw
/// username string while other endpoints send a user object, so both shapes
/// must deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// A full user object. `name` is the optional display name.
    Detailed {
        username: String,
        #[serde(default)]
        name: Option<String>,
    },
    /// A bare username.
    Username(String),
}

impl UserRef {
    /// The username used for ownership checks.
    pub fn username(&self) -> &str {
        match self {
            UserRef::Detailed { username, .. } => username,
            UserRef::Username(username) => username,
        }
    }

    /// The name to show in the table, preferring the display name.
    pub fn display_name(&self) -> &str {
        match self {
            UserRef::Detailed {
                name: Some(name), ..
            } => name,
            UserRef::Detailed { username, .. } => username,
            UserRef::Username(username) => username,
        }
    }
}

/// One row of the recent expense table as returned by the backend's daily
/// summary endpoint.
///
/// Every field is optional or defaulted because rows aggregated from partial
/// data do arrive in practice; the UI must render them rather than reject the
/// whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    /// The identifier of the order backing this row.
    #[serde(default)]
    pub order_id: Option<i64>,
    /// A generic identifier some endpoints send instead of `order_id`.
    #[serde(default)]
    pub id: Option<i64>,
    /// The calendar date the expenses were recorded on.
    #[serde(default)]
    pub date: Option<Date>,
    /// The user who created the expenses.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// How many items the row aggregates.
    #[serde(default = "default_count")]
    pub total_count: i64,
    /// The summed amount for the row.
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// A single-entry amount some endpoints send instead of `total_amount`.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Whether the row's order has been refunded. Refunded rows are
    /// edit-locked.
    #[serde(default)]
    pub is_refunded: bool,
}

impl ExpenseSummary {
    /// The username for ownership checks, if the row has a user at all.
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(UserRef::username)
    }

    /// The amount to display: `total_amount`, else `amount`, else zero.
    pub fn display_amount(&self) -> f64 {
        self.total_amount.or(self.amount).unwrap_or(0.0)
    }

    /// A stable, non-empty key for the table row at `index`.
    ///
    /// Prefers the order ID, then the generic ID. Rows with neither get a
    /// composite of username, date and row index so that partially malformed
    /// records still key uniquely. The prefixes keep an order ID from ever
    /// colliding with an equal generic ID.
    pub fn row_key(&self, index: usize) -> String {
        if let Some(order_id) = self.order_id {
            return format!("order-{order_id}");
        }

        if let Some(id) = self.id {
            return format!("entry-{id}");
        }

        let username = self.username().unwrap_or("unknown");
        let date = self
            .date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "nodate".to_owned());

        format!("{username}-{date}-{index}")
    }
}

/// One order line item, fetched when an editing session opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub item_name: String,
    pub item_price: f64,
    pub count: i64,
}

/// An in-progress edit of one day's orders for one user.
///
/// Created by the edit endpoint once the authorization check passes and the
/// line items have been fetched, and destroyed on cancel or on a reported
/// update success. The recent view holds at most one of these at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    /// The date whose orders are being edited.
    pub date: Date,
    /// The username whose orders are being edited.
    pub username: String,
    /// The line items the entry form was seeded with.
    pub order_items: Vec<OrderItem>,
    /// The order the row pointed at, if it carried one.
    pub order_id: Option<i64>,
}
