//! The recent expense table for the home page.
//!
//! This module contains everything related to the "Recently Added" view:
//! - The `ExpenseSummary` model and the row key / amount display rules
//! - The authorization rules gating the per-row Edit and Delete actions
//! - The owned view state with its fetch-and-truncate refresh cycle
//! - Route handlers for the home page and the htmx action endpoints

mod authorization;
mod delete_endpoint;
mod edit_endpoint;
mod models;
mod recent_page;
mod view;
mod view_state;

#[cfg(test)]
pub(crate) mod test_api;

pub use authorization::{DeleteDenied, EditDenied, check_delete, check_edit};
pub use delete_endpoint::{DeleteOrdersState, delete_orders_endpoint};
pub use edit_endpoint::{EditActionState, cancel_edit_endpoint, initiate_edit_endpoint};
pub use models::{EditingSession, ExpenseSummary, OrderItem, UserRef};
pub use recent_page::{RecentPageState, get_home_page, get_recent_table};
pub use view_state::RecentView;

pub(crate) use recent_page::current_local_date;
pub(crate) use view::recent_table_fragment;
pub(crate) use view_state::refresh;
