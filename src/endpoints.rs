//! The endpoint URIs for pages and htmx API routes.

/// The home page showing the recent expense table and the item entry form.
pub const ROOT: &str = "/";
/// The page for recording day-to-day expenses.
pub const REGULAR_EXPENSE_VIEW: &str = "/regular-expense";
/// The page for recording one-off expenses.
pub const OTHER_EXPENSE_VIEW: &str = "/other-expense";
/// The admin variant of the regular expense page.
pub const ADMIN_REGULAR_EXPENSE_VIEW: &str = "/admin/regular-expense";
/// The admin variant of the other expense page.
pub const ADMIN_OTHER_EXPENSE_VIEW: &str = "/admin/other-expense";
/// The admin page for editing catalog items.
pub const UPDATE_ITEM_VIEW: &str = "/update-item";
/// The admin page for browsing per-user expense history.
pub const EXPENSE_HISTORY_VIEW: &str = "/admin/history";
/// The admin page for browsing everyone's expense history.
pub const ALL_EXPENSE_HISTORY_VIEW: &str = "/admin/expense-history";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route that re-renders the recent expense table fragment.
pub const RECENT_TABLE: &str = "/api/recent";
/// The route that opens an editing session for an expense row.
pub const INITIATE_EDIT: &str = "/api/recent/edit";
/// The route that discards the active editing session.
pub const CANCEL_EDIT: &str = "/api/recent/cancel_edit";
/// The route that deletes all orders for a (date, user) pair.
pub const DELETE_ORDERS: &str = "/api/orders";
/// The route that saves the item entry form.
pub const UPDATE_ORDER: &str = "/api/orders/update";
