//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{session_guard, session_guard_hx},
    endpoints,
    entry_form::update_order_endpoint,
    expense_pages::{
        get_all_expense_history_page, get_expense_history_page, get_other_expense_page,
        get_regular_expense_page, get_update_item_page,
    },
    internal_server_error::get_internal_server_error_page,
    log_in::{get_log_in_page, post_log_in},
    log_out::get_log_out,
    not_found::get_404_not_found,
    recent::{
        cancel_edit_endpoint, delete_orders_endpoint, get_home_page, get_recent_table,
        initiate_edit_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        // Log out stays reachable with a malformed session so nobody gets
        // stuck logged in.
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_home_page))
        .route(endpoints::REGULAR_EXPENSE_VIEW, get(get_regular_expense_page))
        .route(endpoints::OTHER_EXPENSE_VIEW, get(get_other_expense_page))
        .route(
            endpoints::ADMIN_REGULAR_EXPENSE_VIEW,
            get(get_regular_expense_page),
        )
        .route(
            endpoints::ADMIN_OTHER_EXPENSE_VIEW,
            get(get_other_expense_page),
        )
        .route(endpoints::UPDATE_ITEM_VIEW, get(get_update_item_page))
        .route(endpoints::EXPENSE_HISTORY_VIEW, get(get_expense_history_page))
        .route(
            endpoints::ALL_EXPENSE_HISTORY_VIEW,
            get(get_all_expense_history_page),
        )
        .layer(middleware::from_fn_with_state(state.clone(), session_guard));

    // These htmx routes need to use the HX-Redirect header for auth
    // redirects to work properly.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::RECENT_TABLE, get(get_recent_table))
            .route(endpoints::INITIATE_EDIT, post(initiate_edit_endpoint))
            .route(endpoints::CANCEL_EDIT, post(cancel_edit_endpoint))
            .route(endpoints::DELETE_ORDERS, delete(delete_orders_endpoint))
            .route(endpoints::UPDATE_ORDER, post(update_order_endpoint))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                session_guard_hx,
            )),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}
