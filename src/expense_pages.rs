//! The navigation targets other than Home.
//!
//! These pages carry the shared layout and sidebar so the navigation is
//! honest for both roles; their own content lives in other parts of the
//! product and is not rendered by this crate.

use axum::{
    Extension,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::Sidebar,
    user::SessionUser,
};

fn section_view(title: &str, active_endpoint: &str, user: &SessionUser) -> Markup {
    let sidebar = Sidebar::new(user.is_admin(), active_endpoint).into_html();

    let content = html! {
        div class="flex flex-col lg:flex-row gap-4 w-full max-w-screen-xl mx-auto p-4"
        {
            (sidebar)

            main class=(PAGE_CONTAINER_STYLE) style="flex: 1"
            {
                section class={(CARD_STYLE) " w-full"}
                {
                    h1 class="text-lg md:text-xl font-bold mb-4" { (title) }

                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "Recent entries can be reviewed and edited from the Home page."
                    }
                }
            }
        }
    };

    base(title, &content)
}

pub async fn get_regular_expense_page(Extension(user): Extension<SessionUser>) -> Response {
    let active = if user.is_admin() {
        endpoints::ADMIN_REGULAR_EXPENSE_VIEW
    } else {
        endpoints::REGULAR_EXPENSE_VIEW
    };

    section_view("Regular Expense", active, &user).into_response()
}

pub async fn get_other_expense_page(Extension(user): Extension<SessionUser>) -> Response {
    let active = if user.is_admin() {
        endpoints::ADMIN_OTHER_EXPENSE_VIEW
    } else {
        endpoints::OTHER_EXPENSE_VIEW
    };

    section_view("Other Expense", active, &user).into_response()
}

pub async fn get_update_item_page(Extension(user): Extension<SessionUser>) -> Response {
    section_view("Update Item", endpoints::UPDATE_ITEM_VIEW, &user).into_response()
}

pub async fn get_expense_history_page(Extension(user): Extension<SessionUser>) -> Response {
    section_view("Expense History", endpoints::EXPENSE_HISTORY_VIEW, &user).into_response()
}

pub async fn get_all_expense_history_page(Extension(user): Extension<SessionUser>) -> Response {
    section_view(
        "All Expense History",
        endpoints::ALL_EXPENSE_HISTORY_VIEW,
        &user,
    )
    .into_response()
}

#[cfg(test)]
mod expense_pages_tests {
    use axum::Extension;
    use scraper::{Html, Selector};

    use crate::user::{Role, SessionUser};

    use super::get_regular_expense_page;

    #[tokio::test]
    async fn regular_expense_page_marks_its_nav_item_active() {
        let user = SessionUser {
            username: "alice".to_owned(),
            role: Some(Role {
                role_name: "Admin".to_owned(),
            }),
        };

        let response = get_regular_expense_page(Extension(user)).await;
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = Html::parse_document(&String::from_utf8_lossy(&body));

        let selector = Selector::parse("a[aria-current='page']").unwrap();
        let active = html.select(&selector).next().expect("No active nav item");
        assert_eq!(active.text().collect::<String>(), "Regular Expense");
    }
}
