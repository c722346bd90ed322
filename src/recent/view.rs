//! HTML rendering for the recent expense table and the home page.

use maud::{Markup, html};
use time::Date;

use crate::{
    endpoints,
    entry_form::entry_form_fragment,
    html::{CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_amount, format_date_label, truncate_name},
    navigation::Sidebar,
    user::SessionUser,
};

use super::{
    authorization::{check_delete, check_edit},
    models::{EditingSession, ExpenseSummary},
};

const ACTION_ENABLED_EDIT_STYLE: &str = "text-green-600 hover:text-green-500 \
    dark:text-green-500 dark:hover:text-green-400 underline bg-transparent \
    border-none cursor-pointer";

const ACTION_ENABLED_DELETE_STYLE: &str = "text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

const ACTION_DISABLED_STYLE: &str =
    "text-gray-400 dark:text-gray-500 cursor-not-allowed opacity-40 bg-transparent border-none";

/// Render the full home page: sidebar, recent table and item entry form.
pub(crate) fn home_view(
    user: &SessionUser,
    rows: &[ExpenseSummary],
    editing: Option<&EditingSession>,
    today: Date,
    is_loading: bool,
) -> Markup {
    let sidebar = Sidebar::new(user.is_admin(), endpoints::ROOT).into_html();

    let content = html! {
        div class="flex flex-col lg:flex-row gap-4 w-full max-w-screen-xl mx-auto p-4"
        {
            (sidebar)

            main class=(PAGE_CONTAINER_STYLE) style="flex: 1"
            {
                div class="flex flex-col lg:flex-row gap-4 w-full"
                {
                    section class={(CARD_STYLE) " flex-1"}
                    {
                        header class="flex justify-between items-center mb-4"
                        {
                            h2 class="text-lg md:text-xl font-bold" { "Recently Added" }

                            button
                                type="button"
                                class="text-sm text-blue-600 hover:text-blue-500 dark:text-blue-500 dark:hover:text-blue-400 underline"
                                hx-get=(endpoints::RECENT_TABLE)
                                hx-target="#recent-table"
                                hx-swap="innerHTML"
                            {
                                "Refresh"
                            }
                        }

                        div id="recent-table"
                        {
                            (recent_table_fragment(rows, user, today, is_loading))
                        }
                    }

                    section class={(CARD_STYLE) " flex-1"}
                    {
                        div id="entry-form"
                        {
                            (entry_form_fragment(editing))
                        }
                    }
                }
            }
        }
    };

    base("Home", &content)
}

/// Render the contents of the `#recent-table` element.
///
/// This is both the initial page content and the htmx swap target after a
/// delete or a saved edit.
pub(crate) fn recent_table_fragment(
    rows: &[ExpenseSummary],
    user: &SessionUser,
    today: Date,
    is_loading: bool,
) -> Markup {
    html! {
        table class="min-w-full text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "User" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "Count" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "Amount" }
                    th scope="col" class={(TABLE_CELL_STYLE) " text-center"} { "Actions" }
                }
            }

            tbody
            {
                @if is_loading {
                    tr
                    {
                        td colspan="5" data-loading="true" class="px-6 py-4 text-center"
                        {
                            "Loading..."
                        }
                    }
                } @else if rows.is_empty() {
                    tr
                    {
                        td colspan="5" data-empty-state="true" class="px-6 py-4 text-center"
                        {
                            "No recent entries found"
                        }
                    }
                } @else {
                    @for (index, row) in rows.iter().enumerate() {
                        (expense_row_view(row, index, user, today))
                    }
                }
            }
        }
    }
}

fn expense_row_view(
    row: &ExpenseSummary,
    index: usize,
    user: &SessionUser,
    today: Date,
) -> Markup {
    let date_label = row
        .date
        .map(format_date_label)
        .unwrap_or_else(|| "—".to_owned());
    let (name, name_tooltip) = truncate_name(
        row.user
            .as_ref()
            .map(|user| user.display_name())
            .unwrap_or("Unknown"),
    );
    let amount = format_amount(row.display_amount());

    html! {
        tr
            class={(TABLE_ROW_STYLE) " hover:bg-gray-50 dark:hover:bg-gray-700/40"}
            data-expense-row="true"
            data-row-key=(row.row_key(index))
        {
            td class=(TABLE_CELL_STYLE)
            {
                @if let Some(date) = row.date {
                    time datetime=(date) { (date_label) }
                } @else {
                    (date_label)
                }
            }
            td class=(TABLE_CELL_STYLE) title=[name_tooltip] { (name) }
            td class={(TABLE_CELL_STYLE) " text-center"} { (row.total_count) }
            td class={(TABLE_CELL_STYLE) " text-center"} { "₹" (amount) }
            td class={(TABLE_CELL_STYLE) " text-center"}
            {
                div class="flex justify-center gap-3"
                {
                    (edit_action(row, user, today))
                    (delete_action(row, today))
                }
            }
        }
    }
}

fn edit_action(row: &ExpenseSummary, user: &SessionUser, today: Date) -> Markup {
    match check_edit(row, &user.username, today) {
        Ok(()) => {
            // check_edit passed, so the row has both a date and a user.
            let mut params = vec![
                ("date", row.date.unwrap_or(today).to_string()),
                (
                    "username",
                    row.username().unwrap_or(&user.username).to_owned(),
                ),
            ];
            if let Some(order_id) = row.order_id {
                params.push(("order_id", order_id.to_string()));
            }
            let query = serde_urlencoded::to_string(params).unwrap_or_default();

            html! {
                button
                    type="button"
                    data-action="edit"
                    class=(ACTION_ENABLED_EDIT_STYLE)
                    hx-post={(endpoints::INITIATE_EDIT) "?" (query)}
                    hx-target="#entry-form"
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                {
                    "Edit"
                }
            }
        }
        Err(denied) => html! {
            button
                type="button"
                data-action="edit"
                disabled
                title=(denied.reason())
                class=(ACTION_DISABLED_STYLE)
            {
                "Edit"
            }
        },
    }
}

fn delete_action(row: &ExpenseSummary, today: Date) -> Markup {
    match check_delete(row, today) {
        Ok(()) => {
            let username = row.username().unwrap_or("unknown").to_owned();
            let date = row.date.unwrap_or(today);
            let query = serde_urlencoded::to_string([
                ("date", date.to_string()),
                ("username", username.clone()),
            ])
            .unwrap_or_default();
            let confirm_message = format!(
                "Are you sure you want to delete all orders for {username} on {date}?"
            );

            html! {
                button
                    type="button"
                    data-action="delete"
                    class=(ACTION_ENABLED_DELETE_STYLE)
                    hx-delete={(endpoints::DELETE_ORDERS) "?" (query)}
                    hx-confirm=(confirm_message)
                    hx-target="#recent-table"
                    hx-swap="innerHTML"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
        Err(denied) => html! {
            button
                type="button"
                data-action="delete"
                disabled
                title=(denied.reason())
                class=(ACTION_DISABLED_STYLE)
            {
                "Delete"
            }
        },
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};
    use time::{Date, macros::date};

    use crate::{
        recent::models::{ExpenseSummary, UserRef},
        user::SessionUser,
    };

    use super::recent_table_fragment;

    const TODAY: Date = date!(2025 - 11 - 02);

    fn current_user() -> SessionUser {
        SessionUser {
            username: "alice".to_owned(),
            role: None,
        }
    }

    fn row(order_id: i64, date: Date, username: &str, is_refunded: bool) -> ExpenseSummary {
        ExpenseSummary {
            order_id: Some(order_id),
            id: None,
            date: Some(date),
            user: Some(UserRef::Username(username.to_owned())),
            total_count: 3,
            total_amount: Some(12.5),
            amount: None,
            is_refunded,
        }
    }

    #[track_caller]
    fn assert_valid_html(html: &Html) {
        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );
    }

    fn render(rows: &[ExpenseSummary]) -> Html {
        let markup = recent_table_fragment(rows, &current_user(), TODAY, false);
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn editable_row_gets_an_enabled_edit_button() {
        let html = render(&[row(1, TODAY, "alice", false)]);
        assert_valid_html(&html);

        let selector = Selector::parse("button[data-action='edit']").unwrap();
        let button = html.select(&selector).next().expect("No edit button found");

        assert!(button.value().attr("disabled").is_none());
        let hx_post = button.value().attr("hx-post").expect("Missing hx-post");
        assert!(hx_post.contains("date=2025-11-02"), "got {hx_post}");
        assert!(hx_post.contains("username=alice"), "got {hx_post}");
    }

    #[test]
    fn refunded_row_disables_edit_with_the_refund_reason() {
        let html = render(&[row(1, TODAY, "alice", true)]);

        let selector = Selector::parse("button[data-action='edit']").unwrap();
        let button = html.select(&selector).next().expect("No edit button found");

        assert!(button.value().attr("disabled").is_some());
        assert_eq!(
            button.value().attr("title"),
            Some("Refunded entries cannot be edited")
        );
    }

    #[test]
    fn foreign_row_disables_edit_with_the_ownership_reason() {
        let html = render(&[row(1, TODAY, "bob", false)]);

        let selector = Selector::parse("button[data-action='edit']").unwrap();
        let button = html.select(&selector).next().expect("No edit button found");

        assert_eq!(
            button.value().attr("title"),
            Some("You can only edit your own entries")
        );
    }

    #[test]
    fn stale_row_disables_both_buttons_with_date_reasons() {
        let html = render(&[row(1, date!(2025 - 10 - 30), "alice", false)]);

        let edit = Selector::parse("button[data-action='edit']").unwrap();
        let delete = Selector::parse("button[data-action='delete']").unwrap();

        let edit_button = html.select(&edit).next().unwrap();
        assert_eq!(
            edit_button.value().attr("title"),
            Some("Only today's entries can be edited")
        );

        let delete_button = html.select(&delete).next().unwrap();
        assert!(delete_button.value().attr("disabled").is_some());
        assert_eq!(
            delete_button.value().attr("title"),
            Some("Only today's entries can be deleted")
        );
    }

    #[test]
    fn delete_stays_enabled_for_refunded_rows_owned_by_others() {
        let html = render(&[row(1, TODAY, "bob", true)]);

        let selector = Selector::parse("button[data-action='delete']").unwrap();
        let button = html.select(&selector).next().unwrap();

        assert!(button.value().attr("disabled").is_none());
        let confirm = button.value().attr("hx-confirm").expect("Missing hx-confirm");
        assert_eq!(
            confirm,
            "Are you sure you want to delete all orders for bob on 2025-11-02?"
        );
    }

    #[test]
    fn amounts_render_with_two_decimals_and_the_currency_symbol() {
        let html = render(&[row(1, TODAY, "alice", false)]);

        let selector = Selector::parse("tr[data-expense-row='true'] td").unwrap();
        let cells: Vec<String> = html
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();

        assert!(
            cells.iter().any(|cell| cell == "₹12.50"),
            "want an amount cell ₹12.50, got {cells:?}"
        );
    }

    #[test]
    fn empty_table_shows_the_empty_state() {
        let html = render(&[]);

        let selector = Selector::parse("td[data-empty-state='true']").unwrap();
        let cell = html.select(&selector).next().expect("No empty state found");

        assert_eq!(cell.text().collect::<String>(), "No recent entries found");
        assert_eq!(cell.value().attr("colspan"), Some("5"));
    }

    #[test]
    fn loading_state_takes_priority_over_rows() {
        let markup = recent_table_fragment(
            &[row(1, TODAY, "alice", false)],
            &current_user(),
            TODAY,
            true,
        );
        let html = Html::parse_fragment(&markup.into_string());

        let selector = Selector::parse("td[data-loading='true']").unwrap();
        assert!(html.select(&selector).next().is_some());

        let rows_selector = Selector::parse("tr[data-expense-row='true']").unwrap();
        assert!(html.select(&rows_selector).next().is_none());
    }

    #[test]
    fn rows_without_user_show_unknown() {
        let mut record = row(1, TODAY, "alice", false);
        record.user = None;
        let html = render(&[record]);

        let selector = Selector::parse("tr[data-expense-row='true'] td").unwrap();
        let cells: Vec<String> = html
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();

        assert!(
            cells.iter().any(|cell| cell == "Unknown"),
            "want a user cell Unknown, got {cells:?}"
        );
    }
}
