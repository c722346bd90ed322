//! This file defines the templates and a convenience function for creating
//! the role-aware sidebar navigation.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the sidebar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as active at any one time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct NavItem {
    url: &'static str,
    title: &'static str,
    is_current: bool,
}

impl NavItem {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "flex items-center p-3 font-bold rounded-sm text-blue-700 \
            bg-blue-50 dark:text-blue-300 dark:bg-blue-900/30"
        } else {
            "flex items-center p-3 font-medium rounded-sm text-gray-500 \
            hover:bg-gray-100 hover:text-blue-700 dark:text-gray-400 \
            dark:hover:bg-gray-700 dark:hover:text-white"
        };

        html!( a href=(self.url) class=(style) aria-current=[self.is_current.then_some("page")] { (self.title) } )
    }
}

/// Derive the navigation item set for a role.
///
/// Regular users get the base three items. Admins get the two expense pages
/// behind the admin path prefix, plus the three admin-only items.
fn nav_items(is_admin: bool, active_endpoint: &str) -> Vec<NavItem> {
    let regular_expense_url = if is_admin {
        endpoints::ADMIN_REGULAR_EXPENSE_VIEW
    } else {
        endpoints::REGULAR_EXPENSE_VIEW
    };
    let other_expense_url = if is_admin {
        endpoints::ADMIN_OTHER_EXPENSE_VIEW
    } else {
        endpoints::OTHER_EXPENSE_VIEW
    };

    let mut items = vec![
        NavItem {
            url: endpoints::ROOT,
            title: "Home",
            is_current: active_endpoint == endpoints::ROOT,
        },
        NavItem {
            url: regular_expense_url,
            title: "Regular Expense",
            is_current: active_endpoint == regular_expense_url,
        },
        NavItem {
            url: other_expense_url,
            title: "Other Expense",
            is_current: active_endpoint == other_expense_url,
        },
    ];

    if is_admin {
        items.extend([
            NavItem {
                url: endpoints::UPDATE_ITEM_VIEW,
                title: "Update Item",
                is_current: active_endpoint == endpoints::UPDATE_ITEM_VIEW,
            },
            NavItem {
                url: endpoints::EXPENSE_HISTORY_VIEW,
                title: "Expense History",
                is_current: active_endpoint == endpoints::EXPENSE_HISTORY_VIEW,
            },
            NavItem {
                url: endpoints::ALL_EXPENSE_HISTORY_VIEW,
                title: "All Expense History",
                is_current: active_endpoint == endpoints::ALL_EXPENSE_HISTORY_VIEW,
            },
        ]);
    }

    items
}

pub struct Sidebar {
    items: Vec<NavItem>,
}

impl Sidebar {
    /// Get the sidebar for a role.
    ///
    /// If an item matches `active_endpoint`, then that item will be marked as
    /// active and displayed differently in the HTML.
    pub fn new(is_admin: bool, active_endpoint: &str) -> Sidebar {
        Sidebar {
            items: nav_items(is_admin, active_endpoint),
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            aside class="w-full lg:w-64 shrink-0"
            {
                div class="h-full rounded bg-white shadow dark:bg-gray-800 flex flex-col"
                {
                    div class="h-16 flex items-center justify-center px-4 border-b border-gray-200 dark:border-gray-700"
                    {
                        a href=(endpoints::ROOT) class="flex items-center space-x-3"
                        {
                            img
                                src="/static/favicon-128x128.png"
                                alt="Spendlog Logo"
                                class="h-8"
                            ;

                            span class="self-center text-xl font-semibold dark:text-white"
                            {
                                "Spendlog"
                            }
                        }
                    }

                    nav class="p-4 space-y-1 flex-1" aria-label="Primary"
                    {
                        @for item in self.items.into_iter() {
                            (item.into_html())
                        }
                    }

                    div class="p-4 border-t border-gray-200 dark:border-gray-700"
                    {
                        a
                            href=(endpoints::LOG_OUT)
                            class="flex items-center p-3 font-medium text-gray-500 \
                            hover:text-red-600 dark:text-gray-400 dark:hover:text-red-400"
                        {
                            "Logout"
                        }
                    }
                }
            }
        )
    }
}
