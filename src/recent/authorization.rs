//! The edit/delete authorization rules for recent expense rows.
//!
//! These checks are pure and synchronous: every denial is decided from the
//! row, the session user and today's date, never from a backend round-trip.
//! A denial is an expected outcome surfaced to the user, not an error.

use std::fmt;

use time::Date;

use super::models::ExpenseSummary;

/// Why an expense row cannot be edited.
///
/// The checks run in this order, so a row that is both refunded and stale
/// reports [EditDenied::Refunded].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditDenied {
    /// The row's order has been refunded, which locks it permanently.
    Refunded,
    /// The row is not from today's date.
    NotToday,
    /// The row belongs to another user.
    NotOwner,
}

impl EditDenied {
    /// The user-facing explanation, shown as a disabled-button tooltip and
    /// as the alert when a stale click slips through.
    pub fn reason(self) -> &'static str {
        match self {
            EditDenied::Refunded => "Refunded entries cannot be edited",
            EditDenied::NotToday => "Only today's entries can be edited",
            EditDenied::NotOwner => "You can only edit your own entries",
        }
    }
}

impl fmt::Display for EditDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Why an expense row cannot be deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDenied {
    /// The row is not from today's date.
    NotToday,
}

impl DeleteDenied {
    /// The user-facing explanation for the disabled delete button.
    pub fn reason(self) -> &'static str {
        match self {
            DeleteDenied::NotToday => "Only today's entries can be deleted",
        }
    }
}

impl fmt::Display for DeleteDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Check whether `record` may be edited by the user named `current_username`.
///
/// All three rules must hold: the row is not refunded, it is from `today`,
/// and it is owned by the current user. A row without a date or user fails
/// the corresponding rule rather than passing by accident.
pub fn check_edit(
    record: &ExpenseSummary,
    current_username: &str,
    today: Date,
) -> Result<(), EditDenied> {
    if record.is_refunded {
        return Err(EditDenied::Refunded);
    }

    if record.date != Some(today) {
        return Err(EditDenied::NotToday);
    }

    if record.username() != Some(current_username) {
        return Err(EditDenied::NotOwner);
    }

    Ok(())
}

/// Check whether `record` may be deleted.
///
/// Deletion only requires the row to be from `today`; ownership and refund
/// status are deliberately not consulted, matching the upstream policy.
pub fn check_delete(record: &ExpenseSummary, today: Date) -> Result<(), DeleteDenied> {
    if record.date != Some(today) {
        return Err(DeleteDenied::NotToday);
    }

    Ok(())
}

#[cfg(test)]
mod authorization_tests {
    use time::{Date, macros::date};

    use crate::recent::models::{ExpenseSummary, UserRef};

    use super::{DeleteDenied, EditDenied, check_delete, check_edit};

    const TODAY: Date = date!(2025 - 11 - 02);

    fn row(date: Date, username: &str, is_refunded: bool) -> ExpenseSummary {
        ExpenseSummary {
            order_id: Some(1),
            id: None,
            date: Some(date),
            user: Some(UserRef::Username(username.to_owned())),
            total_count: 2,
            total_amount: Some(40.0),
            amount: None,
            is_refunded,
        }
    }

    #[test]
    fn todays_own_unrefunded_row_is_editable() {
        let record = row(TODAY, "alice", false);

        assert_eq!(check_edit(&record, "alice", TODAY), Ok(()));
    }

    #[test]
    fn refunded_rows_report_the_refund_reason() {
        let record = row(TODAY, "alice", true);

        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::Refunded));
    }

    #[test]
    fn stale_rows_report_the_date_reason() {
        let record = row(date!(2025 - 11 - 01), "alice", false);

        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::NotToday));
    }

    #[test]
    fn other_users_rows_report_the_ownership_reason() {
        let record = row(TODAY, "bob", false);

        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::NotOwner));
    }

    #[test]
    fn refund_check_runs_before_the_date_check() {
        let record = row(date!(2025 - 11 - 01), "bob", true);

        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::Refunded));
    }

    #[test]
    fn rows_without_date_or_user_fail_the_matching_rule() {
        let mut record = row(TODAY, "alice", false);
        record.date = None;
        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::NotToday));

        let mut record = row(TODAY, "alice", false);
        record.user = None;
        assert_eq!(check_edit(&record, "alice", TODAY), Err(EditDenied::NotOwner));
    }

    #[test]
    fn delete_only_checks_the_date() {
        // Refunded and owned by somebody else, but from today.
        let record = row(TODAY, "bob", true);
        assert_eq!(check_delete(&record, TODAY), Ok(()));

        let stale = row(date!(2025 - 10 - 31), "alice", false);
        assert_eq!(check_delete(&stale, TODAY), Err(DeleteDenied::NotToday));
    }

    #[test]
    fn denial_reasons_are_specific() {
        assert_eq!(
            EditDenied::Refunded.reason(),
            "Refunded entries cannot be edited"
        );
        assert_eq!(
            EditDenied::NotToday.reason(),
            "Only today's entries can be edited"
        );
        assert_eq!(
            EditDenied::NotOwner.reason(),
            "You can only edit your own entries"
        );
        assert_eq!(
            DeleteDenied::NotToday.reason(),
            "Only today's entries can be deleted"
        );
    }
}
