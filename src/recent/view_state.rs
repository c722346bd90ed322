//! The owned view state behind the recent expense table.
//!
//! The table does not patch itself from mutation responses; it owns a cached
//! copy of the backend's rows and re-fetches through [refresh] after every
//! mutation. Handlers share one [RecentView] behind a mutex.

use std::sync::Mutex;

use crate::api::ExpenseApi;

use super::models::{EditingSession, ExpenseSummary};

/// How many rows the table shows. The backend returns summaries newest-first
/// and the view keeps the first ten without re-sorting.
pub(crate) const RECENT_LIMIT: usize = 10;

/// The recent table's view of the backend data.
#[derive(Debug, Default)]
pub struct RecentView {
    rows: Vec<ExpenseSummary>,
    is_loading: bool,
    editing: Option<EditingSession>,
    /// Bumped by every refresh so that a slow response that lost a race
    /// cannot overwrite the rows of a newer one.
    generation: u64,
}

impl RecentView {
    /// The cached rows, newest first, at most [RECENT_LIMIT] of them.
    pub fn rows(&self) -> &[ExpenseSummary] {
        &self.rows
    }

    /// Whether a refresh is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The active editing session, if an edit is in progress.
    pub fn editing(&self) -> Option<&EditingSession> {
        self.editing.as_ref()
    }

    /// Start an editing session, replacing any session already open. The
    /// view holds at most one session at a time.
    pub fn open_session(&mut self, session: EditingSession) {
        self.editing = Some(session);
    }

    /// Drop the active editing session, if any. No backend call is made;
    /// cancelled edits simply disappear.
    pub fn close_session(&mut self) {
        self.editing = None;
    }

    #[cfg(test)]
    pub(crate) fn set_rows(&mut self, rows: Vec<ExpenseSummary>) {
        self.rows = rows;
    }
}

/// Re-fetch the expense list and replace the cached rows.
///
/// Sets the loading flag, asks the backend for the full list and keeps the
/// first [RECENT_LIMIT] rows in response order. A fetch failure is logged
/// and leaves the previous rows in place; the loading flag is cleared either
/// way and there is no retry. If another refresh started while this one was
/// waiting on the backend, the late response is discarded.
pub(crate) async fn refresh(view: &Mutex<RecentView>, api: &dyn ExpenseApi) {
    let generation = {
        let Ok(mut view) = view.lock() else {
            tracing::error!("could not acquire the recent view lock");
            return;
        };

        view.is_loading = true;
        view.generation += 1;
        view.generation
    };

    let result = api.list_expenses().await;

    let Ok(mut view) = view.lock() else {
        tracing::error!("could not acquire the recent view lock");
        return;
    };

    if view.generation != generation {
        // A newer refresh owns the view now; it will clear the loading flag.
        tracing::debug!("discarding stale expense list response");
        return;
    }

    view.is_loading = false;

    match result {
        Ok(mut rows) => {
            rows.truncate(RECENT_LIMIT);
            view.rows = rows;
        }
        Err(error) => tracing::error!("could not refresh recent expenses: {error}"),
    }
}
