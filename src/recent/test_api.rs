//! An in-memory [ExpenseApi] used by tests across the crate.

use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use time::Date;
use tokio::sync::oneshot;

use crate::{
    Error,
    api::{ExpenseApi, ItemCount},
    user::{Role, SessionUser},
};

use super::models::{ExpenseSummary, OrderItem};

/// A fake backend whose behavior each test scripts up front. Failure flags
/// make the corresponding call return [Error::Backend] once armed.
#[derive(Default)]
pub(crate) struct FakeExpenseApi {
    expenses: Mutex<Vec<ExpenseSummary>>,
    order_items: Mutex<Vec<OrderItem>>,
    listing_gate: Mutex<Option<oneshot::Receiver<()>>>,
    fail_listing: AtomicBool,
    fail_order_items: AtomicBool,
    fail_deletes: AtomicBool,
    fail_updates: AtomicBool,
    fail_log_out: AtomicBool,
    reject_credentials: AtomicBool,
    admin_log_in: AtomicBool,
    pub(crate) log_out_calls: AtomicUsize,
    pub(crate) deleted: Mutex<Vec<(Date, String)>>,
    pub(crate) updated: Mutex<Vec<(i64, Vec<ItemCount>)>>,
}

impl FakeExpenseApi {
    pub(crate) fn set_expenses(&self, expenses: Vec<ExpenseSummary>) {
        *self.expenses.lock().unwrap() = expenses;
    }

    pub(crate) fn set_order_items(&self, order_items: Vec<OrderItem>) {
        *self.order_items.lock().unwrap() = order_items;
    }

    /// Make the next `list_expenses` call wait until `gate` fires.
    pub(crate) fn gate_next_listing(&self, gate: oneshot::Receiver<()>) {
        *self.listing_gate.lock().unwrap() = Some(gate);
    }

    pub(crate) fn fail_listing(&self) {
        self.fail_listing.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_order_items(&self) {
        self.fail_order_items.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_updates(&self) {
        self.fail_updates.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_log_out(&self) {
        self.fail_log_out.store(true, Ordering::SeqCst);
    }

    pub(crate) fn reject_credentials(&self) {
        self.reject_credentials.store(true, Ordering::SeqCst);
    }

    pub(crate) fn log_in_as_admin(&self) {
        self.admin_log_in.store(true, Ordering::SeqCst);
    }

    fn backend_error() -> Error {
        Error::Backend("simulated backend failure".to_owned())
    }
}

#[async_trait]
impl ExpenseApi for FakeExpenseApi {
    async fn list_expenses(&self) -> Result<Vec<ExpenseSummary>, Error> {
        let gate = self.listing_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        Ok(self.expenses.lock().unwrap().clone())
    }

    async fn order_items_by_date(
        &self,
        _date: Date,
        _username: &str,
    ) -> Result<Vec<OrderItem>, Error> {
        if self.fail_order_items.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        Ok(self.order_items.lock().unwrap().clone())
    }

    async fn delete_orders_by_date(&self, date: Date, username: &str) -> Result<(), Error> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        self.deleted.lock().unwrap().push((date, username.to_owned()));

        Ok(())
    }

    async fn update_order(
        &self,
        order_id: i64,
        _date: Date,
        _username: &str,
        items: &[ItemCount],
    ) -> Result<(), Error> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        self.updated
            .lock()
            .unwrap()
            .push((order_id, items.to_vec()));

        Ok(())
    }

    async fn log_in(&self, username: &str, _password: &str) -> Result<SessionUser, Error> {
        if self.reject_credentials.load(Ordering::SeqCst) {
            return Err(Error::InvalidCredentials);
        }

        let role = self
            .admin_log_in
            .load(Ordering::SeqCst)
            .then(|| Role {
                role_name: "Admin".to_owned(),
            });

        Ok(SessionUser {
            username: username.to_owned(),
            role,
        })
    }

    async fn log_out(&self) -> Result<(), Error> {
        self.log_out_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_log_out.load(Ordering::SeqCst) {
            return Err(Self::backend_error());
        }

        Ok(())
    }
}
