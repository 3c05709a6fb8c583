//! Loan ledger service: owns the lend/return lifecycle.
//!
//! The service computes timestamps from an injected clock and delegates the
//! atomic check-and-mutate to the store. A loan is OPEN until returned;
//! RETURNED is terminal.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Days, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanView},
};

/// Fixed loan period in calendar days. The due date falls on the same
/// wall-clock time 15 days ahead, across month and year boundaries.
pub const LOAN_PERIOD_DAYS: u64 = 15;

/// Current-time source, injected so due dates and ordering are
/// deterministic under test
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used in production
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Storage seam for the ledger. Implementations must make each operation
/// atomic: either both the loan write and the stock write land, or neither.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanStore: Send + Sync {
    async fn lend(
        &self,
        client_id: i32,
        book_id: i32,
        loaned_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Loan>;

    async fn return_loan(&self, loan_id: i32, returned_at: DateTime<Utc>) -> AppResult<Loan>;

    async fn list(&self) -> AppResult<Vec<LoanView>>;
}

#[derive(Clone)]
pub struct LoansService {
    store: Arc<dyn LoanStore>,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(store: Arc<dyn LoanStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Lend a book to a client. Fails when the book does not exist, is out
    /// of stock, or the client does not exist (checked in that order).
    pub async fn lend(&self, client_id: i32, book_id: i32) -> AppResult<Loan> {
        let loaned_at = self.clock.now();
        let due_date = loaned_at
            .checked_add_days(Days::new(LOAN_PERIOD_DAYS))
            .ok_or_else(|| AppError::Internal("Due date out of range".to_string()))?;

        let loan = self.store.lend(client_id, book_id, loaned_at, due_date).await?;

        tracing::info!(
            loan_id = loan.id,
            client_id,
            book_id,
            due_date = %loan.due_date,
            "Loan created"
        );

        Ok(loan)
    }

    /// Return a loan. Fails when the loan does not exist or was already
    /// returned; the first successful return is final.
    pub async fn return_loan(&self, loan_id: i32) -> AppResult<Loan> {
        let loan = self.store.return_loan(loan_id, self.clock.now()).await?;

        tracing::info!(loan_id, book_id = loan.book_id, "Loan returned");

        Ok(loan)
    }

    /// All loans with joined display fields, newest first
    pub async fn list(&self) -> AppResult<Vec<LoanView>> {
        self.store.list().await
    }
}
