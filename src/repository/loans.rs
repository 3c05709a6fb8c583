//! Loans repository: the transactional core of the loan ledger.
//!
//! `lend` and `return_loan` each perform two writes (loan row + book stock
//! counter). Both run inside a single transaction with a `FOR UPDATE` row
//! lock, so concurrent callers against the same book or loan are serialized
//! and a failure between the writes rolls both back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanView},
    services::loans::LoanStore,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Whether any loan (open or returned) references the given book
    pub async fn book_has_loans(&self, book_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = $1)")
                .bind(book_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Whether any loan (open or returned) references the given client
    pub async fn client_has_loans(&self, client_id: i32) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE client_id = $1)")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

#[async_trait]
impl LoanStore for LoansRepository {
    /// Create a loan and decrement the book's stock, atomically.
    ///
    /// Precondition order: book exists, stock > 0, client exists. All checks
    /// run inside the transaction after the book row is locked, so the stock
    /// read cannot race a concurrent decrement.
    async fn lend(
        &self,
        client_id: i32,
        book_id: i32,
        loaned_at: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let stock: i32 = sqlx::query_scalar("SELECT stock FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if stock <= 0 {
            return Err(AppError::Conflict(format!(
                "Book with id {} is out of stock",
                book_id
            )));
        }

        let client_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(client_id)
                .fetch_one(&mut *tx)
                .await?;
        if !client_exists {
            return Err(AppError::NotFound(format!(
                "Client with id {} not found",
                client_id
            )));
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (client_id, book_id, loaned_at, due_date, returned_at)
            VALUES ($1, $2, $3, $4, NULL)
            RETURNING id, client_id, book_id, loaned_at, due_date, returned_at
            "#,
        )
        .bind(client_id)
        .bind(book_id)
        .bind(loaned_at)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        // Conditional decrement. With the row lock held this always affects
        // one row; the guard keeps the counter from ever going negative.
        let updated = sqlx::query("UPDATE books SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated != 1 {
            return Err(AppError::Conflict(format!(
                "Book with id {} is out of stock",
                book_id
            )));
        }

        tx.commit().await?;

        Ok(loan)
    }

    /// Mark a loan returned and increment the book's stock, atomically.
    ///
    /// `returned_at` transitions exactly once from NULL; a second return of
    /// the same loan is rejected and performs no write.
    async fn return_loan(&self, loan_id: i32, returned_at: DateTime<Utc>) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            "SELECT id, client_id, book_id, loaned_at, due_date, returned_at FROM loans WHERE id = $1 FOR UPDATE",
        )
        .bind(loan_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.returned_at.is_some() {
            return Err(AppError::Conflict(format!(
                "Loan with id {} is already returned",
                loan_id
            )));
        }

        let updated =
            sqlx::query("UPDATE loans SET returned_at = $1 WHERE id = $2 AND returned_at IS NULL")
                .bind(returned_at)
                .bind(loan_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();

        if updated != 1 {
            return Err(AppError::Conflict(format!(
                "Loan with id {} is already returned",
                loan_id
            )));
        }

        sqlx::query("UPDATE books SET stock = stock + 1 WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Loan {
            returned_at: Some(returned_at),
            ..loan
        })
    }

    /// List all loans with joined client and book display fields, newest first
    async fn list(&self) -> AppResult<Vec<LoanView>> {
        let rows = sqlx::query(
            r#"
            SELECT l.id, l.loaned_at, l.due_date, l.returned_at,
                   c.name AS client_name, c.national_id AS client_national_id,
                   b.title AS book_title
            FROM loans l
            JOIN clients c ON l.client_id = c.id
            JOIN books b ON l.book_id = b.id
            ORDER BY l.loaned_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| LoanView {
                id: r.get("id"),
                loaned_at: r.get("loaned_at"),
                due_date: r.get("due_date"),
                returned_at: r.get("returned_at"),
                client_name: r.get("client_name"),
                client_national_id: r.get("client_national_id"),
                book_title: r.get("book_title"),
            })
            .collect())
    }
}
