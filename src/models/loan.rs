//! Loan model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database.
///
/// A loan is immutable once created, except for `returned_at`, which
/// transitions exactly once from NULL to a concrete timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub client_id: i32,
    pub book_id: i32,
    pub loaned_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    /// A loan is open while the book has not been returned
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Loan joined with client and book display fields, for listings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanView {
    pub id: i32,
    pub loaned_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub client_name: String,
    pub client_national_id: String,
    pub book_title: String,
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub client_id: i32,
    pub book_id: i32,
}
