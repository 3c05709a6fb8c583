//! Data models for Acervo

pub mod book;
pub mod client;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookView, CreateBook, UpdateBook};
pub use client::{Client, CreateClient, UpdateClient};
pub use loan::{CreateLoan, Loan, LoanView};
pub use user::{User, UserClaims};
