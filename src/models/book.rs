//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

/// Book with the derived availability label, as returned by catalog searches.
///
/// The label is computed from the stock count at query time and never
/// persisted, so it cannot drift from the counter.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookView {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub stock: i32,
    pub availability: String,
}

/// Availability label for a given stock count
pub fn availability_label(stock: i32) -> &'static str {
    if stock > 0 {
        "Available"
    } else {
        "Unavailable"
    }
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        let availability = availability_label(book.stock).to_string();
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            stock: book.stock,
            availability,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    /// Number of copies; defaults to 1 when unspecified
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

/// Update book request (catalog fields only; stock is owned by the loan ledger)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_label_from_stock() {
        assert_eq!(availability_label(3), "Available");
        assert_eq!(availability_label(1), "Available");
        assert_eq!(availability_label(0), "Unavailable");
    }

    #[test]
    fn view_carries_label() {
        let book = Book {
            id: 1,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            isbn: "9780451524935".to_string(),
            stock: 0,
            created_at: Utc::now(),
        };
        let view = BookView::from(book);
        assert_eq!(view.availability, "Unavailable");
    }
}
