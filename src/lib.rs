//! Acervo Library Management System
//!
//! A Rust REST API server for a small library: staff accounts, a book
//! catalog, registered readers, and the loan ledger that keeps book stock
//! consistent with outstanding loans.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
