//! Business logic services

pub mod auth;
pub mod catalog;
pub mod clients;
pub mod loans;

use std::sync::Arc;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub clients: clients::ClientsService,
    pub loans: loans::LoansService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let loan_store = Arc::new(repository.loans.clone());

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            catalog: catalog::CatalogService::new(repository.clone()),
            clients: clients::ClientsService::new(repository.clone()),
            loans: loans::LoansService::new(loan_store, Arc::new(loans::SystemClock)),
            repository,
        }
    }
}
