//! Client (reader) management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, UpdateClient},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
}

impl ClientsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all clients
    pub async fn list_clients(&self) -> AppResult<Vec<Client>> {
        self.repository.clients.list().await
    }

    /// Get client by ID
    pub async fn get_client(&self, id: i32) -> AppResult<Client> {
        self.repository.clients.get_by_id(id).await
    }

    /// Register a new client
    pub async fn create_client(&self, client: CreateClient) -> AppResult<Client> {
        client
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .clients
            .national_id_exists(&client.national_id, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A client with national ID {} already exists",
                client.national_id
            )));
        }

        let created = self.repository.clients.create(&client).await?;
        tracing::info!(client_id = created.id, "Client created");
        Ok(created)
    }

    /// Update an existing client
    pub async fn update_client(&self, id: i32, client: UpdateClient) -> AppResult<Client> {
        client
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .clients
            .national_id_exists(&client.national_id, Some(id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "A client with national ID {} already exists",
                client.national_id
            )));
        }

        self.repository.clients.update(id, &client).await
    }

    /// Delete a client; refused while loans reference them
    pub async fn delete_client(&self, id: i32) -> AppResult<()> {
        self.repository.clients.get_by_id(id).await?;

        if self.repository.loans.client_has_loans(id).await? {
            return Err(AppError::Conflict(
                "Client is referenced by existing loans".to_string(),
            ));
        }

        self.repository.clients.delete(id).await?;
        tracing::info!(client_id = id, "Client deleted");
        Ok(())
    }
}
