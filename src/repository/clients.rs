//! Clients (readers) repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, UpdateClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            "SELECT id, name, national_id, created_at FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    /// List all clients
    pub async fn list(&self) -> AppResult<Vec<Client>> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, name, national_id, created_at FROM clients ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(clients)
    }

    /// Check if a national ID already exists
    pub async fn national_id_exists(
        &self,
        national_id: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM clients WHERE national_id = $1 AND id != $2)",
            )
            .bind(national_id)
            .bind(id)
            .fetch_one(&self.pool)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE national_id = $1)")
                .bind(national_id)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a new client
    pub async fn create(&self, client: &CreateClient) -> AppResult<Client> {
        let created = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, national_id)
            VALUES ($1, $2)
            RETURNING id, name, national_id, created_at
            "#,
        )
        .bind(&client.name)
        .bind(&client.national_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing client
    pub async fn update(&self, id: i32, client: &UpdateClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET name = $1, national_id = $2
            WHERE id = $3
            RETURNING id, name, national_id, created_at
            "#,
        )
        .bind(&client.name)
        .bind(&client.national_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client with id {} not found", id)))
    }

    /// Delete a client; blocked by the FK RESTRICT constraint when loans
    /// reference them
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let deleted = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(AppError::NotFound(format!(
                "Client with id {} not found",
                id
            )));
        }
        Ok(())
    }
}
