//! # Client Repository
//!
//! Database operations for registered clients. The register only needs two
//! of them: the selection list at session start and registration of a new
//! client from the form.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use selah_core::Client;

/// Row shape for the clients table.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: String,
    given_name: String,
    family_name: String,
    age: Option<i64>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    preferred: bool,
    receives_promos: bool,
    created_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            given_name: row.given_name,
            family_name: row.family_name,
            age: row.age,
            email: row.email,
            phone: row.phone,
            address: row.address,
            preferred: row.preferred,
            receives_promos: row.receives_promos,
            created_at: row.created_at,
        }
    }
}

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Lists all clients, ordered for the selection combo.
    pub async fn list(&self) -> DbResult<Vec<Client>> {
        debug!("Listing clients");

        let rows: Vec<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, given_name, family_name, age, email, phone, address,
                   preferred, receives_promos, created_at
            FROM clients
            ORDER BY family_name, given_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Gets a client by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let row: Option<ClientRow> = sqlx::query_as(
            r#"
            SELECT id, given_name, family_name, age, email, phone, address,
                   preferred, receives_promos, created_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Client::from))
    }

    /// Inserts a new client record.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (
                id, given_name, family_name, age, email, phone, address,
                preferred, receives_promos, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&client.id)
        .bind(&client.given_name)
        .bind(&client.family_name)
        .bind(client.age)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(client.preferred)
        .bind(client.receives_promos)
        .bind(client.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn client(id: &str, given: &str, family: &str) -> Client {
        Client {
            id: id.to_string(),
            given_name: given.to_string(),
            family_name: family.to_string(),
            age: Some(34),
            email: Some(format!("{}@example.com", given.to_lowercase())),
            phone: None,
            address: None,
            preferred: false,
            receives_promos: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        repo.insert(&client("c1", "María", "Zúñiga")).await.unwrap();
        repo.insert(&client("c2", "Ana", "Brito")).await.unwrap();

        let clients = repo.list().await.unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].family_name, "Brito");
        assert_eq!(clients[1].full_name(), "María Zúñiga");
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        repo.insert(&client("c1", "Ana", "Brito")).await.unwrap();

        let found = repo.get_by_id("c1").await.unwrap();
        assert_eq!(found.unwrap().given_name, "Ana");

        assert!(repo.get_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        repo.insert(&client("c1", "Ana", "Brito")).await.unwrap();
        let err = repo.insert(&client("c1", "Ana", "Brito")).await;
        assert!(matches!(
            err,
            Err(crate::error::DbError::UniqueViolation { .. })
        ));
    }
}
