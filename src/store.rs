//! contacts table DDL and insert.

use crate::validate::ValidContact;
use async_trait::async_trait;
use sqlx::PgPool;

/// Create the contacts table if missing. Called once at startup, before serving.
pub async fn ensure_contacts_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Durable storage for contacts. The insert either commits and yields an id
/// or leaves no row behind.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert_contact(&self, contact: &ValidContact) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl ContactStore for PgPool {
    async fn insert_contact(&self, contact: &ValidContact) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "INSERT INTO contacts (name, email, message) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&contact.name)
        .bind(&contact.email)
        .bind(&contact.message)
        .fetch_one(self)
        .await?;
        Ok(row.0)
    }
}
