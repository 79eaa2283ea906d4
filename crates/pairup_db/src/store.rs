//! The PairUp document store
//!
//! Bundles the collections the service uses, creates their tables and unique
//! indexes, and issues counter values.

use crate::client::{DbClient, DbTransaction};
use crate::collection::Collection;
use crate::document::validate_field;
use crate::error::DbError;
use sqlx::{AnyConnection, Row};
use tracing::{debug, error, info};

pub const USERS: &str = "users";
pub const BIODATA: &str = "biodata";
pub const FAVORITES: &str = "favorites";
pub const CONTACT_REQUESTS: &str = "contact_requests";
pub const SUCCESS_STORIES: &str = "success_stories";

/// Counter issuing profile `BiodataId` values.
pub const BIODATA_SEQUENCE: &str = "biodata";

/// Natural keys: a collection rejects a second document with the same values for these fields.
const UNIQUE_KEYS: &[(&str, &[&str])] = &[
    (USERS, &["email"]),
    (BIODATA, &["email"]),
    (FAVORITES, &["ownerEmail", "BiodataId"]),
    (CONTACT_REQUESTS, &["email", "biodataId"]),
    (SUCCESS_STORIES, &["selfEmail"]),
];

/// Entry point to every collection, built once at startup and shared through state.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: DbClient,
}

impl DocumentStore {
    pub fn new(client: DbClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DbClient {
        &self.client
    }

    fn collection(&self, table: &'static str) -> Collection {
        Collection::new(self.client.pool().clone(), table)
    }

    pub fn users(&self) -> Collection {
        self.collection(USERS)
    }

    pub fn biodata(&self) -> Collection {
        self.collection(BIODATA)
    }

    pub fn favorites(&self) -> Collection {
        self.collection(FAVORITES)
    }

    pub fn contact_requests(&self) -> Collection {
        self.collection(CONTACT_REQUESTS)
    }

    pub fn success_stories(&self) -> Collection {
        self.collection(SUCCESS_STORIES)
    }

    pub async fn begin(&self) -> Result<DbTransaction<'_>, DbError> {
        self.client.begin().await
    }

    /// Creates tables, unique indexes and the profile counter if they are missing.
    ///
    /// The profile counter is raised to at least the number of stored profiles
    /// (or the highest `BiodataId`, whichever is larger), so identifiers issued
    /// after a restart never collide with existing ones.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing document store schema");

        for (table, keys) in UNIQUE_KEYS {
            self.client
                .execute(&format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        id TEXT PRIMARY KEY NOT NULL,
                        body TEXT NOT NULL,
                        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                    )",
                    table
                ))
                .await?;

            let mut exprs = Vec::with_capacity(keys.len());
            for key in keys.iter() {
                validate_field(key)?;
                exprs.push(format!("json_extract(body, '$.{}')", key));
            }
            self.client
                .execute(&format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS {t}_{k}_unique ON {t} ({e})",
                    t = table,
                    k = keys.join("_"),
                    e = exprs.join(", ")
                ))
                .await?;
        }

        self.client
            .execute(
                "CREATE TABLE IF NOT EXISTS counters (
                    name TEXT PRIMARY KEY NOT NULL,
                    value INTEGER NOT NULL
                )",
            )
            .await?;

        sqlx::query(&format!(
            "INSERT INTO counters (name, value)
             SELECT ?, MAX(COUNT(*), COALESCE(MAX(json_extract(body, '$.BiodataId')), 0))
             FROM {} WHERE true
             ON CONFLICT(name) DO UPDATE SET value = MAX(value, excluded.value)",
            BIODATA
        ))
        .bind(BIODATA_SEQUENCE)
        .execute(self.client.pool())
        .await
        .map_err(|e| {
            error!("Failed to seed counter {}: {}", BIODATA_SEQUENCE, e);
            DbError::QueryError(e.to_string())
        })?;

        info!("Document store schema initialized successfully");
        Ok(())
    }

    /// Increments the named counter and returns its new value.
    pub async fn next_sequence(&self, name: &str) -> Result<i64, DbError> {
        let mut conn = self.client.pool().acquire().await.map_err(|e| {
            error!("Failed to acquire connection for counter {}: {}", name, e);
            DbError::PoolError(e.to_string())
        })?;
        next_sequence_in(&mut conn, name).await
    }
}

/// Increments the named counter on the given connection; a missing counter starts at 1.
pub async fn next_sequence_in(conn: &mut AnyConnection, name: &str) -> Result<i64, DbError> {
    let row = sqlx::query(
        "INSERT INTO counters (name, value) VALUES (?, 1)
         ON CONFLICT(name) DO UPDATE SET value = value + 1
         RETURNING value",
    )
    .bind(name.to_string())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| {
        error!("Failed to advance counter {}: {}", name, e);
        DbError::QueryError(e.to_string())
    })?;

    let value: i64 = row.try_get("value")?;
    debug!("Counter {} advanced to {}", name, value);
    Ok(value)
}
