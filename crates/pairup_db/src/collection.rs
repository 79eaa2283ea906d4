//! Collection accessor
//!
//! A collection is a table of `(id, body)` rows where `body` holds the JSON
//! document. Every operation comes in two flavours: one that borrows a pooled
//! connection, and an `*_in` variant that runs on a caller-supplied connection
//! so several operations can share a transaction.

use crate::document::{
    validate_field, DeleteResult, Document, Filter, InsertOneResult, SqlArg, UpdateResult,
    ID_FIELD,
};
use crate::error::DbError;
use serde_json::Value;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyConnection, Pool, Row};
use tracing::{debug, error};
use uuid::Uuid;

/// Handle to one collection of documents.
#[derive(Debug, Clone)]
pub struct Collection {
    pool: Pool<Any>,
    table: &'static str,
}

impl Collection {
    pub(crate) fn new(pool: Pool<Any>, table: &'static str) -> Self {
        Self { pool, table }
    }

    /// Name of the backing table
    pub fn name(&self) -> &'static str {
        self.table
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<Any>, DbError> {
        self.pool.acquire().await.map_err(|e| {
            error!("Failed to acquire connection for {}: {}", self.table, e);
            DbError::PoolError(e.to_string())
        })
    }

    /// Returns the first document (in insertion order) matching `filter`.
    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, DbError> {
        let mut conn = self.acquire().await?;
        self.find_one_in(&mut conn, filter).await
    }

    pub async fn find_one_in(
        &self,
        conn: &mut AnyConnection,
        filter: &Filter,
    ) -> Result<Option<Document>, DbError> {
        let (clause, args) = filter.to_sql()?;
        let sql = format!(
            "SELECT id, body FROM {} WHERE {} ORDER BY rowid LIMIT 1",
            self.table, clause
        );
        debug!("find_one: {}", sql);

        let row = bind_all(sqlx::query(&sql), args)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to query {}: {}", self.table, e);
                DbError::QueryError(e.to_string())
            })?;

        row.map(|row| decode_row(&row)).transpose()
    }

    /// Returns every document matching `filter`, in insertion order.
    pub async fn find_many(&self, filter: &Filter) -> Result<Vec<Document>, DbError> {
        let mut conn = self.acquire().await?;
        self.find_many_in(&mut conn, filter).await
    }

    pub async fn find_many_in(
        &self,
        conn: &mut AnyConnection,
        filter: &Filter,
    ) -> Result<Vec<Document>, DbError> {
        let (clause, args) = filter.to_sql()?;
        let sql = format!(
            "SELECT id, body FROM {} WHERE {} ORDER BY rowid",
            self.table, clause
        );
        debug!("find_many: {}", sql);

        let rows = bind_all(sqlx::query(&sql), args)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to query {}: {}", self.table, e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(decode_row).collect()
    }

    /// Stores `document` under a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// [`DbError::Duplicate`] when a unique index of the collection already
    /// holds the document's key.
    pub async fn insert_one(&self, document: Document) -> Result<InsertOneResult, DbError> {
        let mut conn = self.acquire().await?;
        self.insert_one_in(&mut conn, document).await
    }

    pub async fn insert_one_in(
        &self,
        conn: &mut AnyConnection,
        mut document: Document,
    ) -> Result<InsertOneResult, DbError> {
        document.remove(ID_FIELD);
        let id = Uuid::new_v4().to_string();
        let body = serde_json::to_string(&document)?;
        let sql = format!("INSERT INTO {} (id, body) VALUES (?, json(?))", self.table);
        debug!("insert_one: {} ({})", sql, id);

        sqlx::query(&sql)
            .bind(id.clone())
            .bind(body)
            .execute(&mut *conn)
            .await
            .map_err(DbError::from_write)?;

        Ok(InsertOneResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    /// Sets the top-level fields of `patch` on the first document matching `filter`.
    ///
    /// Named fields are replaced whole (objects included, `null` is stored as
    /// `null`); every other field is left untouched.
    pub async fn update_one(
        &self,
        filter: &Filter,
        patch: Document,
    ) -> Result<UpdateResult, DbError> {
        let mut conn = self.acquire().await?;
        self.update_one_in(&mut conn, filter, patch).await
    }

    pub async fn update_one_in(
        &self,
        conn: &mut AnyConnection,
        filter: &Filter,
        mut patch: Document,
    ) -> Result<UpdateResult, DbError> {
        patch.remove(ID_FIELD);
        let (clause, filter_args) = filter.to_sql()?;

        let mut assignments = Vec::with_capacity(patch.len());
        let mut args = Vec::with_capacity(patch.len() * 2 + filter_args.len());
        for (field, value) in &patch {
            validate_field(field)?;
            assignments.push("?, json(?)");
            args.push(SqlArg::Text(format!("$.{}", field)));
            args.push(SqlArg::Text(serde_json::to_string(value)?));
        }
        args.extend(filter_args);

        let body = if assignments.is_empty() {
            "body".to_string()
        } else {
            format!("json_set(body, {})", assignments.join(", "))
        };
        let sql = format!(
            "UPDATE {t} SET body = {b} \
             WHERE id = (SELECT id FROM {t} WHERE {c} ORDER BY rowid LIMIT 1)",
            t = self.table,
            b = body,
            c = clause
        );
        debug!("update_one: {}", sql);

        let affected = bind_all(sqlx::query(&sql), args)
            .execute(&mut *conn)
            .await
            .map_err(DbError::from_write)?
            .rows_affected();

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: affected,
            modified_count: affected,
        })
    }

    /// Removes the first document matching `filter`.
    pub async fn delete_one(&self, filter: &Filter) -> Result<DeleteResult, DbError> {
        let mut conn = self.acquire().await?;
        let (clause, args) = filter.to_sql()?;
        let sql = format!(
            "DELETE FROM {t} WHERE id = (SELECT id FROM {t} WHERE {c} ORDER BY rowid LIMIT 1)",
            t = self.table,
            c = clause
        );
        self.delete(&mut conn, &sql, args).await
    }

    /// Removes every document matching `filter`.
    pub async fn delete_many(&self, filter: &Filter) -> Result<DeleteResult, DbError> {
        let mut conn = self.acquire().await?;
        let (clause, args) = filter.to_sql()?;
        let sql = format!("DELETE FROM {} WHERE {}", self.table, clause);
        self.delete(&mut conn, &sql, args).await
    }

    async fn delete(
        &self,
        conn: &mut AnyConnection,
        sql: &str,
        args: Vec<SqlArg>,
    ) -> Result<DeleteResult, DbError> {
        debug!("delete: {}", sql);
        let deleted = bind_all(sqlx::query(sql), args)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to delete from {}: {}", self.table, e);
                DbError::QueryError(e.to_string())
            })?
            .rows_affected();

        Ok(DeleteResult {
            acknowledged: true,
            deleted_count: deleted,
        })
    }

    /// Counts the documents matching `filter`; an empty filter counts the whole collection.
    pub async fn count(&self, filter: &Filter) -> Result<u64, DbError> {
        let mut conn = self.acquire().await?;
        let (clause, args) = filter.to_sql()?;
        let sql = format!("SELECT COUNT(*) AS n FROM {} WHERE {}", self.table, clause);
        debug!("count: {}", sql);

        let row = bind_all(sqlx::query(&sql), args)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("Failed to count {}: {}", self.table, e);
                DbError::QueryError(e.to_string())
            })?;

        let n: i64 = row.try_get("n")?;
        Ok(u64::try_from(n).unwrap_or_default())
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Any, AnyArguments<'q>>,
    args: Vec<SqlArg>,
) -> Query<'q, Any, AnyArguments<'q>> {
    for arg in args {
        query = match arg {
            SqlArg::Text(s) => query.bind(s),
            SqlArg::Int(i) => query.bind(i),
            SqlArg::Real(f) => query.bind(f),
        };
    }
    query
}

/// Rebuilds a document from its row, exposing the row id as `_id`.
fn decode_row(row: &AnyRow) -> Result<Document, DbError> {
    let id: String = row.try_get("id")?;
    let body: String = row.try_get("body")?;

    let mut document = match serde_json::from_str::<Value>(&body)? {
        Value::Object(map) => map,
        other => {
            return Err(DbError::QueryError(format!(
                "stored body is not an object: {}",
                other
            )))
        }
    };
    document.insert(ID_FIELD.to_string(), Value::String(id));
    Ok(document)
}
