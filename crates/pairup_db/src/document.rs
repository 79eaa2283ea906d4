//! Documents, filters and write results.
//!
//! Documents are schemaless JSON objects. Filters compile to SQL over SQLite's
//! JSON1 functions, with the generated identifier addressed as `_id`.

use crate::error::DbError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored (or to-be-stored) JSON object.
pub type Document = Map<String, Value>;

/// Field name under which the generated identifier is exposed.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Eq(String, Value),
    Ne(String, Value),
    Gte(String, Value),
    Lte(String, Value),
}

/// Conjunction of field conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single equality condition.
    pub fn by(field: &str, value: impl Into<Value>) -> Self {
        Self::new().eq(field, value)
    }

    /// Matches the document with the given generated identifier.
    pub fn by_id(id: &str) -> Self {
        Self::by(ID_FIELD, id)
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Eq(field.to_string(), value.into()));
        self
    }

    /// Matches documents whose field differs from `value`, including documents lacking it.
    pub fn ne(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Ne(field.to_string(), value.into()));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Gte(field.to_string(), value.into()));
        self
    }

    pub fn lte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions
            .push(Condition::Lte(field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Renders the filter as a SQL boolean expression plus its bound arguments.
    pub(crate) fn to_sql(&self) -> Result<(String, Vec<SqlArg>), DbError> {
        if self.conditions.is_empty() {
            return Ok(("1 = 1".to_string(), Vec::new()));
        }

        let mut clauses = Vec::with_capacity(self.conditions.len());
        let mut args = Vec::new();

        for condition in &self.conditions {
            let clause = match condition {
                Condition::Eq(field, Value::Null) => format!("{} IS NULL", field_expr(field)?),
                Condition::Ne(field, Value::Null) => {
                    format!("{} IS NOT NULL", field_expr(field)?)
                }
                Condition::Eq(field, value) => {
                    args.push(SqlArg::from_value(value));
                    format!("{} = ?", field_expr(field)?)
                }
                Condition::Ne(field, value) => {
                    let expr = field_expr(field)?;
                    args.push(SqlArg::from_value(value));
                    format!("({expr} IS NULL OR {expr} <> ?)")
                }
                Condition::Gte(field, value) => {
                    args.push(SqlArg::from_value(value));
                    format!("{} >= ?", field_expr(field)?)
                }
                Condition::Lte(field, value) => {
                    args.push(SqlArg::from_value(value));
                    format!("{} <= ?", field_expr(field)?)
                }
            };
            clauses.push(clause);
        }

        Ok((clauses.join(" AND "), args))
    }
}

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlArg {
    Text(String),
    Int(i64),
    Real(f64),
}

impl SqlArg {
    /// Maps a JSON value onto what `json_extract` yields for it.
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => SqlArg::Text(s.clone()),
            Value::Bool(b) => SqlArg::Int(i64::from(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SqlArg::Int(i),
                None => SqlArg::Real(n.as_f64().unwrap_or_default()),
            },
            other => SqlArg::Text(other.to_string()),
        }
    }
}

/// Field names are spliced into SQL, so only plain identifiers are accepted.
pub(crate) fn validate_field(field: &str) -> Result<(), DbError> {
    let valid = !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidField(field.to_string()))
    }
}

pub(crate) fn field_expr(field: &str) -> Result<String, DbError> {
    if field == ID_FIELD {
        return Ok("id".to_string());
    }
    validate_field(field)?;
    Ok(format!("json_extract(body, '$.{}')", field))
}

/// Outcome of an insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsertOneResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Outcome of an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of a delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}
