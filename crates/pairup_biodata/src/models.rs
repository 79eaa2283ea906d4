// --- File: crates/pairup_biodata/src/models.rs ---
use pairup_common::MessageBody;
use pairup_db::{InsertOneResult, UpdateResult};
use serde::{Deserialize, Serialize};

/// Returned instead of an insert result when the email is already registered.
pub const USER_EXISTS: &str = "user exist";

/// Returned instead of an insert result when the natural key is already taken.
pub const ALREADY_ADDED: &str = "you already add this";

/// Flat price of one contact request, used for revenue.
pub const CONTACT_REQUEST_PRICE: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Membership status shared by users and biodata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Pending,
    Premium,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Normal => "normal",
            Status::Pending => "pending",
            Status::Premium => "premium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Approved,
}

impl ContactStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Approved => "approved",
        }
    }
}

/// Either the store's result or a message explaining why nothing was written.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WriteOutcome<T> {
    Written(T),
    Skipped(MessageBody),
}

impl<T> WriteOutcome<T> {
    pub fn skipped(message: &str) -> Self {
        WriteOutcome::Skipped(MessageBody::new(message))
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpsertResult {
    Updated(UpdateResult),
    Inserted(InsertOneResult),
}

/// Query string of `GET /biodatas`.
///
/// Ages arrive as strings so that empty parameters count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiodataListQuery {
    pub gender: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "fromAge")]
    pub from_age: Option<String>,
    #[serde(rename = "toAge")]
    pub to_age: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: u64,
    pub male_biodata_count: u64,
    pub female_biodata_count: u64,
    pub permium_biodata_count: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IsAdminResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
