// --- File: crates/pairup_biodata/src/handlers.rs ---
use crate::logic;
use crate::models::{
    AdminStats, BiodataListQuery, IsAdminResponse, Role, Status, UpsertResult, WriteOutcome,
};
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use pairup_common::{map_json_error, PairUpError};
use pairup_db::{DeleteResult, Document, DocumentStore, InsertOneResult, UpdateResult};
use std::sync::Arc;

// --- State for Biodata Handlers ---
#[derive(Clone)]
pub struct BiodataState {
    pub store: DocumentStore,
    /// Emails treated as admins regardless of their stored role.
    pub admin_emails: Arc<Vec<String>>,
}

type JsonResult<T> = Result<Json<T>, Response>;

fn respond<T: serde::Serialize>(result: Result<T, crate::error::BiodataError>) -> JsonResult<T> {
    map_json_error(result, PairUpError::from)
}

// --- Users ---

pub async fn register_user_handler(
    State(state): State<BiodataState>,
    Json(user): Json<Document>,
) -> JsonResult<WriteOutcome<InsertOneResult>> {
    respond(logic::register_user(&state.store, user).await)
}

pub async fn self_user_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<Option<Document>> {
    respond(logic::user_by_email(&state.store, &email).await)
}

pub async fn is_admin_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<IsAdminResponse> {
    respond(
        logic::is_admin(&state.store, &email)
            .await
            .map(|is_admin| IsAdminResponse { is_admin }),
    )
}

// --- Biodata ---

pub async fn upsert_biodata_handler(
    State(state): State<BiodataState>,
    Json(data): Json<Document>,
) -> JsonResult<UpsertResult> {
    respond(logic::upsert_biodata(&state.store, data).await)
}

pub async fn list_biodata_handler(
    State(state): State<BiodataState>,
    Query(query): Query<BiodataListQuery>,
) -> JsonResult<Vec<Document>> {
    respond(logic::list_biodata(&state.store, &query).await)
}

pub async fn biodata_details_handler(
    State(state): State<BiodataState>,
    Path(id): Path<String>,
) -> JsonResult<Option<Document>> {
    respond(logic::biodata_by_id(&state.store, &id).await)
}

pub async fn self_biodata_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<Option<Document>> {
    respond(logic::biodata_by_email(&state.store, &email).await)
}

pub async fn apply_premium_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<UpdateResult> {
    respond(logic::apply_for_premium(&state.store, &email).await)
}

pub async fn premium_biodata_handler(
    State(state): State<BiodataState>,
) -> JsonResult<Vec<Document>> {
    respond(logic::biodata_with_status(&state.store, Status::Premium).await)
}

// --- Favorites ---

pub async fn save_favorite_handler(
    State(state): State<BiodataState>,
    Json(favorite): Json<Document>,
) -> JsonResult<WriteOutcome<InsertOneResult>> {
    respond(logic::save_favorite(&state.store, favorite).await)
}

pub async fn favorites_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<Vec<Document>> {
    respond(logic::favorites_of(&state.store, &email).await)
}

pub async fn delete_favorites_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<DeleteResult> {
    respond(logic::delete_favorites_of(&state.store, &email).await)
}

// --- Contact requests ---

pub async fn create_contact_request_handler(
    State(state): State<BiodataState>,
    Json(request): Json<Document>,
) -> JsonResult<WriteOutcome<InsertOneResult>> {
    respond(logic::create_contact_request(&state.store, request).await)
}

pub async fn contact_requests_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<Vec<Document>> {
    respond(logic::contact_requests_of(&state.store, &email).await)
}

pub async fn delete_contact_request_handler(
    State(state): State<BiodataState>,
    Path(id): Path<String>,
) -> JsonResult<DeleteResult> {
    respond(logic::delete_contact_request(&state.store, &id).await)
}

// --- Success stories ---

pub async fn success_story_handler(
    State(state): State<BiodataState>,
    Json(story): Json<Document>,
) -> JsonResult<WriteOutcome<InsertOneResult>> {
    respond(logic::save_success_story(&state.store, story).await)
}

// --- Admin ---

pub async fn admin_stats_handler(State(state): State<BiodataState>) -> JsonResult<AdminStats> {
    respond(logic::admin_stats(&state.store).await)
}

pub async fn all_users_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<Vec<Document>> {
    respond(logic::users_except(&state.store, &email).await)
}

pub async fn make_admin_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<UpdateResult> {
    respond(logic::set_user_role(&state.store, &email, Role::Admin).await)
}

pub async fn make_premium_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<UpdateResult> {
    respond(logic::set_user_status(&state.store, &email, Status::Premium).await)
}

pub async fn make_biodata_premium_handler(
    State(state): State<BiodataState>,
    Path(email): Path<String>,
) -> JsonResult<UpdateResult> {
    respond(logic::set_biodata_status(&state.store, &email, Status::Premium).await)
}

pub async fn applied_biodata_handler(
    State(state): State<BiodataState>,
) -> JsonResult<Vec<Document>> {
    respond(logic::biodata_with_status(&state.store, Status::Pending).await)
}

pub async fn all_contact_requests_handler(
    State(state): State<BiodataState>,
) -> JsonResult<Vec<Document>> {
    respond(logic::all_contact_requests(&state.store).await)
}

pub async fn approve_contact_request_handler(
    State(state): State<BiodataState>,
    Path(id): Path<String>,
) -> JsonResult<UpdateResult> {
    respond(logic::approve_contact_request(&state.store, &id).await)
}
