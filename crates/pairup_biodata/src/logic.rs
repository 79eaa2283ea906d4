// --- File: crates/pairup_biodata/src/logic.rs ---
//! Store operations behind each route.

use crate::error::BiodataError;
use crate::models::{
    AdminStats, BiodataListQuery, ContactStatus, Role, Status, UpsertResult, WriteOutcome,
    ALREADY_ADDED, CONTACT_REQUEST_PRICE, USER_EXISTS,
};
use pairup_db::{
    next_sequence_in, DbError, DeleteResult, Document, DocumentStore, Filter, InsertOneResult,
    UpdateResult, BIODATA_SEQUENCE,
};
use serde_json::Value;
use tracing::{debug, info, warn};

fn required_str<'a>(doc: &'a Document, field: &'static str) -> Result<&'a str, BiodataError> {
    doc.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(BiodataError::MissingField(field))
}

fn required_value<'a>(doc: &'a Document, field: &'static str) -> Result<&'a Value, BiodataError> {
    doc.get(field)
        .filter(|v| !v.is_null())
        .ok_or(BiodataError::MissingField(field))
}

fn set(field: &str, value: &str) -> Document {
    let mut patch = Document::new();
    patch.insert(field.to_string(), Value::String(value.to_string()));
    patch
}

/// Inserts `doc`, turning a unique-index rejection into `message`.
async fn insert_unless_present(
    collection: pairup_db::Collection,
    doc: Document,
    message: &str,
) -> Result<WriteOutcome<InsertOneResult>, BiodataError> {
    match collection.insert_one(doc).await {
        Ok(result) => Ok(WriteOutcome::Written(result)),
        Err(DbError::Duplicate(key)) => {
            debug!("{}: duplicate {}", collection.name(), key);
            Ok(WriteOutcome::skipped(message))
        }
        Err(e) => Err(e.into()),
    }
}

// --- Users ---

/// Registers a user with role `user` and status `normal`, whatever the client sent.
pub async fn register_user(
    store: &DocumentStore,
    mut user: Document,
) -> Result<WriteOutcome<InsertOneResult>, BiodataError> {
    let email = required_str(&user, "email")?.to_string();
    user.insert("role".into(), Role::User.as_str().into());
    user.insert("status".into(), Status::Normal.as_str().into());

    let outcome = insert_unless_present(store.users(), user, USER_EXISTS).await?;
    if let WriteOutcome::Written(_) = outcome {
        info!("Registered user {}", email);
    }
    Ok(outcome)
}

pub async fn user_by_email(
    store: &DocumentStore,
    email: &str,
) -> Result<Option<Document>, BiodataError> {
    Ok(store.users().find_one(&Filter::by("email", email)).await?)
}

/// Every user except the one with `email`.
pub async fn users_except(
    store: &DocumentStore,
    email: &str,
) -> Result<Vec<Document>, BiodataError> {
    Ok(store.users().find_many(&Filter::new().ne("email", email)).await?)
}

pub async fn is_admin(store: &DocumentStore, email: &str) -> Result<bool, BiodataError> {
    let user = user_by_email(store, email).await?;
    Ok(user
        .as_ref()
        .and_then(|u| u.get("role"))
        .and_then(Value::as_str)
        == Some(Role::Admin.as_str()))
}

pub async fn set_user_role(
    store: &DocumentStore,
    email: &str,
    role: Role,
) -> Result<UpdateResult, BiodataError> {
    info!("Setting role of {} to {}", email, role.as_str());
    Ok(store
        .users()
        .update_one(&Filter::by("email", email), set("role", role.as_str()))
        .await?)
}

pub async fn set_user_status(
    store: &DocumentStore,
    email: &str,
    status: Status,
) -> Result<UpdateResult, BiodataError> {
    info!("Setting status of user {} to {}", email, status.as_str());
    Ok(store
        .users()
        .update_one(&Filter::by("email", email), set("status", status.as_str()))
        .await?)
}

// --- Biodata ---

/// Merges `data` into the biodata of its email, or creates it with the next `BiodataId`.
///
/// An existing biodata keeps its `BiodataId` whatever the client sends.
pub async fn upsert_biodata(
    store: &DocumentStore,
    data: Document,
) -> Result<UpsertResult, BiodataError> {
    let email = required_str(&data, "email")?.to_string();
    let filter = Filter::by("email", email.as_str());

    let mut patch = data.clone();
    patch.remove("BiodataId");

    let updated = store.biodata().update_one(&filter, patch.clone()).await?;
    if updated.matched_count > 0 {
        debug!("Merged biodata of {}", email);
        return Ok(UpsertResult::Updated(updated));
    }

    match insert_biodata(store, data).await {
        Ok(inserted) => {
            info!("Created biodata for {}", email);
            Ok(UpsertResult::Inserted(inserted))
        }
        // Created concurrently since the update above; merge into that one instead.
        Err(DbError::Duplicate(_)) => Ok(UpsertResult::Updated(
            store.biodata().update_one(&filter, patch).await?,
        )),
        Err(e) => Err(e.into()),
    }
}

async fn insert_biodata(store: &DocumentStore, mut data: Document) -> Result<InsertOneResult, DbError> {
    let mut tx = store.begin().await?;
    let biodata_id = next_sequence_in(&mut tx, BIODATA_SEQUENCE).await?;
    data.insert("BiodataId".into(), biodata_id.into());
    data.insert("status".into(), Status::Normal.as_str().into());

    let result = store.biodata().insert_one_in(&mut tx, data).await?;
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;
    Ok(result)
}

fn parse_age(name: &'static str, value: Option<&str>) -> Result<Option<i64>, BiodataError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| BiodataError::InvalidQuery {
            name,
            value: v.to_string(),
        }),
    }
}

/// Builds the listing filter; the age range applies only when both bounds are given.
pub fn biodata_filter(query: &BiodataListQuery) -> Result<Filter, BiodataError> {
    let mut filter = Filter::new();
    if let Some(gender) = query.gender.as_deref().filter(|g| !g.is_empty()) {
        filter = filter.eq("biodataType", gender);
    }
    if let Some(location) = query.location.as_deref().filter(|l| !l.is_empty()) {
        filter = filter.eq("permanentDivision", location);
    }

    let from = parse_age("fromAge", query.from_age.as_deref())?;
    let to = parse_age("toAge", query.to_age.as_deref())?;
    if let (Some(from), Some(to)) = (from, to) {
        filter = filter.gte("age", from).lte("age", to);
    }
    Ok(filter)
}

pub async fn list_biodata(
    store: &DocumentStore,
    query: &BiodataListQuery,
) -> Result<Vec<Document>, BiodataError> {
    let filter = biodata_filter(query)?;
    Ok(store.biodata().find_many(&filter).await?)
}

pub async fn biodata_by_id(
    store: &DocumentStore,
    id: &str,
) -> Result<Option<Document>, BiodataError> {
    Ok(store.biodata().find_one(&Filter::by_id(id)).await?)
}

pub async fn biodata_by_email(
    store: &DocumentStore,
    email: &str,
) -> Result<Option<Document>, BiodataError> {
    Ok(store.biodata().find_one(&Filter::by("email", email)).await?)
}

pub async fn biodata_with_status(
    store: &DocumentStore,
    status: Status,
) -> Result<Vec<Document>, BiodataError> {
    Ok(store
        .biodata()
        .find_many(&Filter::by("status", status.as_str()))
        .await?)
}

/// Marks both the user and the biodata of `email` as pending in one transaction.
///
/// Responds with the biodata update.
pub async fn apply_for_premium(
    store: &DocumentStore,
    email: &str,
) -> Result<UpdateResult, BiodataError> {
    let filter = Filter::by("email", email);
    let pending = set("status", Status::Pending.as_str());

    let mut tx = store.begin().await?;
    store
        .users()
        .update_one_in(&mut tx, &filter, pending.clone())
        .await?;
    let result = store
        .biodata()
        .update_one_in(&mut tx, &filter, pending)
        .await?;
    tx.commit()
        .await
        .map_err(|e| DbError::TransactionError(e.to_string()))?;

    info!("{} applied for premium", email);
    Ok(result)
}

pub async fn set_biodata_status(
    store: &DocumentStore,
    email: &str,
    status: Status,
) -> Result<UpdateResult, BiodataError> {
    info!("Setting status of biodata {} to {}", email, status.as_str());
    Ok(store
        .biodata()
        .update_one(&Filter::by("email", email), set("status", status.as_str()))
        .await?)
}

// --- Favorites ---

pub async fn save_favorite(
    store: &DocumentStore,
    favorite: Document,
) -> Result<WriteOutcome<InsertOneResult>, BiodataError> {
    required_str(&favorite, "ownerEmail")?;
    required_value(&favorite, "BiodataId")?;
    insert_unless_present(store.favorites(), favorite, ALREADY_ADDED).await
}

pub async fn favorites_of(
    store: &DocumentStore,
    owner: &str,
) -> Result<Vec<Document>, BiodataError> {
    Ok(store
        .favorites()
        .find_many(&Filter::by("ownerEmail", owner))
        .await?)
}

/// Removes every favorite of `owner`.
pub async fn delete_favorites_of(
    store: &DocumentStore,
    owner: &str,
) -> Result<DeleteResult, BiodataError> {
    let result = store
        .favorites()
        .delete_many(&Filter::by("ownerEmail", owner))
        .await?;
    info!("Deleted {} favorites of {}", result.deleted_count, owner);
    Ok(result)
}

// --- Contact requests ---

/// Records a paid contact request once per (email, biodataId). Payment happens elsewhere.
pub async fn create_contact_request(
    store: &DocumentStore,
    request: Document,
) -> Result<WriteOutcome<InsertOneResult>, BiodataError> {
    let email = required_str(&request, "email")?.to_string();
    let biodata_id = required_value(&request, "biodataId")?.clone();

    let outcome = insert_unless_present(store.contact_requests(), request, ALREADY_ADDED).await?;
    match &outcome {
        WriteOutcome::Written(result) => {
            info!("Contact request {} from {} for {}", result.inserted_id, email, biodata_id)
        }
        WriteOutcome::Skipped(_) => {
            warn!("{} already requested contact for {}", email, biodata_id)
        }
    }
    Ok(outcome)
}

pub async fn contact_requests_of(
    store: &DocumentStore,
    email: &str,
) -> Result<Vec<Document>, BiodataError> {
    Ok(store
        .contact_requests()
        .find_many(&Filter::by("email", email))
        .await?)
}

pub async fn all_contact_requests(store: &DocumentStore) -> Result<Vec<Document>, BiodataError> {
    Ok(store.contact_requests().find_many(&Filter::new()).await?)
}

pub async fn delete_contact_request(
    store: &DocumentStore,
    id: &str,
) -> Result<DeleteResult, BiodataError> {
    Ok(store.contact_requests().delete_one(&Filter::by_id(id)).await?)
}

pub async fn approve_contact_request(
    store: &DocumentStore,
    id: &str,
) -> Result<UpdateResult, BiodataError> {
    info!("Approving contact request {}", id);
    Ok(store
        .contact_requests()
        .update_one(
            &Filter::by_id(id),
            set("status", ContactStatus::Approved.as_str()),
        )
        .await?)
}

// --- Success stories ---

pub async fn save_success_story(
    store: &DocumentStore,
    story: Document,
) -> Result<WriteOutcome<InsertOneResult>, BiodataError> {
    required_str(&story, "selfEmail")?;
    insert_unless_present(store.success_stories(), story, ALREADY_ADDED).await
}

// --- Admin ---

/// Each figure is its own count; they are not taken from one snapshot.
pub async fn admin_stats(store: &DocumentStore) -> Result<AdminStats, BiodataError> {
    let users = store.users().count(&Filter::new()).await?;
    let male_biodata_count = store
        .biodata()
        .count(&Filter::by("biodataType", "Male"))
        .await?;
    let female_biodata_count = store
        .biodata()
        .count(&Filter::by("biodataType", "Female"))
        .await?;
    let permium_biodata_count = store
        .biodata()
        .count(&Filter::by("status", Status::Premium.as_str()))
        .await?;
    let revenue = store.contact_requests().count(&Filter::new()).await? * CONTACT_REQUEST_PRICE;

    Ok(AdminStats {
        users,
        male_biodata_count,
        female_biodata_count,
        permium_biodata_count,
        revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairup_db::DbClient;
    use serde_json::json;

    async fn store() -> DocumentStore {
        let client = DbClient::from_url("sqlite::memory:").await.unwrap();
        let store = DocumentStore::new(client);
        store.init_schema().await.unwrap();
        store
    }

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn second_registration_keeps_first_role_and_status() {
        let store = store().await;
        let first = register_user(&store, doc(json!({"email": "a@x.com", "role": "admin"})))
            .await
            .unwrap();
        assert!(matches!(first, WriteOutcome::Written(_)));

        let second = register_user(&store, doc(json!({"email": "a@x.com", "status": "premium"})))
            .await
            .unwrap();
        assert_eq!(second, WriteOutcome::skipped(USER_EXISTS));

        let user = user_by_email(&store, "a@x.com").await.unwrap().unwrap();
        assert_eq!(user["role"], "user");
        assert_eq!(user["status"], "normal");
        assert_eq!(store.users().count(&Filter::new()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn registration_requires_an_email() {
        let store = store().await;
        let err = register_user(&store, doc(json!({"name": "A"})))
            .await
            .unwrap_err();
        assert!(matches!(err, BiodataError::MissingField("email")));
    }

    #[tokio::test]
    async fn upsert_assigns_sequential_ids_once() {
        let store = store().await;
        for (i, email) in ["a@x.com", "b@x.com"].iter().enumerate() {
            let result = upsert_biodata(&store, doc(json!({"email": email, "age": 25})))
                .await
                .unwrap();
            assert!(matches!(result, UpsertResult::Inserted(_)));
            let biodata = biodata_by_email(&store, email).await.unwrap().unwrap();
            assert_eq!(biodata["BiodataId"], json!(i as i64 + 1));
            assert_eq!(biodata["status"], "normal");
        }

        let result = upsert_biodata(
            &store,
            doc(json!({"email": "a@x.com", "age": 26, "BiodataId": 99})),
        )
        .await
        .unwrap();
        assert!(matches!(result, UpsertResult::Updated(ref u) if u.matched_count == 1));

        let biodata = biodata_by_email(&store, "a@x.com").await.unwrap().unwrap();
        assert_eq!(biodata["BiodataId"], 1);
        assert_eq!(biodata["age"], 26);
    }

    #[tokio::test]
    async fn age_range_needs_both_bounds() {
        let only_from = BiodataListQuery {
            from_age: Some("20".into()),
            ..Default::default()
        };
        assert!(biodata_filter(&only_from).unwrap().is_empty());

        let bad = BiodataListQuery {
            from_age: Some("twenty".into()),
            to_age: Some("30".into()),
            ..Default::default()
        };
        assert!(matches!(
            biodata_filter(&bad).unwrap_err(),
            BiodataError::InvalidQuery { name: "fromAge", .. }
        ));
    }

    #[tokio::test]
    async fn listing_filters_by_gender_location_and_age() {
        let store = store().await;
        for (email, kind, division, age) in [
            ("a@x.com", "Male", "Dhaka", 25),
            ("b@x.com", "Female", "Dhaka", 27),
            ("c@x.com", "Male", "Khulna", 31),
            ("d@x.com", "Male", "Dhaka", 40),
        ] {
            upsert_biodata(
                &store,
                doc(json!({
                    "email": email,
                    "biodataType": kind,
                    "permanentDivision": division,
                    "age": age
                })),
            )
            .await
            .unwrap();
        }

        let query = BiodataListQuery {
            gender: Some("Male".into()),
            location: Some("Dhaka".into()),
            from_age: Some("20".into()),
            to_age: Some("30".into()),
        };
        let found = list_biodata(&store, &query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["email"], "a@x.com");

        let all = list_biodata(&store, &BiodataListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn premium_application_moves_user_and_biodata_together() {
        let store = store().await;
        register_user(&store, doc(json!({"email": "a@x.com"})))
            .await
            .unwrap();
        upsert_biodata(&store, doc(json!({"email": "a@x.com"})))
            .await
            .unwrap();

        let result = apply_for_premium(&store, "a@x.com").await.unwrap();
        assert_eq!(result.modified_count, 1);

        let user = user_by_email(&store, "a@x.com").await.unwrap().unwrap();
        let biodata = biodata_by_email(&store, "a@x.com").await.unwrap().unwrap();
        assert_eq!(user["status"], "pending");
        assert_eq!(biodata["status"], "pending");

        let applied = biodata_with_status(&store, Status::Pending).await.unwrap();
        assert_eq!(applied.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_favorites_and_requests_are_reported() {
        let store = store().await;
        let favorite = doc(json!({"ownerEmail": "a@x.com", "BiodataId": 7, "name": "B"}));
        save_favorite(&store, favorite.clone()).await.unwrap();
        assert_eq!(
            save_favorite(&store, favorite).await.unwrap(),
            WriteOutcome::skipped(ALREADY_ADDED)
        );
        assert_eq!(favorites_of(&store, "a@x.com").await.unwrap().len(), 1);

        let request = doc(json!({"email": "a@x.com", "biodataId": 7, "transactionId": "pi_1"}));
        create_contact_request(&store, request.clone()).await.unwrap();
        assert_eq!(
            create_contact_request(&store, request).await.unwrap(),
            WriteOutcome::skipped(ALREADY_ADDED)
        );
        assert_eq!(contact_requests_of(&store, "a@x.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn one_success_story_per_person() {
        let store = store().await;
        let story = doc(json!({"selfEmail": "a@x.com", "review": "Found my match"}));
        assert!(matches!(
            save_success_story(&store, story.clone()).await.unwrap(),
            WriteOutcome::Written(_)
        ));
        assert_eq!(
            save_success_story(&store, story).await.unwrap(),
            WriteOutcome::skipped(ALREADY_ADDED)
        );
    }

    #[tokio::test]
    async fn contact_request_approval_and_deletion_by_id() {
        let store = store().await;
        let written = create_contact_request(
            &store,
            doc(json!({"email": "a@x.com", "biodataId": 3})),
        )
        .await
        .unwrap();
        let WriteOutcome::Written(inserted) = written else {
            panic!("expected insert");
        };

        let approved = approve_contact_request(&store, &inserted.inserted_id)
            .await
            .unwrap();
        assert_eq!(approved.matched_count, 1);
        let all = all_contact_requests(&store).await.unwrap();
        assert_eq!(all[0]["status"], "approved");

        let deleted = delete_contact_request(&store, &inserted.inserted_id)
            .await
            .unwrap();
        assert_eq!(deleted.deleted_count, 1);
        assert!(all_contact_requests(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_role_and_user_listing() {
        let store = store().await;
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            register_user(&store, doc(json!({"email": email}))).await.unwrap();
        }
        assert!(!is_admin(&store, "a@x.com").await.unwrap());
        assert!(!is_admin(&store, "nobody@x.com").await.unwrap());

        set_user_role(&store, "a@x.com", Role::Admin).await.unwrap();
        assert!(is_admin(&store, "a@x.com").await.unwrap());

        let others = users_except(&store, "a@x.com").await.unwrap();
        let emails: Vec<_> = others.iter().map(|u| u["email"].clone()).collect();
        assert_eq!(emails, vec![json!("b@x.com"), json!("c@x.com")]);
    }

    #[tokio::test]
    async fn stats_count_every_contact_request() {
        let store = store().await;
        register_user(&store, doc(json!({"email": "a@x.com"}))).await.unwrap();
        upsert_biodata(&store, doc(json!({"email": "m@x.com", "biodataType": "Male"})))
            .await
            .unwrap();
        upsert_biodata(&store, doc(json!({"email": "f@x.com", "biodataType": "Female"})))
            .await
            .unwrap();
        set_biodata_status(&store, "f@x.com", Status::Premium)
            .await
            .unwrap();
        for id in 1..=3 {
            create_contact_request(&store, doc(json!({"email": "a@x.com", "biodataId": id})))
                .await
                .unwrap();
        }
        let WriteOutcome::Written(first) = create_contact_request(
            &store,
            doc(json!({"email": "b@x.com", "biodataId": 1})),
        )
        .await
        .unwrap() else {
            panic!("expected insert");
        };
        approve_contact_request(&store, &first.inserted_id)
            .await
            .unwrap();

        let stats = admin_stats(&store).await.unwrap();
        assert_eq!(
            stats,
            AdminStats {
                users: 1,
                male_biodata_count: 1,
                female_biodata_count: 1,
                permium_biodata_count: 1,
                revenue: 20,
            }
        );
    }
}
