// --- File: crates/pairup_biodata/src/routes.rs ---

use crate::admin::require_admin;
use crate::handlers::*;
use axum::{
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use pairup_auth::{require_bearer, AuthState};

/// Creates the router for users, biodata, favorites, contact requests, stories and admin.
///
/// Bearer-gated routes go through [`require_bearer`]; admin routes additionally
/// through [`require_admin`].
pub fn routes(state: BiodataState, auth: AuthState) -> Router {
    let public = Router::new()
        .route("/users", post(register_user_handler))
        .route("/biodata", post(upsert_biodata_handler))
        .route("/biodatas", get(list_biodata_handler))
        .route("/biodataDetails/{id}", get(biodata_details_handler))
        .route("/selfBiodata/{email}", get(self_biodata_handler))
        .route("/contact-request", post(create_contact_request_handler))
        .route("/contactRequest/{email}", get(contact_requests_handler))
        .route("/delContactRequest/{id}", delete(delete_contact_request_handler))
        .route("/getPremiumBiodata", get(premium_biodata_handler))
        .route("/user/admin/{email}", get(is_admin_handler))
        .route("/admin-stats", get(admin_stats_handler))
        .route("/getContactRequestAdmin", get(all_contact_requests_handler))
        .route(
            "/approveContactRequestAdmin/{id}",
            patch(approve_contact_request_handler),
        );

    let gated = Router::new()
        .route("/applyBiodataPremium/{email}", patch(apply_premium_handler))
        .route("/saveFavoriteBiodata", post(save_favorite_handler))
        .route(
            "/favoritesList/{email}",
            get(favorites_handler).delete(delete_favorites_handler),
        )
        .route("/selfUser/{email}", get(self_user_handler))
        .route("/successStory", post(success_story_handler))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_bearer));

    let admin = Router::new()
        .route("/allUsers/{email}", get(all_users_handler))
        .route("/makeAdmin/{email}", patch(make_admin_handler))
        .route("/makePremium/{email}", patch(make_premium_handler))
        .route("/makeBiodataPremium/{email}", patch(make_biodata_premium_handler))
        .route("/get-applied-biodata", get(applied_biodata_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(auth, require_bearer));

    public.merge(gated).merge(admin).with_state(state)
}
