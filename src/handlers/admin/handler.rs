//! Admin handler implementations

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    middleware::auth::StaffUser,
    services::{ChangelistOutcome, ListingService},
    state::AppState,
};

use super::response::{ChangeFormResponse, ListingsResponse};

/// List registered listings
pub async fn list_listings(State(state): State<AppState>, _staff: StaffUser) -> Json<ListingsResponse> {
    Json(ListingsResponse {
        listings: ListingService::list_listings(&state),
    })
}

/// Changelist of one listing
pub async fn changelist(
    State(state): State<AppState>,
    staff: StaffUser,
    OriginalUri(uri): OriginalUri,
    Path(listing): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    tracing::debug!(listing = %listing, user = %staff.username, "Changelist requested");

    match ListingService::changelist(&state, &listing, uri.path(), &params).await? {
        ChangelistOutcome::Redirect(location) => {
            Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
        }
        ChangelistOutcome::Page(page) => Ok(Json(page).into_response()),
    }
}

/// Blank add form
pub async fn add_form(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path(listing): Path<String>,
) -> AppResult<Json<ChangeFormResponse>> {
    let form = ListingService::add_form(&state, &listing)?;
    Ok(Json(form))
}

/// Change form of one object
pub async fn change_form(
    State(state): State<AppState>,
    _staff: StaffUser,
    Path((listing, id)): Path<(String, i64)>,
) -> AppResult<Json<ChangeFormResponse>> {
    let form = ListingService::change_form(&state, &listing, id).await?;
    Ok(Json(form))
}
