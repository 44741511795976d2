//! Ranking handler implementations

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    routing::RankingRoute,
    services::{StandingsOutcome, StandingsService},
    state::AppState,
};

use super::request::RankingQuery;

/// Resolve a ranking path and serve its view
pub async fn dispatch(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<RankingQuery>,
) -> AppResult<Response> {
    query.validate()?;

    let route = RankingRoute::resolve(&path)
        .ok_or_else(|| AppError::NotFound(format!("No ranking page at {}", path)))?;
    tracing::debug!(route = route.name(), path = %path, "Ranking route resolved");

    match &route {
        RankingRoute::StandingsList => {
            let contests =
                StandingsService::list_contests(&state, query.q.as_deref(), query.p.as_deref()).await?;
            Ok(Json(contests).into_response())
        }
        RankingRoute::Standings { .. }
        | RankingRoute::StandingsById { .. }
        | RankingRoute::StandingsBySlug { .. }
        | RankingRoute::StandingsByIds { .. } => {
            match StandingsService::standings(&state, &route, query.p.as_deref()).await? {
                StandingsOutcome::Redirect(location) => {
                    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
                }
                StandingsOutcome::Page(standings) => Ok(Json(standings).into_response()),
            }
        }
        RankingRoute::ScoreHistory { statistic_id } => {
            let history = StandingsService::score_history(&state, &[*statistic_id]).await?;
            Ok(Json(history).into_response())
        }
        RankingRoute::ScoreHistories { statistic_ids } => {
            let history = StandingsService::score_history(&state, statistic_ids).await?;
            Ok(Json(history).into_response())
        }
        RankingRoute::StandingsAction
        | RankingRoute::Solution { .. }
        | RankingRoute::MakeVersus
        | RankingRoute::Versus { .. }
        | RankingRoute::VirtualStart => Err(AppError::NotImplemented(route.name().to_string())),
    }
}
