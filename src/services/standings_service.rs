//! Standings service

use serde_json::Value;

use crate::{
    db::repositories::{ContestRepository, StatisticRepository},
    error::{AppError, AppResult},
    handlers::ranking::response::{
        ContestHeader, ContestsListResponse, ScoreHistoryResponse, StandingsResponse,
    },
    models::{Contest, Statistic},
    pagination::{ListingQuery, OrderBy, Predicate, SqlValue},
    routing::RankingRoute,
    services::ListingService,
    state::AppState,
    utils::validate_slug,
};

const CONTEST_COLUMNS: &[&str] = &["id", "title", "slug", "host", "start_time", "end_time", "n_statistics"];
const STATISTIC_COLUMNS: &[&str] = &["id", "contest_id", "account", "place", "solving"];

/// What a standings request resolves to
#[derive(Debug)]
pub enum StandingsOutcome {
    /// Canonical `<slug>-<id>` location of the requested contest
    Redirect(String),
    Page(StandingsResponse),
}

/// Standings service for business logic
pub struct StandingsService;

impl StandingsService {
    /// Contests, most recent first, optionally narrowed by title or host
    pub async fn list_contests(
        state: &AppState,
        search: Option<&str>,
        raw_page: Option<&str>,
    ) -> AppResult<ContestsListResponse> {
        let mut query = ListingQuery::new(Contest::TABLE)
            .columns(CONTEST_COLUMNS.iter().copied())
            .order_by(vec![OrderBy::desc("start_time"), OrderBy::desc("id")]);

        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(Predicate::Any(vec![
                Predicate::icontains("title", term),
                Predicate::icontains("host", term),
            ]));
        }

        let per_page = state.config().pagination.default_per_page;
        let (mut contests, page) = ListingService::paginate(state, query, raw_page, per_page).await?;
        contests.iter_mut().for_each(attach_standings_url);

        Ok(ContestsListResponse { contests, page })
    }

    /// Standings of the contest(s) named by `route`
    pub async fn standings(
        state: &AppState,
        route: &RankingRoute,
        raw_page: Option<&str>,
    ) -> AppResult<StandingsOutcome> {
        let contests = match route {
            RankingRoute::Standings {
                title_slug,
                contest_id,
            } => {
                let contest = Self::contest_by_id(state, *contest_id).await?;
                if contest.slug != *title_slug {
                    return Ok(StandingsOutcome::Redirect(canonical_path(&contest)));
                }
                vec![contest]
            }
            RankingRoute::StandingsById { contest_id } => {
                let contest = Self::contest_by_id(state, *contest_id).await?;
                return Ok(StandingsOutcome::Redirect(canonical_path(&contest)));
            }
            RankingRoute::StandingsBySlug { title_slug } => {
                validate_slug(title_slug)
                    .map_err(|_| AppError::NotFound(format!("Contest {} not found", title_slug)))?;
                let contest = ContestRepository::find_by_slug(state.db(), title_slug)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Contest {} not found", title_slug)))?;
                vec![contest]
            }
            RankingRoute::StandingsByIds { contest_ids } => {
                let contests = ContestRepository::find_by_ids(state.db(), contest_ids).await?;
                if contests.is_empty() {
                    return Err(AppError::NotFound("No contests found".to_string()));
                }
                contests
            }
            other => {
                return Err(AppError::Internal(anyhow::anyhow!(
                    "{} is not a standings route",
                    other.name()
                )));
            }
        };

        let ids: Vec<i64> = contests.iter().map(|c| c.id).collect();
        let predicate = match ids.as_slice() {
            [id] => Predicate::eq("contest_id", SqlValue::Int(*id)),
            _ => Predicate::any_of("contest_id", ids),
        };
        let query = ListingQuery::new(Statistic::TABLE)
            .columns(STATISTIC_COLUMNS.iter().copied())
            .filter(predicate)
            .order_by(vec![OrderBy::asc("place"), OrderBy::asc("id")]);

        let per_page = state.config().pagination.default_per_page;
        let (rows, page) = ListingService::paginate(state, query, raw_page, per_page).await?;

        let contests = contests.into_iter().map(ContestHeader::from).collect();
        Ok(StandingsOutcome::Page(StandingsResponse { contests, rows, page }))
    }

    /// Score history of the given standings rows, in request order
    pub async fn score_history(state: &AppState, statistic_ids: &[i64]) -> AppResult<ScoreHistoryResponse> {
        let statistics = StatisticRepository::find_by_ids(state.db(), statistic_ids).await?;
        if statistics.is_empty() {
            return Err(AppError::NotFound("Score history not found".to_string()));
        }

        Ok(ScoreHistoryResponse { statistics })
    }

    async fn contest_by_id(state: &AppState, id: i64) -> AppResult<Contest> {
        ContestRepository::find_by_id(state.db(), id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Contest {} not found", id)))
    }
}

fn canonical_path(contest: &Contest) -> String {
    contest.standings_route().reverse()
}

/// Add the standings link to a contest row as `url`
fn attach_standings_url(row: &mut Value) {
    let Some(object) = row.as_object_mut() else {
        return;
    };
    let (Some(id), Some(slug)) = (
        object.get("id").and_then(Value::as_i64),
        object.get("slug").and_then(Value::as_str),
    ) else {
        return;
    };
    let url = RankingRoute::Standings {
        title_slug: slug.to_string(),
        contest_id: id,
    }
    .reverse();
    object.insert("url".to_string(), Value::String(url));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_attach_standings_url() {
        let mut row = json!({"id": 42, "slug": "round-1", "title": "Round 1"});
        attach_standings_url(&mut row);
        assert_eq!(row["url"], "/ranking/standings/round-1-42/");
    }

    #[test]
    fn test_attach_standings_url_skips_incomplete_rows() {
        let mut row = json!({"title": "no id"});
        attach_standings_url(&mut row);
        assert!(row.get("url").is_none());
    }
}
