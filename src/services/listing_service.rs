//! Admin listing service

use serde_json::Value;
use validator::Validate;

use crate::{
    admin::{apply_search, form_fields, resolve_ordering, sort_by_redirect},
    db::repositories::ListingRepository,
    error::{AppError, AppResult},
    handlers::admin::{
        request::ChangelistQuery,
        response::{ChangeFormResponse, ChangelistResponse, ListingSummary},
    },
    pagination::{parse_page_number, CachingPaginator, ListingQuery, PageError, PageInfo},
    state::AppState,
};

/// What a changelist request resolves to
#[derive(Debug)]
pub enum ChangelistOutcome {
    /// `sort_by` was translated; the client should go here
    Redirect(String),
    Page(ChangelistResponse),
}

/// Listing service for business logic
pub struct ListingService;

impl ListingService {
    /// Registered listings
    pub fn list_listings(state: &AppState) -> Vec<ListingSummary> {
        let registry = state.registry();
        registry
            .names()
            .filter_map(|name| registry.get(name).ok())
            .map(|config| ListingSummary {
                name: config.name.clone(),
                table: config.model.table.clone(),
                list_display: config.list_display.clone(),
                search_fields: config.search_fields.clone(),
            })
            .collect()
    }

    /// One changelist page, or a redirect for `sort_by` requests
    pub async fn changelist(
        state: &AppState,
        listing: &str,
        path: &str,
        params: &[(String, String)],
    ) -> AppResult<ChangelistOutcome> {
        let config = state.registry().get(listing)?;

        if let Some(location) = sort_by_redirect(path, params, &config.list_display) {
            tracing::debug!(listing = %listing, location = %location, "Redirecting sort_by request");
            return Ok(ChangelistOutcome::Redirect(location));
        }

        let request = ChangelistQuery::from_params(params);
        request.validate()?;

        let mut columns = config.list_display.clone();
        if !columns.iter().any(|c| c == "id") {
            columns.insert(0, "id".to_string());
        }

        let ordering = resolve_ordering(config, request.o.as_deref());
        let mut query = ListingQuery::new(config.model.table.clone())
            .columns(columns)
            .order_by(ordering.clone());
        if let Some(term) = request.q.as_deref() {
            query = apply_search(query, config, term);
        }

        let (rows, page) = Self::paginate(state, query, request.p.as_deref(), config.per_page).await?;

        Ok(ChangelistOutcome::Page(ChangelistResponse {
            listing: config.name.clone(),
            list_display: config.list_display.clone(),
            search_term: request.q.unwrap_or_default(),
            ordering,
            rows,
            page,
        }))
    }

    /// Blank add form
    pub fn add_form(state: &AppState, listing: &str) -> AppResult<ChangeFormResponse> {
        let config = state.registry().get(listing)?;

        Ok(ChangeFormResponse {
            listing: config.name.clone(),
            fields: form_fields(config, None),
            object: None,
            save_as: config.save_as,
        })
    }

    /// Change form of one object
    pub async fn change_form(state: &AppState, listing: &str, id: i64) -> AppResult<ChangeFormResponse> {
        let config = state.registry().get(listing)?;

        let object = ListingRepository::find_row(state.db(), &config.model.table, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", config.model.name, id)))?;

        Ok(ChangeFormResponse {
            listing: config.name.clone(),
            fields: form_fields(config, Some(&object)),
            object: Some(object),
            save_as: config.save_as,
        })
    }

    /// Rows and position of the requested page of `query`.
    ///
    /// The page is fetched before counting so that a failed count can fall
    /// back to the rows in hand. Unparseable page numbers mean the first
    /// page; numbers past the end mean the last one.
    pub async fn paginate(
        state: &AppState,
        query: ListingQuery,
        raw_page: Option<&str>,
        per_page: u32,
    ) -> AppResult<(Vec<Value>, PageInfo)> {
        let requested = raw_page
            .and_then(|raw| parse_page_number(raw).ok())
            .unwrap_or(1);
        let per_page = per_page.clamp(1, state.config().pagination.max_per_page.max(1));
        let limit = u64::from(per_page);

        let offset = (requested - 1).saturating_mul(limit);
        let rows = ListingRepository::fetch_page(state.db(), &query, offset, limit).await?;

        let paginator = CachingPaginator::new(query, per_page, state.count_backend(), state.count_cache())
            .with_options(state.count_options())
            .with_materialized_page(offset, rows);

        match paginator.page(requested).await {
            Ok(page) => Ok((paginator.into_materialized(), page)),
            Err(PageError::NoResults) => {
                let last = paginator.num_pages().await.max(1);
                let page = paginator.page(last).await?;
                let rows =
                    ListingRepository::fetch_page(state.db(), paginator.query(), page.offset(), limit).await?;
                Ok((rows, page))
            }
            Err(err) => Err(err.into()),
        }
    }
}
