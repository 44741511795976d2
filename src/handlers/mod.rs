//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod admin;
pub mod health;
pub mod ranking;

use axum::{middleware, Router};

use crate::{
    constants::{ADMIN_BASE_PATH, RANKING_BASE_PATH},
    middleware::auth::staff_middleware,
    state::AppState,
};

/// Create all routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest(
            ADMIN_BASE_PATH,
            admin::routes().route_layer(middleware::from_fn_with_state(state, staff_middleware)),
        )
        .nest(RANKING_BASE_PATH, ranking::routes())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::test_utils::test_app::{bearer, offline_state, router};

    fn app() -> Router {
        router(offline_state())
    }

    async fn get(app: Router, uri: &str, auth: Option<String>) -> axum::response::Response {
        let mut request = Request::builder().uri(uri);
        if let Some(auth) = auth {
            request = request.header(header::AUTHORIZATION, auth);
        }
        app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get(app(), "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_admin_requires_token() {
        let response = get(app(), "/admin/contests/", None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = get(app(), "/admin/contests/", Some("Bearer not-a-token".to_string())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_requires_staff() {
        let response = get(app(), "/admin/contests/", Some(bearer(false))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_index_lists_listings() {
        let response = get(app(), "/admin", Some(bearer(true))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let names: Vec<&str> = body["listings"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["contests", "permissions", "statistics"]);
    }

    #[tokio::test]
    async fn test_sort_by_redirects_before_querying() {
        let response = get(
            app(),
            "/admin/contests/?q=round&sort_by=-title",
            Some(bearer(true)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/admin/contests/?q=round&o=-2"
        );
    }

    #[tokio::test]
    async fn test_unknown_listing_is_not_found() {
        let response = get(app(), "/admin/submissions/", Some(bearer(true))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_form_widgets() {
        let response = get(app(), "/admin/contests/form", Some(bearer(true))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let fields = body["fields"].as_array().unwrap();
        let widget = |name: &str| {
            fields
                .iter()
                .find(|f| f["name"] == name)
                .map(|f| f["widget"].clone())
                .unwrap()
        };

        assert_eq!(widget("title")["type"], "textarea");
        assert_eq!(widget("standings_url")["type"], "text_input");
        assert_eq!(widget("info")["type"], "json_editor");
        assert_eq!(widget("info")["height"], "100px");
        assert_eq!(body["save_as"], true);
        assert!(body.get("object").is_none());
    }

    #[tokio::test]
    async fn test_unimplemented_ranking_views() {
        for path in [
            "/ranking/standings/action/",
            "/ranking/solutions/1/A/",
            "/ranking/versus/",
            "/ranking/versus/a/vs/b/",
            "/ranking/virtual-start/",
        ] {
            let response = get(app(), path, None).await;
            assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_unknown_ranking_path() {
        let response = get(app(), "/ranking/leaderboard/", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_overlong_search_rejected() {
        let uri = format!("/ranking/standings/?q={}", "x".repeat(300));
        let response = get(app(), &uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    mod with_database {
        use std::sync::Arc;

        use axum::http::header::LOCATION;
        use chrono::{Duration, Utc};
        use sqlx::PgPool;

        use super::*;
        use crate::{
            admin::{AdminRegistry, ListingConfig},
            models::{Contest, Statistic},
            pagination::MemoryCountCache,
            state::AppState,
            test_utils::{containers::migrated_pool, test_app::test_config},
        };

        /// A contest with 25 standings rows whose accounts share `tag`
        struct Seeded {
            contest_id: i64,
            slug: String,
            tag: String,
            statistic_ids: Vec<i64>,
        }

        async fn seed(pool: &PgPool) -> Seeded {
            let tag = format!("acct{}", Utc::now().timestamp_nanos_opt().unwrap());
            let slug = format!("round-{}", tag);
            let start = Utc::now() - Duration::hours(3);

            let contest_id: i64 = sqlx::query_scalar(
                "INSERT INTO contests (title, slug, host, start_time, end_time) \
                 VALUES ($1, $2, 'example.org', $3, $4) RETURNING id",
            )
            .bind(format!("Round {}", tag))
            .bind(&slug)
            .bind(start)
            .bind(start + Duration::hours(2))
            .fetch_one(pool)
            .await
            .unwrap();

            let mut statistic_ids = Vec::new();
            for place in 1..=25 {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO statistics (contest_id, account, place, solving) \
                     VALUES ($1, $2, $3, $4) RETURNING id",
                )
                .bind(contest_id)
                .bind(format!("{}-{:02}", tag, place))
                .bind(place)
                .bind(f64::from(30 - place))
                .fetch_one(pool)
                .await
                .unwrap();
                statistic_ids.push(id);
            }

            Seeded {
                contest_id,
                slug,
                tag,
                statistic_ids,
            }
        }

        async fn database_app() -> (Router, Seeded) {
            let pool = migrated_pool().await;
            let seeded = seed(&pool).await;

            let mut registry = AdminRegistry::new();
            registry
                .register(
                    ListingConfig::new("contests", Contest::schema())
                        .list_display(&["id", "title", "host"])
                        .search_fields(&["title", "host", "slug"]),
                )
                .unwrap();
            registry
                .register(
                    ListingConfig::new("statistics", Statistic::schema())
                        .list_display(&["id", "contest_id", "account", "place", "solving"])
                        .search_fields(&["account"])
                        .ordering(&["id"])
                        .per_page(10),
                )
                .unwrap();

            let state = AppState::new(pool, Arc::new(MemoryCountCache::new()), registry, test_config());
            (router(state), seeded)
        }

        fn rows(body: &Value) -> Vec<String> {
            body["rows"]
                .as_array()
                .unwrap()
                .iter()
                .map(|row| row["account"].as_str().unwrap().to_string())
                .collect()
        }

        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn test_changelist_second_page() {
            let (app, seeded) = database_app().await;

            let uri = format!("/admin/statistics/?q={}&p=2", seeded.tag);
            let response = get(app, &uri, Some(bearer(true))).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["page"]["number"], 2);
            assert_eq!(body["page"]["count"], 25);
            assert_eq!(body["page"]["num_pages"], 3);

            let accounts = rows(&body);
            assert_eq!(accounts.len(), 10);
            assert_eq!(accounts[0], format!("{}-11", seeded.tag));
            assert_eq!(accounts[9], format!("{}-20", seeded.tag));
        }

        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn test_changelist_page_past_the_end_shows_last_page() {
            let (app, seeded) = database_app().await;

            let uri = format!("/admin/statistics/?q={}&p=9", seeded.tag);
            let response = get(app, &uri, Some(bearer(true))).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["page"]["number"], 3);
            assert_eq!(body["page"]["start_index"], 21);
            assert_eq!(body["page"]["end_index"], 25);

            let accounts = rows(&body);
            assert_eq!(accounts.len(), 5);
            assert_eq!(accounts[4], format!("{}-25", seeded.tag));
        }

        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn test_change_form_loads_object() {
            let (app, seeded) = database_app().await;

            let uri = format!("/admin/contests/{}/", seeded.contest_id);
            let response = get(app.clone(), &uri, Some(bearer(true))).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["object"]["id"], seeded.contest_id);
            assert_eq!(body["object"]["slug"], seeded.slug.as_str());

            let response = get(app, "/admin/contests/999999999/", Some(bearer(true))).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }

        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn test_standings_redirect_to_canonical_path() {
            let (app, seeded) = database_app().await;
            let canonical = format!("/ranking/standings/{}-{}/", seeded.slug, seeded.contest_id);

            let uri = format!("/ranking/standings/wrong-{}/", seeded.contest_id);
            let response = get(app.clone(), &uri, None).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[LOCATION], canonical.as_str());

            let uri = format!("/ranking/standings/{}/", seeded.contest_id);
            let response = get(app.clone(), &uri, None).await;
            assert_eq!(response.status(), StatusCode::FOUND);
            assert_eq!(response.headers()[LOCATION], canonical.as_str());

            let response = get(app, &canonical, None).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            assert_eq!(body["contests"][0]["id"], seeded.contest_id);
            assert_eq!(body["page"]["count"], 25);
            assert_eq!(body["rows"][0]["place"], 1);
        }

        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn test_score_histories_keep_request_order() {
            let (app, seeded) = database_app().await;
            let first = seeded.statistic_ids[0];
            let last = seeded.statistic_ids[24];

            let uri = format!("/ranking/score-history/{},{}/", last, first);
            let response = get(app, &uri, None).await;
            assert_eq!(response.status(), StatusCode::OK);

            let body = json_body(response).await;
            let ids: Vec<i64> = body["statistics"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["id"].as_i64().unwrap())
                .collect();
            assert_eq!(ids, vec![last, first]);
        }
    }
}
