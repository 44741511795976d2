//! Ranking URL table
//!
//! Paths under the ranking mount point are matched against an ordered
//! pattern table; the first pattern whose captures parse wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::constants::RANKING_BASE_PATH;

/// A resolved ranking path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum RankingRoute {
    StandingsList,
    StandingsAction,
    Standings { title_slug: String, contest_id: i64 },
    StandingsById { contest_id: i64 },
    StandingsByIds { contest_ids: Vec<i64> },
    StandingsBySlug { title_slug: String },
    Solution { sid: i64, problem_key: String },
    ScoreHistory { statistic_id: i64 },
    ScoreHistories { statistic_ids: Vec<i64> },
    MakeVersus,
    /// `<left>/vs/<right>`, each side a comma-separated list
    Versus { spec: String },
    VirtualStart,
}

type Builder = fn(&Captures<'_>) -> Option<RankingRoute>;

static PATTERNS: LazyLock<Vec<(&'static str, Regex, Builder)>> = LazyLock::new(|| {
    let table: [(&'static str, &'static str, Builder); 12] = [
        ("standings_list", r"^standings/$", |_| Some(RankingRoute::StandingsList)),
        ("standings_action", r"^standings/action/$", |_| Some(RankingRoute::StandingsAction)),
        (
            "standings",
            r"^standings/(?P<title_slug>[^/]*)-(?P<contest_id>[0-9]+)/$",
            |c| {
                Some(RankingRoute::Standings {
                    title_slug: c["title_slug"].to_string(),
                    contest_id: c["contest_id"].parse().ok()?,
                })
            },
        ),
        ("standings_by_id", r"^standings/(?P<contest_id>[0-9]+)/$", |c| {
            Some(RankingRoute::StandingsById {
                contest_id: c["contest_id"].parse().ok()?,
            })
        }),
        (
            "standings_by_ids",
            r"^standings/(?P<contests_ids>[0-9]+(?:,[0-9]+)+)/$",
            |c| {
                Some(RankingRoute::StandingsByIds {
                    contest_ids: parse_ids(&c["contests_ids"])?,
                })
            },
        ),
        ("standings_by_slug", r"^standings/(?P<title_slug>[^/]+)/$", |c| {
            Some(RankingRoute::StandingsBySlug {
                title_slug: c["title_slug"].to_string(),
            })
        }),
        ("solution", r"^solutions/(?P<sid>[0-9]+)/(?P<problem_key>.*)/$", |c| {
            Some(RankingRoute::Solution {
                sid: c["sid"].parse().ok()?,
                problem_key: c["problem_key"].to_string(),
            })
        }),
        ("score-history", r"^score-history/(?P<statistic_id>[0-9]+)/$", |c| {
            Some(RankingRoute::ScoreHistory {
                statistic_id: c["statistic_id"].parse().ok()?,
            })
        }),
        (
            "score-histories",
            r"^score-history/(?P<statistic_ids>[0-9]+(?:,[0-9]+)+)/$",
            |c| {
                Some(RankingRoute::ScoreHistories {
                    statistic_ids: parse_ids(&c["statistic_ids"])?,
                })
            },
        ),
        ("make_versus", r"^versus/$", |_| Some(RankingRoute::MakeVersus)),
        ("versus", r"^versus/(?P<spec>.+/vs/.+)/$", |c| {
            Some(RankingRoute::Versus {
                spec: c["spec"].to_string(),
            })
        }),
        ("virtual_start", r"^virtual-start/$", |_| Some(RankingRoute::VirtualStart)),
    ];

    table
        .into_iter()
        .map(|(name, pattern, build)| {
            (name, Regex::new(pattern).expect("valid ranking pattern"), build)
        })
        .collect()
});

impl RankingRoute {
    /// Resolve a path relative to the ranking mount point, e.g. `standings/12/`
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('/');
        PATTERNS.iter().find_map(|(_, regex, build)| {
            let captures = regex.captures(path)?;
            build(&captures)
        })
    }

    /// URL name of the route
    pub fn name(&self) -> &'static str {
        match self {
            Self::StandingsList => "standings_list",
            Self::StandingsAction => "standings_action",
            Self::Standings { .. } => "standings",
            Self::StandingsById { .. } => "standings_by_id",
            Self::StandingsByIds { .. } => "standings_by_ids",
            Self::StandingsBySlug { .. } => "standings_by_slug",
            Self::Solution { .. } => "solution",
            Self::ScoreHistory { .. } => "score-history",
            Self::ScoreHistories { .. } => "score-histories",
            Self::MakeVersus => "make_versus",
            Self::Versus { .. } => "versus",
            Self::VirtualStart => "virtual_start",
        }
    }

    /// Absolute path of the route
    pub fn reverse(&self) -> String {
        let relative = match self {
            Self::StandingsList => "standings/".to_string(),
            Self::StandingsAction => "standings/action/".to_string(),
            Self::Standings {
                title_slug,
                contest_id,
            } => format!("standings/{}-{}/", title_slug, contest_id),
            Self::StandingsById { contest_id } => format!("standings/{}/", contest_id),
            Self::StandingsByIds { contest_ids } => format!("standings/{}/", join_ids(contest_ids)),
            Self::StandingsBySlug { title_slug } => format!("standings/{}/", title_slug),
            Self::Solution { sid, problem_key } => format!("solutions/{}/{}/", sid, problem_key),
            Self::ScoreHistory { statistic_id } => format!("score-history/{}/", statistic_id),
            Self::ScoreHistories { statistic_ids } => {
                format!("score-history/{}/", join_ids(statistic_ids))
            }
            Self::MakeVersus => "versus/".to_string(),
            Self::Versus { spec } => format!("versus/{}/", spec),
            Self::VirtualStart => "virtual-start/".to_string(),
        };
        format!("{}/{}", RANKING_BASE_PATH, relative)
    }
}

/// Comma-separated ids; `None` if any does not fit an `i64`
fn parse_ids(raw: &str) -> Option<Vec<i64>> {
    raw.split(',').map(|id| id.parse().ok()).collect()
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_patterns_in_order() {
        assert_eq!(RankingRoute::resolve("standings/"), Some(RankingRoute::StandingsList));
        assert_eq!(
            RankingRoute::resolve("standings/action/"),
            Some(RankingRoute::StandingsAction)
        );
        assert_eq!(
            RankingRoute::resolve("standings/codeforces-round-900-1868/"),
            Some(RankingRoute::Standings {
                title_slug: "codeforces-round-900".to_string(),
                contest_id: 1868,
            })
        );
        assert_eq!(
            RankingRoute::resolve("standings/1868/"),
            Some(RankingRoute::StandingsById { contest_id: 1868 })
        );
        assert_eq!(
            RankingRoute::resolve("standings/1,2,30/"),
            Some(RankingRoute::StandingsByIds {
                contest_ids: vec![1, 2, 30]
            })
        );
        assert_eq!(
            RankingRoute::resolve("standings/icpc-world-finals/"),
            Some(RankingRoute::StandingsBySlug {
                title_slug: "icpc-world-finals".to_string()
            })
        );
    }

    #[test]
    fn test_empty_slug_with_id() {
        assert_eq!(
            RankingRoute::resolve("standings/-5/"),
            Some(RankingRoute::Standings {
                title_slug: String::new(),
                contest_id: 5,
            })
        );
    }

    #[test]
    fn test_overflowing_id_falls_through_to_slug() {
        let huge = "99999999999999999999";
        assert_eq!(
            RankingRoute::resolve(&format!("standings/{}/", huge)),
            Some(RankingRoute::StandingsBySlug {
                title_slug: huge.to_string()
            })
        );
    }

    #[test]
    fn test_other_routes() {
        assert_eq!(
            RankingRoute::resolve("/solutions/77/A1/"),
            Some(RankingRoute::Solution {
                sid: 77,
                problem_key: "A1".to_string()
            })
        );
        assert_eq!(
            RankingRoute::resolve("score-history/3/"),
            Some(RankingRoute::ScoreHistory { statistic_id: 3 })
        );
        assert_eq!(
            RankingRoute::resolve("score-history/3,4/"),
            Some(RankingRoute::ScoreHistories {
                statistic_ids: vec![3, 4]
            })
        );
        assert_eq!(RankingRoute::resolve("versus/"), Some(RankingRoute::MakeVersus));
        assert_eq!(
            RankingRoute::resolve("versus/tourist/vs/petr,um_nik/"),
            Some(RankingRoute::Versus {
                spec: "tourist/vs/petr,um_nik".to_string()
            })
        );
        assert_eq!(RankingRoute::resolve("virtual-start/"), Some(RankingRoute::VirtualStart));
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(RankingRoute::resolve("standings"), None);
        assert_eq!(RankingRoute::resolve("score-history/abc/"), None);
        assert_eq!(RankingRoute::resolve("versus/tourist/"), None);
        assert_eq!(RankingRoute::resolve(""), None);
    }

    #[test]
    fn test_reverse_resolves_back() {
        let routes = [
            RankingRoute::Standings {
                title_slug: "abc-123".to_string(),
                contest_id: 9,
            },
            RankingRoute::StandingsByIds {
                contest_ids: vec![4, 5],
            },
            RankingRoute::Versus {
                spec: "a/vs/b".to_string(),
            },
        ];
        for route in routes {
            let path = route.reverse();
            let relative = path.strip_prefix("/ranking/").unwrap();
            assert_eq!(RankingRoute::resolve(relative), Some(route));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(RankingRoute::ScoreHistory { statistic_id: 1 }.name(), "score-history");
        assert_eq!(
            RankingRoute::StandingsById { contest_id: 1 }.reverse(),
            "/ranking/standings/1/"
        );
    }
}
