//! Homepage rows

use crate::anilist::{AniListClient, MediaSummary, RowFilter};

/// A curated row on the homepage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpec {
    pub label: &'static str,
    pub icon: &'static str,
    pub filter: RowFilter,
}

pub const ROWS: &[RowSpec] = &[
    RowSpec {
        label: "Best Anime",
        icon: "🏆",
        filter: RowFilter {
            sort: "SCORE_DESC",
            score_greater: Some(80),
            genres: &[],
        },
    },
    RowSpec {
        label: "Trending Now",
        icon: "🔥",
        filter: RowFilter {
            sort: "TRENDING_DESC",
            score_greater: None,
            genres: &[],
        },
    },
    RowSpec {
        label: "Romance & Comedy",
        icon: "💕",
        filter: RowFilter {
            sort: "TRENDING_DESC",
            score_greater: None,
            genres: &["Romance", "Comedy"],
        },
    },
    RowSpec {
        label: "Action",
        icon: "⚔️",
        filter: RowFilter {
            sort: "TRENDING_DESC",
            score_greater: None,
            genres: &["Action"],
        },
    },
    RowSpec {
        label: "Music",
        icon: "🎵",
        filter: RowFilter {
            sort: "TRENDING_DESC",
            score_greater: None,
            genres: &["Music"],
        },
    },
];

/// Entries ranked 1 to 3 get a badge
pub fn rank_badge(index: usize) -> Option<usize> {
    (index < 3).then_some(index + 1)
}

#[derive(Debug)]
pub struct HomeRow {
    pub spec: &'static RowSpec,
    /// `None` until the row's fetch has finished
    pub items: Option<Vec<MediaSummary>>,
}

#[derive(Debug)]
pub struct HomeView {
    rows: Vec<HomeRow>,
    row_size: u32,
}

impl HomeView {
    pub fn new(row_size: u32) -> Self {
        Self {
            rows: ROWS
                .iter()
                .map(|spec| HomeRow { spec, items: None })
                .collect(),
            row_size,
        }
    }

    pub fn rows(&self) -> &[HomeRow] {
        &self.rows
    }

    /// Every row fetch, keyed by row index
    pub fn requests(&self) -> Vec<(usize, RowFilter, u32)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, row.spec.filter, self.row_size))
            .collect()
    }

    pub fn apply(&mut self, index: usize, result: Result<Vec<MediaSummary>, String>) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        match result {
            Ok(items) => row.items = Some(items),
            Err(e) => {
                tracing::error!("Home row {:?} failed: {}", row.spec.label, e);
                row.items = Some(Vec::new());
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.rows.iter().all(|r| r.items.is_none())
    }
}

pub async fn fetch_row(
    client: AniListClient,
    index: usize,
    filter: RowFilter,
    row_size: u32,
) -> (usize, Result<Vec<MediaSummary>, String>) {
    let result = client
        .home_row(filter, row_size)
        .await
        .map_err(|e| e.to_string());
    (index, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_in_order() {
        let view = HomeView::new(10);
        let labels: Vec<&str> = view.rows().iter().map(|r| r.spec.label).collect();
        assert_eq!(
            labels,
            vec!["Best Anime", "Trending Now", "Romance & Comedy", "Action", "Music"]
        );
        assert_eq!(ROWS[0].filter.score_greater, Some(80));
        assert_eq!(ROWS[2].filter.genres, &["Romance", "Comedy"]);
    }

    #[test]
    fn test_requests_cover_every_row() {
        let view = HomeView::new(10);
        let reqs = view.requests();
        assert_eq!(reqs.len(), ROWS.len());
        assert!(reqs.iter().all(|(_, _, size)| *size == 10));
        assert_eq!(reqs[1].1.sort, "TRENDING_DESC");
    }

    #[test]
    fn test_rows_fill_independently() {
        let mut view = HomeView::new(10);
        assert!(view.is_loading());
        view.apply(3, Err("timeout".into()));
        assert!(!view.is_loading());
        assert_eq!(view.rows()[3].items.as_deref(), Some(&[][..]));
        assert!(view.rows()[0].items.is_none());
        view.apply(99, Ok(Vec::new()));
    }

    #[test]
    fn test_rank_badge() {
        assert_eq!(rank_badge(0), Some(1));
        assert_eq!(rank_badge(2), Some(3));
        assert_eq!(rank_badge(3), None);
    }
}
