//! Paginated listing state shared by the search page and genre pages

use std::sync::atomic::{AtomicU64, Ordering};

use crate::anilist::{AniListClient, MediaPage, MediaSummary};
use crate::pagination::Paginator;

/// Shared across views so a reopened listing never accepts an old response
static NEXT_SEQ: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingKind {
    /// Popularity-sorted catalog, optionally filtered by free text
    Search { query: String },
    Genre { genre: String },
}

/// What the listing should show right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    Loading,
    Loaded,
    Empty,
}

/// One page fetch, tagged so late responses can be recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub kind: ListingKind,
    pub page: u32,
    pub per_page: u32,
}

impl FetchRequest {
    pub async fn run(self, client: AniListClient) -> (u64, Result<MediaPage, String>) {
        let result = match &self.kind {
            ListingKind::Search { query } => {
                client.search_page(query, self.page, self.per_page).await
            }
            ListingKind::Genre { genre } => client.genre_page(genre, self.page, self.per_page).await,
        };
        (self.seq, result.map_err(|e| e.to_string()))
    }
}

#[derive(Debug)]
pub struct ListingView {
    kind: ListingKind,
    per_page: u32,
    paginator: Paginator,
    results: Vec<MediaSummary>,
    loading: bool,
    /// Sequence number of the most recent request issued
    seq: u64,
}

impl ListingView {
    pub fn new(kind: ListingKind, per_page: u32) -> Self {
        Self {
            kind,
            per_page,
            paginator: Paginator::default(),
            results: Vec::new(),
            loading: false,
            seq: 0,
        }
    }

    pub fn search(query: impl Into<String>, per_page: u32) -> Self {
        Self::new(
            ListingKind::Search {
                query: query.into(),
            },
            per_page,
        )
    }

    pub fn genre(genre: impl Into<String>, per_page: u32) -> Self {
        Self::new(
            ListingKind::Genre {
                genre: genre.into(),
            },
            per_page,
        )
    }

    pub fn kind(&self) -> &ListingKind {
        &self.kind
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn results(&self) -> &[MediaSummary] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> ListingState {
        if self.is_loading() {
            ListingState::Loading
        } else if self.results.is_empty() {
            ListingState::Empty
        } else {
            ListingState::Loaded
        }
    }

    pub fn heading(&self) -> String {
        match &self.kind {
            ListingKind::Search { query } if query.trim().is_empty() => "All Anime".to_string(),
            ListingKind::Search { query } => format!("Results for \u{201c}{}\u{201d}", query.trim()),
            ListingKind::Genre { genre } => genre.clone(),
        }
    }

    /// First fetch after the view is opened
    pub fn start(&mut self) -> FetchRequest {
        self.issue(1)
    }

    /// New search text; fetches page 1 unless the text did not change
    pub fn set_query(&mut self, text: &str) -> Option<FetchRequest> {
        match &mut self.kind {
            ListingKind::Search { query } if query != text => {
                *query = text.to_string();
                Some(self.issue(1))
            }
            _ => None,
        }
    }

    /// Navigate to `page`; `None` when it lies outside the known bounds
    pub fn go_to(&mut self, page: u32) -> Option<FetchRequest> {
        match self.paginator.request(page) {
            Some(page) => Some(self.issue(page)),
            None => {
                tracing::debug!(page, last = self.paginator.last(), "Ignoring out-of-range page");
                None
            }
        }
    }

    fn issue(&mut self, page: u32) -> FetchRequest {
        self.seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        self.loading = true;
        FetchRequest {
            seq: self.seq,
            kind: self.kind.clone(),
            page,
            per_page: self.per_page,
        }
    }

    /// Apply a response. Returns `false` when it was dropped as stale.
    pub fn apply(&mut self, seq: u64, result: Result<MediaPage, String>) -> bool {
        if seq != self.seq {
            tracing::debug!(seq, latest = self.seq, "Dropping stale listing response");
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                if let Some(info) = page.page_info {
                    self.paginator.adopt(&info);
                }
                self.results = page.media;
            }
            Err(e) => {
                tracing::error!("Listing fetch failed: {}", e);
            }
        }
        true
    }
}
