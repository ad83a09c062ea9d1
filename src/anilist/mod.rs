//! AniList GraphQL data client

pub mod client;
pub mod error;
pub mod queries;
pub mod types;

pub use client::{AniListClient, RowFilter};
pub use error::AniListError;
pub use types::{MediaDetail, MediaPage, MediaSummary, PageInfo};

/// Public AniList endpoint
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";
