//! HTTP client for the AniList GraphQL endpoint

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::AniListError;
use super::queries;
use super::types::{MediaDetail, MediaPage, MediaSummary};

pub type Result<T> = std::result::Result<T, AniListError>;

/// Client for the public AniList catalog
#[derive(Debug, Clone)]
pub struct AniListClient {
    client: Client,
    endpoint: String,
}

/// POST body: `{query, variables}`
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media")]
    media: Option<MediaDetail>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchVariables<'a> {
    page: u32,
    per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenreVariables<'a> {
    page: u32,
    per_page: u32,
    genre: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HomeRowVariables<'a> {
    per_page: u32,
    sort: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    score_greater: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genres: Option<&'a [&'a str]>,
}

#[derive(Debug, Serialize)]
struct IdVariables {
    id: u32,
}

/// Filter for one curated home row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFilter {
    /// AniList `MediaSort` value, e.g. `TRENDING_DESC`
    pub sort: &'static str,
    pub score_greater: Option<u32>,
    pub genres: &'static [&'static str],
}

impl AniListClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Run a GraphQL document and decode its `data` member
    pub async fn execute<T, V>(&self, query: &str, variables: V) -> Result<T>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        decode_response(status, &body)
    }

    /// Popularity-sorted page, filtered by `search` when it is non-empty
    pub async fn search_page(&self, search: &str, page: u32, per_page: u32) -> Result<MediaPage> {
        let search = search.trim();
        let variables = SearchVariables {
            page,
            per_page,
            search: (!search.is_empty()).then_some(search),
        };
        tracing::debug!(search, page, "AniList search");
        let data: PageData = self.execute(queries::SEARCH_PAGE, variables).await?;
        Ok(data.page)
    }

    /// Popularity-sorted page of one genre; the name goes to the server verbatim
    pub async fn genre_page(&self, genre: &str, page: u32, per_page: u32) -> Result<MediaPage> {
        let variables = GenreVariables {
            page,
            per_page,
            genre,
        };
        tracing::debug!(genre, page, "AniList genre page");
        let data: PageData = self.execute(queries::GENRE_PAGE, variables).await?;
        Ok(data.page)
    }

    pub async fn home_row(&self, filter: RowFilter, per_page: u32) -> Result<Vec<MediaSummary>> {
        let variables = HomeRowVariables {
            per_page,
            sort: [filter.sort],
            score_greater: filter.score_greater,
            genres: (!filter.genres.is_empty()).then_some(filter.genres),
        };
        let data: PageData = self.execute(queries::HOME_ROW, variables).await?;
        Ok(data.page.media)
    }

    /// `Ok(None)` when AniList has no anime with this id
    pub async fn media(&self, id: u32) -> Result<Option<MediaDetail>> {
        match self
            .execute::<MediaData, _>(queries::MEDIA_DETAIL, IdVariables { id })
            .await
        {
            Ok(data) => Ok(data.media),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Raw bytes of a cover or banner image
    pub async fn image_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AniListError::Status {
                status,
                body: String::new(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Decode a GraphQL response body.
///
/// A populated `errors` array wins over a non-success status so the
/// server's own message reaches the log.
pub fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    let parsed: GraphQlResponse<T> = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(AniListError::Status {
                status,
                body: body.chars().take(200).collect(),
            })
        }
        Err(e) => return Err(AniListError::Decode(e)),
    };

    if !parsed.errors.is_empty() {
        return Err(AniListError::GraphQl(
            parsed.errors.into_iter().map(|e| e.message).collect(),
        ));
    }
    if !status.is_success() {
        return Err(AniListError::Status {
            status,
            body: body.chars().take(200).collect(),
        });
    }
    parsed.data.ok_or(AniListError::MissingData)
}
