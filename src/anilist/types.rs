//! Response shapes returned by the AniList GraphQL API

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pagination cursor as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub last_page: u32,
}

/// One page of media summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub media: Vec<MediaSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
    #[serde(default)]
    pub native: Option<String>,
}

impl MediaTitle {
    /// English title when set, otherwise romaji
    pub fn display(&self) -> &str {
        [self.english.as_deref(), self.romaji.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub extra_large: Option<String>,
    /// Hex accent such as `#e4a15d`
    #[serde(default)]
    pub color: Option<String>,
}

/// Card-sized record used by listings and home rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSummary {
    pub id: u32,
    #[serde(default)]
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: CoverImage,
    #[serde(default)]
    pub average_score: Option<u32>,
}

impl MediaSummary {
    pub fn cover_url(&self) -> Option<&str> {
        self.cover_image.large.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioConnection {
    #[serde(default)]
    pub nodes: Vec<Studio>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterName {
    pub full: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterImage {
    pub medium: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    #[serde(default)]
    pub name: CharacterName,
    #[serde(default)]
    pub image: CharacterImage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterEdge {
    /// MAIN, SUPPORTING or BACKGROUND
    pub role: Option<String>,
    pub node: Character,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterConnection {
    #[serde(default)]
    pub edges: Vec<CharacterEdge>,
}

/// Full record for the detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDetail {
    pub id: u32,
    #[serde(default)]
    pub title: MediaTitle,
    #[serde(default)]
    pub cover_image: CoverImage,
    pub banner_image: Option<String>,
    pub description: Option<String>,
    pub episodes: Option<u32>,
    pub average_score: Option<u32>,
    #[serde(default)]
    pub genres: Vec<String>,
    pub status: Option<String>,
    pub season: Option<String>,
    pub season_year: Option<u32>,
    /// Minutes per episode
    pub duration: Option<u32>,
    #[serde(default)]
    pub studios: StudioConnection,
    #[serde(default)]
    pub characters: CharacterConnection,
}

impl MediaDetail {
    /// Banner when the title has one, otherwise the large cover
    pub fn backdrop_url(&self) -> Option<&str> {
        self.banner_image
            .as_deref()
            .or(self.cover_image.extra_large.as_deref())
    }

    pub fn studio_names(&self) -> Vec<&str> {
        self.studios.nodes.iter().map(|s| s.name.as_str()).collect()
    }

    /// "Fall 2023" style label
    pub fn season_label(&self) -> Option<String> {
        match (&self.season, self.season_year) {
            (Some(season), Some(year)) => Some(format!("{} {}", title_case(season), year)),
            (Some(season), None) => Some(title_case(season)),
            (None, Some(year)) => Some(year.to_string()),
            (None, None) => None,
        }
    }

    pub fn plain_description(&self) -> String {
        self.description
            .as_deref()
            .map(strip_html)
            .unwrap_or_default()
    }
}

/// Turn AniList enum values such as `NOT_YET_RELEASED` into `Not Yet Released`
pub fn title_case(value: &str) -> String {
    value
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

static BREAK_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Render the inline HTML AniList puts in descriptions as plain text
pub fn strip_html(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n");
    let text = BREAK_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    BLANK_RUN.replace_all(text.trim(), "\n\n").into_owned()
}
