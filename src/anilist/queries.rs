//! GraphQL documents sent to AniList

pub const SEARCH_PAGE: &str = r#"
query ($page: Int, $perPage: Int, $search: String) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { currentPage lastPage }
    media(type: ANIME, sort: POPULARITY_DESC, search: $search) {
      id
      title { romaji english }
      coverImage { large }
      averageScore
    }
  }
}
"#;

pub const GENRE_PAGE: &str = r#"
query ($page: Int, $perPage: Int, $genre: String) {
  Page(page: $page, perPage: $perPage) {
    pageInfo { currentPage lastPage }
    media(genre: $genre, type: ANIME, sort: POPULARITY_DESC) {
      id
      title { romaji english }
      coverImage { large }
      averageScore
    }
  }
}
"#;

/// Home row: caller picks the sort, optional score floor and genre set
pub const HOME_ROW: &str = r#"
query ($perPage: Int, $sort: [MediaSort], $scoreGreater: Int, $genres: [String]) {
  Page(page: 1, perPage: $perPage) {
    pageInfo { currentPage lastPage }
    media(type: ANIME, sort: $sort, averageScore_greater: $scoreGreater, genre_in: $genres) {
      id
      title { romaji english }
      coverImage { large }
      averageScore
    }
  }
}
"#;

pub const MEDIA_DETAIL: &str = r#"
query ($id: Int) {
  Media(id: $id, type: ANIME) {
    id
    title { romaji english native }
    coverImage { extraLarge color }
    bannerImage
    description(asHtml: false)
    episodes
    averageScore
    genres
    status
    season
    seasonYear
    duration
    studios { nodes { name } }
    characters(sort: ROLE, perPage: 12) {
      edges {
        role
        node { id name { full } image { medium } }
      }
    }
  }
}
"#;
