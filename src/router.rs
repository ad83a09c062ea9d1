//! Path routing between views
//!
//! Paths mirror the web catalog: `/`, `/all-anime`, `/genre/{name}`,
//! `/anime/{id}`. Anything else routes to `NotFound`.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    AllAnime,
    Genre(String),
    Anime(u32),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["all-anime"] => Route::AllAnime,
            ["genre", name] => match percent_decode_str(name).decode_utf8() {
                Ok(name) if !name.trim().is_empty() => Route::Genre(name.into_owned()),
                _ => Route::NotFound(trimmed.to_string()),
            },
            ["anime", id] => match id.parse::<u32>() {
                Ok(id) if id > 0 => Route::Anime(id),
                _ => Route::NotFound(trimmed.to_string()),
            },
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::AllAnime => "/all-anime".to_string(),
            Route::Genre(name) => format!("/genre/{}", utf8_percent_encode(name, COMPONENT)),
            Route::Anime(id) => format!("/anime/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/all-anime"), Route::AllAnime);
        assert_eq!(Route::parse("/all-anime/"), Route::AllAnime);
        assert_eq!(Route::parse("/anime/21"), Route::Anime(21));
        assert_eq!(Route::parse("/genre/Action"), Route::Genre("Action".into()));
        assert_eq!(
            Route::parse("/genre/Slice%20of%20Life"),
            Route::Genre("Slice of Life".into())
        );
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/anime/abc"), Route::NotFound("/anime/abc".into()));
        assert_eq!(Route::parse("/anime/0"), Route::NotFound("/anime/0".into()));
        assert_eq!(Route::parse("/manga/1"), Route::NotFound("/manga/1".into()));
        assert_eq!(Route::parse("/genre"), Route::NotFound("/genre".into()));
        assert_eq!(Route::parse("/genre/%FF"), Route::NotFound("/genre/%FF".into()));
        assert_eq!(Route::parse("/genre/%20"), Route::NotFound("/genre/%20".into()));
    }

    #[test]
    fn test_genre_names_are_percent_decoded() {
        assert_eq!(Route::parse("/genre/Sci%2DFi"), Route::Genre("Sci-Fi".into()));
        assert_eq!(
            Route::parse("/genre/Mahou%20Sh%C5%8Djo"),
            Route::Genre("Mahou Sh\u{14d}jo".into())
        );
        assert_eq!(
            Route::parse("/genre/Romance%26Comedy"),
            Route::Genre("Romance&Comedy".into())
        );
        assert_eq!(
            Route::Genre("Slice of Life".into()).path(),
            "/genre/Slice%20of%20Life"
        );
        assert_eq!(Route::Genre("Romance&Comedy".into()).path(), "/genre/Romance%26Comedy");
        assert_eq!(Route::Genre("Sci-Fi".into()).path(), "/genre/Sci-Fi");
    }

    #[test]
    fn test_paths_parse_back() {
        for route in [
            Route::Home,
            Route::AllAnime,
            Route::Genre("Sci-Fi".into()),
            Route::Genre("Slice of Life".into()),
            Route::Genre("Mahou Sh\u{14d}jo".into()),
            Route::Anime(16498),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
