//! Theme configuration

use iced::Color;

/// Dark theme colors
pub struct DarkTheme;

impl DarkTheme {
    pub const BACKGROUND: Color = Color::from_rgb(0.09, 0.09, 0.11);
    pub const SURFACE: Color = Color::from_rgb(0.12, 0.12, 0.14);
    pub const SURFACE_HIGHLIGHT: Color = Color::from_rgb(0.18, 0.18, 0.22);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);
    pub const PRIMARY: Color = Color::from_rgb(0.4, 0.55, 1.0);
    pub const TEXT: Color = Color::from_rgb(0.95, 0.95, 0.95);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.55, 0.55, 0.6);
    pub const TEXT_PLACEHOLDER: Color = Color::from_rgb(0.4, 0.4, 0.45);
    pub const SCORE: Color = Color::from_rgb(1.0, 0.8, 0.3);
}

/// Icon and accent for a genre page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreTheme {
    pub icon: &'static str,
    pub accent: Color,
}

const FALLBACK: GenreTheme = GenreTheme {
    icon: "🎬",
    accent: Color::from_rgb(0.23, 0.51, 0.96),
};

const GENRE_THEMES: &[(&str, GenreTheme)] = &[
    ("Action", GenreTheme { icon: "⚔️", accent: Color::from_rgb(0.94, 0.27, 0.27) }),
    ("Adventure", GenreTheme { icon: "🗺️", accent: Color::from_rgb(0.13, 0.77, 0.37) }),
    ("Comedy", GenreTheme { icon: "😂", accent: Color::from_rgb(0.92, 0.70, 0.03) }),
    ("Drama", GenreTheme { icon: "🎭", accent: Color::from_rgb(0.66, 0.33, 0.97) }),
    ("Fantasy", GenreTheme { icon: "🔮", accent: Color::from_rgb(0.39, 0.40, 0.95) }),
    ("Horror", GenreTheme { icon: "👻", accent: Color::from_rgb(0.73, 0.11, 0.11) }),
    ("Mystery", GenreTheme { icon: "🔍", accent: Color::from_rgb(0.28, 0.33, 0.41) }),
    ("Romance", GenreTheme { icon: "💕", accent: Color::from_rgb(0.93, 0.28, 0.60) }),
    ("Sci-Fi", GenreTheme { icon: "🚀", accent: Color::from_rgb(0.02, 0.71, 0.83) }),
    ("Slice of Life", GenreTheme { icon: "🍃", accent: Color::from_rgb(0.96, 0.62, 0.04) }),
    ("Sports", GenreTheme { icon: "⚽", accent: Color::from_rgb(0.98, 0.45, 0.09) }),
    ("Supernatural", GenreTheme { icon: "✨", accent: Color::from_rgb(0.49, 0.23, 0.93) }),
    ("Thriller", GenreTheme { icon: "🔪", accent: Color::from_rgb(0.86, 0.15, 0.15) }),
    ("Music", GenreTheme { icon: "🎵", accent: Color::from_rgb(0.55, 0.36, 0.96) }),
    ("Mecha", GenreTheme { icon: "🤖", accent: Color::from_rgb(0.42, 0.45, 0.50) }),
];

/// Genres offered in the navigation bar
pub const GENRE_NAMES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Slice of Life",
    "Sports",
    "Supernatural",
    "Thriller",
    "Music",
    "Mecha",
];

pub fn genre_theme(genre: &str) -> GenreTheme {
    GENRE_THEMES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(genre))
        .map(|(_, theme)| *theme)
        .unwrap_or(FALLBACK)
}

/// Parse AniList's `#rrggbb` cover accents
pub fn hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_nav_genre_has_a_theme() {
        for genre in GENRE_NAMES {
            assert_ne!(genre_theme(genre), FALLBACK, "{} has no theme", genre);
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#ff0000"), Some(Color::from_rgb8(255, 0, 0)));
        assert_eq!(hex_color("e4a15d"), Some(Color::from_rgb8(0xe4, 0xa1, 0x5d)));
        assert_eq!(hex_color("#fff"), None);
        assert_eq!(hex_color("#zz0000"), None);
    }

    #[test]
    fn test_unknown_genre_falls_back() {
        assert_eq!(genre_theme("Ecchi").icon, "🎬");
        assert_eq!(genre_theme("sci-fi").icon, "🚀");
    }
}
