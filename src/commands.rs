//! Command-line interface
//!
//! Without a subcommand the window opens on the homepage. The listing and
//! detail subcommands print to stdout instead of opening a window.

use clap::{Parser, Subcommand};
use std::fmt::Write as _;

use crate::anilist::types::title_case;
use crate::anilist::{AniListClient, AniListError, MediaDetail, MediaPage, MediaSummary};
use crate::config::Settings;
use crate::router::Route;
use crate::views::home::{fetch_row, HomeView};
use crate::views::ListingKind;

#[derive(Parser, Debug)]
#[command(name = "aniview", version, about = "Browse the AniList anime catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the window at a path such as /anime/21 or /genre/Action
    Open {
        #[arg(default_value = "/")]
        path: String,
    },
    /// Print one page of the catalog, filtered by QUERY
    Search {
        query: Vec<String>,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Print one page of a genre
    Genre {
        name: String,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Print the details of one title
    Show { id: u32 },
    /// Print the homepage rows
    Home,
}

impl Command {
    /// Route to open in the window, for commands that open one
    pub fn route(&self) -> Option<Route> {
        match self {
            Command::Open { path } => Some(Route::parse(path)),
            _ => None,
        }
    }
}

/// Run a printing subcommand
pub async fn run(command: Command, settings: &Settings) -> Result<(), AniListError> {
    let client = AniListClient::new(&settings.endpoint);

    match command {
        Command::Open { .. } => {}
        Command::Search { query, page } => {
            let query = query.join(" ");
            let kind = ListingKind::Search {
                query: query.clone(),
            };
            let result = client
                .search_page(&query, page, settings.search_per_page)
                .await?;
            print!("{}", format_page(&kind, &result));
        }
        Command::Genre { name, page } => {
            let result = client
                .genre_page(&name, page, settings.genre_per_page)
                .await?;
            print!("{}", format_page(&ListingKind::Genre { genre: name }, &result));
        }
        Command::Show { id } => match client.media(id).await? {
            Some(media) => print!("{}", format_detail(&media)),
            None => println!("Anime not found."),
        },
        Command::Home => {
            let mut home = HomeView::new(settings.home_row_size);
            let handles: Vec<_> = home
                .requests()
                .into_iter()
                .map(|(index, filter, size)| {
                    tokio::spawn(fetch_row(client.clone(), index, filter, size))
                })
                .collect();

            for handle in handles {
                match handle.await {
                    Ok((index, result)) => home.apply(index, result),
                    Err(e) => tracing::error!("Home row task failed: {}", e),
                }
            }
            for row in home.rows() {
                println!("{} {}", row.spec.icon, row.spec.label);
                for (i, item) in row.items.iter().flatten().enumerate() {
                    println!("  {:>2}. {}", i + 1, summary_line(item));
                }
                println!();
            }
        }
    }
    Ok(())
}

fn summary_line(item: &MediaSummary) -> String {
    match item.average_score {
        Some(score) => format!("{} [{}] {}%", item.title.display(), item.id, score),
        None => format!("{} [{}]", item.title.display(), item.id),
    }
}

/// Listing as printed by `search` and `genre`
pub fn format_page(kind: &ListingKind, page: &MediaPage) -> String {
    let mut out = String::new();
    let heading = match kind {
        ListingKind::Search { query } if query.trim().is_empty() => "All Anime".to_string(),
        ListingKind::Search { query } => format!("Results for \"{}\"", query.trim()),
        ListingKind::Genre { genre } => format!("{} anime", genre),
    };
    let _ = writeln!(out, "{}", heading);
    if let Some(info) = page.page_info {
        let _ = writeln!(out, "page {} / {}", info.current_page, info.last_page.max(1));
    }
    if page.media.is_empty() {
        let _ = writeln!(out, "No results found.");
    }
    for item in &page.media {
        let _ = writeln!(out, "  {}", summary_line(item));
    }
    out
}

/// Detail record as printed by `show`
pub fn format_detail(media: &MediaDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", media.title.display(), media.id);
    if let Some(native) = &media.title.native {
        let _ = writeln!(out, "{}", native);
    }

    let mut facts = Vec::new();
    if let Some(score) = media.average_score {
        facts.push(format!("Score {}%", score));
    }
    if let Some(episodes) = media.episodes {
        facts.push(format!("{} episodes", episodes));
    }
    if let Some(duration) = media.duration {
        facts.push(format!("{} min", duration));
    }
    if let Some(status) = &media.status {
        facts.push(title_case(status));
    }
    if let Some(season) = media.season_label() {
        facts.push(season);
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" · "));
    }
    if !media.genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", media.genres.join(", "));
    }
    let studios = media.studio_names();
    if !studios.is_empty() {
        let _ = writeln!(out, "Studios: {}", studios.join(", "));
    }

    let description = media.plain_description();
    if !description.is_empty() {
        let _ = writeln!(out, "\n{}", description);
    }

    if !media.characters.edges.is_empty() {
        let _ = writeln!(out, "\nCharacters:");
        for edge in &media.characters.edges {
            let name = edge.node.name.full.as_deref().unwrap_or("Unknown");
            match &edge.role {
                Some(role) => {
                    let _ = writeln!(out, "  {} ({})", name, title_case(role));
                }
                None => {
                    let _ = writeln!(out, "  {}", name);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anilist::types::{MediaTitle, PageInfo};

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["aniview"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_open() {
        let cli = Cli::try_parse_from(["aniview", "open", "/anime/21"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(command.route(), Some(Route::Anime(21)));

        let cli = Cli::try_parse_from(["aniview", "open"]).unwrap();
        assert_eq!(cli.command.unwrap().route(), Some(Route::Home));
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["aniview", "search", "naruto", "shippuden", "-p", "2"]).unwrap();
        match cli.command.unwrap() {
            Command::Search { query, page } => {
                assert_eq!(query.join(" "), "naruto shippuden");
                assert_eq!(page, 2);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_page_zero_rejected() {
        assert!(Cli::try_parse_from(["aniview", "genre", "Action", "--page", "0"]).is_err());
    }

    #[test]
    fn test_parse_show() {
        match Cli::try_parse_from(["aniview", "show", "16498"]).unwrap().command {
            Some(Command::Show { id }) => assert_eq!(id, 16498),
            other => panic!("Expected Show command, got {:?}", other),
        }
        assert!(Cli::try_parse_from(["aniview", "show", "abc"]).is_err());
    }

    #[test]
    fn test_format_page() {
        let page = MediaPage {
            page_info: Some(PageInfo {
                current_page: 2,
                last_page: 5,
            }),
            media: vec![MediaSummary {
                id: 20,
                title: MediaTitle {
                    romaji: Some("NARUTO".into()),
                    english: Some("Naruto".into()),
                    native: None,
                },
                cover_image: Default::default(),
                average_score: Some(79),
            }],
        };
        let out = format_page(
            &ListingKind::Search {
                query: "naruto".into(),
            },
            &page,
        );
        assert_eq!(out, "Results for \"naruto\"\npage 2 / 5\n  Naruto [20] 79%\n");
    }

    #[test]
    fn test_format_empty_genre_page() {
        let page = MediaPage {
            page_info: Some(PageInfo {
                current_page: 1,
                last_page: 0,
            }),
            media: Vec::new(),
        };
        let out = format_page(&ListingKind::Genre { genre: "Mecha".into() }, &page);
        assert_eq!(out, "Mecha anime\npage 1 / 1\nNo results found.\n");
    }

    #[test]
    fn test_format_detail() {
        let media: MediaDetail = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": { "romaji": "Cowboy Bebop", "english": "Cowboy Bebop", "native": "カウボーイビバップ" },
            "description": "Bounty hunters<br>in space.",
            "episodes": 26,
            "averageScore": 86,
            "genres": ["Action", "Sci-Fi"],
            "status": "FINISHED",
            "season": "SPRING",
            "seasonYear": 1998,
            "duration": 24,
            "studios": { "nodes": [{ "name": "Sunrise" }] },
            "characters": { "edges": [
                { "role": "MAIN", "node": { "id": 1, "name": { "full": "Spike Spiegel" }, "image": {} } }
            ] }
        }))
        .unwrap();
        let out = format_detail(&media);
        assert!(out.starts_with("Cowboy Bebop [1]\nカウボーイビバップ\n"));
        assert!(out.contains("Score 86% · 26 episodes · 24 min · Finished · Spring 1998\n"));
        assert!(out.contains("Genres: Action, Sci-Fi\n"));
        assert!(out.contains("Studios: Sunrise\n"));
        assert!(out.contains("\nBounty hunters\nin space.\n"));
        assert!(out.contains("  Spike Spiegel (Main)\n"));
    }
}
