//! AniView: desktop browser for the AniList anime catalog
//!
//! Usage:
//!   aniview                  - Open the window on the homepage
//!   aniview open [PATH]      - Open the window at a path (/anime/21, /genre/Action)
//!   aniview search [QUERY]   - Print a page of search results
//!   aniview genre NAME       - Print a page of a genre
//!   aniview show ID          - Print one title
//!   aniview home             - Print the homepage rows

mod anilist;
mod app;
mod commands;
mod config;
mod pagination;
mod router;
mod search;
mod ui;
mod views;

use app::AniView;
use clap::Parser;
use commands::{Cli, Command};
use config::Settings;
use iced::{window, Size};
use router::Route;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> iced::Result {
    // Initialize logging (try_init so a second call is harmless)
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        None => start_gui(settings, Route::Home),
        Some(command) => match command.route() {
            Some(route) => start_gui(settings, route),
            None => handle_cli_command(command, settings),
        },
    }
}

fn handle_cli_command(command: Command, settings: Settings) -> iced::Result {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: could not start runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = rt.block_on(commands::run(command, &settings)) {
        tracing::error!("Command failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn start_gui(settings: Settings, route: Route) -> iced::Result {
    tracing::info!("Starting AniView at {} (endpoint {})", route, settings.endpoint);

    let size = Size::new(settings.window_width, settings.window_height);

    iced::application(AniView::title, AniView::update, AniView::view)
        .subscription(AniView::subscription)
        .theme(AniView::theme)
        .window(window::Settings {
            size,
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || AniView::new(settings, route))
}
