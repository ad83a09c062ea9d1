//! Core application state and Iced Application implementation
//!
//! One view is alive at a time. Navigating replaces it, drops loaded cover
//! art and issues the new view's fetches.

use std::collections::HashMap;

use iced::keyboard::{self, Key};
use iced::task;
use iced::widget::{
    button, column, container, image, pick_list, row, scrollable, text, Column, Row, Space,
};
use iced::{
    Alignment, Background, Border, Color, ContentFit, Element, Event, Length, Padding,
    Subscription, Task, Theme,
};

use crate::anilist::{AniListClient, MediaDetail, MediaPage, MediaSummary};
use crate::config::Settings;
use crate::router::Route;
use crate::search::{Debouncer, Ticket};
use crate::ui::theme::{genre_theme, hex_color, DarkTheme, GENRE_NAMES};
use crate::ui::{card, pagination, search_bar};
use crate::views::detail::fetch_detail;
use crate::views::home::{fetch_row, rank_badge};
use crate::views::{
    DetailState, DetailView, FetchRequest, HomeView, ListingKind, ListingState, ListingView,
};

// ============================================================================
// Application State
// ============================================================================

/// The view currently on screen
#[derive(Debug)]
pub enum Page {
    Home(HomeView),
    Listing(ListingView),
    Detail(DetailView),
    NotFound(String),
}

pub struct AniView {
    settings: Settings,
    client: AniListClient,
    route: Route,
    page: Page,
    search_text: String,
    debouncer: Debouncer,
    pending_search: Option<task::Handle>,
    /// Decoded cover and banner art for the current view, keyed by URL
    covers: HashMap<String, image::Handle>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    SearchChanged(String),
    SearchCleared,
    SearchSettled(Ticket),
    GoToPage(u32),
    ListingLoaded(u64, Result<MediaPage, String>),
    HomeRowLoaded(usize, Result<Vec<MediaSummary>, String>),
    DetailLoaded(u32, Result<Option<MediaDetail>, String>),
    CoverLoaded(String, Result<Vec<u8>, String>),
    IcedEvent(Event),
}

impl AniView {
    pub fn new(settings: Settings, route: Route) -> (Self, Task<Message>) {
        let client = AniListClient::new(&settings.endpoint);
        let debouncer = Debouncer::new(settings.debounce());
        let mut app = Self {
            settings,
            client,
            route: Route::Home,
            page: Page::Home(HomeView::new(0)),
            search_text: String::new(),
            debouncer,
            pending_search: None,
            covers: HashMap::new(),
        };
        let task = app.open(route);
        (app, task)
    }

    pub fn title(&self) -> String {
        let view = match &self.page {
            Page::Home(_) => "Home".to_string(),
            Page::Listing(listing) => listing.heading(),
            Page::Detail(detail) => detail
                .media()
                .map(|m| m.title.display().to_string())
                .unwrap_or_else(|| format!("Anime {}", detail.id())),
            Page::NotFound(_) => "Not Found".to_string(),
        };
        format!("AniView · {}", view)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.open(route),

            Message::SearchChanged(text) => self.debounce(text),

            Message::SearchCleared => self.debounce(String::new()),

            Message::SearchSettled(ticket) => {
                let Some(query) = self.debouncer.settle(ticket) else {
                    return Task::none();
                };
                self.pending_search = None;
                match &mut self.page {
                    Page::Listing(listing) => match listing.set_query(&query) {
                        Some(request) => self.fetch_listing(request),
                        None => Task::none(),
                    },
                    _ => Task::none(),
                }
            }

            Message::GoToPage(page) => match &mut self.page {
                Page::Listing(listing) => match listing.go_to(page) {
                    Some(request) => self.fetch_listing(request),
                    None => Task::none(),
                },
                _ => Task::none(),
            },

            Message::ListingLoaded(seq, result) => {
                let Page::Listing(listing) = &mut self.page else {
                    tracing::debug!("Listing response arrived after navigation");
                    return Task::none();
                };
                if !listing.apply(seq, result) {
                    return Task::none();
                }
                self.refresh_covers()
            }

            Message::HomeRowLoaded(index, result) => {
                let Page::Home(home) = &mut self.page else {
                    return Task::none();
                };
                home.apply(index, result);
                self.refresh_covers()
            }

            Message::DetailLoaded(id, result) => {
                let Page::Detail(detail) = &mut self.page else {
                    return Task::none();
                };
                detail.apply(id, result);
                self.refresh_covers()
            }

            Message::CoverLoaded(url, result) => {
                if !self.cover_urls().contains(&url) {
                    tracing::debug!("Dropping cover {} the current view does not show", url);
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        self.covers.insert(url, image::Handle::from_bytes(bytes));
                    }
                    Err(e) => tracing::warn!("Cover {} failed: {}", url, e),
                }
                Task::none()
            }

            Message::IcedEvent(event) => {
                if let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event {
                    match key {
                        Key::Named(keyboard::key::Named::Escape) => {
                            if self.route != Route::Home {
                                return self.update(Message::Navigate(Route::Home));
                            }
                        }
                        Key::Named(keyboard::key::Named::ArrowLeft) => {
                            if let Page::Listing(listing) = &self.page {
                                if let Some(page) = listing.paginator().previous() {
                                    return self.update(Message::GoToPage(page));
                                }
                            }
                        }
                        Key::Named(keyboard::key::Named::ArrowRight) => {
                            if let Page::Listing(listing) = &self.page {
                                if let Some(page) = listing.paginator().next() {
                                    return self.update(Message::GoToPage(page));
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match &self.page {
            Page::Home(home) => self.view_home(home),
            Page::Listing(listing) => self.view_listing(listing),
            Page::Detail(detail) => self.view_detail(detail),
            Page::NotFound(path) => view_not_found(path),
        };

        let content = column![
            self.view_navbar(),
            scrollable(container(body).padding(Padding::from([16.0, 24.0])).width(Length::Fill))
                .height(Length::Fill)
        ];

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::BACKGROUND)),
                ..Default::default()
            })
            .into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen().map(Message::IcedEvent)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // ========================================================================
    // Navigation and fetching
    // ========================================================================

    fn open(&mut self, route: Route) -> Task<Message> {
        tracing::info!("Navigating to {}", route);
        self.covers.clear();
        self.search_text.clear();
        self.debouncer.cancel();
        if let Some(handle) = self.pending_search.take() {
            handle.abort();
        }
        self.route = route.clone();

        match route {
            Route::Home => {
                let home = HomeView::new(self.settings.home_row_size);
                let tasks: Vec<Task<Message>> = home
                    .requests()
                    .into_iter()
                    .map(|(index, filter, size)| {
                        Task::perform(
                            fetch_row(self.client.clone(), index, filter, size),
                            |(index, result)| Message::HomeRowLoaded(index, result),
                        )
                    })
                    .collect();
                self.page = Page::Home(home);
                Task::batch(tasks)
            }
            Route::AllAnime => {
                let mut listing = ListingView::search("", self.settings.search_per_page);
                let request = listing.start();
                self.page = Page::Listing(listing);
                self.fetch_listing(request)
            }
            Route::Genre(genre) => {
                let mut listing = ListingView::genre(genre, self.settings.genre_per_page);
                let request = listing.start();
                self.page = Page::Listing(listing);
                self.fetch_listing(request)
            }
            Route::Anime(id) => {
                self.page = Page::Detail(DetailView::new(id));
                Task::perform(fetch_detail(self.client.clone(), id), |(id, result)| {
                    Message::DetailLoaded(id, result)
                })
            }
            Route::NotFound(path) => {
                tracing::warn!("No view for {}", path);
                self.page = Page::NotFound(path);
                Task::none()
            }
        }
    }

    /// Restart the quiet period; the previous timer is aborted
    fn debounce(&mut self, text: String) -> Task<Message> {
        let ticket = self.queue_search(text);
        if let Some(handle) = self.pending_search.take() {
            handle.abort();
        }
        let (task, handle) = Task::perform(ticket.elapsed(), Message::SearchSettled).abortable();
        self.pending_search = Some(handle);
        task
    }

    fn fetch_listing(&self, request: FetchRequest) -> Task<Message> {
        Task::perform(request.run(self.client.clone()), |(seq, result)| {
            Message::ListingLoaded(seq, result)
        })
    }

    fn queue_search(&mut self, text: String) -> Ticket {
        self.search_text = text.clone();
        let ticket = self.debouncer.push(text);
        tracing::trace!("Search input {:?}", ticket.text());
        ticket
    }

    /// Every image URL the current view can display, sorted and deduplicated
    fn cover_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = match &self.page {
            Page::Home(home) => home
                .rows()
                .iter()
                .flat_map(|row| row.items.iter().flatten())
                .filter_map(|m| m.cover_url().map(str::to_string))
                .collect(),
            Page::Listing(listing) => listing
                .results()
                .iter()
                .filter_map(|m| m.cover_url().map(str::to_string))
                .collect(),
            Page::Detail(detail) => detail
                .media()
                .map(|m| {
                    let mut urls: Vec<String> =
                        m.backdrop_url().into_iter().map(str::to_string).collect();
                    urls.extend(m.cover_image.extra_large.clone());
                    urls.extend(
                        m.characters
                            .edges
                            .iter()
                            .filter_map(|e| e.node.image.medium.clone()),
                    );
                    urls
                })
                .unwrap_or_default(),
            Page::NotFound(_) => Vec::new(),
        };
        urls.sort();
        urls.dedup();
        urls
    }

    /// Forget art the view no longer shows and fetch what it is missing
    fn refresh_covers(&mut self) -> Task<Message> {
        let urls = self.cover_urls();
        self.covers.retain(|url, _| urls.binary_search(url).is_ok());
        self.fetch_covers(urls)
    }

    fn fetch_covers(&self, urls: Vec<String>) -> Task<Message> {
        let tasks: Vec<Task<Message>> = urls
            .into_iter()
            .filter(|url| !self.covers.contains_key(url))
            .map(|url| {
                let client = self.client.clone();
                Task::perform(
                    async move {
                        let result = client.image_bytes(&url).await.map_err(|e| e.to_string());
                        (url, result)
                    },
                    |(url, result)| Message::CoverLoaded(url, result),
                )
            })
            .collect();
        Task::batch(tasks)
    }

    // ========================================================================
    // Views
    // ========================================================================

    fn view_navbar(&self) -> Element<'_, Message> {
        let link = |label: &'static str, route: Route| {
            let active = self.route == route;
            button(text(label).size(15))
                .on_press(Message::Navigate(route))
                .style(if active { button::primary } else { button::text })
        };

        let selected_genre = match &self.route {
            Route::Genre(genre) => GENRE_NAMES.iter().copied().find(|g| g == genre),
            _ => None,
        };

        let bar = row![
            text("AniView").size(22).color(DarkTheme::PRIMARY),
            Space::with_width(24),
            link("Home", Route::Home),
            link("All Anime", Route::AllAnime),
            Space::with_width(Length::Fill),
            pick_list(GENRE_NAMES, selected_genre, |genre: &str| {
                Message::Navigate(Route::Genre(genre.to_string()))
            })
            .placeholder("Genres")
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        container(bar)
            .padding(Padding::from([12.0, 24.0]))
            .width(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::SURFACE)),
                border: Border {
                    color: DarkTheme::BORDER,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    fn card<'a>(&'a self, item: &'a MediaSummary, rank: Option<usize>, accent: Color) -> Element<'a, Message> {
        let cover = item.cover_url().and_then(|url| self.covers.get(url));
        card::view(item, cover, rank, accent)
    }

    fn view_home<'a>(&'a self, home: &'a HomeView) -> Element<'a, Message> {
        let mut sections = Column::new().spacing(28);

        if home.is_loading() {
            sections = sections.push(text("Loading…").size(18).color(DarkTheme::TEXT_MUTED));
        }

        for row_state in home.rows() {
            let spec = row_state.spec;
            let header = text(format!("{}  {}", spec.icon, spec.label))
                .size(22)
                .color(DarkTheme::TEXT);

            let accent = spec
                .filter
                .genres
                .first()
                .map(|g| genre_theme(g).accent)
                .unwrap_or(DarkTheme::PRIMARY);

            let items: Element<'a, Message> = match &row_state.items {
                None => text("Loading…").color(DarkTheme::TEXT_MUTED).into(),
                Some(items) if items.is_empty() => {
                    text("Nothing to show right now.").color(DarkTheme::TEXT_MUTED).into()
                }
                Some(items) => {
                    let cards = items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| self.card(item, rank_badge(i), accent));
                    scrollable(Row::with_children(cards).spacing(12))
                        .direction(scrollable::Direction::Horizontal(
                            scrollable::Scrollbar::new(),
                        ))
                        .into()
                }
            };

            sections = sections.push(column![header, items].spacing(12));
        }

        sections.into()
    }

    fn view_listing<'a>(&'a self, listing: &'a ListingView) -> Element<'a, Message> {
        let mut content = Column::new().spacing(20).width(Length::Fill);

        let accent = match listing.kind() {
            ListingKind::Search { .. } => {
                content = content.push(
                    container(search_bar::view(
                        &self.search_text,
                        Message::SearchChanged,
                        Message::SearchCleared,
                    ))
                    .center_x(Length::Fill),
                );
                content = content.push(
                    container(text(listing.heading()).size(28).color(DarkTheme::TEXT))
                        .center_x(Length::Fill),
                );
                DarkTheme::PRIMARY
            }
            ListingKind::Genre { genre } => {
                let theme = genre_theme(genre);
                let count = listing.results().len();
                content = content.push(
                    button(text("← Back to Home").size(14))
                        .on_press(Message::Navigate(Route::Home))
                        .style(button::secondary),
                );
                content = content.push(
                    row![
                        text(theme.icon).size(40),
                        column![
                            text(genre.as_str()).size(36).color(theme.accent),
                            text(format!("{} popular anime in this genre", count))
                                .size(16)
                                .color(DarkTheme::TEXT_MUTED),
                        ]
                        .spacing(4)
                    ]
                    .spacing(16)
                    .align_y(Alignment::Center),
                );
                theme.accent
            }
        };

        match listing.state() {
            ListingState::Loading => {
                let label = match listing.kind() {
                    ListingKind::Genre { genre } => format!("Loading {} anime…", genre),
                    ListingKind::Search { .. } => "Loading…".to_string(),
                };
                content = content.push(
                    container(text(label).size(18).color(DarkTheme::TEXT_MUTED))
                        .center_x(Length::Fill),
                );
            }
            ListingState::Empty => {
                let label = match listing.kind() {
                    ListingKind::Genre { genre } => format!("No {} anime found", genre),
                    ListingKind::Search { .. } => "No results found.".to_string(),
                };
                content = content.push(
                    container(text(label).size(18).color(DarkTheme::TEXT_MUTED))
                        .center_x(Length::Fill),
                );
            }
            ListingState::Loaded => {
                let cards = listing
                    .results()
                    .iter()
                    .map(|item| self.card(item, None, accent));
                content = content.push(Row::with_children(cards).spacing(16).wrap());
                if listing.paginator().has_pages() {
                    content = content.push(pagination::view(listing.paginator()));
                }
            }
        }

        content.into()
    }

    fn view_detail<'a>(&'a self, detail: &'a DetailView) -> Element<'a, Message> {
        let notice = |label: &'static str| -> Element<'a, Message> {
            container(text(label).size(18).color(DarkTheme::TEXT_MUTED))
                .center_x(Length::Fill)
                .padding(40)
                .into()
        };

        let media = match detail.state() {
            DetailState::Loading => return notice("Loading…"),
            DetailState::NotFound => return notice("Anime not found."),
            DetailState::Failed => return notice("Could not load this title."),
            DetailState::Loaded(media) => media.as_ref(),
        };

        let mut content = Column::new().spacing(20).width(Length::Fill);

        if let Some(backdrop) = media.backdrop_url().and_then(|url| self.covers.get(url)) {
            content = content.push(
                image(backdrop.clone())
                    .width(Length::Fill)
                    .height(220)
                    .content_fit(ContentFit::Cover),
            );
        }

        let cover: Element<'a, Message> = match media
            .cover_image
            .extra_large
            .as_deref()
            .and_then(|url| self.covers.get(url))
        {
            Some(handle) => image(handle.clone()).width(230).into(),
            None => Space::new(230, 325).into(),
        };

        let mut facts = Column::new().spacing(6);
        let title_color = media
            .cover_image
            .color
            .as_deref()
            .and_then(hex_color)
            .unwrap_or(DarkTheme::TEXT);
        facts = facts.push(text(media.title.display()).size(32).color(title_color));
        if let Some(native) = &media.title.native {
            facts = facts.push(text(native.as_str()).size(16).color(DarkTheme::TEXT_MUTED));
        }

        let mut stats = Vec::new();
        if let Some(score) = media.average_score {
            stats.push(format!("★ {}%", score));
        }
        if let Some(episodes) = media.episodes {
            stats.push(format!("{} episodes", episodes));
        }
        if let Some(duration) = media.duration {
            stats.push(format!("{} min", duration));
        }
        if let Some(status) = &media.status {
            stats.push(crate::anilist::types::title_case(status));
        }
        if let Some(season) = media.season_label() {
            stats.push(season);
        }
        if !stats.is_empty() {
            facts = facts.push(text(stats.join("  ·  ")).size(15).color(DarkTheme::SCORE));
        }

        let genres = media.genres.iter().map(|genre| -> Element<'a, Message> {
            let theme = genre_theme(genre);
            button(text(format!("{} {}", theme.icon, genre)).size(13))
                .on_press(Message::Navigate(Route::Genre(genre.clone())))
                .style(button::secondary)
                .into()
        });
        facts = facts.push(Row::with_children(genres).spacing(8).wrap());

        let studios = media.studio_names();
        if !studios.is_empty() {
            facts = facts.push(
                text(format!("Studios: {}", studios.join(", ")))
                    .size(14)
                    .color(DarkTheme::TEXT_MUTED),
            );
        }

        let description = media.plain_description();
        if !description.is_empty() {
            facts = facts.push(text(description).size(15).color(DarkTheme::TEXT));
        }

        content = content.push(row![cover, facts.width(Length::Fill)].spacing(24));

        if !media.characters.edges.is_empty() {
            let characters = media.characters.edges.iter().map(|edge| -> Element<'a, Message> {
                let portrait: Element<'a, Message> = match edge
                    .node
                    .image
                    .medium
                    .as_deref()
                    .and_then(|url| self.covers.get(url))
                {
                    Some(handle) => image(handle.clone()).width(72).height(100).into(),
                    None => Space::new(72, 100).into(),
                };
                let role = edge
                    .role
                    .as_deref()
                    .map(crate::anilist::types::title_case)
                    .unwrap_or_default();
                column![
                    portrait,
                    text(edge.node.name.full.as_deref().unwrap_or("Unknown"))
                        .size(13)
                        .color(DarkTheme::TEXT),
                    text(role).size(11).color(DarkTheme::TEXT_MUTED),
                ]
                .spacing(4)
                .width(110)
                .into()
            });
            content = content.push(text("Characters").size(22).color(DarkTheme::TEXT));
            content = content.push(Row::with_children(characters).spacing(12).wrap());
        }

        content.into()
    }
}

fn view_not_found(path: &str) -> Element<'_, Message> {
    container(
        column![
            text("404").size(64).color(DarkTheme::PRIMARY),
            text(format!("Nothing lives at {}", path))
                .size(18)
                .color(DarkTheme::TEXT_MUTED),
            button(text("Back to Home"))
                .on_press(Message::Navigate(Route::Home))
                .style(button::primary),
        ]
        .spacing(16)
        .align_x(Alignment::Center),
    )
    .center_x(Length::Fill)
    .padding(60)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anilist::types::{CoverImage, MediaTitle, PageInfo};

    fn app(route: Route) -> AniView {
        let (app, _task) = AniView::new(Settings::default(), route);
        app
    }

    fn media_page(current: u32, last: u32, covers: &[&str]) -> MediaPage {
        MediaPage {
            page_info: Some(PageInfo {
                current_page: current,
                last_page: last,
            }),
            media: covers
                .iter()
                .enumerate()
                .map(|(i, url)| MediaSummary {
                    id: i as u32 + 1,
                    title: MediaTitle {
                        romaji: Some(format!("Title {}", i)),
                        english: None,
                        native: None,
                    },
                    cover_image: CoverImage {
                        large: Some(url.to_string()),
                        ..Default::default()
                    },
                    average_score: None,
                })
                .collect(),
        }
    }

    /// Swap in a listing whose first request is known to the test
    fn with_listing(app: &mut AniView, mut listing: ListingView) -> FetchRequest {
        let request = listing.start();
        app.page = Page::Listing(listing);
        request
    }

    fn listing(app: &AniView) -> &ListingView {
        match &app.page {
            Page::Listing(listing) => listing,
            other => panic!("Expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_opens_requested_route() {
        assert!(matches!(app(Route::Home).page, Page::Home(_)));
        assert!(matches!(app(Route::Anime(5)).page, Page::Detail(ref d) if d.id() == 5));
        assert!(matches!(app(Route::parse("/nope")).page, Page::NotFound(_)));
        match app(Route::Genre("Mecha".into())).page {
            Page::Listing(listing) => {
                assert_eq!(listing.kind(), &ListingKind::Genre { genre: "Mecha".into() });
                assert!(listing.is_loading());
            }
            other => panic!("Expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_late_listing_response_after_navigation_is_ignored() {
        let mut app = app(Route::AllAnime);
        let _ = app.update(Message::Navigate(Route::Anime(1)));
        let _ = app.update(Message::ListingLoaded(1, Ok(MediaPage { page_info: None, media: vec![] })));
        assert!(matches!(app.page, Page::Detail(_)));
    }

    #[test]
    fn test_out_of_range_page_message_keeps_state() {
        let mut app = app(Route::AllAnime);
        let _ = app.update(Message::GoToPage(5));
        match &app.page {
            Page::Listing(listing) => assert_eq!(listing.paginator().current(), 1),
            other => panic!("Expected listing, got {:?}", other),
        }
    }

    #[test]
    fn test_title_follows_view() {
        assert_eq!(app(Route::AllAnime).title(), "AniView · All Anime");
        assert_eq!(app(Route::parse("/x")).title(), "AniView · Not Found");
    }

    #[test]
    fn test_unsettled_search_text_does_not_survive_navigation() {
        let mut app = app(Route::AllAnime);
        let _ = app.update(Message::SearchChanged("naruto".into()));
        let _ = app.update(Message::Navigate(Route::Home));
        let _ = app.update(Message::Navigate(Route::AllAnime));

        assert_eq!(app.search_text, "");
        assert_eq!(listing(&app).kind(), &ListingKind::Search { query: String::new() });
    }

    #[test]
    fn test_ticket_from_before_navigation_is_dropped() {
        let mut app = app(Route::AllAnime);
        let ticket = app.queue_search("bleach".into());
        let _ = app.update(Message::Navigate(Route::AllAnime));
        let _ = app.update(Message::SearchSettled(ticket));

        assert_eq!(listing(&app).kind(), &ListingKind::Search { query: String::new() });
        assert_eq!(listing(&app).heading(), "All Anime");
    }

    #[test]
    fn test_only_latest_keystroke_issues_a_search() {
        let mut app = app(Route::AllAnime);
        let first = with_listing(&mut app, ListingView::search("", 40));
        let _ = app.update(Message::ListingLoaded(first.seq, Ok(media_page(1, 1, &["https://img/1.jpg"]))));
        assert!(!listing(&app).is_loading());

        let _ = app.update(Message::SearchChanged("naru".into()));
        assert_eq!(app.search_text, "naru");
        let stale = app.queue_search("naruto".into());
        let latest = app.queue_search("naruto shippuden".into());

        let _ = app.update(Message::SearchSettled(stale));
        assert_eq!(listing(&app).kind(), &ListingKind::Search { query: String::new() });
        assert!(!listing(&app).is_loading());

        let _ = app.update(Message::SearchSettled(latest));
        assert_eq!(
            listing(&app).kind(),
            &ListingKind::Search { query: "naruto shippuden".into() }
        );
        assert!(listing(&app).is_loading());

        assert_eq!(listing(&app).heading(), "Results for \u{201c}naruto shippuden\u{201d}");
    }

    #[test]
    fn test_cover_for_a_view_left_behind_is_dropped() {
        let mut app = app(Route::AllAnime);
        let _ = app.update(Message::Navigate(Route::Anime(1)));
        let _ = app.update(Message::CoverLoaded("https://old/listing.jpg".into(), Ok(vec![0; 4])));
        assert!(app.covers.is_empty());
    }

    #[test]
    fn test_paging_drops_covers_of_the_previous_page() {
        let mut app = app(Route::AllAnime);
        let first = with_listing(&mut app, ListingView::search("", 40));
        let _ = app.update(Message::ListingLoaded(first.seq, Ok(media_page(1, 2, &["https://img/a.jpg"]))));
        let _ = app.update(Message::CoverLoaded("https://img/a.jpg".into(), Ok(vec![0; 4])));
        assert!(app.covers.contains_key("https://img/a.jpg"));

        let second = match &mut app.page {
            Page::Listing(listing) => listing.go_to(2).expect("page 2 is in range"),
            other => panic!("Expected listing, got {:?}", other),
        };
        let _ = app.update(Message::ListingLoaded(second.seq, Ok(media_page(2, 2, &["https://img/b.jpg"]))));
        assert!(app.covers.is_empty());

        let _ = app.update(Message::CoverLoaded("https://img/a.jpg".into(), Ok(vec![0; 4])));
        let _ = app.update(Message::CoverLoaded("https://img/b.jpg".into(), Ok(vec![0; 4])));
        let urls: Vec<&str> = app.covers.keys().map(String::as_str).collect();
        assert_eq!(urls, vec!["https://img/b.jpg"]);
    }
}
