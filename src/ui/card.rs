//! Cover card linking to a title's detail page

use iced::widget::{button, column, container, image, text, Space};
use iced::{Background, Border, Color, ContentFit, Element, Length, Padding};

use super::theme::DarkTheme;
use crate::anilist::MediaSummary;
use crate::app::Message;
use crate::router::Route;

const CARD_WIDTH: f32 = 160.0;
const COVER_HEIGHT: f32 = 228.0;

pub fn view<'a>(
    item: &'a MediaSummary,
    cover: Option<&image::Handle>,
    rank: Option<usize>,
    accent: Color,
) -> Element<'a, Message> {
    let cover: Element<'a, Message> = match cover {
        Some(handle) => image(handle.clone())
            .width(CARD_WIDTH)
            .height(COVER_HEIGHT)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(Space::new(CARD_WIDTH, COVER_HEIGHT))
            .style(|_theme| container::Style {
                background: Some(Background::Color(DarkTheme::SURFACE_HIGHLIGHT)),
                border: Border::default().rounded(8),
                ..Default::default()
            })
            .into(),
    };

    let mut caption = column![].spacing(2).width(CARD_WIDTH);
    if let Some(rank) = rank {
        caption = caption.push(text(format!("#{}", rank)).size(12).color(accent));
    }
    caption = caption.push(text(item.title.display()).size(14).color(DarkTheme::TEXT));
    if let Some(score) = item.average_score {
        caption = caption.push(text(format!("★ {}%", score)).size(12).color(DarkTheme::SCORE));
    }

    button(column![cover, caption].spacing(6))
        .on_press(Message::Navigate(Route::Anime(item.id)))
        .padding(Padding::new(6.0))
        .width(Length::Shrink)
        .style(button::text)
        .into()
}
