//! Search bar widget

use iced::widget::{button, container, row, text, text_input};
use iced::{Alignment, Background, Border, Color, Element, Length, Padding};

use super::theme::DarkTheme;

/// Search bar with a clear button that shows while there is text
pub fn view<'a, Message: Clone + 'a>(
    value: &str,
    on_input: impl Fn(String) -> Message + 'a,
    on_clear: Message,
) -> Element<'a, Message> {
    let input = text_input("Search for anime titles...", value)
        .on_input(on_input)
        .padding(Padding::new(14.0))
        .size(18)
        .style(|_theme, _status| text_input::Style {
            background: Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: DarkTheme::TEXT_MUTED,
            placeholder: DarkTheme::TEXT_PLACEHOLDER,
            value: DarkTheme::TEXT,
            selection: DarkTheme::PRIMARY,
        });

    let mut content = row![text("🔍").size(16).color(DarkTheme::TEXT_MUTED), input]
        .spacing(8)
        .align_y(Alignment::Center);

    if !value.is_empty() {
        content = content.push(
            button(text("✕").size(14).color(DarkTheme::TEXT_MUTED))
                .on_press(on_clear)
                .style(button::text),
        );
    }

    container(content)
        .padding(Padding::from([4.0, 16.0]))
        .width(Length::Fill)
        .max_width(720)
        .style(|_theme| container::Style {
            background: Some(Background::Color(DarkTheme::SURFACE)),
            border: Border {
                color: DarkTheme::BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}
