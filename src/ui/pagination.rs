//! Page-number control

use iced::widget::{button, container, text, Row};
use iced::{Alignment, Element, Length};

use super::theme::DarkTheme;
use crate::app::Message;
use crate::pagination::{PageSlot, Paginator};

pub fn view<'a>(paginator: &Paginator) -> Element<'a, Message> {
    let mut controls = Row::new().spacing(6).align_y(Alignment::Center);

    controls = controls.push(
        button(text("← Prev").size(14))
            .on_press_maybe(paginator.previous().map(Message::GoToPage))
            .style(button::secondary),
    );

    for slot in paginator.window() {
        let item: Element<'a, Message> = match slot {
            PageSlot::Gap => text("⋯").size(14).color(DarkTheme::TEXT_MUTED).into(),
            PageSlot::Page(page) => {
                let style = if page == paginator.current() {
                    button::primary
                } else {
                    button::secondary
                };
                button(text(page.to_string()).size(14))
                    .on_press(Message::GoToPage(page))
                    .style(style)
                    .into()
            }
        };
        controls = controls.push(item);
    }

    controls = controls.push(
        button(text("Next →").size(14))
            .on_press_maybe(paginator.next().map(Message::GoToPage))
            .style(button::secondary),
    );

    container(controls).center_x(Length::Fill).padding(16).into()
}
