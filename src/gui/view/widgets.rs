//! Reusable small widgets/helpers used across view modules.

use iced::widget::{button, column, container, image, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::super::state::Message;
use super::constants::{LABEL_W, SMALL_TEXT};

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("no art").size(SMALL_TEXT)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .style(container::bordered_box)
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
}

/// If `handle` exists, show it; otherwise show the placeholder.
pub(crate) fn cover_thumb(
    handle: Option<&image::Handle>,
    size: f32,
) -> Element<'static, Message> {
    match handle {
        Some(h) => container(image(h.clone()))
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .center_x(Length::Fixed(size))
            .center_y(Length::Fixed(size))
            .into(),
        None => cover_placeholder(size).into(),
    }
}

pub(crate) fn field_row<'a>(
    label: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> iced::widget::Row<'a, Message> {
    row![
        text(label).width(Length::Fixed(LABEL_W)),
        text_input("", value).on_input(on_input).width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}

pub(crate) fn error_banner(message: &str) -> iced::widget::Container<'_, Message> {
    container(
        row![
            text(message).style(text::danger).width(Length::Fill),
            button("Dismiss").on_press(Message::DismissError),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .style(container::bordered_box)
    .padding(10)
    .width(Length::Fill)
}
