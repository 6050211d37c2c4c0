//! Upload zone: drop hint, typed path, browse button.

use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Length};

use super::super::state::{Message, Raamp3};
use super::constants::SMALL_TEXT;

pub(crate) fn upload_zone(state: &Raamp3) -> iced::widget::Container<'_, Message> {
    let hint = if state.session.is_empty() {
        "Drop .wav files or folders anywhere on this window"
    } else {
        "Drop more .wav files to add them"
    };

    let input = text_input("...or type a file or folder path", &state.path_input)
        .on_input(Message::PathInputChanged)
        .on_submit(Message::AddTypedPath)
        .width(Length::Fill);

    let mut zone = column![
        text(hint),
        row![
            input,
            button("Add").on_press(Message::AddTypedPath),
            button("Browse...").on_press(Message::BrowsePressed),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(10);

    if state.uploads.pending() > 0 {
        zone = zone.push(text("Reading files...").size(SMALL_TEXT));
    }

    container(zone)
        .style(container::bordered_box)
        .padding(16)
        .width(Length::Fill)
}
