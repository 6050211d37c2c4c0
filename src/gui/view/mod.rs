//! GUI renderer (reads state, produces widgets; no mutation).

mod batch;
mod card;
mod constants;
mod upload;
mod widgets;

use iced::widget::{Column, column, container, scrollable, text};
use iced::{Alignment, Length};

use super::state::{Message, Raamp3};
use constants::{CARD_W, TITLE_TEXT};

pub(crate) fn view(state: &Raamp3) -> Column<'_, Message> {
    let header = column![
        text("Raamp3").size(TITLE_TEXT),
        text("WAV to tagged MP3").size(constants::SMALL_TEXT),
    ]
    .spacing(2);

    let mut page = column![header].spacing(12).width(Length::Fixed(CARD_W));

    if let Some(err) = &state.error {
        page = page.push(widgets::error_banner(err));
    }

    page = page.push(upload::upload_zone(state));

    if !state.session.is_empty() {
        page = page.push(batch::batch_bar(state));
        let cards = state
            .session
            .files()
            .iter()
            .fold(Column::new().spacing(12), |col, file| {
                col.push(card::file_card(state, file))
            });
        page = page.push(cards);
    }

    column![
        scrollable(container(page).center_x(Length::Fill).padding(16)).height(Length::Fill),
        container(text(&state.status).size(constants::SMALL_TEXT)).padding([4, 16]),
    ]
    .align_x(Alignment::Start)
}
