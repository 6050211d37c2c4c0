//! One card per uploaded file: art, transport, tag form, "Save to Local".

use iced::widget::{Column, button, column, container, progress_bar, row, slider, text};
use iced::{Alignment, Length};

use super::super::state::{Message, Raamp3};
use super::super::util::fmt_ms;
use super::constants::{CARD_TITLE_TEXT, COVER, SMALL_TEXT};
use super::widgets::{cover_thumb, field_row};
use crate::core::export::SaveState;
use crate::core::types::{FileId, TagField, UploadedFile};

pub(crate) fn file_card<'a>(
    state: &'a Raamp3,
    file: &'a UploadedFile,
) -> iced::widget::Container<'a, Message> {
    let id = file.id;
    let metadata = state.session.metadata(id);
    let has_art = metadata.is_some_and(|m| m.picture.is_some());

    // Left: art + art buttons
    let art = column![
        cover_thumb(state.covers.get(&id), COVER),
        row![
            button(text("Upload art").size(SMALL_TEXT)).on_press(Message::PickArt(id)),
            button(text("Remove").size(SMALL_TEXT))
                .on_press_maybe(has_art.then_some(Message::ClearArt(id))),
        ]
        .spacing(6),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    // Right: tag form (editable even while extraction is pending)
    let mut form: Column<'a, Message> = column![].spacing(6);
    if !state.session.is_resolved(id) {
        form = form.push(text("Reading tags…").size(SMALL_TEXT));
    }
    for field in TagField::ALL {
        let value = metadata.map(|m| m.field(field)).unwrap_or("");
        form = form.push(field_row(field.label(), value, move |s| {
            Message::FieldChanged(id, field, s)
        }));
    }

    let body = row![art, form.width(Length::Fill)]
        .spacing(16)
        .align_y(Alignment::Start);

    let content = column![
        text(&file.name).size(CARD_TITLE_TEXT),
        body,
        transport(state, id),
        save_row(state.save_state(id), id),
    ]
    .spacing(12);

    container(content)
        .style(container::bordered_box)
        .padding(14)
        .width(Length::Fill)
}

fn transport(state: &Raamp3, id: FileId) -> iced::widget::Row<'_, Message> {
    let current = state.now_playing == Some(id);
    let play_label = if current && state.is_playing {
        "Pause"
    } else {
        "Play"
    };

    let mut bar = row![
        button(play_label).on_press(Message::PlayPause(id)),
        button("Stop").on_press_maybe(current.then_some(Message::Stop)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    if !current {
        return bar;
    }

    let pos = state.position_ms;
    let time = match state.duration_ms {
        Some(dur) if dur > 0 => {
            let ratio = (pos.min(dur) as f32 / dur as f32).clamp(0.0, 1.0);
            bar = bar.push(
                slider(0.0..=1.0, ratio, Message::SeekTo)
                    .step(0.001)
                    .on_release(Message::SeekCommit)
                    .width(Length::Fill),
            );
            format!("{} / {}", fmt_ms(pos), fmt_ms(dur))
        }
        _ => format!("{} / -:--", fmt_ms(pos)),
    };

    bar.push(text(time).size(SMALL_TEXT))
}

fn save_row(save: SaveState, id: FileId) -> Column<'static, Message> {
    match save {
        SaveState::Saving { progress } => column![
            button(text(format!("Saving... {progress}%"))),
            progress_bar(0.0..=100.0, f32::from(progress)),
        ]
        .spacing(6),
        SaveState::Idle => column![button("Save to Local").on_press(Message::SaveToLocal(id))],
    }
}
