//! Batch bar: "Export All (N) as .zip" + progress + volume.

use iced::widget::{button, column, container, progress_bar, row, slider, text};
use iced::{Alignment, Length};

use super::super::state::{Message, Raamp3};
use super::constants::{SMALL_TEXT, VOLUME_W};
use crate::core::export::BatchState;

pub(crate) fn batch_bar(state: &Raamp3) -> iced::widget::Column<'_, Message> {
    let count = state.session.len();

    let (label, pct) = match state.batch {
        BatchState::Converting {
            current,
            total,
            progress,
        } => (
            format!("Converting {} of {total}... {progress}%", current.max(1)),
            Some(progress),
        ),
        BatchState::Idle => (format!("Export All ({count}) as .zip"), None),
    };

    let export = button(text(label))
        .on_press_maybe((count > 0 && !state.batch.is_busy()).then_some(Message::ExportAll));

    let volume = row![
        text("Vol").size(SMALL_TEXT),
        slider(0.0..=1.0, state.volume, Message::SetVolume)
            .step(0.01)
            .width(Length::Fixed(VOLUME_W)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut bar = column![
        row![export, container(volume).align_right(Length::Fill)]
            .spacing(12)
            .align_y(Alignment::Center)
    ]
    .spacing(6);

    if let Some(p) = pct {
        bar = bar.push(progress_bar(0.0..=100.0, f32::from(p)));
    }
    bar
}
