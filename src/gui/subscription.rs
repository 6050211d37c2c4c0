//! gui/subscription.rs
//! - playback: poll engine events with a periodic TickPlayback
//! - window: files dropped anywhere on the window become uploads

use std::time::Duration;

use iced::{Event, Subscription, event, time, window};

use super::state::{Message, Raamp3};

pub(crate) fn subscription(state: &Raamp3) -> Subscription<Message> {
    let drops = event::listen_with(|event, _status, _id| match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        _ => None,
    });

    if state.playback_events.is_none() {
        return drops;
    }

    Subscription::batch([
        drops,
        time::every(Duration::from_millis(200)).map(|_| Message::TickPlayback),
    ])
}
