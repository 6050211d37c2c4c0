//! View constants (layout/sizing).

pub(crate) const CARD_W: f32 = 760.0;
pub(crate) const COVER: f32 = 140.0;
pub(crate) const LABEL_W: f32 = 90.0;

pub(crate) const TITLE_TEXT: f32 = 22.0;
pub(crate) const CARD_TITLE_TEXT: f32 = 16.0;
pub(crate) const SMALL_TEXT: f32 = 12.0;

pub(crate) const VOLUME_W: f32 = 140.0;
