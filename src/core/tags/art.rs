use std::path::Path;

use id3::Tag;
use id3::frame::PictureType;

use super::super::error::TagError;
use super::super::types::Picture;

/// Front cover if tagged as such, else the first embedded picture (APIC/PIC).
pub(crate) fn front_cover(tag: &Tag) -> Option<Picture> {
    let p = tag
        .pictures()
        .find(|p| p.picture_type == PictureType::CoverFront)
        .or_else(|| tag.pictures().next())?;

    Some(Picture {
        data: p.data.clone(),
        mime: p.mime_type.clone(),
    })
}

/// Extensions offered by the art picker.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Guess an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Read an image file picked as album art. Blocking.
pub fn load_picture(path: &Path) -> Result<Picture, TagError> {
    let mime = mime_for_path(path)
        .ok_or_else(|| TagError::UnsupportedImage(path.display().to_string()))?;
    let data = std::fs::read(path)?;

    Ok(Picture {
        data,
        mime: mime.to_string(),
    })
}
