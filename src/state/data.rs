/// Image data held by a slot
///
/// A `SlotImage` is cheap to clone: the decoded pixels and the preview
/// texture handle are shared, so moving an image between slots or
/// snapshotting the slots for export never copies pixel data.
use iced::widget::image::Handle;
use image::DynamicImage;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Longest edge of the texture uploaded for the on-screen preview
const PREVIEW_MAX_EDGE: u32 = 1024;

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// A decoded image placed (or about to be placed) in a slot
#[derive(Debug, Clone)]
pub struct SlotImage {
    /// Process-unique identity, used for equality
    id: u64,
    /// Display name, usually the source filename
    name: String,
    /// Full-resolution pixels used by the compositor
    pixels: Arc<DynamicImage>,
    /// Downscaled texture for the preview canvas
    preview: Handle,
}

impl SlotImage {
    /// Wrap decoded pixels and build the preview texture.
    ///
    /// Callers must not pass a zero-sized image; the loader rejects those.
    pub fn new(name: impl Into<String>, pixels: DynamicImage) -> Self {
        let preview = if pixels.width() > PREVIEW_MAX_EDGE || pixels.height() > PREVIEW_MAX_EDGE {
            pixels.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE).to_rgba8()
        } else {
            pixels.to_rgba8()
        };
        let preview = Handle::from_rgba(preview.width(), preview.height(), preview.into_raw());

        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            pixels: Arc::new(pixels),
            preview,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    pub fn preview(&self) -> &Handle {
        &self.preview
    }
}

impl PartialEq for SlotImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SlotImage {}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_clone_shares_identity() {
        let img = SlotImage::new("a.png", DynamicImage::ImageRgba8(RgbaImage::new(4, 3)));
        let copy = img.clone();

        assert_eq!(img, copy);
        assert_eq!(copy.width(), 4);
        assert_eq!(copy.height(), 3);
    }

    #[test]
    fn test_distinct_images_differ() {
        let a = SlotImage::new("a.png", DynamicImage::ImageRgba8(RgbaImage::new(2, 2)));
        let b = SlotImage::new("a.png", DynamicImage::ImageRgba8(RgbaImage::new(2, 2)));

        assert_ne!(a, b);
    }
}
