/// Flattens the three slots into a single raster
use image::{imageops, imageops::FilterType, ImageFormat, Rgba, RgbaImage};
use log::debug;
use std::io::Cursor;

use super::layout::CanvasLayout;
use crate::error::ExportError;
use crate::state::{Settings, SlotImage, SlotPosition, SlotStore};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Largest RGBA canvas we are willing to allocate (1 GiB)
const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Everything the compositor needs, detached from the live store.
///
/// Export runs in the background; capturing a `Frame` first means later
/// edits to the slots cannot change what gets written.
#[derive(Debug, Clone)]
pub struct Frame {
    pub images: [Option<SlotImage>; 3],
    pub settings: Settings,
}

impl Frame {
    /// Snapshot the slots for export. Refuses when every slot is empty.
    pub fn capture(slots: &SlotStore, settings: Settings) -> Result<Self, ExportError> {
        if slots.is_empty() {
            return Err(ExportError::NothingToExport);
        }
        Ok(Self { images: slots.images(), settings })
    }

    pub fn layout(&self) -> Option<CanvasLayout> {
        let heights = self.images.iter().flatten().map(SlotImage::height);
        CanvasLayout::for_export(heights, self.settings.aspect_ratio)
    }
}

/// Draw every present image onto a white canvas sized by [`CanvasLayout::for_export`]
pub fn compose(frame: &Frame) -> Result<RgbaImage, ExportError> {
    let layout = frame.layout().ok_or(ExportError::NothingToExport)?;
    let (width, height) = layout.pixel_size();
    if u64::from(width) * u64::from(height) * 4 > MAX_CANVAS_BYTES {
        return Err(ExportError::CanvasTooLarge { width, height });
    }
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);

    for (slot, image) in SlotPosition::ALL.into_iter().zip(&frame.images) {
        let Some(image) = image else { continue };
        let Some(rect) = layout.place(slot, image.width(), image.height(), frame.settings.scale) else {
            continue;
        };

        let scaled_width = rect.width.round().max(1.0) as u32;
        let scaled_height = rect.height.round().max(1.0) as u32;
        debug!(
            "Placing {} ({}x{}) in {slot} slot at ({:.1}, {:.1}) as {scaled_width}x{scaled_height}",
            image.name(),
            image.width(),
            image.height(),
            rect.x,
            rect.y
        );

        let scaled = image
            .pixels()
            .resize_exact(scaled_width, scaled_height, FilterType::Lanczos3)
            .to_rgba8();
        imageops::overlay(&mut canvas, &scaled, rect.x.round() as i64, rect.y.round() as i64);
    }

    Ok(canvas)
}

/// Encode the canvas as PNG
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
