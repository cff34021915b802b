/// Triptych geometry shared by the on-screen preview and the export
///
/// The canvas is split into three equal columns separated by
/// [`PANEL_SPACING`]. Each image is fitted to its column (keeping its own
/// aspect ratio), multiplied by the global scale and centered.
use crate::state::{AspectRatio, Scale, SlotPosition};

/// Gap between neighbouring panels, in canvas units
pub const PANEL_SPACING: f64 = 12.0;

/// Exported canvases are never shorter than this
pub const MIN_EXPORT_HEIGHT: u32 = 1200;

/// Preview canvas never grows beyond this box
pub const PREVIEW_MAX_WIDTH: f64 = 800.0;
pub const PREVIEW_MAX_HEIGHT: f64 = 450.0;

/// Smallest preview edge, used when the window is tiny
const PREVIEW_MIN_EDGE: f64 = 60.0;

/// Axis-aligned rectangle in canvas coordinates (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Column geometry for a canvas of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    pub width: f64,
    pub height: f64,
    pub slot_width: f64,
    pub slot_height: f64,
}

impl CanvasLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            slot_width: ((width - 2.0 * PANEL_SPACING) / 3.0).max(0.0),
            slot_height: height,
        }
    }

    /// Layout for the exported raster.
    ///
    /// The height is the tallest image, but at least [`MIN_EXPORT_HEIGHT`];
    /// the width follows from the aspect ratio. Returns `None` when there are
    /// no images at all.
    pub fn for_export<I>(image_heights: I, aspect_ratio: AspectRatio) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let tallest = image_heights.into_iter().max()?;
        let height = tallest.max(MIN_EXPORT_HEIGHT);
        let width = (f64::from(height) * aspect_ratio.ratio()).round();
        Some(Self::new(width, f64::from(height)))
    }

    /// Pixel dimensions of the raster this layout describes
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width.round().max(1.0) as u32, self.height.round().max(1.0) as u32)
    }

    pub fn slot_rect(&self, slot: SlotPosition) -> Rect {
        Rect {
            x: slot.index() as f64 * (self.slot_width + PANEL_SPACING),
            y: 0.0,
            width: self.slot_width,
            height: self.slot_height,
        }
    }

    /// Slot under a canvas point; `None` in the gaps and outside the canvas
    pub fn slot_at(&self, x: f64, y: f64) -> Option<SlotPosition> {
        SlotPosition::ALL
            .into_iter()
            .find(|slot| self.slot_rect(*slot).contains(x, y))
    }

    /// Where an image of `image_width` x `image_height` lands inside `slot`.
    ///
    /// The result may overflow the slot when `scale` is above 1.0. Returns
    /// `None` for degenerate images or a degenerate canvas.
    pub fn place(&self, slot: SlotPosition, image_width: u32, image_height: u32, scale: Scale) -> Option<Rect> {
        if image_width == 0 || image_height == 0 || self.slot_width <= 0.0 || self.slot_height <= 0.0 {
            return None;
        }

        let image_ratio = f64::from(image_width) / f64::from(image_height);
        let slot_ratio = self.slot_width / self.slot_height;

        let (width, height) = if image_ratio > slot_ratio {
            let width = self.slot_width * scale.get();
            (width, width / image_ratio)
        } else {
            let height = self.slot_height * scale.get();
            (height * image_ratio, height)
        };

        let column = self.slot_rect(slot);
        Some(Rect {
            x: column.x + (column.width - width) / 2.0,
            y: column.y + (column.height - height) / 2.0,
            width,
            height,
        })
    }
}

/// Size of the on-screen canvas for the available space.
///
/// The box is capped at [`PREVIEW_MAX_WIDTH`] x [`PREVIEW_MAX_HEIGHT`]; the
/// canvas fills its width when the ratio is wider than the box, otherwise its
/// height.
pub fn preview_size(available_width: f64, available_height: f64, aspect_ratio: AspectRatio) -> (f64, f64) {
    let max_width = available_width.min(PREVIEW_MAX_WIDTH).max(PREVIEW_MIN_EDGE);
    let max_height = available_height.min(PREVIEW_MAX_HEIGHT).max(PREVIEW_MIN_EDGE);
    let ratio = aspect_ratio.ratio();

    if ratio > max_width / max_height {
        (max_width, max_width / ratio)
    } else {
        (max_height * ratio, max_height)
    }
}
