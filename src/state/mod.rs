/// State management module
///
/// This module holds everything the view is derived from:
/// - Slot contents and drag-and-drop resolution (slots.rs)
/// - Loaded image data shared between slots, preview and export (data.rs)
/// - Canvas aspect ratio and image scale (settings.rs)

pub mod data;
pub mod settings;
pub mod slots;

pub use data::SlotImage;
pub use settings::{AspectRatio, Scale, Settings};
pub use slots::{DragSession, DropOutcome, SlotPosition, SlotStore};
