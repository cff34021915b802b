/// Triptych compositing
///
/// - `layout.rs` - canvas sizing, column geometry and image placement
/// - `flatten.rs` - draws the slot images onto one raster and encodes it

pub mod flatten;
pub mod layout;

pub use flatten::{compose, encode_png, Frame};
pub use layout::{CanvasLayout, Rect};
