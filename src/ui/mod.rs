/// Preview canvas for the triptych (canvas.rs)

pub mod canvas;

pub use canvas::TriptychCanvas;
