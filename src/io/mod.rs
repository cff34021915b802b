/// File import and export
///
/// - `loader.rs` - open dialog, background decode of a picked or dropped file
/// - `export.rs` - save dialog, background compose + encode + write

pub mod export;
pub mod loader;
