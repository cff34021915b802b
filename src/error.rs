/// Error types for image import and triptych export
use std::path::PathBuf;
use thiserror::Error;

/// Failure to bring an image into a slot.
///
/// These never reach the user as a dialog: the import is dropped and the
/// slot keeps whatever it held before.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} decoded to an empty image")]
    EmptyImage { path: PathBuf },

    #[error("background task failed: {0}")]
    Task(String),
}

/// Failure to produce or write the flattened triptych.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: all slots are empty")]
    NothingToExport,

    #[error("canvas of {width}x{height} pixels is too large to export")]
    CanvasTooLarge { width: u32, height: u32 },

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background task failed: {0}")]
    Task(String),
}
