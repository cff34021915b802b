/// Triptych export: save dialog, then compose, encode and write in the background
use log::info;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::compose::{self, Frame};
use crate::error::ExportError;

/// Filename suggested by the save dialog
pub const DEFAULT_EXPORT_NAME: &str = "Triptych.png";

/// Show the native save dialog. `None` when the user cancels.
pub fn choose_export_path() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Export Triptych")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("PNG image", &["png"]);
    if let Some(dir) = dirs::picture_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.save_file().map(with_png_extension)
}

/// Some platforms hand back the bare name the user typed
fn with_png_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("png");
    }
    path
}

/// Compose `frame` and write it to `path` as PNG without blocking the UI
pub async fn export_triptych(frame: Frame, path: PathBuf) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || export_blocking(&frame, &path).map(|()| path))
        .await
        .map_err(|e| ExportError::Task(e.to_string()))?
}

/// Blocking implementation of the export
pub fn export_blocking(frame: &Frame, path: &Path) -> Result<(), ExportError> {
    let canvas = compose::compose(frame)?;
    info!("Export canvas size: {} x {}", canvas.width(), canvas.height());

    let png = compose::encode_png(&canvas)?;
    std::fs::write(path, &png).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Triptych exported to {} ({} KB)", path.display(), png.len() / 1024);
    Ok(())
}
