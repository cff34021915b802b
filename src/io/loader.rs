/// Image import
///
/// Decoding runs on tokio's blocking pool so large photos don't stall the UI.
/// Failures are returned to the caller, which logs them and leaves the slot
/// as it was.
use log::debug;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use tokio::task;

use crate::error::LoadError;
use crate::state::SlotImage;

/// Extensions offered by the open dialog and accepted from host drops
pub const IMPORT_EXTENSIONS: [&str; 10] = [
    "jpg", "jpeg", "png", "tif", "tiff", "gif", "bmp", "heic", "heif", "webp",
];

/// Show the native open dialog. `None` when the user cancels.
pub fn pick_image() -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Choose a photo")
        .add_filter("Images", &IMPORT_EXTENSIONS);
    if let Some(dir) = dirs::picture_dir() {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_file()
}

/// Whether a dropped file looks like something we can import
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMPORT_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode an image file in the background
pub async fn load_image(path: PathBuf) -> Result<SlotImage, LoadError> {
    task::spawn_blocking(move || load_image_blocking(&path))
        .await
        .map_err(|e| LoadError::Task(e.to_string()))?
}

/// Blocking implementation of image loading
pub fn load_image_blocking(path: &Path) -> Result<SlotImage, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pixels = image::load_from_memory(&bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    if pixels.width() == 0 || pixels.height() == 0 {
        return Err(LoadError::EmptyImage { path: path.to_path_buf() });
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    debug!("Decoded {} ({}x{})", name, pixels.width(), pixels.height());
    Ok(SlotImage::new(name, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tryptiq-loader-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("/photos/a.JPG")));
        assert!(is_supported(Path::new("b.webp")));
        assert!(is_supported(Path::new("c.tiff")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_image(PathBuf::from("/nonexistent/path.png")).await;
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_load_garbage_fails_to_decode() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_image_blocking(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_load_png() {
        let path = temp_path("small.png");
        RgbaImage::from_pixel(30, 20, Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let result = load_image(path.clone()).await;
        let _ = std::fs::remove_file(&path);

        let image = result.unwrap();
        assert_eq!((image.width(), image.height()), (30, 20));
        assert!(image.name().ends_with("small.png"));
    }
}
