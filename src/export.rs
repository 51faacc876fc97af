/// PNG export
///
/// Exports are written into an exclusively created hidden file with a
/// random name. It is renamed to its visible name only once the whole PNG
/// has been encoded and synced; on any error it is deleted again, so a
/// failed save never leaves a truncated image behind.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Length of the random identifier in exported file names
const RANDOM_ID_LEN: usize = 16;

/// Get the directory exports go to by default
/// Returns ~/Pictures (or the XDG pictures dir) on Linux
pub fn pictures_dir() -> Result<PathBuf> {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .ok_or(Error::NoPicturesDir)
}

/// Write an image as PNG into `dir`, named `<prefix><random id>.png`
///
/// The PNG is written to a hidden `.<name>` temp file first and renamed
/// once complete, so the visible name never points at a truncated file.
/// Returns the path of the new file.
pub fn write_png(image: &RgbaImage, dir: &Path, prefix: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let hidden_prefix = format!(".{prefix}");
    let mut builder = tempfile::Builder::new();
    builder
        .prefix(&hidden_prefix)
        .suffix(".png")
        .rand_bytes(RANDOM_ID_LEN);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut file = builder.tempfile_in(dir).map_err(|e| Error::io(dir, e))?;
    let temp_path = file.path().to_path_buf();

    // `file` is deleted on drop until `persist_noclobber` succeeds
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        PngEncoder::new(&mut writer)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(Error::Encode)?;
        writer.flush().map_err(|e| Error::io(&temp_path, e))?;
    }
    file.as_file()
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;

    let path = dir.join(visible_name(&temp_path));
    file.persist_noclobber(&path)
        .map_err(|e| Error::io(&path, e.error))?;

    log::info!(
        "📸 Saved {}x{} PNG: {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(path)
}

/// Final file name: the temp name without its leading dot
fn visible_name(temp_path: &Path) -> String {
    let name = temp_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_prefix('.').unwrap_or(name.as_str()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn png_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_write_png_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = RgbaImage::from_pixel(5, 4, Rgba([1, 2, 3, 255]));

        let path = write_png(&image, dir.path(), "filtered_image_").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("filtered_image_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "filtered_image_".len() + RANDOM_ID_LEN + ".png".len());

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, image);

        // Only the final file is left, no hidden temp file
        assert_eq!(png_files(dir.path()), vec![path]);
    }

    #[test]
    fn test_visible_name_drops_leading_dot() {
        assert_eq!(
            visible_name(Path::new("/pics/.filtered_image_abc.png")),
            "filtered_image_abc.png"
        );
        assert_eq!(visible_name(Path::new("/pics/plain.png")), "plain.png");
    }

    #[test]
    fn test_names_are_unique() {
        let dir = tempfile::tempdir().expect("temp dir");
        let image = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));

        let first = write_png(&image, dir.path(), "x_").unwrap();
        let second = write_png(&image, dir.path(), "x_").unwrap();

        assert_ne!(first, second);
        assert_eq!(png_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("a").join("b");
        let image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));

        let path = write_png(&image, &nested, "p_").unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_unusable_directory_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let not_a_dir = dir.path().join("plain-file");
        fs::write(&not_a_dir, b"occupied").unwrap();

        let image = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        let result = write_png(&image, &not_a_dir, "p_");

        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_failed_encode_leaves_no_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        // PNG does not allow zero-sized images
        let image = RgbaImage::new(0, 0);

        let result = write_png(&image, dir.path(), "p_");

        assert!(matches!(result, Err(Error::Encode(_))));
        assert!(png_files(dir.path()).is_empty());
    }
}
