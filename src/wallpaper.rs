// ABOUTME: Decodes downloaded image bytes and writes them to the wallpaper path
// ABOUTME: The output file is replaced atomically so a failed run leaves the old image

use image::{ColorType, DynamicImage, ImageError, ImageFormat};
use log::{debug, info};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::AppError;

/// Encoding for an output path, inferred from its extension
///
/// Only formats this build can write are accepted.
pub fn output_format(path: &Path) -> io::Result<ImageFormat> {
    let unsupported = || {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!(
                "Unsupported output format for {} (use .jpg, .jpeg or .png)",
                path.display()
            ),
        )
    };

    match ImageFormat::from_path(path) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => Ok(format),
        _ => Err(unsupported()),
    }
}

/// Decode raw bytes into an image, detecting the format from the content
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, AppError> {
    if bytes.is_empty() {
        return Err(AppError::Decode("Image data is empty".to_string()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| AppError::Decode(format!("Not a recognized image: {}", e)))?;
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

/// Write an image to `path`, replacing any existing file
///
/// The image is encoded into a temporary file next to `path` and renamed
/// over it once complete. Missing parent directories are created.
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<(), AppError> {
    let format = output_format(path)?;

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !parent.exists() {
        debug!("Creating output directory: {}", parent.display());
        fs::create_dir_all(parent)?;
    }

    // JPEG has no alpha channel or 16-bit depth
    let flattened;
    let image = match (format, image.color()) {
        (ImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => image,
        (ImageFormat::Jpeg, _) => {
            flattened = DynamicImage::ImageRgb8(image.to_rgb8());
            &flattened
        }
        _ => image,
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".apod-")
        .suffix(".part")
        .tempfile_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        image.write_to(&mut writer, format).map_err(encode_error)?;
        writer.flush()?;
    }

    temp.persist(path).map_err(|e| AppError::Io(e.error))?;
    info!("Saved {:?} image to {}", format, path.display());
    Ok(())
}

/// Decode `bytes` and save the result to `path`
///
/// Nothing is written when the bytes fail to decode.
pub fn decode_and_save(bytes: &[u8], path: &Path) -> Result<DynamicImage, AppError> {
    let image = decode_image(bytes)?;
    save_image(&image, path)?;
    Ok(image)
}

fn encode_error(error: ImageError) -> AppError {
    match error {
        ImageError::IoError(e) => AppError::Io(e),
        other => AppError::Io(io::Error::new(io::ErrorKind::Other, other)),
    }
}
