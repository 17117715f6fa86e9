// ABOUTME: End-to-end run: fetch metadata, download the image and save it
// ABOUTME: Any failing step aborts the run and leaves the previous image in place

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::client::ApodClient;
use crate::config::Config;
use crate::error::AppError;
use crate::record::ApodRecord;
use crate::wallpaper;

/// Summary of a successful run
#[derive(Debug, Clone)]
pub struct SavedImage {
    pub record: ApodRecord,
    /// URL the image was downloaded from
    pub source_url: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Fetch today's picture and write it to the configured output path
pub fn fetch_and_save(config: &Config) -> Result<SavedImage, AppError> {
    let client = ApodClient::new(config)?;
    let record = client.fetch_record()?;
    save_record_image(&client, record, config.hd, &config.output_path)
}

/// Download the image referenced by `record` and write it to `path`
pub fn save_record_image(
    client: &ApodClient,
    record: ApodRecord,
    hd: bool,
    path: &Path,
) -> Result<SavedImage, AppError> {
    if !record.is_image() {
        warn!(
            "APOD for {} has media type '{}', the download may not be an image",
            record.date, record.media_type
        );
    }

    let bytes = client.download_image(&record, hd)?;
    let image = wallpaper::decode_and_save(&bytes, path)?;

    info!("Wallpaper updated: '{}' -> {}", record.title, path.display());

    Ok(SavedImage {
        source_url: record.image_url(hd).to_string(),
        path: path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        record,
    })
}
