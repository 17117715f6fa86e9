// ABOUTME: Typed representation of one Astronomy Picture of the Day entry
// ABOUTME: Decodes the metadata JSON returned by the APOD endpoint

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Metadata for a single day's APOD entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub title: String,
    /// Publication date as `YYYY-MM-DD`
    pub date: String,
    /// High-definition image location
    pub hdurl: String,
    /// Standard-definition image location
    pub url: String,
    /// "image" or "video"
    pub media_type: String,
    pub explanation: String,
    pub copyright: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concepts: Option<String>,
}

impl ApodRecord {
    /// Decode a record from a JSON payload
    ///
    /// Fails with [`AppError::Decode`] when a required field is missing or
    /// has the wrong type. Unknown fields are ignored.
    pub fn from_json(json: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(json)
            .map_err(|e| AppError::Decode(format!("Invalid APOD metadata: {}", e)))
    }

    /// Image location for the given high-definition preference
    pub fn image_url(&self, hd: bool) -> &str {
        if hd {
            &self.hdurl
        } else {
            &self.url
        }
    }

    pub fn is_image(&self) -> bool {
        self.media_type == "image"
    }

    /// The `date` field as a calendar date
    pub fn parsed_date(&self) -> Result<NaiveDate, AppError> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|e| AppError::Decode(format!("Invalid APOD date '{}': {}", self.date, e)))
    }
}
