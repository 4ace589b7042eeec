#![warn(clippy::unwrap_in_result)]
#![warn(clippy::unwrap_used)]

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classification outcome for an uploaded file.
///
/// Only `Image`, `Audio` and `Video` ever reach persistent storage;
/// `Other` marks a file the classifier rejected.
#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Audio,
    Video,
    Other,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Category::Image),
            "audio" => Ok(Category::Audio),
            "video" => Ok(Category::Video),
            "other" => Ok(Category::Other),
            unknown => Err(format!("unknown category '{unknown}'")),
        }
    }
}

/// Metadata describing a single stored media file.
///
/// Created once per accepted upload and never updated afterwards; the
/// record and its bytes are removed together on delete.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct MediaFile {
    /// Unique numeric identifier for the file
    pub id: i64,
    /// Opaque reference into the blob store the bytes live under
    pub file: String,
    /// Original client-supplied file name
    pub file_name: String,
    /// Size of the file in bytes
    pub file_size: u64,
    /// Lower-cased extension without the leading dot
    pub file_type: String,
    /// Classification bucket the file was accepted into
    pub category: Category,
    /// Creation timestamp, immutable after insert
    pub uploaded_at: DateTime<Utc>,
}

/// Structured error payload returned by every failing API call.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorReply {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for c in [
            Category::Image,
            Category::Audio,
            Category::Video,
            Category::Other,
        ] {
            assert_eq!(c.as_str().parse::<Category>(), Ok(c));
        }
    }

    #[test]
    fn category_from_unknown_str() {
        assert!("document".parse::<Category>().is_err());
    }
}
