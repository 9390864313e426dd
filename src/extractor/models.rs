//! Data structures for resolved media metadata

use serde::Deserialize;
use std::path::PathBuf;

/// Subset of the metadata yt-dlp emits with `--dump-json`.
///
/// `_filename` is the final output path yt-dlp computed from the output
/// template; it is what the pre-flight overwrite check inspects.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, rename = "_filename")]
    pub filename: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Result of the metadata-only resolution step: the media title plus the
/// predicted final file path under the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub title: String,
    pub path: PathBuf,
}
