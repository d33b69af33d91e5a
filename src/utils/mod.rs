use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::AppError;

pub const AUDIO_EXTENSION: &str = "m4a";

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.)?(?:youtube\.com/watch\?v=([A-Za-z0-9_-]{11})(?:&.*)?|youtu\.be/([A-Za-z0-9_-]{11})(?:[?&].*)?)$",
    )
    .expect("YouTube URL pattern is valid")
});

static RESERVED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/:"*?<>|]+"#).expect("reserved character pattern is valid"));

/// Check whether `url` is a watch URL or a short link for a single video
pub fn is_valid_youtube_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url)
}

/// Extract the 11-character video ID from a URL accepted by [`is_valid_youtube_url`]
pub fn extract_video_id(url: &str) -> Option<String> {
    let caps = YOUTUBE_URL.captures(url.trim())?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Sanitize filename by collapsing each run of reserved characters into `_`
pub fn sanitize_filename(filename: &str) -> String {
    RESERVED_RUN.replace_all(filename, "_").into_owned()
}

/// File name offered in the save dialog for a video title
pub fn default_filename(title: &str) -> String {
    let sanitized = sanitize_filename(title);
    let stem = if sanitized.trim().is_empty() {
        "audio"
    } else {
        sanitized.as_str()
    };
    format!("{}.{}", stem, AUDIO_EXTENSION)
}

/// Split a chosen save path into (directory, file name), appending the
/// audio extension when the user typed a bare name.
pub fn split_save_path(path: &Path) -> Result<(PathBuf, String), AppError> {
    let mut path = path.to_path_buf();
    if path.extension().is_none() {
        path.set_extension(AUDIO_EXTENSION);
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Io(format!("Invalid save path: {}", path.display())))?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok((directory, filename))
}

/// Whole percentage of a transfer that is done, given the bytes still missing.
///
/// `total` must be non-zero; the resolver only hands out streams of known size.
pub fn percent_complete(total: u64, remaining: u64) -> u8 {
    debug_assert!(total > 0, "progress reported for a stream of unknown size");
    let downloaded = total.saturating_sub(remaining) as u128;
    (downloaded * 100 / total.max(1) as u128) as u8
}
