use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::AppError;

/// Called with the number of bytes still missing after each received chunk.
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(u64) + Send);

/// Turns a page URL into a downloadable audio stream.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<Box<dyn MediaHandle>, AppError>;
}

/// A resolved audio stream. Owned by a single worker and consumed by `download`.
#[async_trait]
pub trait MediaHandle: Send {
    fn title(&self) -> &str;

    /// Stream size in bytes, known before the first progress report
    fn total_size(&self) -> u64;

    /// Write the stream to `directory/filename` and return the written path
    async fn download(
        self: Box<Self>,
        directory: &Path,
        filename: &str,
        on_progress: ProgressCallback<'_>,
    ) -> Result<PathBuf, AppError>;
}

/// Asks the user where to store the audio. `None` means the dialog was dismissed.
#[async_trait]
pub trait SavePrompt: Send + Sync {
    async fn choose_save_path(&self, suggested_filename: &str) -> Option<PathBuf>;
}
