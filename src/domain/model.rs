use super::AppError;
use crate::utils::is_valid_youtube_url;

/// A URL the user asked to download. Only constructible once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    url: String,
}

impl DownloadRequest {
    pub fn new(url: &str) -> Result<Self, AppError> {
        let url = url.trim();
        if !is_valid_youtube_url(url) {
            return Err(AppError::InvalidUrl);
        }
        Ok(Self {
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Downloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A modal message shown to the user once a flow reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn invalid_url() -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Invalid URL".to_string(),
            message: AppError::InvalidUrl.to_string(),
        }
    }

    pub fn failure(error: &AppError) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: "Error".to_string(),
            message: format!("Failed to download: {}", error),
        }
    }

    pub fn success(title: &str) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: "Success".to_string(),
            message: format!("Downloaded audio for {}.", title),
        }
    }
}
