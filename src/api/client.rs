use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use log::{debug, info, warn};
use reqwest::header::{RANGE, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use url::Url;

use super::models::{ApiConfig, PlayerResponse, StreamFormat};
use crate::application::{MediaHandle, MediaResolver, ProgressCallback};
use crate::domain::AppError;
use crate::utils::extract_video_id;

const PLAYER_PATH: &str = "/youtubei/v1/player";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Video unavailable: {0}")]
    Unplayable(String),

    #[error("No audio-only stream available")]
    NoAudioStream,

    #[error("Invalid YouTube URL or video ID")]
    InvalidVideoUrl,
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Clone)]
pub struct YoutubeClient {
    config: ApiConfig,
    http: Client,
}

impl YoutubeClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Step 1: Fetch the player description for a video
    pub async fn get_player_response(&self, video_id: &str) -> Result<PlayerResponse> {
        let endpoint = Url::parse(&self.config.base_url)?.join(PLAYER_PATH)?;

        let response = self
            .http
            .post(endpoint)
            .query(&[("prettyPrint", "false")])
            .header(USER_AGENT, &self.config.user_agent)
            .json(&self.config.player_request(video_id))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ApiError(format!("Player request failed: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))
    }

    /// Step 2: Resolve a page URL to its best audio-only MP4 stream
    pub async fn get_audio_only(&self, url: &str) -> Result<AudioStream> {
        let video_id = extract_video_id(url).ok_or(ApiError::InvalidVideoUrl)?;
        let player = self.get_player_response(&video_id).await?;

        let status = player.playability_status;
        if status.status != "OK" {
            return Err(ApiError::Unplayable(status.reason.unwrap_or(status.status)));
        }

        let title = player
            .video_details
            .map(|details| details.title)
            .unwrap_or_default();
        let formats = player
            .streaming_data
            .map(|data| data.adaptive_formats)
            .unwrap_or_default();

        let format = select_audio_stream(&formats).ok_or(ApiError::NoAudioStream)?;
        let (Some(stream_url), Some(size)) = (format.url.clone(), format.size()) else {
            return Err(ApiError::NoAudioStream);
        };

        info!(
            "Resolved {} ({:?}): itag {} {} bytes",
            video_id, title, format.itag, size
        );

        Ok(AudioStream {
            http: self.http.clone(),
            user_agent: self.config.user_agent.clone(),
            chunk_size: self.config.chunk_size.max(1),
            title,
            url: stream_url,
            size,
        })
    }
}

#[async_trait]
impl MediaResolver for YoutubeClient {
    async fn resolve(&self, url: &str) -> std::result::Result<Box<dyn MediaHandle>, AppError> {
        let stream = self
            .get_audio_only(url)
            .await
            .map_err(|e| AppError::Resolution(e.to_string()))?;
        Ok(Box::new(stream))
    }
}

/// Highest-bitrate `audio/mp4` format that can be fetched directly
fn select_audio_stream(formats: &[StreamFormat]) -> Option<&StreamFormat> {
    formats
        .iter()
        .filter(|f| f.is_mp4_audio() && f.url.is_some())
        .filter(|f| f.size().is_some_and(|size| size > 0))
        .max_by_key(|f| f.bitrate)
}

/// A resolved audio stream, downloaded in sequential ranged chunks
pub struct AudioStream {
    http: Client,
    user_agent: String,
    chunk_size: u64,
    title: String,
    url: String,
    size: u64,
}

impl AudioStream {
    async fn range_stream(
        &self,
        start: u64,
        end: u64,
    ) -> Result<BoxStream<'static, Result<bytes::Bytes>>> {
        debug!("Requesting bytes {}-{} of {}", start, end, self.size);

        let response = self
            .http
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .header(RANGE, format!("bytes={}-{}", start, end))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ApiError::ApiError(format!("Download request failed: {}", e)))?;

        Ok(response
            .bytes_stream()
            .map_err(ApiError::RequestError)
            .boxed())
    }

    async fn write_chunks(
        &self,
        mut file: tokio::fs::File,
        on_progress: ProgressCallback<'_>,
    ) -> std::result::Result<(), AppError> {
        let mut downloaded: u64 = 0;
        while downloaded < self.size {
            let end = (downloaded + self.chunk_size).min(self.size) - 1;
            let mut stream = self
                .range_stream(downloaded, end)
                .await
                .map_err(|e| AppError::Download(e.to_string()))?;

            let before = downloaded;
            while let Some(chunk) = stream.next().await {
                let chunk = chunk.map_err(|e| AppError::Download(e.to_string()))?;
                file.write_all(&chunk)
                    .await
                    .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

                downloaded += chunk.len() as u64;
                on_progress(self.size.saturating_sub(downloaded));
            }

            if downloaded == before {
                return Err(AppError::Download(format!(
                    "Stream ended after {} of {} bytes",
                    downloaded, self.size
                )));
            }
        }

        file.flush()
            .await
            .map_err(|e| AppError::Io(format!("Failed to flush file: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))
    }
}

#[async_trait]
impl MediaHandle for AudioStream {
    fn title(&self) -> &str {
        &self.title
    }

    fn total_size(&self) -> u64 {
        self.size
    }

    async fn download(
        self: Box<Self>,
        directory: &Path,
        filename: &str,
        on_progress: ProgressCallback<'_>,
    ) -> std::result::Result<PathBuf, AppError> {
        let path = directory.join(filename);
        let file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

        match self.write_chunks(file, on_progress).await {
            Ok(()) => Ok(path),
            Err(e) => {
                // No truncated file is left at the destination
                if let Err(rm) = tokio::fs::remove_file(&path).await {
                    warn!("Could not remove partial file {}: {}", path.display(), rm);
                }
                Err(e)
            }
        }
    }
}
