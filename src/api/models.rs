use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Response from the /player endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: PlayabilityStatus,
    #[serde(default)]
    pub video_details: Option<VideoDetails>,
    #[serde(default)]
    pub streaming_data: Option<StreamingData>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayabilityStatus {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    #[serde(default)]
    pub adaptive_formats: Vec<StreamFormat>,
}

/// One entry of `adaptiveFormats`. `contentLength` arrives as a decimal string.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFormat {
    pub itag: u32,
    pub mime_type: String,
    #[serde(default)]
    pub bitrate: u64,
    #[serde(default)]
    pub content_length: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl StreamFormat {
    pub fn is_mp4_audio(&self) -> bool {
        self.mime_type.starts_with("audio/mp4")
    }

    pub fn size(&self) -> Option<u64> {
        self.content_length.as_deref()?.parse().ok()
    }
}

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub client_name: String,
    pub client_version: String,
    pub user_agent: String,
    /// Bytes requested per ranged GET while downloading
    pub chunk_size: u64,
}

impl ApiConfig {
    pub fn player_request(&self, video_id: &str) -> Value {
        json!({
            "videoId": video_id,
            "context": {
                "client": {
                    "clientName": self.client_name,
                    "clientVersion": self.client_version,
                    "hl": "en",
                }
            },
            "contentCheckOk": true,
            "racyCheckOk": true,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.youtube.com".to_string(),
            client_name: "ANDROID_VR".to_string(),
            client_version: "1.60.19".to_string(),
            user_agent: "com.google.android.apps.youtube.vr.oculus/1.60.19 (Linux; U; Android 12L; eureka-user Build/SQ3A.220605.009.A1) gzip".to_string(),
            chunk_size: 9 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_player_response() {
        let body = r#"{
            "playabilityStatus": {"status": "OK"},
            "videoDetails": {"videoId": "dQw4w9WgXcQ", "title": "Never Gonna"},
            "streamingData": {"adaptiveFormats": [
                {"itag": 140, "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"", "bitrate": 130000,
                 "contentLength": "3433514", "url": "https://cdn/140"},
                {"itag": 137, "mimeType": "video/mp4; codecs=\"avc1\"", "bitrate": 4000000}
            ]}
        }"#;

        let response: PlayerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.playability_status.status, "OK");
        assert_eq!(response.video_details.unwrap().title, "Never Gonna");

        let formats = response.streaming_data.unwrap().adaptive_formats;
        assert!(formats[0].is_mp4_audio());
        assert_eq!(formats[0].size(), Some(3_433_514));
        assert!(!formats[1].is_mp4_audio());
        assert_eq!(formats[1].size(), None);
    }

    #[test]
    fn test_player_request_body() {
        let body = ApiConfig::default().player_request("dQw4w9WgXcQ");
        assert_eq!(body["videoId"], "dQw4w9WgXcQ");
        assert_eq!(body["context"]["client"]["clientName"], "ANDROID_VR");
    }
}
