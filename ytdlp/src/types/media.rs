use serde::{Deserialize, Deserializer, Serialize};

/// One encoded stream (video-only, audio-only or muxed) offered for a video,
/// as reported by yt-dlp's `formats` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub vbr: Option<f64>,
    #[serde(default)]
    pub tbr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
    #[serde(default)]
    pub duration: Option<f64>
}

impl Format {
    /// True when the stream carries a video track. yt-dlp reports the
    /// literal string `"none"` for codec-less tracks; that sentinel stays
    /// inside this method.
    pub fn has_video(&self) -> bool {
        self.vcodec.as_ref().is_some_and(|v| v != "none")
    }

    pub fn has_audio(&self) -> bool {
        self.acodec.as_ref().is_some_and(|a| a != "none")
    }

    /// Exact byte size when known, otherwise the extractor's approximation.
    pub fn size_hint(&self) -> Option<u64> {
        self.filesize.or(self.filesize_approx)
    }

    /// Video bitrate in kbps. The video-specific field wins over the
    /// total-bitrate field when both are present.
    pub fn video_bitrate(&self) -> Option<f64> {
        self.vbr.or(self.tbr)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>
}

impl VideoInfo {
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown Title")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default, deserialize_with = "non_null_entries")]
    pub entries: Vec<VideoInfo>
}

/// What a metadata fetch resolved to: one video, or a playlist of them.
#[derive(Debug, Clone)]
pub enum MediaInfo {
    Single(Box<VideoInfo>),
    Playlist(PlaylistInfo)
}

// Playlist dumps pad unavailable entries with JSON nulls; drop them here so
// callers only ever see real videos.
fn non_null_entries<'de, D>(deserializer: D) -> Result<Vec<VideoInfo>, D::Error>
where
    D: Deserializer<'de>
{
    let raw: Vec<Option<VideoInfo>> = Vec::deserialize(deserializer)?;
    Ok(raw.into_iter().flatten().collect())
}
