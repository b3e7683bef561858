use std::path::PathBuf;

/// Shared network behavior passed to every yt-dlp invocation: browser-like
/// headers plus conservative timeout/retry settings.
#[derive(Debug, Clone)]
pub struct NetworkOptions {
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub socket_timeout: u32,
    pub retries: u32,
    pub fragment_retries: u32,
    pub skip_unavailable_fragments: bool,
    pub sleep_interval: u32,
    pub max_sleep_interval: u32
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            headers: vec![
                (
                    "Accept".to_string(),
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string()
                ),
                ("Accept-Language".to_string(), "en-us,en;q=0.5".to_string()),
                ("Accept-Encoding".to_string(), "gzip, deflate".to_string()),
                ("DNT".to_string(), "1".to_string()),
                ("Connection".to_string(), "keep-alive".to_string()),
            ],
            socket_timeout: 30,
            retries: 3,
            fragment_retries: 3,
            skip_unavailable_fragments: true,
            sleep_interval: 1,
            max_sleep_interval: 3
        }
    }
}

#[derive(Debug, Clone, Default)]
pub enum Container {
    #[default]
    Default,
    Mp4,
    Mkv,
    Webm,
    Custom(String)
}

impl Container {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Container::Default => None,
            Container::Mp4 => Some("mp4"),
            Container::Mkv => Some("mkv"),
            Container::Webm => Some("webm"),
            Container::Custom(s) => Some(s.as_str())
        }
    }
}

/// One concrete download invocation: a format selector expression, where to
/// write the result, and optionally which container to merge into.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub format: String,
    pub output_template: PathBuf,
    pub merge_container: Container,
    pub no_playlist: bool
}

impl DownloadRequest {
    pub fn new(format: impl Into<String>, output_template: impl Into<PathBuf>) -> Self {
        Self {
            format: format.into(),
            output_template: output_template.into(),
            merge_container: Container::Default,
            no_playlist: false
        }
    }

    pub fn merge_container(mut self, container: Container) -> Self {
        self.merge_container = container;
        self
    }

    pub fn no_playlist(mut self, no_playlist: bool) -> Self {
        self.no_playlist = no_playlist;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_as_str() {
        assert_eq!(Container::Default.as_str(), None);
        assert_eq!(Container::Mp4.as_str(), Some("mp4"));
        assert_eq!(Container::Mkv.as_str(), Some("mkv"));
        assert_eq!(Container::Webm.as_str(), Some("webm"));
        assert_eq!(Container::Custom("mov".to_string()).as_str(), Some("mov"));
    }

    #[test]
    fn test_request_defaults() {
        let request = DownloadRequest::new("best", "out.%(ext)s");
        assert!(matches!(request.merge_container, Container::Default));
        assert!(!request.no_playlist);
    }
}
