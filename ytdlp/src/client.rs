use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::command::CommandBuilder;
use crate::error::{Error, Result};
use crate::types::{DownloadRequest, MediaInfo, NetworkOptions, PlaylistInfo, VideoInfo};

/// Client for the external yt-dlp binary. Every invocation carries the same
/// [`NetworkOptions`]; the binary's own retry and timeout handling covers
/// transient network failures.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
    network: NetworkOptions
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

impl YtDlp {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("yt-dlp"),
            network: NetworkOptions::default()
        }
    }

    pub fn with_binary(path: impl Into<PathBuf>) -> Self {
        Self {
            binary: path.into(),
            network: NetworkOptions::default()
        }
    }

    pub fn set_network(&mut self, network: NetworkOptions) {
        self.network = network;
    }

    pub async fn check_binary(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("--version")
            .output()
            .await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Error::BinaryNotExecutable(self.binary.clone()))
        }
    }

    /// Fetch metadata for a URL without downloading anything. Resolves to a
    /// single video or, when the URL names a collection, a playlist.
    pub async fn fetch(&self, url: &str) -> Result<MediaInfo> {
        let output = self
            .command()
            .single_json_output()
            .skip_download()
            .quiet()
            .url(url)
            .build()
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(Error::CommandFailed {
                code: output.status.code().unwrap_or(-1),
                stderr
            });
        }

        parse_media_info(&output.stdout)
    }

    /// Run a real download. yt-dlp's progress output goes straight to the
    /// terminal; stderr is captured so failures carry some detail.
    pub async fn download(&self, url: &str, request: &DownloadRequest) -> Result<()> {
        let builder = self.command().with_request(request).url(url);

        tracing::debug!(
            binary = %self.binary.display(),
            args = ?builder.get_args(),
            "spawning yt-dlp download"
        );

        let mut cmd = builder.build();
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;

        let mut stderr_buf = String::new();
        if let Some(mut stderr) = child.stderr.take() {
            stderr.read_to_string(&mut stderr_buf).await?;
        }

        let status = child.wait().await?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                code: status.code().unwrap_or(-1),
                stderr: stderr_buf
            })
        }
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(&self.binary).with_network(&self.network)
    }
}

// yt-dlp's single-JSON dump nests playlist entries under an `entries` key;
// a plain video record has no such key.
fn parse_media_info(stdout: &[u8]) -> Result<MediaInfo> {
    let value: serde_json::Value = serde_json::from_slice(stdout)?;

    if value.get("entries").is_some() {
        let playlist: PlaylistInfo = serde_json::from_value(value)?;
        Ok(MediaInfo::Playlist(playlist))
    } else {
        let video: VideoInfo = serde_json::from_value(value)?;
        Ok(MediaInfo::Single(Box::new(video)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_info_single() {
        let json = br#"{"id": "abc", "title": "A video", "duration": 65.0, "formats": []}"#;
        let info = parse_media_info(json).unwrap();
        match info {
            MediaInfo::Single(video) => {
                assert_eq!(video.title.as_deref(), Some("A video"));
            }
            MediaInfo::Playlist(_) => panic!("expected single video")
        }
    }

    #[test]
    fn test_parse_media_info_playlist() {
        let json = br#"{
            "id": "PL1",
            "title": "A playlist",
            "entries": [{"id": "v1", "title": "First"}, null]
        }"#;
        let info = parse_media_info(json).unwrap();
        match info {
            MediaInfo::Playlist(playlist) => {
                assert_eq!(playlist.title.as_deref(), Some("A playlist"));
                assert_eq!(playlist.entries.len(), 1);
            }
            MediaInfo::Single(_) => panic!("expected playlist")
        }
    }

    #[test]
    fn test_parse_media_info_invalid_json() {
        assert!(matches!(
            parse_media_info(b"not json"),
            Err(Error::JsonParseFailed(_))
        ));
    }

    #[test]
    fn test_ytdlp_default_binary() {
        let client = YtDlp::default();
        assert_eq!(client.binary, PathBuf::from("yt-dlp"));
    }

    #[test]
    fn test_ytdlp_with_binary() {
        let client = YtDlp::with_binary("/usr/local/bin/yt-dlp");
        assert_eq!(client.binary, PathBuf::from("/usr/local/bin/yt-dlp"));
    }

    #[test]
    fn test_set_network_changes_command_flags() {
        let mut client = YtDlp::new();
        client.set_network(NetworkOptions {
            socket_timeout: 60,
            headers: Vec::new(),
            ..NetworkOptions::default()
        });
        let args = client.command().get_args().to_vec();
        let timeout_pos = args.iter().position(|a| a == "--socket-timeout").unwrap();
        assert_eq!(args[timeout_pos + 1], "60");
        assert!(!args.iter().any(|a| a == "--add-header"));
    }
}
