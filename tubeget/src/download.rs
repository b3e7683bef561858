//! Download orchestration: an ordered chain of format-selector strategies
//! tried against the extractor until one succeeds.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;
use ytdlp::{Container, DownloadRequest, Format, YtDlp};

use crate::catalog::quality_label;
use crate::config::Config;
use crate::display::format_file_size;

/// Containers yt-dlp may have produced, probed in order after a successful
/// download to find the real artifact.
const PROBE_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "webm", "mov", "flv"];

const MAX_TITLE_LEN: usize = 80;

/// One download attempt: a yt-dlp format selector plus an optional
/// container-merge target.
#[derive(Debug, Clone)]
pub struct Strategy {
    pub name: &'static str,
    pub selector: String,
    pub merge: Container
}

/// The fixed fallback chain, in priority order.
pub fn strategies(format_id: &str) -> Vec<Strategy> {
    vec![
        Strategy {
            name: "selected quality + best audio",
            selector: format!("{format_id}+bestaudio/best"),
            merge: Container::Mp4
        },
        Strategy {
            name: "selected quality only",
            selector: format!("best[format_id={format_id}]"),
            merge: Container::Default
        },
        Strategy {
            name: "best available under 1080p",
            selector: "best[height<=1080]/best".to_string(),
            merge: Container::Mp4
        },
    ]
}

/// Keep only characters safe for a filename, trim trailing whitespace and
/// cap the length.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect::<String>()
        .trim_end()
        .chars()
        .take(MAX_TITLE_LEN)
        .collect()
}

pub fn output_basename(title: &str, label: &str) -> String {
    format!("{} [{}]", sanitize_title(title), label)
}

/// How a download attempt chain ended.
#[derive(Debug)]
pub enum DownloadOutcome {
    Completed {
        strategy: &'static str,
        file: Option<(PathBuf, u64)>
    },
    Failed
}

/// Try each strategy in order until one completes. Per-attempt failures are
/// logged and swallowed; the aggregate failure is reported as status text,
/// never as an error.
pub async fn download_video(
    client: &YtDlp,
    config: &Config,
    url: &str,
    format_id: &str,
    title: &str,
    quality: &Format
) -> DownloadOutcome {
    let label = quality_label(quality.height.unwrap_or(0));
    let basename = output_basename(title, &label);
    let template = config.download_dir.join(format!("{basename}.%(ext)s"));

    println!("Saving to: {}", config.download_dir.display());

    for strategy in strategies(format_id) {
        // jitter between attempts so retries don't hit the site in a burst
        let delay = rand::thread_rng().gen_range(1.0..2.0);
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;

        tracing::debug!(strategy = strategy.name, selector = %strategy.selector, "download attempt");

        let request = DownloadRequest::new(strategy.selector.clone(), &template)
            .merge_container(strategy.merge.clone())
            .no_playlist(true);

        match client.download(url, &request).await {
            Ok(()) => {
                let file = probe_downloaded_file(&config.download_dir, &basename).await;
                if let Some((path, size)) = &file {
                    println!("Actual file size: {} ({})", format_file_size(*size), path.display());
                }
                println!("Download completed: {title}");
                println!("Location: {}", config.download_dir.display());
                return DownloadOutcome::Completed {
                    strategy: strategy.name,
                    file
                };
            }
            Err(err) => {
                tracing::debug!(strategy = strategy.name, error = %err, "download attempt failed");
            }
        }
    }

    println!(
        "All download methods failed. Possible reasons: restricted/private video, \
         regional blocking, or temporary issues."
    );
    DownloadOutcome::Failed
}

/// Find the downloaded artifact: the extension is chosen by the extractor,
/// so check the known candidates. A miss is tolerated silently.
async fn probe_downloaded_file(dir: &Path, basename: &str) -> Option<(PathBuf, u64)> {
    for ext in PROBE_EXTENSIONS {
        let path = dir.join(format!("{basename}.{ext}"));
        if let Ok(meta) = tokio::fs::metadata(&path).await {
            return Some((path, meta.len()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_fixed_order() {
        let chain = strategies("137");
        assert_eq!(chain.len(), 3);
        assert_eq!(chain[0].selector, "137+bestaudio/best");
        assert!(matches!(chain[0].merge, Container::Mp4));
        assert_eq!(chain[1].selector, "best[format_id=137]");
        assert!(matches!(chain[1].merge, Container::Default));
        assert_eq!(chain[2].selector, "best[height<=1080]/best");
        assert!(matches!(chain[2].merge, Container::Mp4));
    }

    #[test]
    fn test_sanitize_title_strips_forbidden_characters() {
        let sanitized = sanitize_title(r#"My/Video: "Test"!!"#);
        assert_eq!(sanitized, "MyVideo Test");
        assert!(sanitized
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.')));
    }

    #[test]
    fn test_sanitize_title_truncates_to_80() {
        let long = "a".repeat(200);
        assert_eq!(sanitize_title(&long).chars().count(), 80);
    }

    #[test]
    fn test_sanitize_title_trims_trailing_whitespace() {
        assert_eq!(sanitize_title("A title!! "), "A title");
    }

    #[test]
    fn test_output_basename_quality_suffix() {
        let basename = output_basename(r#"My/Video: "Test"!!"#, "720p");
        assert_eq!(basename, "MyVideo Test [720p]");
    }

    #[tokio::test]
    async fn test_all_strategies_failing_reports_failure_without_raising() {
        let client = YtDlp::with_binary("/nonexistent/yt-dlp-for-tests");
        let dir = std::env::temp_dir().join("tubeget-test-dl-fail");
        let config = Config::at(dir.clone()).unwrap();
        let quality = Format {
            format_id: "137".to_string(),
            height: Some(720),
            vcodec: Some("avc1".to_string()),
            ..Format::default()
        };

        let outcome = download_video(
            &client,
            &config,
            "https://youtu.be/abc",
            "137",
            "A title",
            &quality
        )
        .await;

        assert!(matches!(outcome, DownloadOutcome::Failed));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_first_successful_strategy_wins() {
        // `true` ignores its arguments and exits 0, so the first strategy
        // "succeeds" immediately and the chain stops there.
        let client = YtDlp::with_binary("true");
        let dir = std::env::temp_dir().join("tubeget-test-dl-ok");
        let config = Config::at(dir.clone()).unwrap();
        let quality = Format {
            format_id: "137".to_string(),
            height: Some(1080),
            vcodec: Some("avc1".to_string()),
            ..Format::default()
        };

        let outcome = download_video(
            &client,
            &config,
            "https://youtu.be/abc",
            "137",
            "A title",
            &quality
        )
        .await;

        match outcome {
            DownloadOutcome::Completed { strategy, file } => {
                assert_eq!(strategy, "selected quality + best audio");
                assert!(file.is_none());
            }
            DownloadOutcome::Failed => panic!("expected first strategy to succeed")
        }
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_probe_reports_first_matching_extension() {
        let dir = std::env::temp_dir().join("tubeget-test-probe");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("clip [720p].webm"), b"12345").unwrap();

        let found = probe_downloaded_file(&dir, "clip [720p]").await;
        let (path, size) = found.expect("probe should find the webm");
        assert!(path.ends_with("clip [720p].webm"));
        assert_eq!(size, 5);

        assert!(probe_downloaded_file(&dir, "missing").await.is_none());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
