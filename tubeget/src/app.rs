//! Top-level interactive flow: URL prompt, metadata fetch, then the single
//! video or playlist branch. Every handled failure ends its branch with a
//! message; errors never propagate past this module unless they are truly
//! unexpected.

use anyhow::Result;
use ytdlp::{Format, MediaInfo, PlaylistInfo, VideoInfo, YtDlp};

use crate::catalog::{quality_label, QualityMenu};
use crate::config::Config;
use crate::display::{format_count, format_duration};
use crate::download;
use crate::prompt;

pub async fn run(client: &YtDlp, config: &Config) -> Result<()> {
    println!("YouTube Video Downloader");
    println!("{}", "=".repeat(30));

    let Some(url) = prompt::read_url().await? else {
        println!("Goodbye.");
        return Ok(());
    };

    let media = match client.fetch(&url).await {
        Ok(media) => media,
        Err(err) => {
            tracing::debug!(error = %err, url = %url, "metadata fetch failed");
            println!("Error: {err}");
            println!("Could not fetch video information. Please check the URL and try again.");
            return Ok(());
        }
    };

    match media {
        MediaInfo::Playlist(playlist) => run_playlist(client, config, playlist).await,
        MediaInfo::Single(video) => run_single(client, config, &url, &video).await
    }
}

async fn run_single(client: &YtDlp, config: &Config, url: &str, video: &VideoInfo) -> Result<()> {
    let title = video.title_or_default();
    let duration = video.duration.unwrap_or(0.0);

    println!("\nVideo: {title}");
    println!("Channel: {}", video.uploader.as_deref().unwrap_or("Unknown"));
    if duration > 0.0 {
        println!("Duration: {}", format_duration(duration));
    }
    if let Some(views) = video.view_count.filter(|v| *v > 0) {
        println!("Views: {}", format_count(views));
    }

    if video.formats.is_empty() {
        println!("No formats available for this video.");
        return Ok(());
    }

    let menu = QualityMenu::build(&video.formats, duration);
    if menu.is_empty() {
        println!("No video formats found. This might be a live stream or unavailable video.");
        return Ok(());
    }
    print!("{}", menu.render());

    let Some(index) = prompt::choose_quality(menu.len()).await? else {
        println!("Download cancelled.");
        return Ok(());
    };
    let selected = &menu.rows[index];
    announce_selection(selected, false);

    if prompt::confirm("Start download? (y/n): ").await? {
        download::download_video(client, config, url, &selected.format_id, title, selected).await;
    } else {
        println!("Download cancelled.");
    }

    Ok(())
}

async fn run_playlist(client: &YtDlp, config: &Config, playlist: PlaylistInfo) -> Result<()> {
    println!(
        "\nPlaylist: {}",
        playlist.title.as_deref().unwrap_or("Untitled Playlist")
    );
    println!("Number of videos: {}", playlist.entries.len());

    if playlist.entries.is_empty() {
        println!("No videos found in this playlist.");
        return Ok(());
    }

    // The quality menu is built from the first entry; the chosen format id
    // is then matched against every entry individually.
    let first = &playlist.entries[0];
    let duration = first.duration.unwrap_or(0.0);

    if first.formats.is_empty() {
        println!("No formats available for the first video.");
        return Ok(());
    }

    let menu = QualityMenu::build(&first.formats, duration);
    if menu.is_empty() {
        println!("No video formats found. This might be a live stream or unavailable video.");
        return Ok(());
    }
    print!("{}", menu.render());

    let Some(index) = prompt::choose_quality(menu.len()).await? else {
        println!("Download cancelled.");
        return Ok(());
    };
    let selected = menu.rows[index].clone();
    announce_selection(&selected, true);

    if !prompt::confirm("Start downloading the entire playlist? (y/n): ").await? {
        println!("Download cancelled.");
        return Ok(());
    }

    let total = playlist.entries.len();
    for (i, entry) in playlist.entries.iter().enumerate() {
        let entry_title = entry
            .title
            .clone()
            .unwrap_or_else(|| format!("Video {}", i + 1));
        println!("\nDownloading video {}/{}: {}", i + 1, total, entry_title);

        match dispatch_entry(entry, &selected.format_id) {
            EntryDispatch::Download { url, format } => {
                download::download_video(
                    client,
                    config,
                    url,
                    &selected.format_id,
                    &entry_title,
                    format
                )
                .await;
            }
            EntryDispatch::SkipNoFormat => {
                println!("Selected quality not available for this video. Skipping.");
            }
            EntryDispatch::SkipNoUrl => {
                println!("No URL available for this video. Skipping.");
            }
        }
    }

    println!("All available videos in the playlist have been processed.");
    Ok(())
}

/// What to do with one playlist entry given the quality chosen for the
/// whole playlist. An entry missing the chosen format or a URL is skipped,
/// never aborting the remaining entries.
#[derive(Debug)]
enum EntryDispatch<'a> {
    Download { url: &'a str, format: &'a Format },
    SkipNoFormat,
    SkipNoUrl
}

fn dispatch_entry<'a>(entry: &'a VideoInfo, format_id: &str) -> EntryDispatch<'a> {
    let Some(format) = entry.formats.iter().find(|f| f.format_id == format_id) else {
        return EntryDispatch::SkipNoFormat;
    };
    let Some(url) = entry.webpage_url.as_deref() else {
        return EntryDispatch::SkipNoUrl;
    };
    EntryDispatch::Download { url, format }
}

fn announce_selection(selected: &ytdlp::Format, playlist_wide: bool) {
    let height = selected.height.unwrap_or(0);
    let label = quality_label(height);
    if playlist_wide {
        println!("Selected: {label} quality for all videos in the playlist");
    } else {
        println!("Selected: {label} quality");
    }
    let width = selected
        .width
        .map_or_else(|| "?".to_string(), |w| w.to_string());
    println!("Resolution: {width}x{height}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(format_ids: &[&str], webpage_url: Option<&str>) -> VideoInfo {
        VideoInfo {
            title: Some("Entry".to_string()),
            webpage_url: webpage_url.map(str::to_string),
            formats: format_ids
                .iter()
                .map(|id| Format {
                    format_id: (*id).to_string(),
                    height: Some(720),
                    vcodec: Some("avc1".to_string()),
                    ..Format::default()
                })
                .collect(),
            ..VideoInfo::default()
        }
    }

    #[test]
    fn test_dispatch_entry_with_matching_format() {
        let entry = entry(&["22", "137"], Some("https://youtu.be/abc"));
        match dispatch_entry(&entry, "137") {
            EntryDispatch::Download { url, format } => {
                assert_eq!(url, "https://youtu.be/abc");
                assert_eq!(format.format_id, "137");
            }
            other => panic!("expected download, got {other:?}")
        }
    }

    #[test]
    fn test_dispatch_entry_skips_when_format_missing() {
        let entry = entry(&["22"], Some("https://youtu.be/abc"));
        assert!(matches!(
            dispatch_entry(&entry, "137"),
            EntryDispatch::SkipNoFormat
        ));
    }

    #[test]
    fn test_dispatch_entry_skips_when_url_missing() {
        let entry = entry(&["137"], None);
        assert!(matches!(
            dispatch_entry(&entry, "137"),
            EntryDispatch::SkipNoUrl
        ));
    }
}
