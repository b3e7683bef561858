//! Async Rust wrapper for the yt-dlp CLI.
//!
//! Shells out to the yt-dlp binary for metadata extraction and downloading,
//! treating it as an opaque collaborator: structured JSON in, files out.
//!
//! # Example
//!
//! ```no_run
//! use ytdlp::{DownloadRequest, MediaInfo, YtDlp};
//!
//! #[tokio::main]
//! async fn main() -> ytdlp::Result<()> {
//!     let client = YtDlp::new();
//!
//!     match client.fetch("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await? {
//!         MediaInfo::Single(video) => println!("Title: {}", video.title_or_default()),
//!         MediaInfo::Playlist(playlist) => println!("{} entries", playlist.entries.len())
//!     }
//!
//!     let request = DownloadRequest::new("best", "video.%(ext)s").no_playlist(true);
//!     client.download("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &request).await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod command;
pub mod error;
pub mod types;

pub use client::YtDlp;
pub use error::{Error, Result};
pub use types::{Container, DownloadRequest, Format, MediaInfo, NetworkOptions, PlaylistInfo, VideoInfo};
