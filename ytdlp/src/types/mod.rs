mod media;
mod request;

pub use media::{Format, MediaInfo, PlaylistInfo, VideoInfo};
pub use request::{Container, DownloadRequest, NetworkOptions};
