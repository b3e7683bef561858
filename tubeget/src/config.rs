use std::io;
use std::path::PathBuf;

const DOWNLOAD_DIR_NAME: &str = "yt_downloads";

/// Application configuration. Built once at startup and passed down
/// explicitly; there is no global state.
#[derive(Debug, Clone)]
pub struct Config {
    pub download_dir: PathBuf
}

impl Config {
    /// Fixed download directory under the current working directory,
    /// created if absent.
    pub fn init() -> io::Result<Self> {
        Self::at(std::env::current_dir()?.join(DOWNLOAD_DIR_NAME))
    }

    pub fn at(download_dir: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&download_dir)?;
        Ok(Self { download_dir })
    }
}
