mod app;
mod catalog;
mod config;
mod display;
mod download;
mod estimate;
mod prompt;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ytdlp::YtDlp;

use config::Config;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubeget=warn".into())
        )
        .init();

    let config = match Config::init() {
        Ok(config) => config,
        Err(err) => {
            println!("Could not create the download directory: {err}");
            return;
        }
    };

    let client = YtDlp::new();
    match client.check_binary().await {
        Ok(version) => tracing::debug!(version = %version, "yt-dlp found"),
        Err(err) => tracing::warn!("yt-dlp not found or not executable: {err}")
    }

    // The interrupt signal ends the run with a message instead of a trace;
    // the process exits 0 either way.
    tokio::select! {
        result = app::run(&client, &config) => {
            if let Err(err) = result {
                println!("\nUnexpected error: {err}");
                println!("Make sure you have yt-dlp installed and on your PATH.");
                println!("If issues persist, try updating it: yt-dlp -U");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nDownload interrupted by user.");
        }
    }
}
