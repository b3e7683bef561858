use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::types::{DownloadRequest, NetworkOptions};

pub struct CommandBuilder {
    binary: PathBuf,
    args: Vec<String>
}

impl CommandBuilder {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: Vec::new()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn url(self, url: impl Into<String>) -> Self {
        self.arg(url)
    }

    pub fn single_json_output(self) -> Self {
        self.arg("--dump-single-json")
    }

    pub fn skip_download(self) -> Self {
        self.arg("--skip-download")
    }

    pub fn quiet(self) -> Self {
        self.arg("--quiet").arg("--no-warnings")
    }

    pub fn output(self, path: impl AsRef<Path>) -> Self {
        self.arg("-o").arg(path.as_ref().to_string_lossy().to_string())
    }

    pub fn format(self, format: impl Into<String>) -> Self {
        self.arg("-f").arg(format)
    }

    pub fn no_playlist(self) -> Self {
        self.arg("--no-playlist")
    }

    pub fn merge_output_format(self, format: impl Into<String>) -> Self {
        self.arg("--merge-output-format").arg(format)
    }

    pub fn with_network(mut self, network: &NetworkOptions) -> Self {
        self = self
            .arg("--user-agent")
            .arg(network.user_agent.clone())
            .arg("--socket-timeout")
            .arg(network.socket_timeout.to_string())
            .arg("--retries")
            .arg(network.retries.to_string())
            .arg("--fragment-retries")
            .arg(network.fragment_retries.to_string());

        if network.skip_unavailable_fragments {
            self = self.arg("--skip-unavailable-fragments");
        }

        self = self
            .arg("--sleep-interval")
            .arg(network.sleep_interval.to_string())
            .arg("--max-sleep-interval")
            .arg(network.max_sleep_interval.to_string());

        // yt-dlp's option is singular and repeatable; the plural spelling is
        // rejected by its parser before any work happens.
        for (name, value) in &network.headers {
            self = self.arg("--add-header").arg(format!("{name}:{value}"));
        }

        self
    }

    pub fn with_request(mut self, request: &DownloadRequest) -> Self {
        self = self.format(request.format.clone()).output(&request.output_template);

        if request.no_playlist {
            self = self.no_playlist();
        }

        if let Some(container) = request.merge_container.as_str() {
            self = self.merge_output_format(container);
        }

        self
    }

    pub fn build(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.args);
        cmd
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }
}
