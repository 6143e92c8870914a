//! Configuration file schema.
//!
//! Loaded from `hub.toml` / `.hub.toml` (project) or the XDG config
//! directory, merged by [`ConfigLoader`](super::loader::ConfigLoader).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: FileServerConfig,
    pub queue: FileQueueConfig,
}

/// `[server]` section: backend endpoint and timeouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Base URL of the hub backend.
    pub base_url: String,
    /// Timeout for one-shot REST calls, in seconds.
    pub timeout_secs: u64,
    /// Timeout for the streaming chat connection, in seconds.
    pub stream_timeout_secs: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
            stream_timeout_secs: 300,
        }
    }
}

impl FileServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_secs)
    }
}

/// `[queue]` section: queue monitor behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueueConfig {
    /// Refresh interval for `queue --watch`, in seconds.
    pub refresh_secs: u64,
}

impl Default for FileQueueConfig {
    fn default() -> Self {
        Self { refresh_secs: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let config = FileConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.server.timeout(), Duration::from_secs(10));
        assert_eq!(config.queue.refresh_secs, 5);
    }

    #[test]
    fn partial_file_fills_missing_sections() {
        let config: FileConfig = toml::from_str(
            r#"
            [server]
            base_url = "https://hub.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.base_url, "https://hub.example.com");
        // Untouched fields keep their defaults.
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.queue.refresh_secs, 5);
    }
}
