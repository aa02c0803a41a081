//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use crate::application::{OptimizerSettings, PublishOptions};
use crate::domain::entities::Visibility;
use crate::domain::services::DEFAULT_HASHTAGS;
use crate::infrastructure::image::{CompressorConfig, ImageFetcherConfig};

pub(super) const APP_NAME: &str = "mastorelay";
pub(super) const APP_QUALIFIER: &str = "org";
pub(super) const APP_ORGANIZATION: &str = "mastorelay";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Mastodon instance.
    #[serde(default)]
    pub instance_url: Option<String>,

    /// Visibility of published statuses.
    #[serde(default)]
    pub visibility: Visibility,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Separator between URLs in a post's attachment field.
    #[serde(default = "default_delimiter")]
    pub attachment_delimiter: String,

    /// Hashtag line appended to every caption.
    #[serde(default = "default_hashtags")]
    pub hashtags: String,

    /// Directory for per-publish staging areas. Defaults to the system temp dir.
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,

    /// Timeout for platform API requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Image download settings.
    #[serde(default)]
    pub fetch: ImageFetcherConfig,

    /// Image compression settings.
    #[serde(default)]
    pub compressor: CompressorConfig,
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_hashtags() -> String {
    DEFAULT_HASHTAGS.to_string()
}

const fn default_request_timeout() -> u64 {
    60
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(instance_url) = &args.instance_url {
            self.instance_url = Some(instance_url.clone());
        }
        if let Some(visibility) = args.visibility {
            self.visibility = visibility;
        }
        if let Some(binary) = &args.compressor {
            self.compressor.binary = binary.clone();
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns effective staging root.
    #[must_use]
    pub fn effective_staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Builds the publish options.
    #[must_use]
    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            visibility: self.visibility,
            attachment_delimiter: self.attachment_delimiter.clone(),
            hashtags: self.hashtags.clone(),
            staging_root: self.effective_staging_dir(),
        }
    }

    /// Builds the optimizer settings.
    #[must_use]
    pub const fn optimizer_settings(&self) -> OptimizerSettings {
        OptimizerSettings {
            quality: self.compressor.quality,
            resize_threshold: self.compressor.resize_threshold,
            resize_width: self.compressor.resize_width,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance_url: None,
            visibility: Visibility::default(),
            log_path: None,
            log_level: LogLevel::Info,
            attachment_delimiter: default_delimiter(),
            hashtags: default_hashtags(),
            staging_dir: None,
            request_timeout_secs: default_request_timeout(),
            fetch: ImageFetcherConfig::default(),
            compressor: CompressorConfig::default(),
        }
    }
}
