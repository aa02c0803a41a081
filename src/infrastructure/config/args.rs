use super::app_config::LogLevel;
use crate::domain::entities::Visibility;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mastorelay",
    version,
    about = "Relays a post and its images to a Mastodon account",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", env = "MASTORELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Post JSON file; read from stdin when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub post: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Base URL of the Mastodon instance.
    #[arg(long, value_name = "URL", env = "MASTORELAY_INSTANCE_URL")]
    pub instance_url: Option<String>,

    /// Visibility of the published status.
    #[arg(long, env = "MASTORELAY_VISIBILITY")]
    pub visibility: Option<Visibility>,

    /// Access token for the Mastodon account.
    #[arg(long, env = "MASTORELAY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path or name of the `cwebp` binary.
    #[arg(long, value_name = "PATH")]
    pub compressor: Option<PathBuf>,

    /// Store the resolved token in the system keyring.
    #[arg(long)]
    pub store_token: bool,

    /// Print the composed caption without uploading anything.
    #[arg(long)]
    pub dry_run: bool,
}
