//! `cwebp` command-line compressor adapter.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::errors::CompressError;
use crate::domain::ports::{CompressOptions, Compressor};

/// Configuration for the external compressor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressorConfig {
    /// Program name or path of the `cwebp` binary.
    #[serde(default = "default_binary")]
    pub binary: PathBuf,
    /// Baseline quality on a 0-100 scale.
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Images wider than this are downscaled.
    #[serde(default = "default_resize_threshold")]
    pub resize_threshold: u32,
    /// Width used when downscaling.
    #[serde(default = "default_resize_width")]
    pub resize_width: u32,
    /// Maximum runtime of one invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_binary() -> PathBuf {
    PathBuf::from("cwebp")
}

const fn default_quality() -> u8 {
    80
}

const fn default_resize_threshold() -> u32 {
    3840
}

const fn default_resize_width() -> u32 {
    2000
}

const fn default_timeout() -> u64 {
    60
}

impl Default for CompressorConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            quality: default_quality(),
            resize_threshold: default_resize_threshold(),
            resize_width: default_resize_width(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Compressor that shells out to `cwebp`.
#[derive(Debug, Clone)]
pub struct CwebpCompressor {
    binary: PathBuf,
    timeout: Duration,
}

impl CwebpCompressor {
    /// Creates a compressor from configuration.
    #[must_use]
    pub fn new(config: &CompressorConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Builds the argument list for one invocation.
    fn build_args(
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Vec<std::ffi::OsString> {
        let mut args: Vec<std::ffi::OsString> =
            options.to_args().into_iter().map(Into::into).collect();
        args.push(input.as_os_str().to_owned());
        args.push("-o".into());
        args.push(output.as_os_str().to_owned());
        args
    }
}

#[async_trait]
impl Compressor for CwebpCompressor {
    fn extension(&self) -> &'static str {
        "webp"
    }

    async fn is_available(&self) -> bool {
        let probe = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match timeout(self.timeout, probe).await {
            Ok(Ok(status)) if status.success() => true,
            Ok(Ok(status)) => {
                debug!(
                    binary = %self.binary.display(),
                    code = ?status.code(),
                    "Compressor probe failed"
                );
                false
            }
            Ok(Err(e)) => {
                debug!(binary = %self.binary.display(), error = %e, "Compressor not found");
                false
            }
            Err(_) => {
                warn!(binary = %self.binary.display(), "Compressor probe timed out");
                false
            }
        }
    }

    async fn compress(
        &self,
        input: &Path,
        output: &Path,
        options: &CompressOptions,
    ) -> Result<(), CompressError> {
        let args = Self::build_args(input, output, options);

        debug!(binary = %self.binary.display(), ?args, "Running compressor");

        let run = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let result = timeout(self.timeout, run)
            .await
            .map_err(|_| CompressError::Timeout {
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| CompressError::Spawn {
                message: e.to_string(),
            })?;

        if result.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            warn!(
                file = %input.display(),
                code = ?result.status.code(),
                stderr = %stderr,
                "Compressor exited unsuccessfully"
            );
            Err(CompressError::Failed {
                code: result.status.code(),
                stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_without_resize() {
        let args = CwebpCompressor::build_args(
            Path::new("/s/image-0"),
            Path::new("/s/image-0.webp"),
            &CompressOptions::new(80),
        );

        assert_eq!(args, vec!["-q", "80", "/s/image-0", "-o", "/s/image-0.webp"]);
    }

    #[test]
    fn test_build_args_with_resize() {
        let args = CwebpCompressor::build_args(
            Path::new("/s/image-0"),
            Path::new("/s/image-0.webp"),
            &CompressOptions::new(80).with_resize(2000),
        );

        assert_eq!(
            args,
            vec!["-q", "80", "-resize", "2000", "0", "/s/image-0", "-o", "/s/image-0.webp"]
        );
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let compressor = CwebpCompressor::new(&CompressorConfig {
            binary: PathBuf::from("/nonexistent/bin/cwebp-missing"),
            ..CompressorConfig::default()
        });

        assert!(!compressor.is_available().await);
    }

    #[tokio::test]
    async fn test_missing_binary_compress_reports_spawn_error() {
        let compressor = CwebpCompressor::new(&CompressorConfig {
            binary: PathBuf::from("/nonexistent/bin/cwebp-missing"),
            ..CompressorConfig::default()
        });

        let result = compressor
            .compress(Path::new("in"), Path::new("out"), &CompressOptions::new(80))
            .await;

        assert!(matches!(result, Err(CompressError::Spawn { .. })));
    }

    #[cfg(unix)]
    mod script {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn fake_tool(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("fake-cwebp");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn compressor(binary: PathBuf) -> CwebpCompressor {
            CwebpCompressor::new(&CompressorConfig {
                binary,
                ..CompressorConfig::default()
            })
        }

        #[tokio::test]
        async fn test_compress_passes_flags_and_output() {
            let dir = TempDir::new().unwrap();
            let log = dir.path().join("args.log");
            let tool = fake_tool(
                &dir,
                &format!(
                    "echo \"$@\" > {}\nwhile [ \"$1\" != \"-o\" ]; do shift; done\necho webp > \"$2\"",
                    log.display()
                ),
            );
            let input = dir.path().join("image-0");
            let output = dir.path().join("image-0.webp");

            let result = compressor(tool)
                .compress(&input, &output, &CompressOptions::new(80).with_resize(2000))
                .await;

            assert!(result.is_ok());
            assert!(output.exists());
            let logged = std::fs::read_to_string(&log).unwrap();
            assert_eq!(
                logged.trim(),
                format!(
                    "-q 80 -resize 2000 0 {} -o {}",
                    input.display(),
                    output.display()
                )
            );
        }

        #[tokio::test]
        async fn test_nonzero_exit_is_reported() {
            let dir = TempDir::new().unwrap();
            let tool = fake_tool(&dir, "echo 'Could not read input' >&2\nexit 2");

            let result = compressor(tool)
                .compress(Path::new("in"), Path::new("out"), &CompressOptions::new(80))
                .await;

            match result {
                Err(CompressError::Failed { code, stderr }) => {
                    assert_eq!(code, Some(2));
                    assert_eq!(stderr, "Could not read input");
                }
                other => panic!("unexpected result: {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_probe_succeeds_for_working_tool() {
            let dir = TempDir::new().unwrap();
            let tool = fake_tool(&dir, "exit 0");

            assert!(compressor(tool).is_available().await);
        }
    }
}
