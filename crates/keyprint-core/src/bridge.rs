//! Connected device access via the `adb` CLI.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{KeyprintError, Result};

/// Capability of querying a connected device and pulling an installed APK.
#[async_trait]
pub trait DeviceBridge: Send + Sync {
    /// Number of connected, authorized devices. Zero when the bridge tool
    /// itself is absent; a missing bridge never aborts the run.
    async fn connected_device_count(&self) -> usize;

    /// On-device path of an installed package's APK, or `NotFound` when the
    /// package is not installed.
    async fn resolve_installed_path(&self, package: &str) -> Result<String>;

    /// Copies an on-device file to local storage.
    async fn pull_artifact(&self, remote: &str, local: &Path) -> Result<()>;
}

/// `DeviceBridge` backed by the `adb` binary.
pub struct Adb {
    program: String,
}

impl Adb {
    pub fn new() -> Self {
        Self {
            program: "adb".to_string(),
        }
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Adb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceBridge for Adb {
    async fn connected_device_count(&self) -> usize {
        let output = match Command::new(&self.program)
            .arg("devices")
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("adb not available ({}), assuming no devices", e);
                return 0;
            }
        };

        if !output.status.success() {
            tracing::debug!(
                "adb devices failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return 0;
        }

        parse_device_count(&String::from_utf8_lossy(&output.stdout))
    }

    async fn resolve_installed_path(&self, package: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["shell", "pm", "path", package])
            .stdin(Stdio::null())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !output.status.success() {
            return Err(KeyprintError::NotFound(format!("package {}", package)));
        }

        parse_installed_path(&stdout)
            .ok_or_else(|| KeyprintError::NotFound(format!("package {}", package)))
    }

    async fn pull_artifact(&self, remote: &str, local: &Path) -> Result<()> {
        let local_str = local.to_str().ok_or_else(|| {
            KeyprintError::TransferFailed(format!(
                "local path is not valid UTF-8: {}",
                local.display()
            ))
        })?;

        let output = Command::new(&self.program)
            .args(["pull", remote, local_str])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| KeyprintError::TransferFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyprintError::TransferFailed(stderr.trim().to_string()));
        }

        tracing::debug!("Pulled {} to {}", remote, local.display());
        Ok(())
    }
}

/// Counts lines of `adb devices` output whose status column is `device`,
/// skipping the header and offline/unauthorized entries.
fn parse_device_count(raw: &str) -> usize {
    raw.lines()
        .skip(1)
        .filter(|line| {
            let mut cols = line.split_whitespace();
            matches!((cols.next(), cols.next()), (Some(serial), Some("device")) if !serial.is_empty())
        })
        .count()
}

/// Extracts the APK path from `pm path` output.
///
/// Split APKs produce several `package:` lines; only the first one is taken.
fn parse_installed_path(raw: &str) -> Option<String> {
    raw.lines()
        .find_map(|line| line.trim().strip_prefix("package:"))
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
}
