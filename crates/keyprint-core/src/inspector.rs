//! Certificate inspection via the JDK `keytool` CLI.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{KeyprintError, Result};

/// Capability of listing certificates out of keystores and signed artifacts.
///
/// The aggregator depends on this trait only; tests substitute a fake that
/// returns canned listings.
#[async_trait]
pub trait CertificateInspector: Send + Sync {
    /// Verifies the underlying tool is present. Called once before any
    /// source is attempted; failure is the only run-level fatal error.
    async fn preflight(&self) -> Result<()>;

    /// Returns the raw certificate listing for an alias in a keystore.
    async fn inspect_keystore(
        &self,
        path: &Path,
        alias: &str,
        store_pass: &str,
        key_pass: &str,
    ) -> Result<String>;

    /// Returns the raw signer-certificate listing embedded in an artifact
    /// (an APK pulled from a device). No alias or passwords involved.
    async fn inspect_artifact(&self, path: &Path) -> Result<String>;
}

/// `CertificateInspector` backed by the JDK `keytool` binary.
pub struct Keytool {
    program: String,
}

impl Keytool {
    pub fn new() -> Self {
        Self {
            program: "keytool".to_string(),
        }
    }

    /// Uses a non-default binary name or path, e.g. a JDK outside PATH.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeyprintError::ToolMissing(self.program.clone())
                } else {
                    KeyprintError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KeyprintError::InspectionFailed(
                stderr.trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for Keytool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertificateInspector for Keytool {
    async fn preflight(&self) -> Result<()> {
        // keytool prints usage and exits non-zero for -help on some JDKs;
        // only a spawn failure means the tool is missing.
        match Command::new(&self.program)
            .arg("-help")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(KeyprintError::ToolMissing(self.program.clone()))
            }
            Err(e) => Err(KeyprintError::Io(e)),
        }
    }

    async fn inspect_keystore(
        &self,
        path: &Path,
        alias: &str,
        store_pass: &str,
        key_pass: &str,
    ) -> Result<String> {
        let path_str = path.to_str().ok_or_else(|| {
            KeyprintError::InspectionFailed(format!(
                "keystore path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        tracing::debug!("Inspecting keystore {} (alias {})", path.display(), alias);

        self.run(&[
            "-list",
            "-v",
            "-keystore",
            path_str,
            "-alias",
            alias,
            "-storepass",
            store_pass,
            "-keypass",
            key_pass,
        ])
        .await
    }

    async fn inspect_artifact(&self, path: &Path) -> Result<String> {
        let path_str = path.to_str().ok_or_else(|| {
            KeyprintError::InspectionFailed(format!(
                "artifact path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        tracing::debug!("Inspecting artifact {}", path.display());

        self.run(&["-printcert", "-jarfile", path_str]).await
    }
}
