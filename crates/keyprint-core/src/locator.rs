//! Titanium SDK installation discovery.
//!
//! The mobile SDK installs one directory per release under an OS-specific
//! root in the user's home directory. The locator finds that root and picks
//! the newest release by numeric version ordering.

use std::path::{Path, PathBuf};

use crate::error::{KeyprintError, Result};

/// Host operating system, as far as SDK path conventions care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    MacOs,
    Linux,
    Windows,
    Unknown,
}

impl OsKind {
    /// Detects the OS the process is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            OsKind::MacOs
        } else if cfg!(target_os = "linux") {
            OsKind::Linux
        } else if cfg!(target_os = "windows") {
            OsKind::Windows
        } else {
            OsKind::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsKind::MacOs => "macos",
            OsKind::Linux => "linux",
            OsKind::Windows => "windows",
            OsKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A discovered multi-version SDK installation.
#[derive(Debug, Clone)]
pub struct SdkInstallation {
    /// OS-specific root holding one directory per SDK release.
    pub base_path: PathBuf,
    /// Version-like child directory names found under the root.
    pub versions: Vec<String>,
    /// The highest version under numeric component ordering.
    pub selected: String,
}

impl SdkInstallation {
    /// Path of the selected SDK release directory.
    pub fn path(&self) -> PathBuf {
        self.base_path.join(&self.selected)
    }
}

/// Returns the conventional SDK root for the given OS.
///
/// All roots live under the user's home directory. `Unknown` has no
/// convention and always fails with `NotFound`.
pub fn sdk_base_dir(os: OsKind) -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| KeyprintError::NotFound("home directory".to_string()))?;

    let base = match os {
        OsKind::MacOs => home.join("Library/Application Support/Titanium/mobilesdk/osx"),
        OsKind::Linux => home.join(".titanium/mobilesdk/linux"),
        OsKind::Windows => home.join("AppData").join("Roaming").join("Titanium").join("mobilesdk").join("win32"),
        OsKind::Unknown => {
            return Err(KeyprintError::NotFound(format!(
                "SDK install location for OS '{}'",
                os
            )));
        }
    };

    Ok(base)
}

/// Locates the newest SDK release for the given OS.
pub fn locate(os: OsKind) -> Result<SdkInstallation> {
    locate_under(&sdk_base_dir(os)?)
}

/// Locates the newest SDK release under an explicit root directory.
pub fn locate_under(base: &Path) -> Result<SdkInstallation> {
    if !base.is_dir() {
        return Err(KeyprintError::NotFound(format!(
            "SDK directory {}",
            base.display()
        )));
    }

    let mut versions = Vec::new();
    for entry in std::fs::read_dir(base)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if version_key(&name).is_some() {
            versions.push(name);
        }
    }

    let selected = versions
        .iter()
        .max_by_key(|name| version_key(name))
        .cloned()
        .ok_or_else(|| {
            KeyprintError::NotFound(format!(
                "no SDK versions under {}",
                base.display()
            ))
        })?;

    tracing::debug!(
        "Selected SDK version {} under {} ({} candidates)",
        selected,
        base.display(),
        versions.len()
    );

    Ok(SdkInstallation {
        base_path: base.to_path_buf(),
        versions,
        selected,
    })
}

/// Parses the leading numeric dot-separated components of a directory name.
///
/// Returns `None` for names that do not start with at least two numeric
/// components (`9.2.0` and `12.1.0.GA` qualify, `tmp` and `9` do not).
/// Comparison of the returned keys is numeric per component, so `10.0.0`
/// orders above `9.9.9`.
fn version_key(name: &str) -> Option<Vec<u64>> {
    let mut components = Vec::new();
    for piece in name.split('.') {
        match piece.parse::<u64>() {
            Ok(n) => components.push(n),
            Err(_) => break,
        }
    }
    if components.len() < 2 {
        return None;
    }
    Some(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkdirs(base: &Path, names: &[&str]) {
        for name in names {
            std::fs::create_dir(base.join(name)).unwrap();
        }
    }

    #[test]
    fn test_version_key_shapes() {
        assert_eq!(version_key("9.2.0"), Some(vec![9, 2, 0]));
        assert_eq!(version_key("12.1.0.GA"), Some(vec![12, 1, 0]));
        assert_eq!(version_key("9"), None);
        assert_eq!(version_key("tmp"), None);
        assert_eq!(version_key("v9.2"), None);
    }

    #[test]
    fn test_selects_numerically_highest_version() {
        let dir = tempfile::tempdir().unwrap();
        mkdirs(dir.path(), &["9.2.0", "10.0.0", "9.9.9"]);

        let sdk = locate_under(dir.path()).unwrap();
        assert_eq!(sdk.selected, "10.0.0");
        assert_eq!(sdk.path(), dir.path().join("10.0.0"));
        assert_eq!(sdk.versions.len(), 3);
    }

    #[test]
    fn test_ignores_non_version_children() {
        let dir = tempfile::tempdir().unwrap();
        mkdirs(dir.path(), &["9.2.0", "modules", "tmp"]);
        std::fs::write(dir.path().join("11.0.0"), b"a file, not a dir").unwrap();

        let sdk = locate_under(dir.path()).unwrap();
        assert_eq!(sdk.selected, "9.2.0");
        assert_eq!(sdk.versions, vec!["9.2.0".to_string()]);
    }

    #[test]
    fn test_missing_base_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            locate_under(&missing),
            Err(KeyprintError::NotFound(_))
        ));
    }

    #[test]
    fn test_no_version_children_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        mkdirs(dir.path(), &["modules", "cache"]);
        assert!(matches!(
            locate_under(dir.path()),
            Err(KeyprintError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_os_has_no_base_dir() {
        assert!(matches!(
            sdk_base_dir(OsKind::Unknown),
            Err(KeyprintError::NotFound(_))
        ));
    }
}
