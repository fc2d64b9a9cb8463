//! Orchestration of fingerprint discovery across the known keystore sources.
//!
//! Sources are attempted strictly in order: the Android debug keystore, the
//! Titanium SDK debug keystore, an optional production keystore, and the APK
//! of a package installed on a connected device. Every per-source failure is
//! recovered into a status entry; a run always completes.

use std::path::{Path, PathBuf};

use crate::bridge::DeviceBridge;
use crate::error::{KeyprintError, Result};
use crate::inspector::CertificateInspector;
use crate::locator::{self, OsKind};
use crate::parser::{self, ParsedFingerprints};
use crate::record::{FingerprintKind, FingerprintRecord, SourceReport, SourceStatus};

/// Alias and password baked into every Android debug keystore.
pub const DEBUG_KEYSTORE_ALIAS: &str = "androiddebugkey";
pub const DEBUG_KEYSTORE_PASS: &str = "android";

/// Alias and password of the debug keystore shipped with the Titanium SDK.
pub const SDK_KEYSTORE_ALIAS: &str = "tidev";
pub const SDK_KEYSTORE_PASS: &str = "tirocks";

/// Alias assumed for production keystores when none is given.
pub const DEFAULT_PRODUCTION_ALIAS: &str = "production";

const DEBUG_KEYSTORE_LABEL: &str = "Android Debug Keystore";
const SDK_KEYSTORE_LABEL: &str = "Titanium SDK Debug Keystore";
const PRODUCTION_KEYSTORE_LABEL: &str = "Production Keystore";

/// One keystore to inspect, with the credentials to open it.
#[derive(Debug, Clone)]
pub struct KeystoreSource {
    pub path: PathBuf,
    pub alias: String,
    pub store_password: String,
    pub key_password: String,
    /// Display name correlated to produced records.
    pub label: String,
}

impl KeystoreSource {
    /// The per-user debug keystore the Android tooling signs dev builds with.
    pub fn android_debug(path: PathBuf) -> Self {
        Self {
            path,
            alias: DEBUG_KEYSTORE_ALIAS.to_string(),
            store_password: DEBUG_KEYSTORE_PASS.to_string(),
            key_password: DEBUG_KEYSTORE_PASS.to_string(),
            label: DEBUG_KEYSTORE_LABEL.to_string(),
        }
    }

    /// The debug keystore bundled inside an SDK release directory.
    pub fn sdk_debug(sdk_path: &Path) -> Self {
        Self {
            path: sdk_path.join("android").join("dev_keystore"),
            alias: SDK_KEYSTORE_ALIAS.to_string(),
            store_password: SDK_KEYSTORE_PASS.to_string(),
            key_password: SDK_KEYSTORE_PASS.to_string(),
            label: SDK_KEYSTORE_LABEL.to_string(),
        }
    }
}

/// Caller-supplied production keystore coordinates.
#[derive(Debug, Clone)]
pub struct ProductionConfig {
    pub path: PathBuf,
    /// Defaults to [`DEFAULT_PRODUCTION_ALIAS`].
    pub alias: Option<String>,
    pub store_password: String,
    /// Defaults to the store password.
    pub key_password: Option<String>,
}

impl From<ProductionConfig> for KeystoreSource {
    fn from(config: ProductionConfig) -> Self {
        let key_password = config
            .key_password
            .unwrap_or_else(|| config.store_password.clone());
        Self {
            path: config.path,
            alias: config
                .alias
                .unwrap_or_else(|| DEFAULT_PRODUCTION_ALIAS.to_string()),
            store_password: config.store_password,
            key_password,
            label: PRODUCTION_KEYSTORE_LABEL.to_string(),
        }
    }
}

/// Inputs for one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Production keystore; the source is skipped when absent.
    pub production: Option<ProductionConfig>,
    /// Package installed on a connected device; the source is skipped when
    /// absent or when no device is connected.
    pub package: Option<String>,
    /// Override for the Android debug keystore location. Defaults to
    /// `~/.android/debug.keystore`.
    pub debug_keystore: Option<PathBuf>,
    /// Override for the SDK installation root. Defaults to the conventional
    /// per-OS location.
    pub sdk_base: Option<PathBuf>,
}

/// Everything one run produced: the ordered fingerprint collection plus a
/// status entry per attempted source.
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    pub records: Vec<FingerprintRecord>,
    pub sources: Vec<SourceReport>,
}

impl RunOutcome {
    /// First SHA-1 collected, in source order. Reporters surface this one
    /// as the value to register first.
    pub fn first_sha1(&self) -> Option<&FingerprintRecord> {
        self.records
            .iter()
            .find(|r| r.kind == FingerprintKind::Sha1)
    }
}

/// Walks the fixed source list and accumulates fingerprint records.
pub struct Aggregator<I, B> {
    inspector: I,
    bridge: B,
}

impl<I, B> Aggregator<I, B>
where
    I: CertificateInspector,
    B: DeviceBridge,
{
    pub fn new(inspector: I, bridge: B) -> Self {
        Self { inspector, bridge }
    }

    /// Attempts all four sources in order and returns the collected records.
    ///
    /// Never fails: every per-source error becomes a status entry. Callers
    /// decide what an empty record collection means.
    pub async fn run_all(&self, config: &RunConfig) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        // 1. Android debug keystore.
        match self.debug_keystore_source(config) {
            Ok(source) => self.inspect_source(&source, &mut outcome).await,
            Err(e) => outcome.sources.push(SourceReport::with_detail(
                DEBUG_KEYSTORE_LABEL,
                SourceStatus::NotFound,
                e.to_string(),
            )),
        }

        // 2. SDK debug keystore. Not attempted at all when no SDK install
        //    is found; the skip still shows up in the report.
        match self.locate_sdk(config) {
            Ok(sdk) => {
                let source = KeystoreSource::sdk_debug(&sdk.path());
                self.inspect_source(&source, &mut outcome).await;
            }
            Err(e) => {
                tracing::debug!("SDK debug keystore skipped: {}", e);
                outcome.sources.push(SourceReport::with_detail(
                    SDK_KEYSTORE_LABEL,
                    SourceStatus::NotFound,
                    e.to_string(),
                ));
            }
        }

        // 3. Production keystore, only when the caller supplied one.
        if let Some(production) = config.production.clone() {
            let source = KeystoreSource::from(production);
            self.inspect_source(&source, &mut outcome).await;
        }

        // 4. Installed APK, only with a package name and a connected device.
        if let Some(package) = config.package.as_deref() {
            let devices = self.bridge.connected_device_count().await;
            if devices == 0 {
                tracing::debug!("No connected device, skipping installed APK source");
            } else {
                self.inspect_installed_package(package, &mut outcome).await;
            }
        }

        outcome
    }

    fn debug_keystore_source(&self, config: &RunConfig) -> Result<KeystoreSource> {
        let path = match &config.debug_keystore {
            Some(path) => path.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| KeyprintError::NotFound("home directory".to_string()))?
                .join(".android")
                .join("debug.keystore"),
        };
        Ok(KeystoreSource::android_debug(path))
    }

    fn locate_sdk(&self, config: &RunConfig) -> Result<locator::SdkInstallation> {
        match &config.sdk_base {
            Some(base) => locator::locate_under(base),
            None => locator::locate(OsKind::current()),
        }
    }

    /// Inspects one keystore and folds the result into the outcome.
    async fn inspect_source(&self, source: &KeystoreSource, outcome: &mut RunOutcome) {
        if !source.path.exists() {
            outcome.sources.push(SourceReport::with_detail(
                &source.label,
                SourceStatus::NotFound,
                format!("{} does not exist", source.path.display()),
            ));
            return;
        }

        let raw = self
            .inspector
            .inspect_keystore(
                &source.path,
                &source.alias,
                &source.store_password,
                &source.key_password,
            )
            .await;

        match raw {
            Ok(raw) => self.collect(parser::parse(&raw), &source.label, outcome),
            Err(e) => {
                tracing::warn!("Could not inspect {}: {}", source.path.display(), e);
                outcome.sources.push(SourceReport::with_detail(
                    &source.label,
                    SourceStatus::InspectionFailed,
                    e.to_string(),
                ));
            }
        }
    }

    /// Resolves, pulls, and inspects an installed package's APK.
    ///
    /// The pulled copy lives in a scoped temp directory and is removed when
    /// this function returns, on every path.
    async fn inspect_installed_package(&self, package: &str, outcome: &mut RunOutcome) {
        let label = format!("Installed APK ({})", package);

        let remote = match self.bridge.resolve_installed_path(package).await {
            Ok(remote) => remote,
            Err(KeyprintError::NotFound(detail)) => {
                outcome.sources.push(SourceReport::with_detail(
                    &label,
                    SourceStatus::NotFound,
                    detail,
                ));
                return;
            }
            Err(e) => {
                outcome.sources.push(SourceReport::with_detail(
                    &label,
                    SourceStatus::InspectionFailed,
                    e.to_string(),
                ));
                return;
            }
        };

        let scratch = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                outcome.sources.push(SourceReport::with_detail(
                    &label,
                    SourceStatus::InspectionFailed,
                    format!("could not create temp directory: {}", e),
                ));
                return;
            }
        };
        let local = scratch.path().join("pulled.apk");

        let raw = match self.bridge.pull_artifact(&remote, &local).await {
            Ok(()) => self.inspector.inspect_artifact(&local).await,
            Err(e) => Err(e),
        };

        // scratch dropping below removes the pulled APK regardless of how
        // inspection went.
        match raw {
            Ok(raw) => self.collect(parser::parse(&raw), &label, outcome),
            Err(e) => {
                tracing::warn!("Could not inspect installed APK for {}: {}", package, e);
                outcome.sources.push(SourceReport::with_detail(
                    &label,
                    SourceStatus::InspectionFailed,
                    e.to_string(),
                ));
            }
        }

        drop(scratch);
    }

    /// Appends one record per extracted digest, or notes an empty parse.
    fn collect(&self, parsed: ParsedFingerprints, label: &str, outcome: &mut RunOutcome) {
        if parsed.is_empty() {
            outcome.sources.push(SourceReport::new(
                label,
                SourceStatus::NoFingerprintsInOutput,
            ));
            return;
        }

        if let Some(sha1) = parsed.sha1 {
            outcome.records.push(FingerprintRecord {
                source_label: label.to_string(),
                kind: FingerprintKind::Sha1,
                value: sha1,
            });
        }
        if let Some(sha256) = parsed.sha256 {
            outcome.records.push(FingerprintRecord {
                source_label: label.to_string(),
                kind: FingerprintKind::Sha256,
                value: sha256,
            });
        }

        outcome
            .sources
            .push(SourceReport::new(label, SourceStatus::Found));
    }
}
