//! Fingerprint record types shared between the aggregator and reporters.

use serde::Serialize;

/// Digest algorithm of a certificate fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerprintKind {
    Sha1,
    Sha256,
}

impl FingerprintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerprintKind::Sha1 => "SHA-1",
            FingerprintKind::Sha256 => "SHA-256",
        }
    }
}

impl std::fmt::Display for FingerprintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One extracted fingerprint, labeled with the keystore it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FingerprintRecord {
    /// Human-readable origin, e.g. "Android Debug Keystore".
    pub source_label: String,
    pub kind: FingerprintKind,
    /// Uppercase hex digest with separators removed.
    pub value: String,
}

/// Outcome of attempting one fingerprint source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceStatus {
    /// At least one fingerprint was extracted.
    Found,
    /// The keystore, SDK, or installed package is absent.
    NotFound,
    /// The certificate tool ran but could not read the source.
    InspectionFailed,
    /// The tool succeeded but neither digest label appeared.
    NoFingerprintsInOutput,
}

impl SourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStatus::Found => "found",
            SourceStatus::NotFound => "not found",
            SourceStatus::InspectionFailed => "unreadable",
            SourceStatus::NoFingerprintsInOutput => "no fingerprints in output",
        }
    }
}

impl std::fmt::Display for SourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-source status entry, one per attempted source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub label: String,
    pub status: SourceStatus,
    /// Extra context for failures (tool stderr, missing path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SourceReport {
    pub fn new(label: impl Into<String>, status: SourceStatus) -> Self {
        Self {
            label: label.into(),
            status,
            detail: None,
        }
    }

    pub fn with_detail(
        label: impl Into<String>,
        status: SourceStatus,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            status,
            detail: Some(detail.into()),
        }
    }
}
