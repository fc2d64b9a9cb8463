//! Certificate fingerprint extraction from raw `keytool` listings.
//!
//! `keytool` spells digest labels differently across versions (`SHA1:` vs
//! `SHA-1:`), so both forms are accepted. Only the first occurrence of each
//! label is taken; when a listing carries a certificate chain, fingerprints
//! of later certificates are ignored. Known limitation carried over from the
//! original tool.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Digests extracted from one certificate listing.
///
/// Both fields empty is a valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFingerprints {
    pub sha1: Option<String>,
    pub sha256: Option<String>,
}

impl ParsedFingerprints {
    pub fn is_empty(&self) -> bool {
        self.sha1.is_none() && self.sha256.is_none()
    }
}

fn sha1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)SHA-?1:[ \t]*([^\r\n]+)").unwrap())
}

fn sha256_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)SHA-?256:[ \t]*([^\r\n]+)").unwrap())
}

/// Extracts SHA-1 and SHA-256 fingerprints from a certificate listing.
///
/// Digests are normalized to uppercase hex with separators removed, so
/// `SHA1: AB:CD:EF` yields `ABCDEF`.
pub fn parse(raw: &str) -> ParsedFingerprints {
    ParsedFingerprints {
        sha1: extract(raw, sha1_re(), 40),
        sha256: extract(raw, sha256_re(), 64),
    }
}

fn extract(raw: &str, re: &Regex, expected_len: usize) -> Option<String> {
    let captures = re.captures(raw)?;
    let digest = normalize(captures.get(1)?.as_str());
    if digest.is_empty() {
        return None;
    }
    if digest.len() != expected_len || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
        tracing::warn!(
            "Fingerprint '{}' does not look like a {}-char hex digest",
            digest,
            expected_len
        );
    }
    Some(digest)
}

/// Strips `:` separators and whitespace, uppercases the rest.
fn normalize(digest: &str) -> String {
    digest
        .chars()
        .filter(|c| *c != ':' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}
