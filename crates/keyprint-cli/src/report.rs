//! Rendering of aggregation outcomes: console tables and the summary file.

use std::path::Path;

use keyprint_core::aggregator::RunOutcome;
use keyprint_core::record::SourceStatus;

use crate::output;

const LABEL_WIDTH: usize = 36;
const KIND_WIDTH: usize = 8;

/// Prints the per-source status list and the fingerprint table.
pub fn render(outcome: &RunOutcome) {
    output::print_section("Sources");
    for source in &outcome.sources {
        let line = match &source.detail {
            Some(detail) if source.status != SourceStatus::Found => {
                format!("{}: {} ({})", source.label, source.status, detail)
            }
            _ => format!("{}: {}", source.label, source.status),
        };
        match source.status {
            SourceStatus::Found => output::print_success(&line),
            SourceStatus::NotFound => println!("- {}", line),
            SourceStatus::InspectionFailed | SourceStatus::NoFingerprintsInOutput => {
                output::print_warning(&line)
            }
        }
    }

    if outcome.records.is_empty() {
        return;
    }

    output::print_section("Fingerprints");
    output::print_table_header(&[
        ("Source", LABEL_WIDTH),
        ("Kind", KIND_WIDTH),
        ("Fingerprint", 64),
    ]);
    for record in &outcome.records {
        output::print_table_row(&[
            (&record.source_label, LABEL_WIDTH),
            (record.kind.as_str(), KIND_WIDTH),
            (&record.value, 64),
        ]);
    }

    if let Some(first) = outcome.first_sha1() {
        println!();
        println!(
            "Register this SHA-1 first ({}): {}",
            first.source_label, first.value
        );
    }
}

/// Writes a plain-text summary, one block per source.
pub fn write_summary(path: &Path, outcome: &RunOutcome) -> std::io::Result<()> {
    std::fs::write(path, format_summary(outcome))
}

fn format_summary(outcome: &RunOutcome) -> String {
    let mut text = String::new();
    text.push_str(&format!(
        "keyprint fingerprint summary ({})\n\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    for source in &outcome.sources {
        text.push_str(&format!("[{}]\n", source.label));
        text.push_str(&format!("status: {}\n", source.status));
        if let Some(detail) = &source.detail {
            text.push_str(&format!("detail: {}\n", detail));
        }
        for record in outcome
            .records
            .iter()
            .filter(|r| r.source_label == source.label)
        {
            text.push_str(&format!("{}: {}\n", record.kind, record.value));
        }
        text.push('\n');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyprint_core::record::{FingerprintKind, FingerprintRecord, SourceReport};

    fn sample_outcome() -> RunOutcome {
        RunOutcome {
            records: vec![
                FingerprintRecord {
                    source_label: "Android Debug Keystore".to_string(),
                    kind: FingerprintKind::Sha1,
                    value: "AABBCC".to_string(),
                },
                FingerprintRecord {
                    source_label: "Android Debug Keystore".to_string(),
                    kind: FingerprintKind::Sha256,
                    value: "112233".to_string(),
                },
            ],
            sources: vec![
                SourceReport::new("Android Debug Keystore", SourceStatus::Found),
                SourceReport::with_detail(
                    "Titanium SDK Debug Keystore",
                    SourceStatus::NotFound,
                    "no SDK versions found",
                ),
            ],
        }
    }

    #[test]
    fn test_summary_has_one_block_per_source() {
        let text = format_summary(&sample_outcome());

        assert!(text.contains("[Android Debug Keystore]\nstatus: found\n"));
        assert!(text.contains("SHA-1: AABBCC\n"));
        assert!(text.contains("SHA-256: 112233\n"));
        assert!(text.contains("[Titanium SDK Debug Keystore]\nstatus: not found\n"));
        assert!(text.contains("detail: no SDK versions found\n"));
    }

    #[test]
    fn test_summary_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");

        write_summary(&path, &sample_outcome()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("keyprint fingerprint summary"));
    }
}
