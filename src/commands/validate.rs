use anyhow::Result;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::model::{CheckSummary, Corpus, CorpusQualityReport, QualityCheck};
use crate::parser::{ClassificationStrategy, int_to_roman};
use crate::util::{now_utc_string, write_json_pretty};

use super::store::{load_corpus, open_read_only};

pub fn run(args: ValidateArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let quality_report_path = args
        .quality_report_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join("corpus_quality_report.json"));
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| args.cache_root.join("ubbl_corpus.sqlite"));

    let connection = open_read_only(&db_path)?;
    let corpus = load_corpus(&connection)?;

    let strategy = ClassificationStrategy::default();
    let checks = build_checks(&strategy, &corpus);
    let summary = summarize_checks(&checks);
    let issues = checks
        .iter()
        .filter(|check| check.result == "failed")
        .map(|check| format!("{} failed: {}", check.name, check.detail))
        .collect::<Vec<String>>();

    for check in &checks {
        match check.result.as_str() {
            "failed" => warn!(check = %check.check_id, detail = %check.detail, "check failed"),
            result => info!(check = %check.check_id, result = %result, "check evaluated"),
        }
    }

    let report = CorpusQualityReport {
        manifest_version: 1,
        generated_at: now_utc_string(),
        db_path: db_path.display().to_string(),
        checks,
        summary,
        issues,
    };

    write_json_pretty(&quality_report_path, &report)?;

    info!(
        path = %quality_report_path.display(),
        passed = report.summary.passed,
        failed = report.summary.failed,
        pending = report.summary.pending,
        "wrote corpus quality report"
    );

    Ok(())
}

fn build_checks(strategy: &ClassificationStrategy, corpus: &Corpus) -> Vec<QualityCheck> {
    let mut checks = Vec::new();
    let total = corpus.clauses.len();
    let (band_low, band_high) = strategy.expected_clause_band;

    checks.push(QualityCheck {
        check_id: "U-001".to_string(),
        name: "Clause total within expected band".to_string(),
        result: if total == 0 {
            "pending"
        } else if total >= band_low && total <= band_high {
            "pass"
        } else {
            "failed"
        }
        .to_string(),
        detail: format!("{total} clauses, expected [{band_low}, {band_high}]"),
    });

    let sequence_breaks = corpus
        .clauses
        .iter()
        .enumerate()
        .filter(|(index, clause)| clause.sequence != *index as u32 + 1)
        .count();
    checks.push(QualityCheck {
        check_id: "U-002".to_string(),
        name: "Sequence gap-free from 1".to_string(),
        result: check_result(total, sequence_breaks),
        detail: format!("{sequence_breaks} out-of-order sequence values"),
    });

    let orphaned = corpus
        .clauses
        .iter()
        .filter(|clause| {
            !corpus
                .parts
                .iter()
                .any(|part| part.ordinal == clause.part_ordinal)
        })
        .count();
    checks.push(QualityCheck {
        check_id: "U-003".to_string(),
        name: "Clause part ownership".to_string(),
        result: check_result(total, orphaned),
        detail: format!("{orphaned} clauses referencing unknown parts"),
    });

    let title_duplicates = corpus
        .clauses
        .iter()
        .filter(|clause| {
            !clause.title.is_empty() && clause.body.starts_with(clause.title.as_str())
        })
        .count();
    checks.push(QualityCheck {
        check_id: "U-004".to_string(),
        name: "Title not duplicated into body".to_string(),
        result: check_result(total, title_duplicates),
        detail: format!("{title_duplicates} clauses with title-prefixed bodies"),
    });

    let range_violations = corpus
        .clauses
        .iter()
        .filter(|clause| {
            clause.metadata.complexity_level < 1 || clause.metadata.complexity_level > 5
        })
        .count();
    checks.push(QualityCheck {
        check_id: "U-005".to_string(),
        name: "Complexity levels within range".to_string(),
        result: check_result(total, range_violations),
        detail: format!("{range_violations} clauses outside complexity 1..=5"),
    });

    let snapshot_mismatches = corpus
        .clauses
        .iter()
        .filter(|clause| {
            corpus
                .parts
                .iter()
                .find(|part| part.ordinal == clause.part_ordinal)
                .map(|part| {
                    part.roman_label != clause.part_label || part.title != clause.part_title
                })
                .unwrap_or(false)
        })
        .count();
    checks.push(QualityCheck {
        check_id: "U-006".to_string(),
        name: "Part snapshots consistent".to_string(),
        result: check_result(total, snapshot_mismatches),
        detail: format!("{snapshot_mismatches} clauses with stale part snapshots"),
    });

    let label_mismatches = corpus
        .parts
        .iter()
        .filter(|part| part.roman_label != int_to_roman(part.ordinal))
        .count();
    checks.push(QualityCheck {
        check_id: "U-007".to_string(),
        name: "Part labels canonical".to_string(),
        result: check_result(corpus.parts.len(), label_mismatches),
        detail: format!("{label_mismatches} parts with non-canonical roman labels"),
    });

    checks
}

fn check_result(total: usize, violations: usize) -> String {
    if total == 0 {
        "pending"
    } else if violations == 0 {
        "pass"
    } else {
        "failed"
    }
    .to_string()
}

fn summarize_checks(checks: &[QualityCheck]) -> CheckSummary {
    CheckSummary {
        total: checks.len(),
        passed: checks.iter().filter(|check| check.result == "pass").count(),
        failed: checks
            .iter()
            .filter(|check| check.result == "failed")
            .count(),
        pending: checks
            .iter()
            .filter(|check| check.result == "pending")
            .count(),
    }
}
