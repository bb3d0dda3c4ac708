use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{info, warn};

use crate::aggregate::SignalAggregator;
use crate::classify::SignalClassifier;
use crate::cli::ScanArgs;
use crate::model::{AggregateReport, ReturnPeriodBucket, SignalLabel};
use crate::util::{discover_json_files, now_utc_string, write_json_pretty};

pub fn run(args: ScanArgs) -> Result<()> {
    let report = scan_directory(&args.metadata_dir, args.progress_every)?;
    log_report(&report);

    if args.dry_run {
        info!(output = %args.output.display(), "dry-run: signal report not written");
        return Ok(());
    }

    write_json_pretty(&args.output, &report)?;
    info!(path = %args.output.display(), "wrote signal analysis report");

    Ok(())
}

/// Classify every `*.json` record in `metadata_dir` and fold the results
/// into one finalized report.
pub fn scan_directory(metadata_dir: &Path, progress_every: usize) -> Result<AggregateReport> {
    let started = Instant::now();
    let classifier = SignalClassifier::new()?;
    let files = discover_json_files(metadata_dir)?;
    let total = files.len();

    info!(
        metadata_dir = %metadata_dir.display(),
        file_count = total,
        started_at = %now_utc_string(),
        "starting signal scan"
    );
    if files.is_empty() {
        warn!(metadata_dir = %metadata_dir.display(), "no metadata files found");
    }

    let mut aggregator = SignalAggregator::new();
    for path in &files {
        aggregator.fold_file(&classifier, path);

        let processed = aggregator.processed();
        if progress_every > 0 && processed % progress_every == 0 {
            log_progress(processed, total, started.elapsed());
        }
    }

    let report = aggregator.finalize(started.elapsed());
    info!(
        finished_at = %now_utc_string(),
        elapsed_seconds = report.summary.processing_time_seconds,
        "signal scan complete"
    );

    Ok(report)
}

fn log_progress(processed: usize, total: usize, elapsed: Duration) {
    let elapsed_seconds = elapsed.as_secs_f64();
    let rate = if elapsed_seconds > 0.0 {
        processed as f64 / elapsed_seconds
    } else {
        0.0
    };
    let remaining_seconds = if rate > 0.0 {
        total.saturating_sub(processed) as f64 / rate
    } else {
        0.0
    };
    let percent = if total == 0 {
        100.0
    } else {
        processed as f64 * 100.0 / total as f64
    };

    info!(
        processed,
        total,
        percent = format_args!("{percent:.1}"),
        elapsed_seconds = format_args!("{elapsed_seconds:.1}"),
        remaining_seconds = format_args!("{remaining_seconds:.1}"),
        "scan progress"
    );
}

fn log_report(report: &AggregateReport) {
    let summary = &report.summary;
    info!(
        total_files = summary.total_files,
        files_with_hazards = summary.files_with_hazards,
        files_with_exposure = summary.files_with_exposure,
        files_with_analysis_types = summary.files_with_analysis_types,
        files_with_return_periods = summary.files_with_return_periods,
        detailed_results = report.detailed_results.len(),
        errors = summary.errors,
        processing_time_seconds = summary.processing_time_seconds,
        "signal summary"
    );

    log_label_counts("hazard", &report.hazard_counts);
    log_label_counts("exposure", &report.exposure_counts);
    log_label_counts("analysis_type", &report.analysis_type_counts);

    for bucket in ReturnPeriodBucket::ALL {
        if let Some(&count) = report.return_period_distribution.get(&bucket) {
            info!(bucket = bucket.as_str(), count, "return period distribution");
        }
    }
}

fn log_label_counts<L: SignalLabel>(category: &str, counts: &BTreeMap<L, usize>) {
    for (label, count) in ranked_counts(counts) {
        info!(category, label = label.as_str(), count, "signal count");
    }
}

/// Labels by descending count, ties broken by label name.
fn ranked_counts<L: SignalLabel>(counts: &BTreeMap<L, usize>) -> Vec<(L, usize)> {
    let mut ranked = counts
        .iter()
        .map(|(&label, &count)| (label, count))
        .collect::<Vec<(L, usize)>>();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
    ranked
}
