use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::classify::SignalClassifier;
use crate::errors::RecordReadError;
use crate::model::{
    AggregateReport, MetadataRecord, ReturnPeriodBucket, SignalLabel, SignalResult,
};

pub fn load_record(path: &Path) -> Result<MetadataRecord, RecordReadError> {
    let raw = fs::read(path).map_err(|source| RecordReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&raw).map_err(|source| RecordReadError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Running totals for one scan. Owned by the scan loop and folded once per
/// file, in processing order.
#[derive(Debug, Default)]
pub struct SignalAggregator {
    report: AggregateReport,
}

impl SignalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load, classify and count one metadata file. Unreadable files are
    /// recorded as errors and never abort the scan.
    pub fn fold_file(&mut self, classifier: &SignalClassifier, path: &Path) {
        match load_record(path) {
            Ok(record) => self.record_signals(classifier.classify_record(&record)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable metadata record");
                self.record_error(&err);
            }
        }
    }

    pub fn record_signals(&mut self, result: SignalResult) {
        let report = &mut self.report;
        let signals = &result.signals;
        report.summary.total_files += 1;

        if !signals.hazards.is_empty() {
            report.summary.files_with_hazards += 1;
            count_labels(&mut report.hazard_counts, &signals.hazards);
        }

        if !signals.exposure.is_empty() {
            report.summary.files_with_exposure += 1;
            count_labels(&mut report.exposure_counts, &signals.exposure);
        }

        if !signals.analysis_types.is_empty() {
            report.summary.files_with_analysis_types += 1;
            count_labels(&mut report.analysis_type_counts, &signals.analysis_types);
        }

        if !signals.return_periods.is_empty() {
            report.summary.files_with_return_periods += 1;
            for &years in &signals.return_periods {
                *report
                    .return_period_distribution
                    .entry(ReturnPeriodBucket::for_years(years))
                    .or_default() += 1;
            }
        }

        if signals.is_detail_worthy() {
            report.detailed_results.push(result);
        }
    }

    pub fn record_error(&mut self, err: &RecordReadError) {
        self.report.summary.total_files += 1;
        self.report.summary.errors += 1;
        self.report.errors.push(err.to_string());
    }

    pub fn processed(&self) -> usize {
        self.report.summary.total_files
    }

    /// Close out the run. Leaves the aggregator untouched, so calling it
    /// twice yields the same report.
    pub fn finalize(&self, elapsed: Duration) -> AggregateReport {
        let mut report = self.report.clone();
        report.summary.processing_time_seconds = round_seconds(elapsed);
        report
    }
}

fn count_labels<L: SignalLabel>(counts: &mut BTreeMap<L, usize>, labels: &[L]) {
    for &label in labels {
        *counts.entry(label).or_default() += 1;
    }
}

fn round_seconds(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
