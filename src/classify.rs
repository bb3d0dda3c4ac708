use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use regex::Regex;

use crate::extract::extract_text;
use crate::model::{
    AnalysisType, Exposure, Hazard, MetadataRecord, SignalLabel, SignalResult, Signals,
};

/// Return periods outside this window (years) are dropped as noise.
pub const RETURN_PERIOD_RANGE: RangeInclusive<u32> = 1..=10_000;

const HAZARD_PATTERNS: &[(Hazard, &str)] = &[
    (Hazard::Flood, r"flood(?:ing|s|ed)?"),
    (Hazard::Earthquake, r"earthquakes?"),
    (Hazard::Tsunami, r"tsunamis?"),
    (Hazard::Cyclone, r"cyclones?|hurricanes?|typhoons?"),
    (Hazard::Drought, r"droughts?"),
    (Hazard::Wildfire, r"wildfires?|forest\s*fires?|bushfires?"),
    (Hazard::Landslide, r"landslides?|mudslides?|mudflows?"),
    (Hazard::Volcanic, r"volcano(?:es)?|volcanic|eruptions?"),
];

const EXPOSURE_PATTERNS: &[(Exposure, &str)] = &[
    (Exposure::Building, r"buildings?|structures?|housing|houses?"),
    (
        Exposure::Infrastructure,
        r"infrastructure|roads?|bridges?|hospitals?|schools?|facility|facilities",
    ),
    (
        Exposure::Population,
        r"population|people|inhabitants|residents|affected\s*(?:population|people)",
    ),
    (
        Exposure::Agriculture,
        r"agriculture|agricultural|crops?|farmland|livestock|cattle",
    ),
];

const ANALYSIS_TYPE_PATTERNS: &[(AnalysisType, &str)] = &[
    (
        AnalysisType::Probabilistic,
        r"probabilistic|return\s*periods?|rp\s*[0-9]+|annual\s*exceedance|aep|aal|average\s*annual\s*loss",
    ),
    (
        AnalysisType::Deterministic,
        r"deterministic|scenario\s*based|single\s*event|historical\s*event",
    ),
    (
        AnalysisType::Empirical,
        r"empirical|observed|historical\s*data|recorded|actual",
    ),
];

// "RP 100", "flood_RP100_depth", "return period: 50-year", or the inverted
// "100-year return period". A letter directly before the keyword ("sharp 5")
// does not count.
const RETURN_PERIOD_PATTERN: &str = r"(?i)(?:^|[^a-z])(?:return\s*period|rp)\s*[:\s]*([0-9]+)(?:\s*-?\s*year)?|\b([0-9]+)\s*-?\s*year\s*return\s*period";

/// Compiled keyword tables. Build once per run and reuse for every record.
pub struct SignalClassifier {
    hazards: Vec<(Hazard, Regex)>,
    exposure: Vec<(Exposure, Regex)>,
    analysis_types: Vec<(AnalysisType, Regex)>,
    return_period: Regex,
}

impl SignalClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            hazards: compile_table(HAZARD_PATTERNS)?,
            exposure: compile_table(EXPOSURE_PATTERNS)?,
            analysis_types: compile_table(ANALYSIS_TYPE_PATTERNS)?,
            return_period: Regex::new(RETURN_PERIOD_PATTERN)
                .context("failed to compile return period regex")?,
        })
    }

    pub fn classify(&self, text: &str) -> Signals {
        let mut analysis_types = matching_labels(&self.analysis_types, text);
        // Anything the return-period reader accepts is probabilistic, even
        // when it sits inside a token like "RP100yr".
        if !analysis_types.contains(&AnalysisType::Probabilistic)
            && self.return_period.is_match(text)
        {
            analysis_types.insert(0, AnalysisType::Probabilistic);
        }

        Signals {
            hazards: matching_labels(&self.hazards, text),
            exposure: matching_labels(&self.exposure, text),
            analysis_types,
            return_periods: self.return_periods(text),
        }
    }

    pub fn classify_record(&self, record: &MetadataRecord) -> SignalResult {
        let text = extract_text(record);
        SignalResult {
            id: record.id_text(),
            title: record.title_text(),
            signals: self.classify(&text),
        }
    }

    fn return_periods(&self, text: &str) -> BTreeSet<u32> {
        self.return_period
            .captures_iter(text)
            .flat_map(|captures| [captures.get(1), captures.get(2)])
            .flatten()
            .filter_map(|value| value.as_str().parse::<u32>().ok())
            .filter(|years| RETURN_PERIOD_RANGE.contains(years))
            .collect()
    }
}

fn compile_table<L: SignalLabel>(table: &[(L, &str)]) -> Result<Vec<(L, Regex)>> {
    table
        .iter()
        .map(|&(label, pattern)| {
            let regex = Regex::new(&format!(r"(?i)\b(?:{pattern})\b")).with_context(|| {
                format!("failed to compile signal regex for {}", label.as_str())
            })?;
            Ok((label, regex))
        })
        .collect()
}

fn matching_labels<L: SignalLabel>(table: &[(L, Regex)], text: &str) -> Vec<L> {
    table
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|&(label, _)| label)
        .collect()
}

#[cfg(test)]
mod tests;
