use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One dataset metadata document as dumped from HDX.
///
/// Only the fields the signal scan reads are modelled; everything else in
/// the document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataRecord {
    pub id: Option<TextField>,
    pub title: Option<TextField>,
    pub name: Option<TextField>,
    pub notes: Option<TextField>,
    pub dataset_source: Option<TextField>,
    pub organization: Option<TextField>,
    pub methodology_other: Option<TextField>,
    pub caveats: Option<TextField>,
    pub tags: Option<Vec<TagEntry>>,
    pub resources: Option<Vec<ResourceEntry>>,
}

impl MetadataRecord {
    pub fn id_text(&self) -> String {
        field_text(self.id.as_ref())
    }

    pub fn title_text(&self) -> String {
        field_text(self.title.as_ref())
    }
}

fn field_text(field: Option<&TextField>) -> String {
    field
        .and_then(TextField::as_text)
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// A scalar metadata value. CKAN dumps are not consistent about types
/// (`organization` is sometimes an object), so non-string values are kept
/// and rendered as compact JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextField {
    Text(String),
    Other(Value),
}

impl TextField {
    /// Text contribution of this value, or `None` when the value is empty
    /// or falsy.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(text) if text.is_empty() => None,
            Self::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Self::Other(value) if is_falsy(value) => None,
            Self::Other(value) => Some(Cow::Owned(value.to_string())),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    Plain(String),
    Named { name: Option<String> },
}

impl TagEntry {
    pub fn as_text(&self) -> Option<&str> {
        let text = match self {
            Self::Plain(text) => text.as_str(),
            Self::Named { name } => name.as_deref()?,
        };
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceEntry {
    pub name: Option<TextField>,
    pub description: Option<TextField>,
}

/// A label from one of the fixed signal tables.
pub trait SignalLabel: Copy + Ord + Serialize {
    fn as_str(self) -> &'static str;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    Flood,
    Earthquake,
    Tsunami,
    Cyclone,
    Drought,
    Wildfire,
    Landslide,
    Volcanic,
}

impl SignalLabel for Hazard {
    fn as_str(self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Earthquake => "earthquake",
            Self::Tsunami => "tsunami",
            Self::Cyclone => "cyclone",
            Self::Drought => "drought",
            Self::Wildfire => "wildfire",
            Self::Landslide => "landslide",
            Self::Volcanic => "volcanic",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exposure {
    Building,
    Infrastructure,
    Population,
    Agriculture,
}

impl SignalLabel for Exposure {
    fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Infrastructure => "infrastructure",
            Self::Population => "population",
            Self::Agriculture => "agriculture",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Probabilistic,
    Deterministic,
    Empirical,
}

impl SignalLabel for AnalysisType {
    fn as_str(self) -> &'static str {
        match self {
            Self::Probabilistic => "probabilistic",
            Self::Deterministic => "deterministic",
            Self::Empirical => "empirical",
        }
    }
}

/// Histogram bucket for return-period values, in years.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum ReturnPeriodBucket {
    #[serde(rename = "1-10")]
    UpTo10,
    #[serde(rename = "11-25")]
    UpTo25,
    #[serde(rename = "26-50")]
    UpTo50,
    #[serde(rename = "51-100")]
    UpTo100,
    #[serde(rename = "101-250")]
    UpTo250,
    #[serde(rename = "251-500")]
    UpTo500,
    #[serde(rename = "501-1000")]
    UpTo1000,
    #[serde(rename = "1000+")]
    Over1000,
}

impl ReturnPeriodBucket {
    pub const ALL: [Self; 8] = [
        Self::UpTo10,
        Self::UpTo25,
        Self::UpTo50,
        Self::UpTo100,
        Self::UpTo250,
        Self::UpTo500,
        Self::UpTo1000,
        Self::Over1000,
    ];

    pub fn for_years(years: u32) -> Self {
        match years {
            0..=10 => Self::UpTo10,
            11..=25 => Self::UpTo25,
            26..=50 => Self::UpTo50,
            51..=100 => Self::UpTo100,
            101..=250 => Self::UpTo250,
            251..=500 => Self::UpTo500,
            501..=1000 => Self::UpTo1000,
            _ => Self::Over1000,
        }
    }
}

impl SignalLabel for ReturnPeriodBucket {
    fn as_str(self) -> &'static str {
        match self {
            Self::UpTo10 => "1-10",
            Self::UpTo25 => "11-25",
            Self::UpTo50 => "26-50",
            Self::UpTo100 => "51-100",
            Self::UpTo250 => "101-250",
            Self::UpTo500 => "251-500",
            Self::UpTo1000 => "501-1000",
            Self::Over1000 => "1000+",
        }
    }
}

/// Signals found in one text blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signals {
    pub hazards: Vec<Hazard>,
    pub exposure: Vec<Exposure>,
    pub analysis_types: Vec<AnalysisType>,
    pub return_periods: BTreeSet<u32>,
}

impl Signals {
    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
            && self.exposure.is_empty()
            && self.analysis_types.is_empty()
            && self.return_periods.is_empty()
    }

    /// Exposure matches alone do not earn a detail entry.
    pub fn is_detail_worthy(&self) -> bool {
        !self.hazards.is_empty()
            || !self.analysis_types.is_empty()
            || !self.return_periods.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalResult {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub signals: Signals,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportSummary {
    pub total_files: usize,
    pub files_with_hazards: usize,
    pub files_with_exposure: usize,
    pub files_with_analysis_types: usize,
    pub files_with_return_periods: usize,
    pub errors: usize,
    pub processing_time_seconds: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregateReport {
    pub summary: ReportSummary,
    pub hazard_counts: BTreeMap<Hazard, usize>,
    pub exposure_counts: BTreeMap<Exposure, usize>,
    pub analysis_type_counts: BTreeMap<AnalysisType, usize>,
    pub return_period_distribution: BTreeMap<ReturnPeriodBucket, usize>,
    pub detailed_results: Vec<SignalResult>,
    pub errors: Vec<String>,
}
