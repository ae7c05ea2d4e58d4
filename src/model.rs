//! Metric data types.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, ordered label of a sample.
///
/// Kept exactly as it appears in the input so that it is reported verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Text(text) => f.write_str(text),
            Timestamp::Number(num) => write!(f, "{num}"),
        }
    }
}

/// Single raw measurement of the metric.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(rename = "dtime")]
    pub timestamp: Timestamp,

    #[serde(rename = "metricValue")]
    pub raw_value: f64,
}

/// Input document: `{ "data": [ { "metricData": [ ... ] } ] }`.
#[derive(Debug, Deserialize)]
pub struct MetricsDocument {
    data: Vec<MetricSet>,
}

#[derive(Debug, Deserialize)]
struct MetricSet {
    #[serde(rename = "metricData")]
    metric_data: Vec<Sample>,
}

impl MetricsDocument {
    /// Parse a document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Take the series of the first metric set; the others are ignored.
    pub fn into_series(self) -> Result<Vec<Sample>, ReportError> {
        self.data
            .into_iter()
            .next()
            .map(|set| set.metric_data)
            .ok_or_else(|| ReportError::MalformedSource("`data` array is empty".to_string()))
    }
}

/// Result of analysing a whole series.
///
/// All values are expressed in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Timestamp of the first sample.
    pub from: Timestamp,
    /// Timestamp of the last sample.
    pub to: Timestamp,

    /// Mean of the converted values, rounded to the converter precision.
    pub average: f64,
    /// Smallest converted value.
    pub min: f64,
    /// Largest converted value.
    pub max: f64,
    /// Median of the raw values, converted once.
    pub median: f64,

    /// Flat list of flagged boundaries, in detection order.
    pub underperform_periods: Vec<Timestamp>,
}
