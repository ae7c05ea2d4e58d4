use crate::error::ReportError;
use crate::model::{AnalysisResult, Sample, Timestamp};
use crate::stats::{UnitConverter, median, round_to};

/// Running state of the single pass over the series.
struct Tracker {
    n_vals: usize,
    sum: f64,
    min: f64,
    max: f64,
    from: Timestamp,
    prev: (Timestamp, f64),
    underperform_periods: Vec<Timestamp>,
}

impl Tracker {
    fn new(first: &Sample, val: f64) -> Self {
        Self {
            n_vals: 1,
            sum: val,
            min: val,
            max: val,
            from: first.timestamp.clone(),
            prev: (first.timestamp.clone(), val),
            underperform_periods: Vec::new(),
        }
    }

    fn add(&mut self, sample: &Sample, val: f64) {
        self.n_vals += 1;
        self.sum += val;

        if val < self.min {
            self.min = val;
        }
        if val > self.max {
            self.max = val;
        }

        // Both checks run on every pair.
        let (prev_time, prev_val) = &self.prev;
        if *prev_val > val * 2.0 {
            self.underperform_periods.push(sample.timestamp.clone());
        }
        if *prev_val * 2.0 < val {
            self.underperform_periods.push(prev_time.clone());
        }

        self.prev = (sample.timestamp.clone(), val);
    }
}

/// Computes summary statistics and under-performing periods of a series.
pub struct Analyzer {
    converter: UnitConverter,
}

impl Analyzer {
    pub fn new(converter: UnitConverter) -> Self {
        Self { converter }
    }

    /// Analyze a series sorted by ascending timestamp.
    ///
    /// # Errors
    /// Returns [`ReportError::InvalidInput`] if the series is empty.
    pub fn analyze(&self, series: &[Sample]) -> Result<AnalysisResult, ReportError> {
        let (first, rest) = series
            .split_first()
            .ok_or(ReportError::InvalidInput("cannot analyze an empty series"))?;

        let mut tracker = Tracker::new(first, self.converter.convert(first.raw_value));
        for sample in rest {
            tracker.add(sample, self.converter.convert(sample.raw_value));
        }

        let Tracker {
            n_vals,
            sum,
            min,
            max,
            from,
            prev: (to, _),
            underperform_periods,
        } = tracker;

        let average = round_to(sum / n_vals as f64, self.converter.precision());
        let median = median(series, &self.converter)?;

        Ok(AnalysisResult {
            from,
            to,
            average,
            min,
            max,
            median,
            underperform_periods,
        })
    }
}
