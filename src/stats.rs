use crate::error::ReportError;
use crate::model::Sample;

/// Raw value corresponding to one display unit.
pub const DEFAULT_DIVISOR: f64 = 125_000.0;

/// Default number of decimal digits kept after conversion.
pub const DEFAULT_PRECISION: u32 = 2;

/// Converts raw sample values into display units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    divisor: f64,
    precision: u32,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new(DEFAULT_DIVISOR, DEFAULT_PRECISION)
    }
}

impl UnitConverter {
    pub fn new(divisor: f64, precision: u32) -> Self {
        Self { divisor, precision }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn convert(&self, raw_value: f64) -> f64 {
        round_to(raw_value / self.divisor, self.precision)
    }
}

/// Round half away from zero to `precision` decimal digits.
///
/// The scaled value is first rounded to 15 significant digits so that
/// decimal halves such as `1.005` round up even when their binary value
/// lies just below the half.
pub fn round_to(val: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    let scaled = val * factor;
    let scaled = format!("{scaled:.14e}").parse().unwrap_or(scaled);
    f64::round(scaled) / factor
}

/// Compute the median of the series in display units.
///
/// Sorts a private copy of the raw values. For an even number of samples the
/// two middle raw values are averaged before conversion.
pub fn median(series: &[Sample], converter: &UnitConverter) -> Result<f64, ReportError> {
    if series.is_empty() {
        return Err(ReportError::InvalidInput("cannot compute the median of an empty series"));
    }

    let mut vals: Vec<f64> = series.iter().map(|sample| sample.raw_value).collect();
    vals.sort_by(f64::total_cmp);

    let n_vals = vals.len();
    let mid = n_vals / 2;
    let raw_median = if n_vals % 2 == 0 {
        (vals[mid - 1] + vals[mid]) / 2.0
    } else {
        vals[mid]
    };

    Ok(converter.convert(raw_median))
}
