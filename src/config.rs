use crate::report::{DEFAULT_PERIOD_TEMPLATE, DEFAULT_SUMMARY_TEMPLATE, Renderer};
use crate::stats::{DEFAULT_DIVISOR, DEFAULT_PRECISION, UnitConverter};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fmt::Debug,
    fs,
    ops::RangeBounds,
    path::{Path, PathBuf},
};

/// Report configuration.
///
/// Loaded from a TOML file and validated before use.
/// Every field is optional. See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Display unit conversion.
    pub units: UnitsConfig,
    /// Template locations.
    pub templates: TemplatesConfig,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitsConfig {
    /// Raw value corresponding to one display unit.
    pub divisor: f64,
    /// Number of decimal digits kept after conversion.
    pub precision: u32,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Default, PartialEq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    /// Summary template file (embedded default if absent).
    pub summary: Option<PathBuf>,
    /// Per-period template file (embedded default if absent).
    pub period: Option<PathBuf>,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Relative template paths are resolved against the directory of the file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let mut config = Self::from_toml(&contents)?;

        let base_dir = file.parent().unwrap_or_else(|| Path::new(""));
        for path in [&mut config.templates.summary, &mut config.templates.period]
            .into_iter()
            .flatten()
        {
            *path = base_dir.join(&*path);
        }

        Ok(config)
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.units.divisor.is_finite() {
            bail!("unit divisor must be finite, but is {}", self.units.divisor);
        }
        check_num(self.units.divisor, f64::MIN_POSITIVE..).context("invalid unit divisor")?;
        check_num(self.units.precision, 0..=10).context("invalid precision")?;
        Ok(())
    }

    pub fn converter(&self) -> UnitConverter {
        UnitConverter::new(self.units.divisor, self.units.precision)
    }

    /// Build the [`Renderer`], reading template files where configured.
    pub fn renderer(&self) -> Result<Renderer> {
        let summary = read_template(self.templates.summary.as_deref(), DEFAULT_SUMMARY_TEMPLATE)
            .context("failed to load summary template")?;
        let period = read_template(self.templates.period.as_deref(), DEFAULT_PERIOD_TEMPLATE)
            .context("failed to load period template")?;
        Ok(Renderer::new(summary, period))
    }
}

fn read_template(file: Option<&Path>, default: &str) -> Result<String> {
    match file {
        Some(file) => fs::read_to_string(file).with_context(|| format!("failed to read {file:?}")),
        None => Ok(default.to_string()),
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
