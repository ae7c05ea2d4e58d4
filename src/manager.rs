use crate::analysis::Analyzer;
use crate::config::Config;
use crate::error::ReportError;
use crate::model::{AnalysisResult, MetricsDocument, Sample};
use crate::report::Renderer;
use anyhow::{Context, Result};
use std::{fs, path::Path};

pub struct Manager {
    analyzer: Analyzer,
    renderer: Renderer,
}

impl Manager {
    pub fn new(cfg: &Config) -> Result<Self> {
        let renderer = cfg.renderer().context("failed to construct renderer")?;
        Ok(Self {
            analyzer: Analyzer::new(cfg.converter()),
            renderer,
        })
    }

    pub fn analyze_file<P: AsRef<Path>>(&self, input: P) -> Result<AnalysisResult> {
        let series = load_series(input).context("failed to load series")?;
        log::info!("loaded {} samples", series.len());

        let result = self
            .analyzer
            .analyze(&series)
            .context("failed to analyze series")?;

        let n_periods = result.underperform_periods.len();
        log::info!("detected {n_periods} under-performing boundaries");
        if n_periods % 2 != 0 {
            log::warn!(
                "odd number of boundaries, {} will not be reported",
                result.underperform_periods[n_periods - 1]
            );
        }

        Ok(result)
    }

    pub fn render(&self, result: &AnalysisResult) -> String {
        self.renderer.render(result)
    }
}

fn load_series<P: AsRef<Path>>(file: P) -> Result<Vec<Sample>> {
    let file = file.as_ref();
    let json = fs::read_to_string(file)
        .map_err(ReportError::from)
        .with_context(|| format!("failed to read {file:?}"))?;

    let series = MetricsDocument::from_json(&json)
        .and_then(MetricsDocument::into_series)
        .with_context(|| format!("failed to parse {file:?}"))?;

    Ok(series)
}
