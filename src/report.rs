use crate::model::AnalysisResult;

pub const DEFAULT_SUMMARY_TEMPLATE: &str = include_str!("../resources/templates/summary.txt");
pub const DEFAULT_PERIOD_TEMPLATE: &str = include_str!("../resources/templates/period.txt");

/// Renders an [`AnalysisResult`] into text using a summary template and a
/// template repeated once per under-performing period.
#[derive(Debug, Clone)]
pub struct Renderer {
    summary: String,
    period: String,
}

impl Renderer {
    pub fn new(summary: impl Into<String>, period: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            period: period.into(),
        }
    }

    pub fn render(&self, result: &AnalysisResult) -> String {
        let mut out = fill(
            &self.summary,
            &[
                ("From", result.from.to_string()),
                ("To", result.to.to_string()),
                ("Average", result.average.to_string()),
                ("Min", result.min.to_string()),
                ("Max", result.max.to_string()),
                ("Median", result.median.to_string()),
            ],
        );

        // An unpaired trailing boundary is dropped.
        for pair in result.underperform_periods.chunks_exact(2) {
            out.push_str(&fill(
                &self.period,
                &[("From", pair[0].to_string()), ("To", pair[1].to_string())],
            ));
        }

        out
    }
}

/// Replace every `{{Key}}` in `template` with its value.
///
/// Unknown placeholders are left untouched and substituted values are never
/// scanned again.
pub fn fill(template: &str, vals: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let val = after.find("}}").and_then(|end| {
            let key = &after[..end];
            vals.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, val)| (val, end))
        });

        match val {
            Some((val, end)) => {
                out.push_str(val);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);

    out
}
