//! Plain-text Verdict Renderer
//!
//! Produces the console report: pooled rates, a segment x treatment rate
//! grid, the optima, the verdict line, and any diagnostics.

use std::fmt::Write;

use crate::domain::analysis::{ParadoxAnalyzed, Verdict, VerdictReason};
use crate::ports::{RenderError, VerdictRenderer};

/// Renders a verdict as a human-readable text report
#[derive(Debug, Clone, Copy)]
pub struct TextVerdictRenderer {
    precision: usize,
}

impl TextVerdictRenderer {
    /// Create a renderer printing rates with `precision` decimal places
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    fn render_report(&self, analysis: &ParadoxAnalyzed, out: &mut String) -> std::fmt::Result {
        writeln!(
            out,
            "# Analysis {} ({} observations in {} groups, {})",
            analysis.analysis_id,
            analysis.observation_count,
            analysis.group_count,
            analysis.computed_at
        )?;
        writeln!(out)?;
        self.render_verdict(&analysis.verdict, out)
    }

    fn render_verdict(&self, verdict: &Verdict, out: &mut String) -> std::fmt::Result {
        let p = self.precision;

        writeln!(out, "## Global rates:")?;
        for (treatment, rate) in verdict.rates.global.iter() {
            writeln!(
                out,
                "  {:<12} {:.p$}  ({}/{})",
                treatment,
                rate,
                rate.successes(),
                rate.total(),
                p = p
            )?;
        }
        writeln!(out)?;

        let treatments = verdict.rates.local.treatments();
        let cell_width = (p + 4).max(treatments.iter().map(|t| t.as_str().len()).max().unwrap_or(0));

        writeln!(out, "## Local rates:")?;
        write!(out, "  {:<12}", "segment")?;
        for treatment in &treatments {
            write!(out, " {:>w$}", treatment, w = cell_width)?;
        }
        writeln!(out)?;
        for (segment, row) in verdict.rates.local.segments() {
            write!(out, "  {:<12}", segment)?;
            for treatment in &treatments {
                match row.get(treatment.as_str()) {
                    Some(rate) => write!(out, " {:>w$.p$}", rate.as_f64(), w = cell_width, p = p)?,
                    None => write!(out, " {:>w$}", "-", w = cell_width)?,
                }
            }
            writeln!(out)?;
        }
        writeln!(out)?;

        let global = verdict
            .global_optimal
            .as_ref()
            .map(|l| l.as_str())
            .unwrap_or("(none)");

        if verdict.reason == VerdictReason::InconsistentSegments {
            writeln!(out, "## Local optimals:")?;
            for (segment, treatment) in &verdict.local_optimals {
                writeln!(out, "  {:<12} {}", segment, treatment)?;
            }
            writeln!(out, "## Global optimal: {}", global)?;
        } else {
            writeln!(out, "## Global optimal: {}", global)?;
            if let Some(local) = verdict.local_optimal() {
                writeln!(out, "## Local optimal: {}", local)?;
            }
        }
        writeln!(out, "## {}.", verdict.reason)?;

        if verdict.has_diagnostics() {
            writeln!(out)?;
            writeln!(out, "## Diagnostics:")?;
            for diagnostic in &verdict.diagnostics {
                writeln!(out, "  - {}", diagnostic)?;
            }
        }

        Ok(())
    }
}

impl Default for TextVerdictRenderer {
    fn default() -> Self {
        Self::new(4)
    }
}

impl VerdictRenderer for TextVerdictRenderer {
    fn render(&self, analysis: &ParadoxAnalyzed) -> Result<String, RenderError> {
        let mut out = String::new();
        self.render_report(analysis, &mut out)
            .map_err(|e| RenderError::SerializationFailed(e.to_string()))?;
        Ok(out)
    }
}
