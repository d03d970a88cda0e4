use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ImageOutcome;

pub const REPORT_HEADER: &str = "FileName;X;Y";

/// One `;`-separated report row.
///
/// Found: `file;x;y`, not found: `file;0;0`, failed: `file;error;message`.
/// With `include_vertex_count` successful rows get a trailing `;vertices`.
pub fn format_row(outcome: &ImageOutcome, include_vertex_count: bool) -> String {
    let file = outcome.path.display();
    match &outcome.result {
        Ok(inspection) => {
            let (x, y) = inspection.report_xy();
            if include_vertex_count {
                format!("{file};{x};{y};{}", inspection.vertex_count)
            } else {
                format!("{file};{x};{y}")
            }
        }
        Err(e) => {
            let message = format!("{e:#}").replace(['\n', '\r', ';'], " ");
            format!("{file};error;{message}")
        }
    }
}

pub fn write_report(
    path: &Path,
    outcomes: &[ImageOutcome],
    include_vertex_count: bool,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating report {}", path.display()))?;
    let mut out = BufWriter::new(file);

    if include_vertex_count {
        writeln!(out, "{REPORT_HEADER};Vertices")?;
    } else {
        writeln!(out, "{REPORT_HEADER}")?;
    }
    for outcome in outcomes {
        writeln!(out, "{}", format_row(outcome, include_vertex_count))?;
    }
    out.flush()
        .with_context(|| format!("writing report {}", path.display()))
}

/// Batch totals for the closing console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub found: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[ImageOutcome]) -> Self {
        Self {
            processed: outcomes.len(),
            found: outcomes.iter().filter(|o| o.is_found()).count(),
            failed: outcomes.iter().filter(|o| o.result.is_err()).count(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{n} images processed. {k} slipped wafers found from {n} wafer images.",
            n = self.processed,
            k = self.found
        )
    }
}
