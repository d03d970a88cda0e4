use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::error;

use crate::{InspectConfig, Inspection, inspect_file};

/// Per-file result of a batch run.
#[derive(Debug)]
pub struct ImageOutcome {
    pub path: PathBuf,
    pub result: Result<Inspection>,
}

impl ImageOutcome {
    pub fn is_found(&self) -> bool {
        self.result
            .as_ref()
            .is_ok_and(|inspection| inspection.result.is_found())
    }
}

/// Regular files directly inside `dir`, sorted by path.
pub fn list_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Inspects every file. A failing file is recorded and does not stop the
/// batch; outcomes are returned in input order.
pub fn run_batch(
    files: &[PathBuf],
    cfg: &InspectConfig,
    dump_dir: Option<&Path>,
) -> Vec<ImageOutcome> {
    let process = |path: &PathBuf| {
        let result = inspect_file(path, cfg, dump_dir);
        if let Err(e) = &result {
            error!(file = %path.display(), "inspection failed: {e:#}");
        }
        ImageOutcome {
            path: path.clone(),
            result,
        }
    };

    #[cfg(feature = "rayon")]
    let outcomes: Vec<ImageOutcome> = files.par_iter().map(process).collect();

    #[cfg(not(feature = "rayon"))]
    let outcomes: Vec<ImageOutcome> = files.iter().map(process).collect();

    outcomes
}
