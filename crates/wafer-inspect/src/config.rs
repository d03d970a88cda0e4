use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use wi_core::BorderMode;
use wi_io::FrameConfig;
use wi_slip::SlipScanConfig;

/// Everything one inspection run needs. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub frame: FrameConfig,
    /// Pixels strictly above this are wafer.
    pub threshold_low: u8,
    /// Mask value for wafer pixels.
    pub threshold_high: u8,
    /// 3x3 open then close on the mask before tracing.
    pub mask_cleanup: bool,
    /// Border handling at the strip edges during convolution.
    pub border: BorderMode<f32>,
    pub scan: SlipScanConfig,
    /// Append the contour vertex count to every report row.
    pub include_vertex_count: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            threshold_low: 50,
            threshold_high: 255,
            mask_cleanup: false,
            border: BorderMode::Reflect101,
            scan: SlipScanConfig::default(),
            include_vertex_count: false,
        }
    }
}

pub fn load_config(path: &Path) -> Result<InspectConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let cfg: InspectConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

pub fn write_config(path: &Path, cfg: &InspectConfig) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating config {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, cfg).context("serializing config")?;
    file.write_all(b"\n")?;
    Ok(())
}
