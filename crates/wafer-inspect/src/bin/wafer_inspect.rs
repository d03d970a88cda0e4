use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use wafer_inspect::{
    FrameField, InspectConfig, Summary, list_input_files, load_config, run_batch, write_config,
    write_report,
};

#[derive(Parser, Debug)]
#[command(name = "wafer_inspect")]
#[command(about = "Find slipped wafer edges in line-scan captures")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Inspect captures and write the semicolon report.
    #[command(name = "scan")]
    Scan(ScanArgs),
    /// Print the effective configuration as JSON.
    #[command(name = "print-config")]
    PrintConfig(ConfigArgs),
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// JSON config; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the configuration here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Capture files or directories of captures.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON config; missing fields take defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path.
    #[arg(long, default_value = "Slippedwafers.csv")]
    out: PathBuf,

    /// Write masks, strip responses and overlays here.
    #[arg(long)]
    dump_dir: Option<PathBuf>,

    /// Append the contour vertex count to every row.
    #[arg(long)]
    vertex_count: bool,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Args, Debug, Default)]
struct Overrides {
    #[arg(long)]
    vertical_run_min: Option<usize>,
    #[arg(long)]
    horizontal_run_min: Option<usize>,
    #[arg(long)]
    chamfer_run_max: Option<usize>,
    #[arg(long)]
    gradient_abs_min: Option<f32>,
    /// Smallest accepted contour vertex count.
    #[arg(long)]
    min_vertices: Option<usize>,
    /// Largest accepted contour vertex count.
    #[arg(long)]
    max_vertices: Option<usize>,
    /// Binarization threshold; pixels strictly above are wafer.
    #[arg(long)]
    threshold: Option<u8>,
    /// Interlaced field kept from raw captures.
    #[arg(long, value_enum)]
    field: Option<FieldArg>,
    #[arg(long)]
    frame_width: Option<usize>,
    #[arg(long)]
    frame_height: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldArg {
    Even,
    Odd,
}

impl From<FieldArg> for FrameField {
    fn from(v: FieldArg) -> Self {
        match v {
            FieldArg::Even => FrameField::Even,
            FieldArg::Odd => FrameField::Odd,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Scan(args) => run_scan(args),
        Command::PrintConfig(args) => run_print_config(args),
    }
}

fn run_scan(args: ScanArgs) -> Result<()> {
    let mut cfg = base_config(args.config.as_deref())?;
    apply_overrides(&mut cfg, &args.overrides);
    if args.vertex_count {
        cfg.include_vertex_count = true;
    }

    let files = collect_inputs(&args.inputs)?;
    if files.is_empty() {
        bail!("no input files found");
    }
    info!(count = files.len(), "inspecting captures");

    let outcomes = run_batch(&files, &cfg, args.dump_dir.as_deref());
    write_report(&args.out, &outcomes, cfg.include_vertex_count)?;
    info!(report = %args.out.display(), "report written");

    println!("{}", Summary::from_outcomes(&outcomes));
    Ok(())
}

fn run_print_config(args: ConfigArgs) -> Result<()> {
    let cfg = base_config(args.config.as_deref())?;
    match args.out {
        Some(path) => write_config(&path, &cfg),
        None => {
            let json = serde_json::to_string_pretty(&cfg).context("serializing config")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn base_config(path: Option<&Path>) -> Result<InspectConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(InspectConfig::default()),
    }
}

fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_input_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn apply_overrides(cfg: &mut InspectConfig, o: &Overrides) {
    if let Some(v) = o.vertical_run_min {
        cfg.scan.vertical_run_min = v;
    }
    if let Some(v) = o.horizontal_run_min {
        cfg.scan.horizontal_run_min = v;
    }
    if let Some(v) = o.chamfer_run_max {
        cfg.scan.chamfer_run_max = v;
    }
    if let Some(v) = o.gradient_abs_min {
        cfg.scan.gradient_abs_min = v;
    }
    if let Some(n) = o.min_vertices {
        cfg.scan.polygon_length_min = n;
    }
    if let Some(n) = o.max_vertices {
        cfg.scan.polygon_length_max = n;
    }
    if let Some(t) = o.threshold {
        cfg.threshold_low = t;
    }
    if let Some(f) = o.field {
        cfg.frame.field = f.into();
    }
    if let Some(w) = o.frame_width {
        cfg.frame.width = w;
    }
    if let Some(h) = o.frame_height {
        cfg.frame.height = h;
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wafer_inspect::{FrameField, InspectConfig};

    use super::{Cli, Command, Overrides, apply_overrides};

    #[test]
    fn overrides_touch_only_given_fields() {
        let mut cfg = InspectConfig::default();
        let o = Overrides {
            gradient_abs_min: Some(2500.0),
            max_vertices: Some(25000),
            field: Some(super::FieldArg::Even),
            ..Overrides::default()
        };
        apply_overrides(&mut cfg, &o);

        assert_eq!(cfg.scan.gradient_abs_min, 2500.0);
        assert_eq!(cfg.scan.polygon_length_max, 25000);
        assert_eq!(cfg.scan.polygon_length_min, 12000);
        assert_eq!(cfg.frame.field, FrameField::Even);
        assert_eq!(cfg.threshold_low, 50);
    }

    #[test]
    fn scan_defaults_to_legacy_report_name() {
        let cli = Cli::try_parse_from(["wafer_inspect", "scan", "captures"]).expect("parses");
        let Command::Scan(args) = cli.cmd else {
            panic!("expected scan");
        };
        assert_eq!(args.out.to_str(), Some("Slippedwafers.csv"));
        assert!(!args.vertex_count);
    }
}
