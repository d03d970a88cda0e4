use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use wafer_inspect::{
    DefectResult, FrameConfig, FrameField, Image, InspectConfig, Point2i, Rect, SlipScanConfig,
    Summary, analyze_raster, inspect_raster, list_input_files, run_batch, write_diagnostics,
    write_report,
};

const WIDTH: usize = 200;
const HEIGHT: usize = 160;

/// Wafer on `[10, 190) x [10, 150)` with 16-pixel chamfers. With `notch` the
/// left edge steps in from x = 10 to x = 16 at row 80.
fn inside(x: usize, y: usize, notch: bool) -> bool {
    let left = if notch && y >= 80 { 16 } else { 10 };
    if !(left..190).contains(&x) || !(10..150).contains(&y) {
        return false;
    }
    let (x, y) = (x as i64, y as i64);
    (x - 10) + (y - 10) >= 16
        && (189 - x) + (y - 10) >= 16
        && (x - 10) + (149 - y) >= 16
        && (189 - x) + (149 - y) >= 16
}

fn wafer(notch: bool, bright: u8) -> Image<u8> {
    Image::from_fn(WIDTH, HEIGHT, |x, y| if inside(x, y, notch) { bright } else { 0 })
}

fn test_config() -> InspectConfig {
    InspectConfig {
        scan: SlipScanConfig {
            polygon_length_min: 100,
            polygon_length_max: 2000,
            left_strip: Rect::new(0, 0, 40, HEIGHT),
            right_strip: Rect::new(160, 0, 40, HEIGHT),
            ..SlipScanConfig::default()
        },
        ..InspectConfig::default()
    }
}

fn save_png(path: &Path, img: &Image<u8>) {
    GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec())
        .expect("buffer matches size")
        .save(path)
        .expect("save png");
}

#[test]
fn notched_wafer_is_found_at_the_step_corner() {
    let img = wafer(true, 255);
    let analysis = analyze_raster(&img.as_view(), &test_config()).expect("inspects");
    let inspection = &analysis.inspection;

    assert_eq!(inspection.vertex_count, 577);
    assert_eq!(inspection.result, DefectResult::FoundAt(72));
    assert_eq!(inspection.location, Some(Point2i::new(13, 79)));
    assert_eq!(
        analysis.contour.as_ref().and_then(|c| c.point(0)),
        Some(Point2i::new(26, 10))
    );
    assert_eq!(analysis.strips.sample(Point2i::new(13, 79)), Some(-10710.0));
}

#[test]
fn intact_wafer_is_not_found() {
    let img = wafer(false, 255);
    let inspection = inspect_raster(&img.as_view(), &test_config()).expect("inspects");

    assert_eq!(inspection.vertex_count, 572);
    assert_eq!(inspection.result, DefectResult::NotFound);
    assert_eq!(inspection.report_xy(), (0, 0));
}

#[test]
fn weak_step_is_rejected_by_the_gradient_floor() {
    let img = wafer(true, 255);
    let mut cfg = test_config();
    cfg.scan.gradient_abs_min = 10710.0;

    let inspection = inspect_raster(&img.as_view(), &cfg).expect("inspects");
    assert_eq!(inspection.result, DefectResult::NotFound);
}

#[test]
fn contour_outside_the_length_gate_is_not_scanned() {
    let img = wafer(true, 255);
    let mut cfg = test_config();
    cfg.scan.polygon_length_max = 576;

    let inspection = inspect_raster(&img.as_view(), &cfg).expect("inspects");
    assert_eq!(inspection.vertex_count, 577);
    assert_eq!(inspection.result, DefectResult::NotFound);
}

#[test]
fn raw_capture_uses_the_odd_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("w001.raw");

    // Odd rows carry the wafer with high byte 0x0F, which maps to 240.
    let mut bytes = Vec::with_capacity(WIDTH * 2 * HEIGHT * 2);
    for row in 0..2 * HEIGHT {
        for x in 0..WIDTH {
            let high = if row % 2 == 1 && inside(x, row / 2, true) { 0x0F } else { 0 };
            bytes.extend_from_slice(&[0x37, high]);
        }
    }
    fs::write(&path, &bytes).expect("write raw");

    let cfg = InspectConfig {
        frame: FrameConfig {
            width: WIDTH,
            height: 2 * HEIGHT,
            field: FrameField::Odd,
        },
        ..test_config()
    };
    let outcomes = run_batch(&[path], &cfg, None);
    let inspection = outcomes[0].result.as_ref().expect("inspects");

    assert_eq!(inspection.result, DefectResult::FoundAt(72));
    assert_eq!(inspection.location, Some(Point2i::new(13, 79)));

    let even = InspectConfig {
        frame: FrameConfig {
            field: FrameField::Even,
            ..cfg.frame.clone()
        },
        ..cfg
    };
    let outcomes = run_batch(&[dir.path().join("w001.raw")], &even, None);
    let inspection = outcomes[0].result.as_ref().expect("inspects");
    assert_eq!(inspection.vertex_count, 0);
}

#[test]
fn batch_report_keeps_order_and_records_failures() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("captures");
    fs::create_dir(&input).expect("mkdir");
    save_png(&input.join("a_notched.png"), &wafer(true, 255));
    save_png(&input.join("b_intact.png"), &wafer(false, 255));
    fs::write(input.join("c_truncated.raw"), [0u8; 10]).expect("write raw");

    let mut files = list_input_files(&input).expect("lists");
    files.push(input.join("d_missing.png"));

    let mut cfg = test_config();
    cfg.include_vertex_count = true;
    let outcomes = run_batch(&files, &cfg, None);
    assert_eq!(outcomes.len(), 4);

    let report = dir.path().join("Slippedwafers.csv");
    write_report(&report, &outcomes, cfg.include_vertex_count).expect("write report");
    let text = fs::read_to_string(&report).expect("read report");
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "FileName;X;Y;Vertices");
    assert!(lines[1].ends_with("a_notched.png;13;79;577"), "{}", lines[1]);
    assert!(lines[2].ends_with("b_intact.png;0;0;572"), "{}", lines[2]);
    assert!(lines[3].contains("c_truncated.raw;error;"), "{}", lines[3]);
    assert!(lines[4].contains("d_missing.png;error;"), "{}", lines[4]);

    let summary = Summary::from_outcomes(&outcomes);
    assert_eq!((summary.processed, summary.found, summary.failed), (4, 1, 2));
}

#[test]
fn diagnostics_are_written_per_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let dump = dir.path().join("dump");
    let img = wafer(true, 255);
    let analysis = analyze_raster(&img.as_view(), &test_config()).expect("inspects");

    write_diagnostics(&dump, Path::new("captures/w042.raw"), &img, &analysis)
        .expect("write diagnostics");

    let named = |suffix: &str| -> PathBuf { dump.join(format!("w042_{suffix}")) };
    for suffix in ["mask.png", "left.fits", "right.fits", "overlay.png"] {
        assert!(named(suffix).is_file(), "missing {suffix}");
    }

    let overlay = image::open(named("overlay.png")).expect("decode overlay").to_luma8();
    assert_eq!(overlay.get_pixel(13, 79).0, [255]);
    assert_eq!(overlay.get_pixel(26, 10).0, [192]);
    assert_eq!(overlay.get_pixel(100, 80).0, [255]);
    assert_eq!(overlay.get_pixel(2, 2).0, [0]);

    let left = wi_io::read_fits(&named("left.fits")).expect("decode fits");
    assert_eq!((left.width(), left.height()), (40, HEIGHT));
    assert_eq!(left.get(13, 79), Some(&-10710.0));
}
