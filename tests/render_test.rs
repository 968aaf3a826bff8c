//! Chart rendering scenarios
//!
//! Text is disabled (`annotate(false)`) so the tests do not depend on
//! system fonts.

use lopdf::Document;
use reward_curve::config::RenderConfig;
use reward_curve::dataset::{Dataset, LogRecord};
use reward_curve::render::render;
use reward_curve::{parser, Error};

fn quiet() -> RenderConfig {
    RenderConfig::default().annotate(false)
}

fn dataset(points: &[(f64, f64)]) -> Dataset {
    points
        .iter()
        .map(|&(s, r)| LogRecord::new(s, r))
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn test_empty_log_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("empty.txt");
    std::fs::write(&log, "").unwrap();

    let dataset = parser::parse(&log).unwrap();
    let base = dir.path().join("empty");
    let result = render(&dataset, &base, &quiet());

    assert!(matches!(result, Err(Error::EmptyDataset)));
    assert!(!dir.path().join("empty.png").exists());
    assert!(!dir.path().join("empty.pdf").exists());
}

#[test]
fn test_all_points_above_cap_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("late");
    let result = render(&dataset(&[(2e6, 1.0), (3e6, 2.0)]), &base, &quiet());

    assert!(matches!(result, Err(Error::EmptyDataset)));
    assert!(!dir.path().join("late.png").exists());
}

#[test]
fn test_single_point_renders_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("single");
    let chart = render(&dataset(&[(100.0, 0.5)]), &base, &quiet()).unwrap();

    assert_eq!(chart.points, 1);
    assert_eq!(chart.png, dir.path().join("single.png"));
    assert_eq!(chart.pdf, dir.path().join("single.pdf"));

    let png = std::fs::read(&chart.png).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    let pdf = std::fs::read(&chart.pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_output_sizes_follow_figure_and_dpi() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("sized");
    let config = quiet();
    let data = dataset(&[(0.0, 0.0), (5_000.0, 1.0), (10_000.0, 0.5)]);
    let chart = render(&data, &base, &config).unwrap();

    // IHDR: width and height are the first two big-endian words
    let png = std::fs::read(&chart.png).unwrap();
    let word = |at: usize| u32::from_be_bytes([png[at], png[at + 1], png[at + 2], png[at + 3]]);
    assert_eq!(&png[12..16], b"IHDR");
    assert_eq!((word(16), word(20)), (3000, 1950));
    assert_eq!((word(16), word(20)), config.pixel_size());

    // 10in x 6.5in page in points
    let doc = Document::load(&chart.pdf).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();
    let media_box: Vec<i64> = doc
        .get_object(page_id)
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(media_box, vec![0, 0, 720, 468]);
}

#[test]
fn test_huge_sigma_from_json_renders() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("wide");
    let config =
        RenderConfig::from_json_str(r#"{"sigma": 1e30, "annotate": false, "dpi": 20}"#).unwrap();
    let data = dataset(&[(0.0, 0.0), (1_000.0, 1.0), (2_000.0, 4.0), (3_000.0, 2.0)]);
    let chart = render(&data, &base, &config).unwrap();
    assert_eq!(chart.points, 4);
    assert!(chart.pdf.exists());
}

#[test]
fn test_points_above_cap_are_not_plotted() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("capped");
    let data = dataset(&[(500_000.0, 1.0), (1_500_000.0, 9.0), (250_000.0, 0.5)]);
    let chart = render(&data, &base, &quiet()).unwrap();
    assert_eq!(chart.points, 2);
}

#[test]
fn test_custom_cap() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("small_cap");
    let data = dataset(&[(10.0, 1.0), (20.0, 2.0), (30.0, 3.0)]);
    let chart = render(&data, &base, &quiet().max_step_count(20.0)).unwrap();
    assert_eq!(chart.points, 2);
}

#[test]
fn test_small_raster() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("small");
    let mut config = quiet();
    config.dpi = 20;
    let data = dataset(&[(0.0, 0.0), (1_000.0, 1.0), (2_000.0, 0.5), (3_000.0, 2.0)]);
    let chart = render(&data, &base, &config).unwrap();
    assert!(chart.png.metadata().unwrap().len() > 0);
    assert!(chart.pdf.metadata().unwrap().len() > 0);
}

#[test]
fn test_unwritable_output_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("no_such_dir").join("chart");
    let result = render(&dataset(&[(1.0, 1.0), (2.0, 2.0)]), &base, &quiet());
    assert!(matches!(result, Err(Error::Render(_))));
}

#[test]
fn test_invalid_config_is_rejected_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("bad");
    let result = render(&dataset(&[(1.0, 1.0)]), &base, &quiet().sigma(-2.0));
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert!(!dir.path().join("bad.png").exists());
}
