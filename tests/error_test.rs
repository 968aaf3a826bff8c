//! Tests for error types

use reward_curve::Error;

#[test]
fn test_empty_dataset_error() {
    let error_str = format!("{}", Error::EmptyDataset);
    assert_eq!(error_str, "no data available for plotting");
}

#[test]
fn test_render_error() {
    let error = Error::Render("backend closed".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Render error"));
    assert!(error_str.contains("backend closed"));
}

#[test]
fn test_invalid_config_error() {
    let error = Error::InvalidConfig("sigma must be finite".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid configuration"));
    assert!(error_str.contains("sigma"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_json_error_conversion() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = json_error.into();
    assert!(format!("{error}").contains("JSON error"));
}

#[test]
fn test_error_debug() {
    let debug_str = format!("{:?}", Error::EmptyDataset);
    assert!(debug_str.contains("EmptyDataset"));
}
