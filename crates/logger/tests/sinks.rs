//! Tests for the verbose printer and the file sink.

use logger::{enable_verbose, error, info, verbose, warn};

#[cfg(feature = "verbose")]
#[test]
fn verbose_respects_runtime_flag() {
    // Disabled by default, so this line stays silent.
    verbose!("This should not appear");

    enable_verbose();
    verbose!("This should appear: verbose test {}", 42);
}

#[cfg(feature = "file-logging")]
#[test]
fn file_sink_captures_tagged_lines() {
    use logger::{init_file_logging, shutdown_file_logging};
    use std::fs;

    let log_path = std::env::temp_dir().join("logger_sink_test.log");
    let _ = fs::remove_file(&log_path);

    assert!(init_file_logging(&log_path));

    info!("captured info");
    warn!("captured warning");
    error!("captured error");

    // verbose output never reaches the file
    #[cfg(feature = "verbose")]
    {
        enable_verbose();
        verbose!("console-only line");
    }

    shutdown_file_logging();
    error!("after shutdown");

    let contents = fs::read_to_string(&log_path).expect("log file should exist");
    assert!(contents.contains("[INFO] captured info"));
    assert!(contents.contains("[WARN] captured warning"));
    assert!(contents.contains("[ERROR] captured error"));
    assert!(!contents.contains("console-only line"));
    assert!(!contents.contains("after shutdown"));

    // every captured line carries an uptime stamp like [0.004]
    for line in contents.lines() {
        assert!(line.starts_with('['), "unstamped line: {line}");
    }

    let _ = fs::remove_file(&log_path);
}
