//! Runs in its own process so this is the only `init_logging` call.

use canyon_log::{LOG_FILE_NAME, init_logging};

#[test]
fn test_debug_build_writes_events_to_log_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let log_dir = temp_dir.path().join("logs");

    let path = init_logging(Some(&log_dir), true, None);
    assert_eq!(path, Some(log_dir.join(LOG_FILE_NAME)));

    tracing::error!("file logging marker event");
    let contents = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("file logging marker event"), "log file was: {contents:?}");
}
