use launchdeck::config::LoggingConfig;
use launchdeck::logger::{self, Logger};

#[test]
fn test_log_lines_are_timestamped() {
    let logger = Logger::new();
    logger.log("gate opened".to_string());

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    // "[HH:MM:SS.mmm] " prefix
    assert!(logs[0].starts_with('['));
    assert_eq!(logs[0].find(']'), Some(13));
    assert!(logs[0].contains("] gate opened"));
}

#[test]
fn test_logs_come_back_newest_first() {
    let logger = Logger::new();
    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert!(logs[0].contains("second"));
    assert!(logs[1].contains("first"));
}

#[test]
fn test_buffer_is_capped() {
    let logger = Logger::new();
    for i in 0..600 {
        logger.log(format!("line {}", i));
    }

    let logs = logger.get_logs();
    assert_eq!(logs.len(), 500);
    // Oldest lines fell off the back
    assert!(logs[0].contains("line 599"));
    assert!(logs.last().unwrap().contains("line 100"));
}

#[test]
fn test_clear_empties_the_buffer() {
    let logger = Logger::new();
    logger.log("something".to_string());
    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_clones_share_the_buffer() {
    let logger = Logger::new();
    let clone = logger.clone();
    clone.log("from the clone".to_string());
    assert_eq!(logger.get_logs().len(), 1);
}

#[test]
fn test_init_without_file_sink() {
    // The global dispatcher can only be installed once per process, so this
    // is the single test in this binary that calls init.
    let config = LoggingConfig::default();
    assert!(!config.enabled);

    let logger = Logger::new();
    assert!(logger::init(&config, logger.clone()).is_ok());

    log::info!("routed through the facade");
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("routed through the facade"));
    assert!(logs[0].contains("INFO"));
}
