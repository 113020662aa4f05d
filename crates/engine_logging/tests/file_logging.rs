use engine_logging::{engine_debug, engine_info, initialize, LogDestination};
use log::LevelFilter;

#[test]
fn file_destination_receives_records_at_or_above_level() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("bundler.log");

    initialize(LogDestination::File(path.clone()), LevelFilter::Info);
    engine_info!("dispatching {} url(s)", 3);
    engine_debug!("this should be filtered out");
    log::logger().flush();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("dispatching 3 url(s)"), "log was: {contents}");
    assert!(!contents.contains("filtered out"));
}
