use confhub_logger::{LevelFilter, Logger, Rotation};
use std::fs;
use std::time::Duration;

#[test]
fn builder_writes_compact_lines_to_a_rolling_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let log_dir = tmp_dir.path().join("nested").join("logs");

    let logger = Logger::builder()
        .name("confhub-registrations")
        .console(false)
        .level(LevelFilter::INFO)
        .path(&log_dir)
        .rotation(Rotation::NEVER)
        .max_files(2)
        .init()?;
    assert!(logger.guard().is_some());

    tracing::debug!("filtered out by the level");
    tracing::info!(conference = 3, remaining = 74, "Registration accepted");
    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .ok_or("no log file written")?;

    let name = log_file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name.starts_with("confhub-registrations"), "unexpected file name {name}");

    let content = fs::read_to_string(&log_file)?;
    assert!(content.contains("Registration accepted"));
    assert!(content.contains("conference=3"));
    assert!(!content.contains("filtered out by the level"));
    assert!(!content.trim_start().starts_with('{'));

    Ok(())
}
