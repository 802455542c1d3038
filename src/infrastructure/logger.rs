use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

/// Sends `pawbook` log records to `path`, appending to any existing log.
pub fn setup_file_logger(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("pawbook")
        .build();

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(WriteLogger::init(level, logger_config, file)?)
}
