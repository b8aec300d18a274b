use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::Context;
use chrono::Local;
use env_logger::{Env, Target};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

const LOG_FILE_PREFIX: &str = "parser";
const LOG_FILE_SUFFIX: &str = "log";
const LOG_FILES_KEPT: usize = 5;
const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Sends every record to stderr and to the rolling log file.
struct Tee {
    file: RollingFileAppender,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// `parser.<date>.log` in `logs_dir`, rolled daily, oldest files pruned.
fn file_appender(logs_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create {}", logs_dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(LOG_FILES_KEPT)
        .build(logs_dir)
        .with_context(|| format!("failed to open a log file in {}", logs_dir.display()))
}

/// `info` by default, `RUST_LOG` wins when set.
pub fn configure_logging(logs_dir: &Path) -> anyhow::Result<()> {
    let file = file_appender(logs_dir)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - [{}] - {}",
                Local::now().format(DATETIME_FORMAT),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(Tee { file })))
        .try_init()?;
    Ok(())
}
