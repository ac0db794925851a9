//! Process-wide logger: every record at DEBUG and above goes to a log file, INFO and above
//! to the console, both as `<timestamp> , <name> , <LEVEL> , <message>`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use env_logger::{Builder, Target, WriteStyle};
use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

pub fn log_file_path(logs_dir: &Path, name: &str) -> PathBuf {
    logs_dir.join(format!("{}.log", name))
}

fn sink_builder(name: &str, level: LevelFilter) -> Builder {
    let name = name.to_string();
    let mut builder = Builder::new();
    builder.filter_level(level).format(move |buf, record| {
        writeln!(
            buf,
            "{} , {} , {} , {}",
            Local::now().format(LOG_TIMESTAMP_FORMAT),
            name,
            record.level(),
            record.args()
        )
    });
    builder
}

/// Hands each record to every sink whose own level lets it through.
pub struct TeeLogger {
    sinks: Vec<env_logger::Logger>,
}

impl TeeLogger {
    pub fn new(sinks: Vec<env_logger::Logger>) -> Self {
        TeeLogger { sinks }
    }

    pub fn max_level(&self) -> LevelFilter {
        self.sinks.iter().map(|s| s.filter()).max().unwrap_or(LevelFilter::Off)
    }
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.sinks.iter().any(|s| s.enabled(metadata))
    }

    fn log(&self, record: &Record) {
        for sink in &self.sinks {
            if sink.matches(record) {
                sink.log(record);
            }
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

fn file_sink(path: &Path, name: &str) -> Result<env_logger::Logger> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(sink_builder(name, LevelFilter::Debug)
        .target(Target::Pipe(Box::new(file)))
        .write_style(WriteStyle::Never)
        .build())
}

fn console_sink(name: &str, verbose: bool) -> env_logger::Logger {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    sink_builder(name, level).target(Target::Stderr).build()
}

/// Installs the global logger. Must be called once, after the logs directory exists.
///
/// # Arguments
/// * `logs_dir` - Directory the log file is appended to.
/// * `name` - Logger name; also names the log file.
/// * `verbose` - Echo DEBUG records to the console as well.
///
/// # Returns
/// Path of the log file.
pub fn init_logger(logs_dir: &Path, name: &str, verbose: bool) -> Result<PathBuf> {
    let path = log_file_path(logs_dir, name);
    let tee = TeeLogger::new(vec![file_sink(&path, name)?, console_sink(name, verbose)]);
    let max_level = tee.max_level();
    log::set_boxed_logger(Box::new(tee))?;
    log::set_max_level(max_level);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_keeps_debug_console_level_does_not() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let debug_path = tmp.path().join("debug.log");
        let info_path = tmp.path().join("info.log");

        let info_sink = sink_builder("pipeline", LevelFilter::Info)
            .target(Target::Pipe(Box::new(fs::File::create(&info_path)?)))
            .write_style(WriteStyle::Never)
            .build();
        let tee = TeeLogger::new(vec![file_sink(&debug_path, "pipeline")?, info_sink]);
        assert_eq!(tee.max_level(), LevelFilter::Debug);

        tee.log(
            &Record::builder()
                .args(format_args!("argument vector"))
                .level(Level::Debug)
                .target("t")
                .build(),
        );
        tee.log(
            &Record::builder()
                .args(format_args!("Startup"))
                .level(Level::Info)
                .target("t")
                .build(),
        );
        tee.flush();

        let debug_text = fs::read_to_string(&debug_path)?;
        let info_text = fs::read_to_string(&info_path)?;
        assert!(debug_text.contains(" , pipeline , DEBUG , argument vector"));
        assert!(debug_text.contains(" , pipeline , INFO , Startup"));
        assert!(!info_text.contains("argument vector"));
        assert!(info_text.contains(" , pipeline , INFO , Startup"));
        Ok(())
    }

    #[test]
    fn test_log_file_path() {
        assert_eq!(
            log_file_path(Path::new("/w/Logs"), "kanga-assemb-pipeline"),
            PathBuf::from("/w/Logs/kanga-assemb-pipeline.log")
        );
    }
}
