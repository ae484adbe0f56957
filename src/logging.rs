use log::{LevelFilter, Metadata, Record};
use std::env;
use std::sync::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use chrono::Local;
use crate::error::{Result, Error};

/// Appends `<timestamp> [LEVEL] message` lines to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: LevelFilter,
}

impl Logger {
    pub fn new(log_file: &str, level: LevelFilter) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = self.file.lock() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(
                    file,
                    "{} [{}] {}",
                    timestamp,
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs the global logger: a file logger when `LOG_FILE` is set, env_logger otherwise.
/// The level comes from `RUST_LOG` and defaults to `info`.
pub fn init() -> Result<()> {
    match env::var("LOG_FILE") {
        Ok(path) => {
            let level = env::var("RUST_LOG")
                .ok()
                .and_then(|raw| raw.parse::<LevelFilter>().ok())
                .unwrap_or(LevelFilter::Info);
            let logger = Logger::new(&path, level)?;
            log::set_boxed_logger(Box::new(logger))
                .map_err(|e| Error::ConfigError(format!("Logger already installed: {}", e)))?;
            log::set_max_level(level);
        }
        Err(_) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .try_init()
                .map_err(|e| Error::ConfigError(format!("Logger already installed: {}", e)))?;
        }
    }
    Ok(())
}
