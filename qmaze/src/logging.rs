use std::{
    io::Write as _,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, OnceLock, RwLock,
    },
};

use crossterm::style::{Attribute, Color, Stylize};
use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    LOGGER.get_or_init(|| AppLogger::new(log::Level::Warn))
}

/// Installs the logger, `verbosity` is the number of `-v` flags.
pub fn init(verbosity: u8, color: bool) -> Result<(), log::SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level_from_verbosity(verbosity));
    logger.set_color(color);

    log::set_logger(logger)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

pub fn level_from_verbosity(verbosity: u8) -> log::Level {
    match verbosity {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: log::Level,
    pub message: String,
    pub source: String,
}

impl Message {
    pub fn format(&self, color: bool) -> String {
        let level = format!("{:<5}", self.level);
        if !color {
            return format!("{} [{}] {}", level, self.source, self.message);
        }

        let level_color = match self.level {
            log::Level::Error => Color::Red,
            log::Level::Warn => Color::Yellow,
            log::Level::Info => Color::White,
            log::Level::Debug => Color::Blue,
            log::Level::Trace => Color::Grey,
        };

        format!(
            "{} {} {}",
            level.with(level_color),
            format!("[{}]", self.source).attribute(Attribute::Dim),
            self.message
        )
    }
}

/// Writes log records to stderr.
pub struct AppLogger {
    pub min_level: Arc<RwLock<log::Level>>,
    color: AtomicBool,
}

impl AppLogger {
    fn new(min_level: log::Level) -> Self {
        Self {
            min_level: Arc::new(RwLock::new(min_level)),
            color: AtomicBool::new(true),
        }
    }

    pub fn min_level(&self) -> log::Level {
        // a poisoned lock still holds a valid level
        *self.min_level.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_min_level(&self, level: log::Level) {
        *self.min_level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }

    pub fn set_color(&self, color: bool) {
        self.color.store(color, Ordering::Relaxed);
    }

    pub fn color(&self) -> bool {
        self.color.load(Ordering::Relaxed)
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = Message {
                level: record.level(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            };

            let _ = writeln!(std::io::stderr().lock(), "{}", message.format(self.color()));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
