use crate::{LogLevel, LogSignal, Logger};
use std::any::Any;

const TARGET: &str = "vm";

/// Forwards signals to whatever implementation of the `log` facade is installed.
/// Severity categories keep their level, custom categories are logged as info.
#[derive(Debug, Default)]
pub struct LogCrateLogger;

impl LogCrateLogger {
    pub fn new() -> Self {
        Self
    }

    pub fn level_of(category: &str) -> log::Level {
        LogLevel::from_name(category)
            .and_then(LogLevel::as_log_level)
            .unwrap_or(log::Level::Info)
    }
}

impl Logger for LogCrateLogger {
    fn log(&self, signal: LogSignal) {
        let level = Self::level_of(&signal.category);
        if level > log::max_level() {
            return;
        }

        log::logger().log(
            &log::Record::builder()
                .args(format_args!("[{}] {}", signal.category, signal.message))
                .level(level)
                .target(TARGET)
                .module_path(Some(signal.function_name.as_str()))
                .file(Some(signal.file_name.as_str()))
                .line(Some(signal.line))
                .build(),
        );
    }

    fn any(&self) -> &dyn Any {
        self
    }
}
