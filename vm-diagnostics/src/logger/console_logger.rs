use crate::{LogSignal, Logger};
use chrono::Local;
use std::any::Any;

/// Prints every signal on the standard output
#[derive(Debug, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for ConsoleLogger {
    #[cfg(feature = "colored_terminal")]
    fn log(&self, signal: LogSignal) {
        use colored::*;
        println!(
            "{} {} {} - {}",
            Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            signal.category.bright_black().bold(),
            format!("{}:{}", signal.file_name, signal.line).bright_black(),
            signal.message.trim()
        );
    }
    #[cfg(not(feature = "colored_terminal"))]
    fn log(&self, signal: LogSignal) {
        println!(
            "{} {} {}:{} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            signal.category,
            signal.file_name,
            signal.line,
            signal.message.trim()
        );
    }

    fn any(&self) -> &dyn Any {
        self
    }
}
