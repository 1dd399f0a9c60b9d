mod base_logger;
mod buffered_logger;
mod console_logger;
mod filter;
mod log_crate_logger;

pub use base_logger::{LogSignal, Logger, NullLogger, Origin};
pub use buffered_logger::BufferedLogger;
pub use console_logger::ConsoleLogger;
pub use filter::{AllCategories, EnabledCategories, LogFilter, MaxSeverity, NoCategories};
pub use log_crate_logger::LogCrateLogger;
