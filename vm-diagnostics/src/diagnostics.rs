use crate::message::{format_bounded, MAX_MESSAGE_SIZE};
use crate::{LogFilter, LogLevel, LogSignal, Logger, Origin, Result, VmOutput};
use parking_lot::RwLock;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::io;
use std::io::Write;
use std::process;

lazy_static! {
    /// The process-wide instance used by the C interface and the logging macros.
    /// Readers take `read_recursive` so a sink or a status printer may emit
    /// again while a writer is queued.
    pub static ref VM_DIAGNOSTICS: RwLock<Diagnostics> = RwLock::new(Diagnostics::new());
}

pub type StatusPrinter = Box<dyn Fn() + Send + Sync>;

/// Owns the sink, the filter and the output stream of the virtual machine.
///
/// Registration needs exclusive access while emission only reads, so a
/// shared instance can be reconfigured behind a lock and still emit from
/// many threads at once. Sinks must not reconfigure the instance that calls them.
pub struct Diagnostics {
    logger: Option<Box<dyn Logger>>,
    should_log: Option<Box<dyn LogFilter>>,
    output: VmOutput,
    status_printer: Option<StatusPrinter>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            logger: None,
            should_log: None,
            output: VmOutput::new(),
            status_printer: None,
        }
    }

    pub fn set_logger(&mut self, logger: Option<Box<dyn Logger>>) {
        self.logger = logger;
    }

    pub fn set_should_log(&mut self, should_log: Option<Box<dyn LogFilter>>) {
        self.should_log = should_log;
    }

    /// Flush the previous output stream and replace it
    pub fn set_vm_output_stream(&mut self, stream: Option<Box<dyn Write + Send>>) {
        self.output.replace(stream);
    }

    /// Called by `fatal_error` to dump the status of the interpreter before aborting
    pub fn set_status_printer(&mut self, status_printer: Option<StatusPrinter>) {
        self.status_printer = status_printer;
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    pub fn has_should_log(&self) -> bool {
        self.should_log.is_some()
    }

    pub fn logger<T: 'static>(&self) -> Option<&T> {
        self.logger
            .as_deref()
            .and_then(|logger| logger.any().downcast_ref())
    }

    pub fn output(&self) -> &VmOutput {
        &self.output
    }

    /// Both a sink and a filter must be registered, and the filter must accept the category
    pub fn should_log(&self, category: &str) -> bool {
        if self.logger.is_none() {
            return false;
        }
        self.should_log
            .as_deref()
            .map_or(false, |should_log| should_log.accepts(category))
    }

    /// Format and dispatch a message of the given category.
    ///
    /// Nothing happens when the sink or the filter is missing or when the
    /// filter rejects the category; the arguments are not even formatted then.
    /// The message is cut to fit [`MAX_MESSAGE_SIZE`] bytes (terminator
    /// included). Truncation is silent and emission never fails the caller.
    pub fn emit(&self, category: &str, origin: Origin<'_>, arguments: fmt::Arguments<'_>) {
        let Some(logger) = self.logger.as_deref() else {
            return;
        };
        let Some(should_log) = self.should_log.as_deref() else {
            return;
        };
        if !should_log.accepts(category) {
            return;
        }

        let message = format_bounded(MAX_MESSAGE_SIZE, arguments);
        logger.log(LogSignal::new(category, origin, message));
    }

    pub fn emit_by_severity(
        &self,
        level: LogLevel,
        origin: Origin<'_>,
        arguments: fmt::Arguments<'_>,
    ) {
        self.emit(level.name(), origin, arguments)
    }

    pub fn log_assert(&self, origin: Origin<'_>, message: &str) {
        self.emit_by_severity(LogLevel::Warn, origin, format_args!("{}", message))
    }

    /// Log `message` followed by the description of the last OS error
    pub fn log_message_from_errno(&self, level: LogLevel, message: &str, origin: Origin<'_>) {
        let error = io::Error::last_os_error();
        self.emit_by_severity(level, origin, format_args!("{}: {}", message, error))
    }

    /// Report an unrecoverable error and abort the process
    pub fn fatal_error(&self, origin: Origin<'_>, message: &str) -> ! {
        self.emit_by_severity(LogLevel::Error, origin, format_args!("{}", message));
        if let Some(ref status_printer) = self.status_printer {
            status_printer();
        }
        if let Err(error) = self.output.flush() {
            debug!("Failed to flush the vm output stream: {}", error);
        }
        process::abort()
    }

    /// Write straight to the output stream, regardless of the sink and filter
    pub fn vm_printf(&self, arguments: fmt::Arguments<'_>) -> Result<usize> {
        Ok(self.output.printf(arguments)?)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics")
            .field("logger", &self.logger.is_some())
            .field("should_log", &self.should_log.is_some())
            .field("output", &self.output)
            .field("status_printer", &self.status_printer.is_some())
            .finish()
    }
}
