use std::any::Any;

/// Where a diagnostic message was produced
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Origin<'a> {
    pub file_name: &'a str,
    pub function_name: &'a str,
    pub line: u32,
}

impl<'a> Origin<'a> {
    pub fn new(file_name: &'a str, function_name: &'a str, line: u32) -> Self {
        Self {
            file_name,
            function_name,
            line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSignal {
    pub category: String,
    pub file_name: String,
    pub function_name: String,
    pub line: u32,
    pub message: String,
}

impl LogSignal {
    pub fn new(category: &str, origin: Origin<'_>, message: String) -> Self {
        Self {
            category: category.to_string(),
            file_name: origin.file_name.to_string(),
            function_name: origin.function_name.to_string(),
            line: origin.line,
            message,
        }
    }

    pub fn origin(&self) -> Origin<'_> {
        Origin::new(&self.file_name, &self.function_name, self.line)
    }
}

/// A sink that performs the actual output of diagnostic messages.
///
/// Sinks are shared between threads that emit concurrently,
/// implementations that keep state must guard it themselves.
pub trait Logger: Send + Sync {
    fn log(&self, signal: LogSignal);
    fn any(&self) -> &dyn Any;
}

impl<F> Logger for F
where
    F: Fn(LogSignal) + Send + Sync + 'static,
{
    fn log(&self, signal: LogSignal) {
        self(signal)
    }

    fn any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _signal: LogSignal) {}

    fn any(&self) -> &dyn Any {
        self
    }
}
