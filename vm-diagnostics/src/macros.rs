/// The [`Origin`](crate::Origin) of the macro call site
#[macro_export]
macro_rules! origin {
    () => {
        $crate::Origin::new(file!(), module_path!(), line!())
    };
}

/// Emit a message of an arbitrary category.
///
/// ```ignore
/// log_typed!("Beacon", "loaded {} methods", count);
/// log_typed!(diagnostics: my_diagnostics, "INFO", "hello {}", 5);
/// ```
#[macro_export]
macro_rules! log_typed {
    (diagnostics: $diagnostics:expr, $category:expr, $($arg:tt)+) => {
        $diagnostics.emit($category, $crate::origin!(), format_args!($($arg)+))
    };
    ($category:expr, $($arg:tt)+) => {
        $crate::VM_DIAGNOSTICS
            .read_recursive()
            .emit($category, $crate::origin!(), format_args!($($arg)+))
    };
}

/// Emit a message with a [`LogLevel`](crate::LogLevel)
#[macro_export]
macro_rules! log_message {
    (diagnostics: $diagnostics:expr, $level:expr, $($arg:tt)+) => {
        $diagnostics.emit_by_severity($level, $crate::origin!(), format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::VM_DIAGNOSTICS
            .read_recursive()
            .emit_by_severity($level, $crate::origin!(), format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_error {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $crate::log_message!(diagnostics: $diagnostics, $crate::LogLevel::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_message!($crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warn {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $crate::log_message!(diagnostics: $diagnostics, $crate::LogLevel::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_message!($crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $crate::log_message!(diagnostics: $diagnostics, $crate::LogLevel::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_message!($crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $crate::log_message!(diagnostics: $diagnostics, $crate::LogLevel::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_message!($crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_trace {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $crate::log_message!(diagnostics: $diagnostics, $crate::LogLevel::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_message!($crate::LogLevel::Trace, $($arg)+)
    };
}

/// Report an unrecoverable error and abort
#[macro_export]
macro_rules! fatal_error {
    (diagnostics: $diagnostics:expr, $message:expr) => {
        $diagnostics.fatal_error($crate::origin!(), $message)
    };
    ($message:expr) => {
        $crate::VM_DIAGNOSTICS
            .read_recursive()
            .fatal_error($crate::origin!(), $message)
    };
}

/// Formatted output to the vm output stream, bypassing the log filter
#[macro_export]
macro_rules! vm_printf {
    (diagnostics: $diagnostics:expr, $($arg:tt)+) => {
        $diagnostics.vm_printf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::VM_DIAGNOSTICS.read_recursive().vm_printf(format_args!($($arg)+))
    };
}
