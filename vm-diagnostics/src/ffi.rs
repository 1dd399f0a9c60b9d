//! The C interface the virtual machine and its embedding host link against.
//! Every function operates on the process-wide [`VM_DIAGNOSTICS`].

use crate::{
    append_crash_dump_filename, build_version_info, LogFilter, LogLevel, LogSignal, Logger,
    Origin, VM_DIAGNOSTICS,
};
use std::any::Any;
use std::borrow::Cow;
use std::ffi::{c_void, CStr, CString};
use std::io;
use std::io::Write;
use std::os::raw::{c_char, c_int};
use std::ptr;

pub type LogFunction = unsafe extern "C" fn(
    log_type: *const c_char,
    file_name: *const c_char,
    function_name: *const c_char,
    line: c_int,
    message: *const c_char,
);
pub type ShouldLogFunction = unsafe extern "C" fn(log_type: *const c_char) -> bool;
pub type StatusPrinterFunction = unsafe extern "C" fn();

unsafe fn string_from<'a>(pointer: *const c_char) -> Cow<'a, str> {
    if pointer.is_null() {
        Cow::Borrowed("")
    } else {
        CStr::from_ptr(pointer).to_string_lossy()
    }
}

fn cstring_from(string: &str) -> CString {
    CString::new(string.replace('\0', "")).unwrap_or_default()
}

fn line_from(line: c_int) -> u32 {
    line.max(0) as u32
}

/// A sink implemented by the host as a C function
#[derive(Debug)]
pub struct ForeignLogger {
    function: LogFunction,
}

impl ForeignLogger {
    pub fn new(function: LogFunction) -> Self {
        Self { function }
    }
}

impl Logger for ForeignLogger {
    fn log(&self, signal: LogSignal) {
        let log_type = cstring_from(&signal.category);
        let file_name = cstring_from(&signal.file_name);
        let function_name = cstring_from(&signal.function_name);
        let message = cstring_from(&signal.message);
        let line = c_int::try_from(signal.line).unwrap_or(c_int::MAX);

        unsafe {
            (self.function)(
                log_type.as_ptr(),
                file_name.as_ptr(),
                function_name.as_ptr(),
                line,
                message.as_ptr(),
            )
        }
    }

    fn any(&self) -> &dyn Any {
        self
    }
}

/// A filter implemented by the host as a C function
#[derive(Debug)]
pub struct ForeignShouldLog {
    function: ShouldLogFunction,
}

impl ForeignShouldLog {
    pub fn new(function: ShouldLogFunction) -> Self {
        Self { function }
    }
}

impl LogFilter for ForeignShouldLog {
    fn accepts(&self, category: &str) -> bool {
        let log_type = cstring_from(category);
        unsafe { (self.function)(log_type.as_ptr()) }
    }
}

/// A `FILE*` opened by the host
#[derive(Debug)]
struct ForeignStream {
    file: *mut libc::FILE,
}

unsafe impl Send for ForeignStream {}

impl Write for ForeignStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let written =
            unsafe { libc::fwrite(buf.as_ptr() as *const c_void, 1, buf.len(), self.file) };
        if written == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        if unsafe { libc::fflush(self.file) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn setLogger(logger: Option<LogFunction>) {
    VM_DIAGNOSTICS.write().set_logger(
        logger.map(|function| Box::new(ForeignLogger::new(function)) as Box<dyn Logger>),
    );
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn setShouldLog(should_log: Option<ShouldLogFunction>) {
    VM_DIAGNOSTICS.write().set_should_log(
        should_log.map(|function| Box::new(ForeignShouldLog::new(function)) as Box<dyn LogFilter>),
    );
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn setStatusPrinter(status_printer: Option<StatusPrinterFunction>) {
    VM_DIAGNOSTICS
        .write()
        .set_status_printer(status_printer.map(|function| {
            Box::new(move || unsafe { function() }) as Box<dyn Fn() + Send + Sync>
        }));
}

/// A null stream switches back to the standard output
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn vm_setVMOutputStream(stream: *mut libc::FILE) {
    let stream = if stream.is_null() {
        None
    } else {
        Some(Box::new(ForeignStream { file: stream }) as Box<dyn Write + Send>)
    };
    VM_DIAGNOSTICS.write().set_vm_output_stream(stream);
}

/// Returns the amount of written bytes or -1 on failure
#[no_mangle]
pub unsafe extern "C" fn vm_printf(message: *const c_char) -> c_int {
    let message = string_from(message);
    match VM_DIAGNOSTICS.read_recursive().vm_printf(format_args!("{}", message)) {
        Ok(written) => c_int::try_from(written).unwrap_or(c_int::MAX),
        Err(error) => {
            debug!("vm_printf failed: {}", error);
            -1
        }
    }
}

/// The message is formatted by the caller, it is still bounded like any other message
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn logTypedMessage(
    log_type: *const c_char,
    file_name: *const c_char,
    function_name: *const c_char,
    line: c_int,
    message: *const c_char,
) {
    let log_type = string_from(log_type);
    let file_name = string_from(file_name);
    let function_name = string_from(function_name);
    let message = string_from(message);
    VM_DIAGNOSTICS.read_recursive().emit(
        &log_type,
        Origin::new(&file_name, &function_name, line_from(line)),
        format_args!("{}", message),
    );
}

/// Messages with a level outside of the severity table are dropped
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn logMessage(
    level: c_int,
    file_name: *const c_char,
    function_name: *const c_char,
    line: c_int,
    message: *const c_char,
) {
    let level = match LogLevel::from_index(level as i64) {
        Ok(level) => level,
        Err(error) => {
            warn!("{}", error);
            return;
        }
    };

    let file_name = string_from(file_name);
    let function_name = string_from(function_name);
    let message = string_from(message);
    VM_DIAGNOSTICS.read_recursive().emit_by_severity(
        level,
        Origin::new(&file_name, &function_name, line_from(line)),
        format_args!("{}", message),
    );
}

#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn logAssert(
    file_name: *const c_char,
    function_name: *const c_char,
    line: c_int,
    message: *const c_char,
) {
    let file_name = string_from(file_name);
    let function_name = string_from(function_name);
    let message = string_from(message);
    VM_DIAGNOSTICS.read_recursive().log_assert(
        Origin::new(&file_name, &function_name, line_from(line)),
        &message,
    );
}

#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn logMessageFromErrno(
    level: c_int,
    message: *const c_char,
    file_name: *const c_char,
    function_name: *const c_char,
    line: c_int,
) {
    // read errno before anything else gets a chance to change it
    let error = io::Error::last_os_error();
    let level = match LogLevel::from_index(level as i64) {
        Ok(level) => level,
        Err(error) => {
            warn!("{}", error);
            return;
        }
    };

    let message = string_from(message);
    let file_name = string_from(file_name);
    let function_name = string_from(function_name);
    VM_DIAGNOSTICS.read_recursive().emit_by_severity(
        level,
        Origin::new(&file_name, &function_name, line_from(line)),
        format_args!("{}: {}", message, error),
    );
}

/// The level is decided by the registered filter, the vm-side level is ignored
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn logLevel(_level: c_int) {}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn getLogLevel() -> c_int {
    LogLevel::Trace as c_int
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn isLogDebug() -> c_int {
    0
}

#[no_mangle]
pub unsafe extern "C" fn vm_error(message: *const c_char) -> ! {
    let message = string_from(message);
    VM_DIAGNOSTICS
        .read_recursive()
        .fatal_error(crate::origin!(), &message)
}

/// The returned string must be released with `freeVersionInfo`
#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn getVersionInfo(verbose: c_int) -> *mut c_char {
    cstring_from(&build_version_info(verbose != 0)).into_raw()
}

#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn freeVersionInfo(info: *mut c_char) {
    if !info.is_null() {
        drop(CString::from_raw(info));
    }
}

/// The caller guarantees that the buffer has room for the file name and its terminator
#[no_mangle]
#[allow(non_snake_case)]
pub unsafe extern "C" fn getCrashDumpFilenameInto(buffer: *mut c_char) {
    if buffer.is_null() {
        return;
    }
    let length = CStr::from_ptr(buffer).to_bytes().len();

    let mut file_name = String::new();
    append_crash_dump_filename(&mut file_name);
    let file_name = cstring_from(&file_name);
    let bytes = file_name.as_bytes_with_nul();

    ptr::copy_nonoverlapping(
        bytes.as_ptr() as *const c_char,
        buffer.add(length),
        bytes.len(),
    );
}
