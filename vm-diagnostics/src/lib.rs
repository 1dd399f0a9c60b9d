#[macro_use]
extern crate default_env;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate num_derive;

mod crash_dump;
mod diagnostics;
mod error;
pub mod ffi;
mod logger;
mod macros;
mod message;
mod output;
mod severity;
mod version;

pub use crash_dump::{append_crash_dump_filename, crash_dump_path, CRASH_DUMP_FILE_NAME};
pub use diagnostics::{Diagnostics, StatusPrinter, VM_DIAGNOSTICS};
pub use error::{Error, Result};
pub use logger::*;
pub use message::{format_bounded, MAX_MESSAGE_SIZE};
pub use output::VmOutput;
pub use severity::LogLevel;
pub use version::{build_version_info, BuildVariant, VersionInfo, VERSION_INFO_SIZE};

/// Environment variable with a comma separated list of enabled categories
pub const CATEGORIES_VARIABLE: &str = "VM_DIAGNOSTICS_CATEGORIES";
