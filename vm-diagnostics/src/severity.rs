use crate::{Error, Result};
use num_traits::FromPrimitive;
use std::fmt::{Display, Formatter};

static SEVERITY_NAMES: [&str; 6] = ["NONE", "ERROR", "WARNING", "INFO", "DEBUG", "TRACE"];

/// Fixed severity vocabulary of the virtual machine.
/// The discriminant is the index the VM uses when it logs by level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
#[repr(u8)]
pub enum LogLevel {
    None = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub const ALL: [LogLevel; 6] = [
        LogLevel::None,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Validate a raw level coming from the outside world
    pub fn from_index(level: i64) -> Result<Self> {
        Self::from_i64(level).ok_or(Error::InvalidLogLevel(level))
    }

    /// The category label used when a message is logged with this level
    pub fn name(self) -> &'static str {
        SEVERITY_NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        SEVERITY_NAMES
            .iter()
            .position(|each| *each == name)
            .and_then(|index| Self::from_usize(index))
    }

    /// The closest level of the `log` crate. `None` has no counterpart.
    pub fn as_log_level(self) -> Option<log::Level> {
        match self {
            LogLevel::None => None,
            LogLevel::Error => Some(log::Level::Error),
            LogLevel::Warn => Some(log::Level::Warn),
            LogLevel::Info => Some(log::Level::Info),
            LogLevel::Debug => Some(log::Level::Debug),
            LogLevel::Trace => Some(log::Level::Trace),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
