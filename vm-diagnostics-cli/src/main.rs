#[macro_use]
extern crate log;

mod options;

use crate::options::{DiagnosticsCommand, DiagnosticsOptions};
use anyhow::Result;
use clap::Parser;
use std::env;
use vm_diagnostics::{
    build_version_info, crash_dump_path, fatal_error, log_message, log_typed, vm_printf, LogLevel,
    VersionInfo, VM_DIAGNOSTICS,
};

fn main() -> Result<()> {
    env_logger::init();

    let options = DiagnosticsOptions::parse();
    options.configure(&mut VM_DIAGNOSTICS.write())?;

    match options.command {
        DiagnosticsCommand::Version { verbose, report } => {
            if report {
                println!("{}", VersionInfo::current().report());
            } else {
                println!("{}", build_version_info(verbose));
            }
        }
        DiagnosticsCommand::Log {
            ref category,
            ref message,
        } => {
            log_typed!(category, "{}", message);
        }
        DiagnosticsCommand::Severity { level, ref message } => {
            let level = LogLevel::from_index(level)?;
            log_message!(level, "{}", message);
        }
        DiagnosticsCommand::Printf { ref message } => {
            let written = vm_printf!("{}", message)?;
            debug!("Wrote {} bytes to the vm output stream", written);
        }
        DiagnosticsCommand::CrashDump { ref directory } => {
            let directory = match directory {
                Some(directory) => directory.clone(),
                None => env::current_dir()?,
            };
            println!("{}", crash_dump_path(directory).display());
        }
        DiagnosticsCommand::Fatal { ref message } => {
            fatal_error!(message);
        }
    }

    VM_DIAGNOSTICS.read().output().flush()?;
    Ok(())
}
