use anyhow::Result;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use vm_diagnostics::{
    AllCategories, ConsoleLogger, Diagnostics, EnabledCategories, LogCrateLogger, LogFilter,
    Logger, VersionInfo, CATEGORIES_VARIABLE,
};

#[derive(Parser, Debug)]
#[command(author = "feenk gmbh. <contact@feenk.com>")]
#[command(about = "Emit diagnostics through the virtual machine logging facade")]
#[command(disable_version_flag = true)]
pub struct DiagnosticsOptions {
    /// Enable messages of the given category, can be repeated.
    /// Categories listed in VM_DIAGNOSTICS_CATEGORIES are enabled too.
    #[arg(long, value_name = "CATEGORY")]
    enable: Vec<String>,
    /// Enable messages of every category
    #[arg(long)]
    all: bool,
    /// Forward messages to the `log` crate (see RUST_LOG) instead of printing them
    #[arg(long)]
    forward: bool,
    /// Redirect the vm output stream to a file
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    #[command(subcommand)]
    pub command: DiagnosticsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DiagnosticsCommand {
    /// Print the version information of the executable
    Version {
        /// Include the sources the vm was built from
        #[arg(long)]
        verbose: bool,
        /// Print a table of the build components
        #[arg(long)]
        report: bool,
    },
    /// Emit a message of an arbitrary category
    Log { category: String, message: String },
    /// Emit a message with a severity level between 0 (NONE) and 5 (TRACE)
    Severity {
        #[arg(allow_negative_numbers = true)]
        level: i64,
        message: String,
    },
    /// Write to the vm output stream, regardless of the enabled categories
    Printf { message: String },
    /// Print the path a crash dump would be written to
    CrashDump { directory: Option<PathBuf> },
    /// Report an unrecoverable error and abort
    Fatal { message: String },
}

impl DiagnosticsOptions {
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn logger(&self) -> Box<dyn Logger> {
        if self.forward {
            Box::new(LogCrateLogger::new())
        } else {
            Box::new(ConsoleLogger::new())
        }
    }

    fn filter(&self) -> Box<dyn LogFilter> {
        if self.all {
            return Box::new(AllCategories);
        }
        let mut categories = EnabledCategories::from_env(CATEGORIES_VARIABLE);
        categories.extend(self.enable.iter().cloned());
        debug!("Enabled log categories: {:?}", categories.enabled());
        Box::new(categories)
    }

    /// Register the sink, the filter and the output stream described by the options
    pub fn configure(&self, diagnostics: &mut Diagnostics) -> Result<()> {
        diagnostics.set_logger(Some(self.logger()));
        diagnostics.set_should_log(Some(self.filter()));

        if let Some(output) = self.output() {
            let file = File::create(output)?;
            diagnostics.set_vm_output_stream(Some(Box::new(BufWriter::new(file))));
        }

        diagnostics.set_status_printer(Some(Box::new(|| {
            eprintln!("Virtual machine status:");
            eprintln!("{}", VersionInfo::current().describe(false));
        })));
        Ok(())
    }
}
