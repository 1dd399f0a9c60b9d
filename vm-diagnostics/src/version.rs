use crate::message::format_bounded;

/// Size of the buffer the version description is assembled into, terminator included
pub const VERSION_INFO_SIZE: usize = 4096;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuildVariant {
    Production,
    Debug,
    Assert,
}

impl BuildVariant {
    pub fn current() -> Self {
        if !cfg!(debug_assertions) {
            BuildVariant::Production
        } else if cfg!(feature = "debug_vm") {
            BuildVariant::Debug
        } else {
            BuildVariant::Assert
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildVariant::Production => "Production",
            BuildVariant::Debug => "Debug",
            BuildVariant::Assert => "Assert",
        }
    }
}

/// Build identifiers of the virtual machine.
///
/// Most of them are provided by the build environment (`VM_BUILD_STRING`,
/// `VM_BUILD_SOURCE_STRING`, ...) and fall back to placeholders otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub image_dialect: String,
    pub vm_version: String,
    pub build_string: String,
    pub compiler_version: String,
    pub variant: BuildVariant,
    pub object_memory: String,
    pub uses_xshm: bool,
    pub itimer_heartbeat: bool,
    pub interpreter_build: String,
    pub extended_attribute: String,
    pub build_source: String,
    pub build_timestamp: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        let object_memory = if cfg!(target_pointer_width = "64") {
            "Spur 64-bit"
        } else {
            "Spur"
        };

        Self {
            image_dialect: default_env!("IMAGE_DIALECT_NAME", "Pharo").to_string(),
            vm_version: default_env!("VM_VERSION", "unknown").to_string(),
            build_string: default_env!("VM_BUILD_STRING", "local").to_string(),
            compiler_version: env!("VM_DIAGNOSTICS_COMPILER_VERSION").to_string(),
            variant: BuildVariant::current(),
            object_memory: object_memory.to_string(),
            uses_xshm: default_env!("VM_USE_XSHM", "0") == "1",
            itimer_heartbeat: default_env!("VM_ITIMER_HEARTBEAT", "0") == "1",
            interpreter_build: default_env!("VM_INTERPRETER_BUILD", "unknown interpreter")
                .to_string(),
            extended_attribute: default_env!("VM_EXTENDED_ATTRIBUTE", "").to_string(),
            build_source: default_env!("VM_BUILD_SOURCE_STRING", "unknown revision").to_string(),
            build_timestamp: env!("VM_DIAGNOSTICS_BUILD_TIMESTAMP").to_string(),
        }
    }

    /// `[Production Spur 64-bit VM]`
    fn flavour(&self) -> String {
        let mut flavour = self.variant.name().to_string();
        if !self.object_memory.is_empty() {
            flavour.push(' ');
            flavour.push_str(&self.object_memory);
        }
        if self.itimer_heartbeat {
            flavour.push_str(" ITHB");
        }
        flavour
    }

    fn xshm(&self) -> &'static str {
        if self.uses_xshm {
            " XShm"
        } else {
            ""
        }
    }

    /// Describe the build, the verbose form also names the sources the vm was built from.
    /// The result is bounded by [`VERSION_INFO_SIZE`].
    pub fn describe(&self, verbose: bool) -> String {
        if verbose {
            format_bounded(
                VERSION_INFO_SIZE,
                format_args!(
                    "{}VM version:{}-{}{} {} [{} VM]\nBuilt from: {}\n With:{}\n Revision: {}",
                    self.image_dialect,
                    self.vm_version,
                    self.build_string,
                    self.xshm(),
                    self.compiler_version,
                    self.flavour(),
                    self.interpreter_build,
                    self.extended_attribute,
                    self.build_source
                ),
            )
        } else {
            format_bounded(
                VERSION_INFO_SIZE,
                format_args!(
                    "{}-{}{} {} [{} VM]\n{}\n{}\n{}",
                    self.vm_version,
                    self.build_string,
                    self.xshm(),
                    self.compiler_version,
                    self.flavour(),
                    self.interpreter_build,
                    self.extended_attribute,
                    self.build_source
                ),
            )
        }
    }

    pub fn short_version(&self) -> String {
        format!("{}-{}", self.vm_version, self.build_string)
    }

    fn components(&self) -> Vec<Vec<String>> {
        vec![
            vec!["VM".to_string(), self.short_version()],
            vec!["Variant".to_string(), format!("{} VM", self.flavour())],
            vec!["Compiler".to_string(), self.compiler_version.clone()],
            vec!["Interpreter".to_string(), self.interpreter_build.clone()],
            vec!["Revision".to_string(), self.build_source.clone()],
        ]
    }

    fn intro(&self) -> String {
        format!(
            "{} VM {} built on {}",
            self.image_dialect, self.vm_version, self.build_timestamp
        )
    }

    /// A human readable report for the terminal
    #[cfg(feature = "colored_terminal")]
    pub fn report(&self) -> String {
        use colored::Colorize;
        use comfy_table::Table;

        let mut components_table = Table::new();
        components_table.set_header(vec!["Component", "Version"]);
        for component in self.components() {
            components_table.add_row(component);
        }

        format!("{}\n\n{components_table}", self.intro().green().bold())
    }

    #[cfg(not(feature = "colored_terminal"))]
    pub fn report(&self) -> String {
        let components = self
            .components()
            .into_iter()
            .map(|component| component.join(": "))
            .collect::<Vec<String>>()
            .join("\n");

        format!("{}\n\n{}", self.intro(), components)
    }
}

/// Describe the build identifiers this virtual machine was compiled with
pub fn build_version_info(verbose: bool) -> String {
    VersionInfo::current().describe(verbose)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_info() -> VersionInfo {
        VersionInfo {
            image_dialect: "Pharo".to_string(),
            vm_version: "v10.0.5".to_string(),
            build_string: "ab12cd3".to_string(),
            compiler_version: "rustc 1.75.0".to_string(),
            variant: BuildVariant::Production,
            object_memory: "Spur 64-bit".to_string(),
            uses_xshm: false,
            itimer_heartbeat: false,
            interpreter_build: "CoInterpreter VMMaker.oscog-eem.3228".to_string(),
            extended_attribute: "StackToRegisterMappingCogit".to_string(),
            build_source: "https://github.com/pharo-project/pharo-vm".to_string(),
            build_timestamp: "2024-01-01 00:00:00 UTC".to_string(),
        }
    }

    #[test]
    fn short_description() {
        assert_eq!(
            version_info().describe(false),
            "v10.0.5-ab12cd3 rustc 1.75.0 [Production Spur 64-bit VM]\n\
             CoInterpreter VMMaker.oscog-eem.3228\n\
             StackToRegisterMappingCogit\n\
             https://github.com/pharo-project/pharo-vm"
        );
    }

    #[test]
    fn verbose_description() {
        let mut info = version_info();
        info.uses_xshm = true;
        info.itimer_heartbeat = true;

        assert_eq!(
            info.describe(true),
            "PharoVM version:v10.0.5-ab12cd3 XShm rustc 1.75.0 [Production Spur 64-bit ITHB VM]\n\
             Built from: CoInterpreter VMMaker.oscog-eem.3228\n \
             With:StackToRegisterMappingCogit\n \
             Revision: https://github.com/pharo-project/pharo-vm"
        );
    }

    #[test]
    fn description_is_bounded() {
        let mut info = version_info();
        info.extended_attribute = "x".repeat(10_000);
        assert_eq!(info.describe(true).len(), VERSION_INFO_SIZE - 1);
    }

    #[test]
    fn current_build_is_described() {
        let info = VersionInfo::current();
        assert_eq!(info.variant, BuildVariant::current());
        assert!(build_version_info(false).starts_with(&info.short_version()));
        assert!(build_version_info(true).contains("VM version:"));
    }
}
