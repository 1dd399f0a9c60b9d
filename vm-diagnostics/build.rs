use std::env;
use std::process::Command;

const BUILD_IDENTIFIERS: [&str; 8] = [
    "IMAGE_DIALECT_NAME",
    "VM_VERSION",
    "VM_BUILD_STRING",
    "VM_BUILD_SOURCE_STRING",
    "VM_INTERPRETER_BUILD",
    "VM_EXTENDED_ATTRIBUTE",
    "VM_USE_XSHM",
    "VM_ITIMER_HEARTBEAT",
];

fn compiler_version() -> String {
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|version| version.trim().to_string())
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| "rustc".to_string())
}

fn main() {
    println!(
        "cargo:rustc-env=VM_DIAGNOSTICS_COMPILER_VERSION={}",
        compiler_version()
    );
    println!(
        "cargo:rustc-env=VM_DIAGNOSTICS_BUILD_TIMESTAMP={}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    println!("cargo:rerun-if-changed=build.rs");
    for identifier in BUILD_IDENTIFIERS {
        println!("cargo:rerun-if-env-changed={}", identifier);
    }
}
