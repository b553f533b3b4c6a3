//! ---
//! soma_section: "01-version-reporting"
//! soma_subsection: "build"
//! soma_type: "source"
//! soma_scope: "build"
//! soma_description: "Resolves the embedded engine version at compile time."
//! soma_version: "v0.0.0-prealpha"
//! soma_owner: "tbd"
//! ---
use std::env;
use std::path::Path;

use vergen::EmitBuilder;

#[allow(dead_code)]
#[path = "src/resolve.rs"]
mod resolve;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    EmitBuilder::builder()
        .all_build()
        .all_cargo()
        .all_git()
        .emit()?;

    let ((major, minor, patch), source) = resolve::resolve(|name| env::var(name).ok())?;
    println!("cargo:rustc-env=SOMA_EMBEDDED_VERSION_MAJOR={major}");
    println!("cargo:rustc-env=SOMA_EMBEDDED_VERSION_MINOR={minor}");
    println!("cargo:rustc-env=SOMA_EMBEDDED_VERSION_PATCH={patch}");
    println!("cargo:rustc-env=SOMA_EMBEDDED_VERSION_SOURCE={source}");

    if source == "header" {
        if let Ok(dir) = env::var(resolve::ENV_INCLUDE_DIR) {
            println!(
                "cargo:rerun-if-changed={}",
                resolve::header_path(Path::new(dir.trim())).display()
            );
        }
    }
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/resolve.rs");
    println!("cargo:rerun-if-env-changed={}", resolve::ENV_OVERRIDE);
    println!("cargo:rerun-if-env-changed={}", resolve::ENV_INCLUDE_DIR);
    Ok(())
}
