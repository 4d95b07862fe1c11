use cargo_lock::Lockfile;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Serialize)]
struct DepInfo {
    name: String,
    version: String,
    checksum: Option<String>,
    source: Option<String>,
}

fn git_hash() -> String {
    match Command::new("git").args(["rev-parse", "--short=12", "HEAD"]).output() {
        Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    }
}

/// Packages pinned in Cargo.lock; empty when no lockfile exists yet.
fn locked_deps(lock_path: &Path) -> Vec<DepInfo> {
    let Ok(lockfile) = Lockfile::load(lock_path) else {
        println!("cargo:warning=Cargo.lock not readable, build info will list no dependencies");
        return Vec::new();
    };
    lockfile
        .packages
        .into_iter()
        .filter(|pkg| pkg.name.as_str() != env!("CARGO_PKG_NAME"))
        .map(|pkg| DepInfo {
            name: pkg.name.as_str().to_string(),
            version: pkg.version.to_string(),
            checksum: pkg.checksum.map(|c| c.to_string()),
            source: pkg.source.map(|s| s.to_string()),
        })
        .collect()
}

fn main() {
    println!("cargo:rustc-env=APP_GIT_HASH={}", git_hash());
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("set by cargo"));
    let lock_path = manifest_dir.join("Cargo.lock");
    println!("cargo:rerun-if-changed=Cargo.lock");

    let json_info = serde_json::to_string(&locked_deps(&lock_path)).expect("serializable");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("set by cargo"));
    let dest_path = out_dir.join("deps_info.json");
    fs::write(&dest_path, json_info).expect("Failed to write dependency info");
    println!("cargo:rustc-env=DEPS_INFO_PATH={}", dest_path.display());
}
