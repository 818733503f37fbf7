use std::process::Command;

fn main() {
    // Explicit values win over anything detected from git, e.g.
    // VERSTAMP_VERSION=1.2.3 cargo build --release
    println!("cargo:rerun-if-env-changed=VERSTAMP_VERSION");
    println!("cargo:rerun-if-env-changed=VERSTAMP_COMMIT");
    println!("cargo:rerun-if-env-changed=VERSTAMP_BUILD_DATE");
    println!("cargo:rerun-if-env-changed=VERSTAMP_BRANCH");
    // Rerun if .git/HEAD changes (new commits)
    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rerun-if-changed=../.git/refs");

    set_version_info();
    set_toolchain_info();
}

/// Detect git metadata for the compiled-in defaults.
fn set_version_info() {
    // Full hash; consumers shorten it themselves
    let git_hash = git(&["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // "HEAD" means a detached checkout, which has no branch to report
    let git_branch = git(&["rev-parse", "--abbrev-ref", "HEAD"])
        .filter(|branch| branch != "HEAD")
        .unwrap_or_default();

    let build_timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);

    println!("cargo:rustc-env=VERSTAMP_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=VERSTAMP_GIT_BRANCH={}", git_branch);
    println!("cargo:rustc-env=VERSTAMP_BUILD_TIMESTAMP={}", build_timestamp);
}

/// Record the compiler version and target triple for the runtime fields.
fn set_toolchain_info() {
    let rustc = std::env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

    // "rustc 1.86.0 (05f9846f8 2025-03-31)" -> "1.86.0"
    let rustc_version = Command::new(rustc)
        .arg("-V")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .and_then(|s| s.split_whitespace().nth(1).map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string());

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=VERSTAMP_RUSTC_VERSION={}", rustc_version);
    println!("cargo:rustc-env=VERSTAMP_TARGET={}", target);
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
