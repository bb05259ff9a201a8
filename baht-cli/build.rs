use std::path::Path;
use std::process::Command;

fn git(repo: &Path, args: &[&str]) -> Option<String> {
    let out = Command::new("git").arg("-C").arg(repo).args(args).output().ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = Path::new(&manifest_dir).join("..");

    let mut build_id = git(&workspace, &["rev-parse", "--short", "HEAD"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    if git(&workspace, &["status", "--porcelain"]).is_some_and(|s| !s.is_empty()) {
        build_id.push_str("-dirty");
    }

    println!("cargo:rerun-if-changed=../.git/HEAD");
    println!("cargo:rustc-env=BAHT_BUILD_SHA={}", build_id);
}
