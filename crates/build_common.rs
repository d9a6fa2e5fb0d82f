// Shared build script utilities for README-to-rustdoc transformation.
// Include this in build.rs files with: include!("../build_common.rs");
//
// Required imports in the including file:
//   use std::env;
//   use std::fs;
//   use std::path::Path;

/// Rewrite a crate's README.md so rustdoc can resolve its links, then write it to OUT_DIR.
///
/// Transformations:
/// 1. Strip 'src/' prefix and '.rs' extension so links resolve to modules
/// 2. Strip '/mod' so directory modules resolve too
/// 3. Convert the relative workspace README link to the repository URL
fn process_readme_for_rustdoc(crate_dir: &str) {
    println!("cargo:rerun-if-changed=README.md");
    println!("cargo:rerun-if-changed=../../Cargo.toml");

    let readme_path = Path::new(crate_dir).join("README.md");
    let content = fs::read_to_string(&readme_path).unwrap_or_default();

    let repo_url = get_workspace_repo_url(crate_dir);

    let mut rustdoc_content = content
        .replace("](src/", "](")
        .replace("/mod.rs)", ")")
        .replace(".rs)", ")");

    if let Some(url) = &repo_url {
        rustdoc_content = rustdoc_content.replace("](../../README.md", &format!("]({url}"));
    }

    // Always emit the file so `include_str!` never fails on a missing README
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("README_GENERATED.md");
    fs::write(dest_path, rustdoc_content).unwrap();
}

/// Extract `repository = "..."` from the workspace Cargo.toml.
fn get_workspace_repo_url(crate_dir: &str) -> Option<String> {
    let workspace_toml = Path::new(crate_dir)
        .parent()? // crates/
        .parent()? // workspace root
        .join("Cargo.toml");

    let content = fs::read_to_string(workspace_toml).ok()?;

    for line in content.lines() {
        let line = line.trim();
        if line.starts_with("repository")
            && line.contains('=')
            && let Some(start) = line.find('"')
            && let Some(end) = line.rfind('"')
            && start < end
        {
            return Some(line[start + 1..end].to_string());
        }
    }
    None
}
