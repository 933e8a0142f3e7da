use std::fs;
use std::path::{Path, PathBuf};
use tree_ai::config::TreeAiConfig;

/// Root with `a.txt`, `b/`, `b/c.txt` and `.hidden`.
pub fn sample_tree(root: &Path) {
    fs::write(root.join("a.txt"), "alpha\n").unwrap();
    fs::create_dir_all(root.join("b")).unwrap();
    fs::write(root.join("b").join("c.txt"), "charlie\n").unwrap();
    fs::write(root.join(".hidden"), "secret\n").unwrap();
}

/// Config that never reaches outside the process: no color, no descriptions.
pub fn offline_config() -> TreeAiConfig {
    let mut config = TreeAiConfig::default();
    config.describe.enabled = false;
    config.render.color = false;
    config
}

/// Names shown on each rendered line, in output order.
pub fn rendered_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| {
            let after_icon = line
                .split_once("📄 ")
                .or_else(|| line.split_once("💼 "))
                .map(|(_, rest)| rest)
                .unwrap_or(line);
            after_icon.split(' ').next().unwrap_or_default().to_string()
        })
        .collect()
}

#[cfg(unix)]
pub fn executable_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
