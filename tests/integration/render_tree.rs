use std::fs;

use tempfile::TempDir;
use tree_ai::error::ApiError;
use tree_ai::tooling::cli::CliContext;

use crate::support::{offline_config, rendered_names, sample_tree};

#[test]
fn plain_listing_skips_dotfiles() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    let ctx = CliContext::from_config(temp.path().to_path_buf(), offline_config());
    let mut out = Vec::new();
    let count = ctx.run(&mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(count, 3);
    assert_eq!(rendered_names(&output), ["a.txt", "b", "c.txt"]);
    assert_eq!(
        output,
        "└── 📄 a.txt\n├── 💼 b\n│   └── 📄 c.txt\n"
    );
}

#[test]
fn dotfiles_appear_when_included() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());

    let mut config = offline_config();
    config.tree.include_dotfiles = true;
    let ctx = CliContext::from_config(temp.path().to_path_buf(), config);
    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();

    let names = rendered_names(&String::from_utf8(out).unwrap());
    assert_eq!(names, [".hidden", "a.txt", "b", "c.txt"]);
}

#[test]
fn zero_depth_lists_immediate_children_only() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("sub").join("deeper")).unwrap();
    fs::write(temp.path().join("sub").join("inner.txt"), "x").unwrap();

    let mut config = offline_config();
    config.tree.max_depth = 0;
    let ctx = CliContext::from_config(temp.path().to_path_buf(), config);
    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();

    assert_eq!(rendered_names(&String::from_utf8(out).unwrap()), ["sub"]);
}

#[test]
fn directories_only_and_ignore_files() {
    let temp = TempDir::new().unwrap();
    sample_tree(temp.path());
    fs::create_dir_all(temp.path().join("target").join("debug")).unwrap();
    fs::write(temp.path().join(".gitignore"), "target/\n*.log\n").unwrap();
    fs::write(temp.path().join("run.log"), "noise").unwrap();

    let ctx = CliContext::from_config(temp.path().to_path_buf(), offline_config());
    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();
    let names = rendered_names(&String::from_utf8(out).unwrap());
    assert_eq!(names, ["a.txt", "b", "c.txt"]);

    let mut config = offline_config();
    config.tree.include_files = false;
    let ctx = CliContext::from_config(temp.path().to_path_buf(), config);
    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();
    assert_eq!(rendered_names(&String::from_utf8(out).unwrap()), ["b"]);
}

#[test]
fn empty_root_renders_nothing() {
    let temp = TempDir::new().unwrap();
    let ctx = CliContext::from_config(temp.path().to_path_buf(), offline_config());
    let mut out = Vec::new();
    assert_eq!(ctx.run(&mut out).unwrap(), 0);
    assert!(out.is_empty());
}

#[test]
fn missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    let ctx = CliContext::from_config(temp.path().join("absent"), offline_config());
    let mut out = Vec::new();
    let err = ctx.run(&mut out).unwrap_err();
    assert!(matches!(err, ApiError::RootNotAccessible { .. }));
    assert!(err.to_string().contains("absent"));
}
