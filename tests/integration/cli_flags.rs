use std::fs;

use clap::Parser;
use tempfile::TempDir;
use tree_ai::tooling::cli::{Cli, CliContext};

use crate::support::{rendered_names, sample_tree};

#[test]
fn context_from_explicit_config_file_and_flags() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("project");
    fs::create_dir_all(&root).unwrap();
    sample_tree(&root);

    let config_path = temp.path().join("tree-ai.toml");
    fs::write(
        &config_path,
        "[tree]\ninclude_dotfiles = true\n\n[render]\ncolor = false\n",
    )
    .unwrap();

    let cli = Cli::parse_from([
        "tree-ai",
        root.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--no-ai",
        "--include-files",
        "false",
    ]);
    let ctx = CliContext::new(&cli).unwrap();
    assert!(ctx.config().tree.include_dotfiles);
    assert!(!ctx.config().tree.include_files);
    assert!(!ctx.config().describe.enabled);
    assert_eq!(ctx.root(), root.as_path());

    let mut out = Vec::new();
    ctx.run(&mut out).unwrap();
    assert_eq!(rendered_names(&String::from_utf8(out).unwrap()), ["b"]);
}

#[test]
fn invalid_endpoint_is_rejected_at_startup() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("tree-ai.toml");
    fs::write(&config_path, "").unwrap();

    let cli = Cli::parse_from([
        "tree-ai",
        temp.path().to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--endpoint",
        "not a url",
    ]);
    let err = CliContext::new(&cli).err().expect("endpoint validation fails");
    assert!(err.to_string().contains("Invalid endpoint URL"));
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.toml");
    let cli = Cli::parse_from([
        "tree-ai",
        temp.path().to_str().unwrap(),
        "--config",
        missing.to_str().unwrap(),
    ]);
    assert!(CliContext::new(&cli).is_err());
}
