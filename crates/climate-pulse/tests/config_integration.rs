//! Configuration layering as seen through the binary.
//!
//! Each test gets its own working tree and an empty `XDG_CONFIG_HOME`, then
//! reads the effective settings back from `info --json`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    tmp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("xdg")).unwrap();
        fs::create_dir_all(tmp.path().join("work")).unwrap();
        Self { tmp }
    }

    fn work(&self) -> PathBuf {
        self.tmp.path().join("work")
    }

    fn user_config(&self, name: &str, contents: &str) {
        let dir = self.tmp.path().join("xdg").join("climate-pulse");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
    }

    #[allow(deprecated)]
    fn cmd(&self, dir: &Path) -> Command {
        let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        cmd.env("XDG_CONFIG_HOME", self.tmp.path().join("xdg"))
            .env_remove("CLIMATE_PULSE_SAMPLE_SIZE")
            .env_remove("CLIMATE_PULSE_SAMPLE_SEED")
            .env_remove("CLIMATE_PULSE_TOP_THEMES")
            .args(["-C", dir.to_str().unwrap()]);
        cmd
    }

    fn settings(&self, dir: &Path, extra: &[&str]) -> Value {
        let output = self
            .cmd(dir)
            .args(extra)
            .args(["info", "--json"])
            .output()
            .expect("failed to run command");
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json: Value = serde_json::from_slice(&output.stdout).expect("invalid JSON output");
        json["config"].clone()
    }
}

// =============================================================================
// Defaults & Discovery
// =============================================================================

#[test]
fn defaults_apply_without_config() {
    let sb = Sandbox::new();
    let cfg = sb.settings(&sb.work(), &[]);
    assert!(cfg["config_file"].is_null());
    assert_eq!(cfg["top_themes"], 20);
    assert_eq!(cfg["sample_size"], 5000);
    assert_eq!(cfg["sample_seed"], 42);
    assert_eq!(cfg["topic"], "Climate Change");
    assert_eq!(cfg["max_input_bytes"], 50 * 1024 * 1024);
}

#[test]
fn project_config_found_from_nested_directory() {
    let sb = Sandbox::new();
    let nested = sb.work().join("data").join("2018");
    fs::create_dir_all(&nested).unwrap();
    fs::write(sb.work().join(".climate-pulse.toml"), "top_themes = 12\n").unwrap();

    let cfg = sb.settings(&nested, &[]);
    assert_eq!(cfg["top_themes"], 12);
    assert!(
        cfg["config_file"]
            .as_str()
            .unwrap()
            .ends_with(".climate-pulse.toml")
    );
}

#[test]
fn every_format_is_read() {
    for (seed, name, contents) in [
        (1, ".climate-pulse.toml", "sample_seed = 1\n"),
        (2, ".climate-pulse.yaml", "sample_seed: 2\n"),
        (3, ".climate-pulse.yml", "sample_seed: 3\n"),
        (4, ".climate-pulse.json", r#"{"sample_seed": 4}"#),
    ] {
        let sb = Sandbox::new();
        fs::write(sb.work().join(name), contents).unwrap();
        let cfg = sb.settings(&sb.work(), &[]);
        assert_eq!(cfg["sample_seed"], seed, "{name} not read");
    }
}

#[test]
fn repository_root_bounds_the_search() {
    let sb = Sandbox::new();
    let repo = sb.work().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(sb.work().join(".climate-pulse.toml"), "top_themes = 3\n").unwrap();

    let cfg = sb.settings(&src, &[]);
    assert_eq!(cfg["top_themes"], 20, "config above the repo must be ignored");
    assert!(cfg["config_file"].is_null());

    fs::write(repo.join("climate-pulse.yaml"), "top_themes: 4\n").unwrap();
    let cfg = sb.settings(&src, &[]);
    assert_eq!(cfg["top_themes"], 4, "config at the repo root is found");
}

// =============================================================================
// Layering
// =============================================================================

#[cfg(target_os = "linux")]
#[test]
fn user_project_and_explicit_layers_merge_per_field() {
    let sb = Sandbox::new();
    sb.user_config(
        "config.toml",
        "top_themes = 5\nsample_seed = 7\nclimate_keywords = [\"ice\", \"snow\", \"melt\"]\n",
    );
    fs::write(
        sb.work().join(".climate-pulse.yaml"),
        "sample_seed: 8\ntopic: Arctic\n",
    )
    .unwrap();
    let explicit = sb.tmp.path().join("run.json");
    fs::write(&explicit, r#"{"topic": "Sea Ice"}"#).unwrap();

    let cfg = sb.settings(&sb.work(), &[]);
    assert_eq!(cfg["top_themes"], 5, "user value survives");
    assert_eq!(cfg["sample_seed"], 8, "project overrides user");
    assert_eq!(cfg["climate_keywords"], 3);
    assert_eq!(cfg["topic"], "Arctic");

    let cfg = sb.settings(&sb.work(), &["--config", explicit.to_str().unwrap()]);
    assert_eq!(cfg["topic"], "Sea Ice", "--config overrides project");
    assert_eq!(cfg["sample_seed"], 8);
    assert!(cfg["config_file"].as_str().unwrap().ends_with("run.json"));
}

#[test]
fn nearest_directory_replaces_parent() {
    let sb = Sandbox::new();
    let child = sb.work().join("child");
    fs::create_dir_all(&child).unwrap();
    fs::write(sb.work().join(".climate-pulse.toml"), "sample_size = 10\nsample_seed = 3\n").unwrap();
    fs::write(child.join(".climate-pulse.toml"), "sample_size = 20\n").unwrap();

    let cfg = sb.settings(&child, &[]);
    assert_eq!(cfg["sample_size"], 20);
    assert_eq!(cfg["sample_seed"], 42, "parent directory is not merged");
}

#[test]
fn regular_name_and_later_extension_win() {
    let sb = Sandbox::new();
    fs::write(
        sb.work().join(".climate-pulse.toml"),
        "top_themes = 5\nsample_size = 100\nsample_seed = 1\n",
    )
    .unwrap();
    fs::write(sb.work().join(".climate-pulse.json"), r#"{"sample_size": 200}"#).unwrap();
    fs::write(sb.work().join("climate-pulse.toml"), "top_themes = 9\n").unwrap();

    let cfg = sb.settings(&sb.work(), &[]);
    assert_eq!(cfg["top_themes"], 9);
    assert_eq!(cfg["sample_size"], 200);
    assert_eq!(cfg["sample_seed"], 1);
}

#[test]
fn environment_overrides_files() {
    let sb = Sandbox::new();
    fs::write(sb.work().join(".climate-pulse.toml"), "sample_seed = 9\ntop_themes = 6\n").unwrap();

    let output = sb
        .cmd(&sb.work())
        .env("CLIMATE_PULSE_SAMPLE_SEED", "11")
        .args(["info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["sample_seed"], 11);
    assert_eq!(json["config"]["top_themes"], 6);
}

#[test]
fn disabled_input_limit_is_reported() {
    let sb = Sandbox::new();
    fs::write(
        sb.work().join(".climate-pulse.toml"),
        "max_input_bytes = 10\ndisable_input_limit = true\n",
    )
    .unwrap();
    let cfg = sb.settings(&sb.work(), &[]);
    assert!(cfg["max_input_bytes"].is_null());
}

// =============================================================================
// Effect on Analysis
// =============================================================================

#[test]
fn configured_settings_shape_the_report() {
    let sb = Sandbox::new();
    fs::write(
        sb.work().join(".climate-pulse.toml"),
        "topic = \"Sea Level\"\ntop_themes = 2\nsample_size = 1\nclimate_keywords = [\"sea\"]\n",
    )
    .unwrap();
    fs::write(
        sb.work().join("tweets.csv"),
        "sentiment,message\n1,Sea level rise is accelerating along the coast\n-1,Nothing about the sea is changing\n",
    )
    .unwrap();

    let output = sb
        .cmd(&sb.work())
        .args(["--json", "analyze", "tweets.csv"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["dataset_overview"]["topic"], "Sea Level");
    let themes = &json["detailed_analysis"]["theme_analysis"];
    assert_eq!(themes["top_themes"].as_array().unwrap().len(), 2);
    assert_eq!(themes["climate_related_words"]["sea"], 2);
    assert_eq!(json["detailed_analysis"]["advanced_sentiment"]["sample_size"], 1);
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn malformed_files_fail_with_config_error() {
    for (name, contents) in [
        (".climate-pulse.toml", "this is not valid toml [[["),
        (".climate-pulse.yaml", "invalid:\n  yaml\n content:\n[broken"),
        (".climate-pulse.json", "{not valid json}"),
    ] {
        let sb = Sandbox::new();
        fs::write(sb.work().join(name), contents).unwrap();
        sb.cmd(&sb.work())
            .arg("info")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}

#[test]
fn wrong_type_names_the_field() {
    let sb = Sandbox::new();
    fs::write(sb.work().join(".climate-pulse.toml"), "top_themes = \"many\"\n").unwrap();
    sb.cmd(&sb.work())
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("top_themes"));
}

#[test]
fn unknown_keys_are_ignored() {
    let sb = Sandbox::new();
    fs::write(
        sb.work().join(".climate-pulse.toml"),
        "top_themes = 8\nchart_style = \"seaborn\"\n",
    )
    .unwrap();
    let cfg = sb.settings(&sb.work(), &[]);
    assert_eq!(cfg["top_themes"], 8);
}
