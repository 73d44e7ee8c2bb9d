//! Build tasks for the climate-pulse workspace.
//!
//! Run with `cargo xtask <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completions
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
        /// Shells to generate for (all when omitted)
        #[arg(long, value_enum, value_delimiter = ',')]
        shell: Vec<Shell>,
    },
}

fn main() -> anyhow::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => man(&out),
        Task::Completions { out, shell } => completions(&out, &shell),
    }
}

fn man(out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    let cmd = climate_pulse::command();
    clap_mangen::generate_to(cmd, out).context("failed to render man pages")?;
    println!("man pages written to {}", out.display());
    Ok(())
}

fn completions(out: &Path, shells: &[Shell]) -> anyhow::Result<()> {
    fs::create_dir_all(out).with_context(|| format!("failed to create {}", out.display()))?;
    let shells: Vec<Shell> = if shells.is_empty() {
        Shell::value_variants().to_vec()
    } else {
        shells.to_vec()
    };

    let mut cmd = climate_pulse::command();
    let name = cmd.get_name().to_string();
    for shell in shells {
        let path = clap_complete::generate_to(shell, &mut cmd, &name, out)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{}", path.display());
    }
    Ok(())
}
