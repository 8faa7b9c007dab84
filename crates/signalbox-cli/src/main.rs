// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `signalbox-prefs`: inspect and edit the user-interface preferences stored
//! in a Signalbox profile.
//!
//! Every edit is written back to the profile's `user-interface.xml`
//! immediately. Logs go to stderr; set `RUST_LOG=debug` to see reads and
//! writes.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use signalbox_prefs::PreferenceRegistry;
use signalbox_prefs_fs::FsFragmentStore;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect and edit Signalbox user-interface preferences")]
struct Args {
    /// Profile directory (defaults to the platform config directory)
    #[arg(long, global = true, env = "SIGNALBOX_PROFILE")]
    profile: Option<PathBuf>,
    /// Node name; selects `<profile>/profile/<node>/user-interface.xml` when present
    #[arg(long, global = true, env = "SIGNALBOX_NODE")]
    node: Option<String>,
    /// Command to execute
    #[command(subcommand)]
    cmd: Command,
}

fn open_store(args: &Args) -> Result<FsFragmentStore> {
    match &args.profile {
        Some(profile) => Ok(FsFragmentStore::for_profile(profile, args.node.as_deref())),
        None => FsFragmentStore::new().context("resolving default profile directory"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = open_store(&args)?;
    debug!(path = %store.path().display(), "opening preferences");
    let path = store.path().to_path_buf();
    let mut registry = PreferenceRegistry::new(store);
    registry
        .load()
        .with_context(|| format!("reading {}", path.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&mut registry, args.cmd, &mut out)?;
    out.flush()?;
    Ok(())
}
