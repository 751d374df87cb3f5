use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cipherfs_core::{CipherFs, FsConfig, WriteMode, WritePolicy};

#[derive(Parser)]
#[command(name = "cipherfs")]
#[command(about = "An in-memory user-space filesystem with content obfuscated at rest")]
#[command(version)]
struct Cli {
    /// Directory to mount the filesystem on
    mountpoint: PathBuf,

    /// Allow other users to access the mount
    #[arg(long)]
    allow_other: bool,

    /// Silently ignore writes to unknown paths instead of failing them
    #[arg(long)]
    lenient_writes: bool,

    /// Honor write offsets (patch in place) instead of replacing content wholesale
    #[arg(long)]
    patch_writes: bool,

    /// Maximum number of directories plus files the store will hold
    #[arg(long, default_value_t = 4096)]
    max_entries: usize,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cipherfs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = FsConfig {
        max_entries: cli.max_entries,
        write_policy: if cli.lenient_writes {
            WritePolicy::Lenient
        } else {
            WritePolicy::Strict
        },
        write_mode: if cli.patch_writes {
            WriteMode::Patch
        } else {
            WriteMode::Replace
        },
        ..FsConfig::default()
    };

    info!(
        mountpoint = %cli.mountpoint.display(),
        max_entries = config.max_entries,
        "starting cipherfs"
    );

    serve(CipherFs::new(config), &cli)
}

#[cfg(target_os = "linux")]
fn serve(fs: CipherFs, cli: &Cli) -> Result<()> {
    let stats = fs.stats_handle();
    cipherfs_fuse::mount(fs, &cli.mountpoint, cli.allow_other)?;

    let snapshot = stats.snapshot();
    info!(
        reads = snapshot.reads,
        writes = snapshot.writes,
        creates = snapshot.creates,
        bytes_read = snapshot.bytes_read,
        bytes_written = snapshot.bytes_written,
        not_found = snapshot.not_found,
        "session statistics"
    );
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn serve(_fs: CipherFs, _cli: &Cli) -> Result<()> {
    anyhow::bail!("cipherfs currently mounts only on Linux")
}
