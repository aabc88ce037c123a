//! RpImages pack builder.
//!
//! Reads group folders of images, assigns each image a stable
//! `custom_model_data` slot on its group's item, and writes item overrides,
//! textures, generated models and a key summary into the resource pack.

use anyhow::Result;
use clap::Parser;
use rpimages_core::config::Defaults;
use rpimages_core::{PackBuilder, PackConfig, PackError, RunReport};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "rpimages")]
#[command(about = "Allocate custom model data slots and build item overrides")]
struct Args {
    /// Resource pack root (the directory containing assets/)
    #[arg(long, default_value = Defaults::PACK_ROOT)]
    pack_root: PathBuf,

    /// Folder with one subdirectory of images per group
    #[arg(short, long, default_value = Defaults::SOURCE_DIR)]
    source: PathBuf,

    /// Pack namespace, also the key of the slot map in item models
    #[arg(short, long, default_value = Defaults::NAMESPACE)]
    namespace: String,

    /// Where to write the group/short name/slot summary
    #[arg(long, default_value = Defaults::SUMMARY_PATH)]
    summary: PathBuf,

    /// Discard existing override tables and renumber every slot from 1.
    /// Previously published slot values will no longer match.
    #[arg(long)]
    force: bool,

    /// Keep a .json.bak copy of each override table before rewriting it
    #[arg(long)]
    backup: bool,

    /// Show what would be allocated without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn into_config(self) -> PackConfig {
        PackConfig {
            pack_root: self.pack_root,
            source_dir: self.source,
            namespace: self.namespace,
            summary_path: self.summary,
            force: self.force,
            keep_backup: self.backup,
            dry_run: self.dry_run,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    match run(args.into_config()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            let code = e
                .downcast_ref::<PackError>()
                .map(PackError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn run(config: PackConfig) -> Result<()> {
    let report = PackBuilder::new(config).run()?;
    log_report(&report);
    Ok(())
}

fn log_report(report: &RunReport) {
    for skipped in &report.skipped {
        warn!("Skipped group {}: {}", skipped.name, skipped.reason);
    }
    let verb = if report.dry_run { "would be" } else { "were" };
    info!(
        "{} groups processed, {} skipped; {} new slots {} allocated, {} tables {} updated",
        report.groups.len(),
        report.skipped.len(),
        report.total_allocated(),
        verb,
        report.tables_written(),
        verb
    );
    if report.missing_textures() > 0 {
        warn!("{} textures were not found", report.missing_textures());
    }
}
