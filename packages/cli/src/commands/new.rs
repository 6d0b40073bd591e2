use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{FileStore, SnapshotStore};
use pagesmith_model::DocumentSnapshot;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Document file to create
    pub file: PathBuf,

    /// Overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

pub fn new(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let path = cwd.join(&args.file);

    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.file.display()
        );
    }

    FileStore::new(&path)
        .pretty(config.pretty)
        .save(&DocumentSnapshot::empty())?;

    println!("  {} Created {}", "✓".green(), args.file.display());
    Ok(())
}
