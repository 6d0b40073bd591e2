use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_common::visitor::{TreeStats, Visitor};
use pagesmith_model::DocumentSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn validate(args: ValidateArgs, cwd: &Path) -> Result<()> {
    println!("🔍 {} Pagesmith validator", "Starting".green().bold());
    println!();

    let mut failed = 0;

    for file in &args.files {
        match validate_file(&cwd.join(file)) {
            Ok(stats) => println!(
                "  {} {} ({} elements, depth {})",
                "✓".green(),
                file.display(),
                stats.elements,
                stats.max_depth
            ),
            Err(err) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), file.display(), err);
            }
        }
    }

    println!();
    if failed > 0 {
        anyhow::bail!("{} of {} documents are invalid", failed, args.files.len());
    }

    println!("✨ {} All documents are valid", "Done".green().bold());
    Ok(())
}

fn validate_file(path: &Path) -> Result<TreeStats> {
    let source = fs::read_to_string(path)?;
    let snapshot = DocumentSnapshot::from_json(&source)?;

    let mut stats = TreeStats::default();
    stats.visit_elements(snapshot.elements());
    Ok(stats)
}
