use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Undo levels to keep (0 = unlimited)
    #[arg(long, default_value_t = 100)]
    pub history_limit: usize,

    /// Use reproducible sequential ids instead of UUIDs
    #[arg(long)]
    pub sequential_ids: bool,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = Config::path_in(cwd);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagesmith project...".bright_blue().bold());

    let mut config = Config::default();
    config.editor.history_limit = args.history_limit;
    if args.sequential_ids {
        config.editor.id_strategy = pagesmith_editor::IdStrategy::Sequential;
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagesmith new home.json");
    println!("  2. Run: pagesmith add home.json __body heading");
    println!("  3. Run: pagesmith inspect home.json");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = InitArgs {
            history_limit: 5,
            sequential_ids: true,
            force: false,
        };

        init(args, dir.path()).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.editor.history_limit, 5);
        assert_eq!(
            config.editor.id_strategy,
            pagesmith_editor::IdStrategy::Sequential
        );
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(Config::path_in(dir.path()), r#"{ "historyLimit": 7 }"#).unwrap();

        let args = InitArgs {
            history_limit: 100,
            sequential_ids: false,
            force: false,
        };
        init(args, dir.path()).unwrap();

        assert_eq!(Config::load(dir.path()).unwrap().editor.history_limit, 7);
    }
}
