use super::{document_name, read_document};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{Command, Editor, FileStore};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document file to edit
    pub file: PathBuf,

    /// JSON file holding an array of commands
    pub commands: PathBuf,

    /// Write the result here instead of overwriting the document
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Counts from replaying a command list
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ApplySummary {
    pub applied: usize,
    pub failed: usize,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = cwd.join(&args.file);
    let output = cwd.join(args.output.as_ref().unwrap_or(&args.file));

    let mut editor = Editor::with_config(&config.editor, &document_name(&input));
    editor.load_document(read_document(&input)?)?;

    let source = fs::read_to_string(cwd.join(&args.commands))
        .with_context(|| format!("Failed to read {}", args.commands.display()))?;
    let commands: Vec<Value> = serde_json::from_str(&source)
        .with_context(|| format!("{} must hold a JSON array", args.commands.display()))?;

    println!(
        "⚙️  {} {} commands to {}",
        "Applying".green().bold(),
        commands.len(),
        args.file.display()
    );

    let summary = replay(&mut editor, commands);

    let mut store = FileStore::new(&output).pretty(config.pretty);
    editor.save_to(&mut store)?;

    println!();
    println!("   Applied: {}", summary.applied);
    println!("   Wrote:   {}", output.display());

    if summary.failed > 0 {
        anyhow::bail!("{} command(s) failed", summary.failed);
    }

    println!("✨ {}", "Done".green().bold());
    Ok(())
}

/// Dispatch every command in order, reporting failures and carrying on
pub(crate) fn replay(editor: &mut Editor, commands: Vec<Value>) -> ApplySummary {
    let mut summary = ApplySummary::default();

    for (index, value) in commands.into_iter().enumerate() {
        let result = serde_json::from_value::<Command>(value)
            .map_err(anyhow::Error::from)
            .and_then(|command| {
                let name = command.name();
                editor
                    .dispatch(command)
                    .map(|result| (name, result))
                    .map_err(anyhow::Error::from)
            });

        match result {
            Ok((name, result)) => {
                summary.applied += 1;
                debug!(index, command = name, version = result.version, "Applied");
                if let Some(id) = result.created_id {
                    println!("  {} #{} {} → {}", "✓".green(), index, name, id);
                } else {
                    println!("  {} #{} {}", "✓".green(), index, name);
                }
            }
            Err(err) => {
                summary.failed += 1;
                println!("  {} #{} {}", "✗".red(), index, err);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_editor::{EditorConfig, IdStrategy};
    use serde_json::json;

    fn editor() -> Editor {
        let config = EditorConfig {
            id_strategy: IdStrategy::Sequential,
            ..EditorConfig::default()
        };
        Editor::with_config(&config, "test")
    }

    #[test]
    fn test_replay_continues_after_failure() {
        let mut editor = editor();
        let commands = vec![
            json!({ "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "element": { "id": "x", "type": "container" } } }),
            json!({ "type": "DELETE_ELEMENT", "payload": { "id": "missing" } }),
            json!({ "type": "NOT_A_COMMAND" }),
            json!({ "type": "TOGGLE_PREVIEW_MODE" }),
        ];

        let summary = replay(&mut editor, commands);

        assert_eq!(summary, ApplySummary { applied: 2, failed: 2 });
        assert_eq!(editor.state().tree().elements().len(), 1);
        assert!(editor.state().view().preview_mode());
    }

    #[test]
    fn test_apply_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("home.json"), "[]").unwrap();
        fs::write(
            dir.path().join("commands.json"),
            r#"[{ "type": "ADD_ELEMENT", "payload": { "containerId": "__body", "element": { "id": "x", "type": "button", "content": { "innerText": "Go" } } } }]"#,
        )
        .unwrap();

        let args = ApplyArgs {
            file: PathBuf::from("home.json"),
            commands: PathBuf::from("commands.json"),
            output: Some(PathBuf::from("out.json")),
        };
        apply(args, dir.path()).unwrap();

        let result = read_document(&dir.path().join("out.json")).unwrap();
        assert_eq!(result.elements().len(), 1);
        assert!(read_document(&dir.path().join("home.json")).unwrap().is_empty());
    }
}
