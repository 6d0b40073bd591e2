use super::{document_name, read_document};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_editor::{palette, Command, Editor, ElementKind, FileStore};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Document file to edit
    pub file: PathBuf,

    /// Id of the container to append to (`__body` for the page itself)
    pub container_id: String,

    /// Element type tag (text, heading, 2Col, ...)
    pub kind: String,

    /// Name for the new element
    #[arg(short, long)]
    pub name: Option<String>,

    /// Write the result here instead of overwriting the document
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let input = cwd.join(&args.file);
    let output = cwd.join(args.output.as_ref().unwrap_or(&args.file));

    let kind: ElementKind = args.kind.parse()?;
    let mut template =
        palette::template(kind).ok_or_else(|| anyhow!("{} cannot be added to a page", kind))?;
    if let Some(name) = args.name {
        template = template.with_name(name);
    }

    let mut editor = Editor::with_config(&config.editor, &document_name(&input));
    editor.load_document(read_document(&input)?)?;

    let result = editor.dispatch(Command::add(args.container_id.as_str(), template))?;

    let mut store = FileStore::new(&output).pretty(config.pretty);
    editor.save_to(&mut store)?;

    println!(
        "  {} Added {} {} to {}",
        "✓".green(),
        kind,
        result.created_id.unwrap_or_default().as_str().bold(),
        args.container_id
    );
    Ok(())
}
