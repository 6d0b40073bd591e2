use super::read_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_common::visitor::{TreeStats, Visitor};
use pagesmith_editor::{
    Command, DispatchTable, EditorState, Element, ElementKind, RenderContext,
};
use pagesmith_model::SequentialIds;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Document file to inspect
    pub file: PathBuf,

    /// Show element ids
    #[arg(long)]
    pub ids: bool,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let snapshot = read_document(&cwd.join(&args.file))?;

    let mut stats = TreeStats::default();
    stats.visit_elements(snapshot.elements());

    let mut state = EditorState::new();
    state.apply(Command::load(snapshot), &mut SequentialIds::from_seed("inspect"))?;

    println!("{} {}", "📄".bright_blue(), args.file.display().to_string().bold());
    for line in outline(&state, args.ids) {
        println!("{}", line);
    }

    println!();
    println!(
        "   {} elements, {} containers, depth {}",
        stats.elements, stats.containers, stats.max_depth
    );

    Ok(())
}

/// One line per element, indented by depth
fn outline(state: &EditorState, show_ids: bool) -> Vec<String> {
    let line = move |element: &Element, context: &RenderContext<'_>, children: Vec<Vec<String>>| {
        let indent = "  ".repeat(context.depth + 1);
        let mut lines = vec![if show_ids {
            format!(
                "{}{} {} {}",
                indent,
                element.kind().tag().cyan(),
                element.name,
                format!("({})", element.id()).dimmed()
            )
        } else {
            format!("{}{} {}", indent, element.kind().tag().cyan(), element.name)
        }];
        lines.extend(children.into_iter().flatten());
        lines
    };

    let mut table = DispatchTable::new();
    for kind in ElementKind::ALL {
        table.register(kind, line);
    }

    table.render(state).into_iter().flatten().collect()
}
