//! The `quizmerge merge` command.

use anyhow::Result;

use quizmerge_core::merger::merge;
use quizmerge_core::store::Store;

use super::Sources;
use crate::SourceArgs;

pub fn execute(args: SourceArgs, dry_run: bool) -> Result<()> {
    let sources = Sources::resolve(args)?;
    let (questions, answers) = sources.scan()?;

    println!(
        "Parsed {} questions and {} answers",
        questions.len(),
        answers.len()
    );

    let store = Store::load(&sources.store)?;
    let merged = merge(store, &questions, &answers)?;

    if dry_run {
        tracing::info!(path = %sources.store.display(), "dry run, store not written");
    } else {
        merged.store.save(&sources.store)?;
    }

    println!(
        "Added {} new questions with IDs: {:?}",
        merged.added.len(),
        merged.added
    );

    Ok(())
}
