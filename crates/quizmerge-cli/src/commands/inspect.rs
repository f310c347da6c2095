//! The `quizmerge inspect` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmerge_core::merger::{merge, Disposition};
use quizmerge_core::store::Store;

use super::Sources;
use crate::SourceArgs;

const PREVIEW_CHARS: usize = 60;

pub fn execute(args: SourceArgs) -> Result<()> {
    let sources = Sources::resolve(args)?;
    let (questions, answers) = sources.scan()?;
    let store = Store::load(&sources.store)?;
    let existing = store.len();

    let merged = merge(store, &questions, &answers)?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Answer", "Status"]);

    for (number, question) in &questions {
        let answer = answers
            .get(number)
            .map(|a| a.correct.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match merged.outcomes.get(number) {
            Some(Disposition::Added(id)) => format!("new (id {id})"),
            Some(Disposition::Duplicate) => "duplicate".to_string(),
            Some(Disposition::Unanswered) | None => "unanswered".to_string(),
        };
        table.add_row(vec![
            Cell::new(number),
            Cell::new(preview(&question.text)),
            Cell::new(answer),
            Cell::new(status),
        ]);
    }

    println!("{table}");
    println!(
        "\n{} parsed, {} new, {} duplicate, {} unanswered ({} already in store)",
        questions.len(),
        merged.added.len(),
        merged.duplicates(),
        merged.unanswered(),
        existing,
    );

    if !merged.unmatched_answers.is_empty() {
        println!("Answers without a question: {:?}", merged.unmatched_answers);
    }

    Ok(())
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS - 3).collect();
    short.push_str("...");
    short
}
