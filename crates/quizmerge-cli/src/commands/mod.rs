//! Subcommand implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use quizmerge_core::answer_scanner::scan_answers;
use quizmerge_core::config::load_config_from;
use quizmerge_core::model::{AnswerRecord, QuestionRecord};
use quizmerge_core::question_scanner::scan_questions;

use crate::SourceArgs;

pub mod init;
pub mod inspect;
pub mod merge;

/// Paths for one run after applying command-line overrides to the config.
pub struct Sources {
    pub questions: PathBuf,
    pub answers: PathBuf,
    pub store: PathBuf,
}

impl Sources {
    pub fn resolve(args: SourceArgs) -> Result<Self> {
        let config = load_config_from(args.config.as_deref())?;
        Ok(Self {
            questions: args.questions.unwrap_or(config.questions),
            answers: args.answers.unwrap_or(config.answers),
            store: args.store.unwrap_or(config.store),
        })
    }

    /// Read and scan both text inputs.
    pub fn scan(
        &self,
    ) -> Result<(BTreeMap<u32, QuestionRecord>, BTreeMap<u32, AnswerRecord>)> {
        let questions = scan_questions(&read_text(&self.questions, "question bank")?);
        let answers = scan_answers(&read_text(&self.answers, "answer key")?);
        tracing::debug!(
            questions = questions.len(),
            answers = answers.len(),
            "scanned inputs"
        );
        Ok((questions, answers))
    }
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what}: {}", path.display()))
}
