//! Joins scanned questions with their answers and appends new ones to a store.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::model::{AnswerRecord, QuestionRecord, StoredQuestion};
use crate::store::Store;
use crate::text::duplicate_key;

/// What happened to one scanned question during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Appended under this identifier.
    Added(u64),
    /// Its text is already in the store (or earlier in this batch).
    Duplicate,
    /// The answer key has no usable entry for it.
    Unanswered,
}

/// The result of [`merge`].
#[derive(Debug, Clone)]
pub struct Merged {
    /// The input store with new questions appended.
    pub store: Store,
    /// Identifiers assigned in this merge, in increasing order.
    pub added: Vec<u64>,
    /// Disposition of every scanned question, by question number.
    pub outcomes: BTreeMap<u32, Disposition>,
    /// Answer numbers with no matching question.
    pub unmatched_answers: Vec<u32>,
}

impl Merged {
    pub fn duplicates(&self) -> usize {
        self.count(Disposition::Duplicate)
    }

    pub fn unanswered(&self) -> usize {
        self.count(Disposition::Unanswered)
    }

    fn count(&self, disposition: Disposition) -> usize {
        self.outcomes.values().filter(|d| **d == disposition).count()
    }
}

/// Merge scanned questions and answers into `store`.
///
/// Questions are visited in ascending number order. Each one with an answer
/// and a question text not yet in the store is appended with the next
/// identifier after the store's current maximum.
///
/// Fails without touching anything on disk if an identifier would overflow.
pub fn merge(
    mut store: Store,
    questions: &BTreeMap<u32, QuestionRecord>,
    answers: &BTreeMap<u32, AnswerRecord>,
) -> Result<Merged, StoreError> {
    let mut seen = store.question_keys();
    let mut next_id = store.max_id();
    let mut added = Vec::new();
    let mut outcomes = BTreeMap::new();

    for (&number, question) in questions {
        let Some(answer) = answers.get(&number) else {
            outcomes.insert(number, Disposition::Unanswered);
            continue;
        };

        if !seen.insert(duplicate_key(&question.text)) {
            tracing::debug!(number, "skipping duplicate question");
            outcomes.insert(number, Disposition::Duplicate);
            continue;
        }

        next_id = next_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { max_id: next_id })?;
        store.push(StoredQuestion::from_records(next_id, question, answer));
        added.push(next_id);
        outcomes.insert(number, Disposition::Added(next_id));
    }

    let unmatched_answers: Vec<u32> = answers
        .keys()
        .filter(|n| !questions.contains_key(n))
        .copied()
        .collect();

    let merged = Merged {
        store,
        added,
        outcomes,
        unmatched_answers,
    };
    tracing::info!(
        added = merged.added.len(),
        duplicates = merged.duplicates(),
        unanswered = merged.unanswered(),
        unmatched_answers = merged.unmatched_answers.len(),
        "merge complete"
    );
    Ok(merged)
}
