//! Answer key scanner.
//!
//! # Format
//! ```text
//! 1. (1 pt)
//! B is correct. A generative model produces new content.
//! A is not correct. Classification is discriminative.
//! ```
//!
//! A block starts at `<number>. (<anything>)` and runs until the next line
//! that opens with a number. The first `<letter> is correct.` in the block
//! (any case) sets the answer. Text after it on the same line, and every
//! non-empty line after that, forms the explanation. Later "is correct"
//! phrases do not change the letter; their lines are appended to the
//! explanation like any other.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{AnswerRecord, OptionLetter};
use crate::text::{normalize_whitespace, starts_with_number};

static ANSWER_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.\s*\([^)]*\)").expect("answer start pattern is valid")
});

static CORRECT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([A-D]) is correct\.").expect("correct marker pattern is valid")
});

/// Parse answer key text into records keyed by question number.
///
/// Blocks without a correct-letter marker are skipped.
pub fn scan_answers(content: &str) -> BTreeMap<u32, AnswerRecord> {
    let mut scanner = Scanner::new();
    for line in content.lines() {
        scanner.process_line(line);
    }
    scanner.finish()
}

struct AnswerBlock {
    number: u32,
    correct: Option<OptionLetter>,
    explanation: Vec<String>,
}

impl AnswerBlock {
    fn new(number: u32) -> Self {
        Self {
            number,
            correct: None,
            explanation: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.correct.is_none() {
            if let Some((letter, rest)) = find_correct_marker(line) {
                self.correct = Some(letter);
                self.push_fragment(rest);
            }
        } else {
            self.push_fragment(line);
        }
    }

    fn push_fragment(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if !fragment.is_empty() {
            self.explanation.push(fragment.to_string());
        }
    }

    fn build(self) -> Option<AnswerRecord> {
        let Some(correct) = self.correct else {
            tracing::debug!(number = self.number, "dropping answer block without a correct letter");
            return None;
        };
        Some(AnswerRecord {
            number: self.number,
            correct,
            explanation: normalize_whitespace(&self.explanation.join(" ")),
        })
    }
}

/// Find the first `<letter> is correct.` and return the letter with the
/// text that follows it on the line.
fn find_correct_marker(line: &str) -> Option<(OptionLetter, &str)> {
    let caps = CORRECT_MARKER.captures(line)?;
    let letter = OptionLetter::from_char(caps[1].chars().next()?)?;
    let end = caps.get(0)?.end();
    Some((letter, &line[end..]))
}

enum State {
    SeekAnswerStart,
    InAnswerBlock(AnswerBlock),
}

struct Scanner {
    state: State,
    records: BTreeMap<u32, AnswerRecord>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::SeekAnswerStart,
            records: BTreeMap::new(),
        }
    }

    fn process_line(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, State::SeekAnswerStart);
        self.state = match state {
            State::SeekAnswerStart => Self::seek_answer(line),
            State::InAnswerBlock(block) if starts_with_number(line) => {
                self.complete(block);
                Self::seek_answer(line)
            }
            State::InAnswerBlock(mut block) => {
                block.push_line(line);
                State::InAnswerBlock(block)
            }
        };
    }

    fn seek_answer(line: &str) -> State {
        ANSWER_START
            .captures(line.trim())
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .map_or(State::SeekAnswerStart, |number| {
                State::InAnswerBlock(AnswerBlock::new(number))
            })
    }

    fn complete(&mut self, block: AnswerBlock) {
        if let Some(record) = block.build() {
            self.records.insert(record.number, record);
        }
    }

    fn finish(mut self) -> BTreeMap<u32, AnswerRecord> {
        if let State::InAnswerBlock(block) =
            std::mem::replace(&mut self.state, State::SeekAnswerStart)
        {
            self.complete(block);
        }
        self.records
    }
}
