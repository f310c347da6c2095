//! Question bank scanner.
//!
//! # Format
//! ```text
//! 1. (1 pt) Which of the following best describes
//! a generative model?
//! a. A model that classifies
//!    images
//! b. A model that produces new content
//! c. A rule engine
//! d. A database
//! ```
//!
//! A question starts at `<number>. (<anything>) <text>`. Non-empty lines up to
//! the first option marker continue the question text. Each of the markers
//! `a.` to `d.` starts an option that absorbs lines until the next marker or
//! question number. Records without exactly four options, in order, are
//! dropped.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::QuestionRecord;
use crate::text::{normalize_whitespace, starts_with_number};

static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.\s*\([^)]*\)\s*(.+)").expect("question start pattern is valid")
});

/// `a. ` through `d. `: the marker that ends the question text.
static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-d]\.\s").expect("option marker pattern is valid"));

/// Any line opening with `a.` through `d.`, with or without text after it.
static OPTION_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-d]\.").expect("option prefix pattern is valid"));

static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-d])\.\s+(.+)").expect("option line pattern is valid"));

const EXPECTED_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Parse question bank text into records keyed by question number.
///
/// Malformed records are skipped. When a number repeats, the last
/// well-formed record for it wins.
pub fn scan_questions(content: &str) -> BTreeMap<u32, QuestionRecord> {
    let mut scanner = Scanner::new();
    for line in content.lines() {
        scanner.process_line(line);
    }
    scanner.finish()
}

struct QuestionBuilder {
    number: u32,
    text: String,
    options: Vec<(char, String)>,
}

impl QuestionBuilder {
    fn new(number: u32, text: &str) -> Self {
        Self {
            number,
            text: text.trim().to_string(),
            options: Vec::new(),
        }
    }

    fn build(self) -> Option<QuestionRecord> {
        let letters: Vec<char> = self.options.iter().map(|(letter, _)| *letter).collect();
        if letters != EXPECTED_LETTERS {
            tracing::debug!(
                number = self.number,
                options = self.options.len(),
                "dropping question without options a-d"
            );
            return None;
        }

        let mut options = self.options.into_iter().map(|(_, text)| normalize_whitespace(&text));
        let options = [
            options.next()?,
            options.next()?,
            options.next()?,
            options.next()?,
        ];

        Some(QuestionRecord {
            number: self.number,
            text: normalize_whitespace(&self.text),
            options,
        })
    }
}

fn append_fragment(buf: &mut String, line: &str) {
    let fragment = line.trim();
    if fragment.is_empty() {
        return;
    }
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(fragment);
}

enum State {
    SeekQuestionStart,
    SeekOptionsStart(QuestionBuilder),
    /// `open` is false after a bare marker such as `a.`; the next line must
    /// then be another marker or the record ends.
    InOption { question: QuestionBuilder, open: bool },
}

struct Scanner {
    state: State,
    records: BTreeMap<u32, QuestionRecord>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::SeekQuestionStart,
            records: BTreeMap::new(),
        }
    }

    fn process_line(&mut self, line: &str) {
        let state = std::mem::replace(&mut self.state, State::SeekQuestionStart);
        self.state = match state {
            State::SeekQuestionStart => Self::seek_question(line),
            State::SeekOptionsStart(mut question) => {
                if OPTION_MARKER.is_match(line.trim_start()) {
                    Self::option_marker(question, line)
                } else {
                    // Only an option marker ends the text, even a numbered line.
                    append_fragment(&mut question.text, line);
                    State::SeekOptionsStart(question)
                }
            }
            State::InOption { mut question, open } => {
                let head = line.trim_start();
                if OPTION_PREFIX.is_match(head) {
                    Self::option_marker(question, line)
                } else if open && !starts_with_number(head) {
                    if let Some((_, text)) = question.options.last_mut() {
                        append_fragment(text, line);
                    }
                    State::InOption { question, open }
                } else {
                    self.complete(question);
                    Self::seek_question(line)
                }
            }
        };
    }

    fn seek_question(line: &str) -> State {
        let Some(caps) = QUESTION_START.captures(line.trim()) else {
            return State::SeekQuestionStart;
        };
        match caps[1].parse::<u32>() {
            Ok(number) => State::SeekOptionsStart(QuestionBuilder::new(number, &caps[2])),
            Err(_) => State::SeekQuestionStart,
        }
    }

    fn option_marker(mut question: QuestionBuilder, line: &str) -> State {
        let option = OPTION_LINE
            .captures(line.trim_start())
            .and_then(|caps| Some((caps[1].chars().next()?, caps[2].trim().to_string())));
        match option {
            Some(option) => {
                question.options.push(option);
                State::InOption {
                    question,
                    open: true,
                }
            }
            None => State::InOption {
                question,
                open: false,
            },
        }
    }

    fn complete(&mut self, question: QuestionBuilder) {
        if let Some(record) = question.build() {
            self.records.insert(record.number, record);
        }
    }

    fn finish(mut self) -> BTreeMap<u32, QuestionRecord> {
        match std::mem::replace(&mut self.state, State::SeekQuestionStart) {
            State::SeekQuestionStart => {}
            State::SeekOptionsStart(question) | State::InOption { question, .. } => {
                self.complete(question)
            }
        }
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BANK: &str = "\
Sample Questions

1. (1 pt) What is AI?
a. Foo
b. Bar
c. Baz
d. Qux

2. (1 pt) Which statement about
   large language models is
   correct?
a. They are deterministic
   in all configurations
b. They predict the next token
c. They cannot be fine-tuned
d. They require no training data
";

    #[test]
    fn parses_single_question() {
        let records = scan_questions("1. (1 pt) What is AI?\na. Foo\nb. Bar\nc. Baz\nd. Qux");
        let q = &records[&1];
        assert_eq!(q.number, 1);
        assert_eq!(q.text, "What is AI?");
        assert_eq!(q.options, ["Foo", "Bar", "Baz", "Qux"].map(String::from));
    }

    #[test]
    fn joins_continuation_lines() {
        let records = scan_questions(BANK);
        assert_eq!(records.len(), 2);
        let q = &records[&2];
        assert_eq!(
            q.text,
            "Which statement about large language models is correct?"
        );
        assert_eq!(q.options[0], "They are deterministic in all configurations");
        assert_eq!(q.options[3], "They require no training data");
    }

    #[test]
    fn keeps_options_in_source_order() {
        let records = scan_questions(
            "4. (2 pts) Pick one\na. first\nb. second\nc. third\nd. fourth\n",
        );
        assert_eq!(
            records[&4].options,
            ["first", "second", "third", "fourth"].map(String::from)
        );
    }

    #[test]
    fn drops_question_with_three_options() {
        let records = scan_questions(
            "1. (1 pt) Short?\na. one\nb. two\nc. three\n\n2. (1 pt) Full?\na. w\nb. x\nc. y\nd. z\n",
        );
        assert!(!records.contains_key(&1));
        assert!(records.contains_key(&2));
    }

    #[test]
    fn drops_question_with_five_options() {
        let records = scan_questions("1. (1 pt) Too many?\na. v\nb. w\nc. x\nd. y\na. z\n");
        assert!(records.is_empty());
    }

    #[test]
    fn drops_out_of_sequence_markers() {
        let records = scan_questions("1. (1 pt) Odd?\na. w\nc. x\nb. y\nd. z\n");
        assert!(records.is_empty());
    }

    #[test]
    fn bare_marker_contributes_no_option() {
        let records = scan_questions("1. (1 pt) Bare?\na.\nb. x\nc. y\nd. z\n");
        assert!(records.is_empty());
    }

    #[test]
    fn question_number_ends_an_option() {
        let records = scan_questions(
            "1. (1 pt) One?\na. w\nb. x\nc. y\nd. z\n2. (1 pt) Two?\na. p\nb. q\nc. r\nd. s",
        );
        assert_eq!(records[&1].options[3], "z");
        assert_eq!(records[&2].text, "Two?");
    }

    #[test]
    fn normalizes_inner_whitespace() {
        let records =
            scan_questions("7.  (1 pt)   Spaced    out?\n  a.   w  w\n b. x\nc. y\nd.\tz\n");
        let q = &records[&7];
        assert_eq!(q.text, "Spaced out?");
        assert_eq!(q.options, ["w w", "x", "y", "z"].map(String::from));
    }

    #[test]
    fn question_without_options_absorbs_next_numbered_line() {
        let records = scan_questions("1. (1 pt) Q1\n2. (1 pt) Q2\na. w\nb. x\nc. y\nd. z");
        assert_eq!(records.len(), 1);
        assert_eq!(records[&1].text, "Q1 2. (1 pt) Q2");
        assert!(!records.contains_key(&2));
    }

    #[test]
    fn later_duplicate_number_wins() {
        let records = scan_questions(
            "1. (1 pt) First?\na. w\nb. x\nc. y\nd. z\n1. (1 pt) Second?\na. w\nb. x\nc. y\nd. z\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[&1].text, "Second?");
    }

    #[test]
    fn malformed_repeat_keeps_earlier_record() {
        let records = scan_questions(
            "1. (1 pt) Good?\na. w\nb. x\nc. y\nd. z\n1. (1 pt) Bad?\na. w\n",
        );
        assert_eq!(records[&1].text, "Good?");
    }

    #[test]
    fn ignores_text_outside_questions() {
        let records = scan_questions("Header\n\nSome intro.\n3 (1 pt) not a question\n");
        assert!(records.is_empty());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let records = scan_questions("1. (1 pt) Win?\r\na. w\r\nb. x\r\nc. y\r\nd. z\r\n");
        assert_eq!(records[&1].options[3], "z");
    }

    #[test]
    fn preserves_non_ascii_text() {
        let records = scan_questions("1. (1 pt) Qu’est-ce que l’IA ?\na. Ça\nb. Übung\nc. 日本\nd. ñ\n");
        assert_eq!(records[&1].text, "Qu’est-ce que l’IA ?");
        assert_eq!(records[&1].options[2], "日本");
    }

    #[test]
    fn empty_input() {
        assert!(scan_questions("").is_empty());
    }
}
