//! Core data model types for quizmerge.
//!
//! Scanner output (`QuestionRecord`, `AnswerRecord`) is intermediate and keyed
//! by the question number printed in the source text. `StoredQuestion` is the
//! persisted form, keyed by a store-wide identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four option letters of a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// All letters in option order.
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Zero-based index of this option (A → 0, D → 3).
    pub fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
        }
    }

    /// Parse a single letter, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLetter::A => write!(f, "A"),
            OptionLetter::B => write!(f, "B"),
            OptionLetter::C => write!(f, "C"),
            OptionLetter::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                OptionLetter::from_char(c).ok_or_else(|| format!("unknown option letter: {s}"))
            }
            _ => Err(format!("unknown option letter: {s}")),
        }
    }
}

/// A question parsed from the question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Question number as printed in the bank.
    pub number: u32,
    /// Whitespace-normalized question text.
    pub text: String,
    /// Options a–d, whitespace-normalized, in source order.
    pub options: [String; 4],
}

/// A correct answer parsed from the answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Question number as printed in the key.
    pub number: u32,
    /// The correct option.
    pub correct: OptionLetter,
    /// Whitespace-normalized rationale; may be empty.
    pub explanation: String,
}

/// A question as persisted in the JSON store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredQuestion {
    /// Store-wide identifier, assigned in increasing order.
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
    pub explanation: String,
    /// Keys written by other tools; kept as-is on rewrite.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StoredQuestion {
    /// Combine a scanned question and its answer under a new identifier.
    pub fn from_records(id: u64, question: &QuestionRecord, answer: &AnswerRecord) -> Self {
        Self {
            id,
            question: question.text.clone(),
            options: question.options.to_vec(),
            correct_answer: answer.correct.index(),
            explanation: answer.explanation.clone(),
            extra: serde_json::Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_index_matches_option_order() {
        for (i, letter) in OptionLetter::ALL.iter().enumerate() {
            assert_eq!(letter.index(), i);
        }
    }

    #[test]
    fn letter_parsing_ignores_case() {
        assert_eq!(OptionLetter::from_char('c'), Some(OptionLetter::C));
        assert_eq!(OptionLetter::from_char('D'), Some(OptionLetter::D));
        assert_eq!(OptionLetter::from_char('e'), None);
        assert_eq!("b".parse::<OptionLetter>().unwrap(), OptionLetter::B);
        assert!("AB".parse::<OptionLetter>().is_err());
        assert!("".parse::<OptionLetter>().is_err());
    }

    #[test]
    fn stored_question_uses_camel_case_answer_key() {
        let q = StoredQuestion {
            id: 7,
            question: "Q".into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: 2,
            explanation: String::new(),
            extra: serde_json::Map::new(),
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctAnswer"], 2);
        assert!(json.get("correct_answer").is_none());
        assert!(json.get("extra").is_none());
    }

    #[test]
    fn unknown_keys_survive_a_roundtrip() {
        let src = r#"{"id":1,"question":"Q","options":["a","b","c","d"],"correctAnswer":0,"explanation":"","topic":"ml"}"#;
        let q: StoredQuestion = serde_json::from_str(src).unwrap();
        assert_eq!(q.extra["topic"], "ml");
        let back = serde_json::to_string(&q).unwrap();
        assert!(back.contains(r#""topic":"ml""#));
    }

    #[test]
    fn missing_required_key_is_rejected() {
        let src = r#"{"id":1,"options":["a","b","c","d"],"correctAnswer":0,"explanation":""}"#;
        assert!(serde_json::from_str::<StoredQuestion>(src).is_err());
    }
}
