//! quizmerge configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Input and output paths for a merge run.
///
/// Relative paths are resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizmergeConfig {
    /// Plain-text question bank.
    #[serde(default = "default_questions")]
    pub questions: PathBuf,
    /// Plain-text answer key.
    #[serde(default = "default_answers")]
    pub answers: PathBuf,
    /// JSON question store, read and rewritten in place.
    #[serde(default = "default_store")]
    pub store: PathBuf,
}

fn default_questions() -> PathBuf {
    PathBuf::from("ASTQB-GenAI_Sample-Questions.clean.txt")
}
fn default_answers() -> PathBuf {
    PathBuf::from("ASTQB-GenAI_Sample-Answers.clean.txt")
}
fn default_store() -> PathBuf {
    PathBuf::from("genai.json")
}

impl Default for QuizmergeConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            answers: default_answers(),
            store: default_store(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizmerge.toml` in the current directory
/// 2. `~/.config/quizmerge/config.toml`
///
/// Falls back to the built-in defaults when neither exists.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmergeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmerge.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizmergeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(QuizmergeConfig::default()),
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmerge"))
}
