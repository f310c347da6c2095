//! The `quizmerge init` command.

use std::path::Path;

use anyhow::{Context, Result};

use quizmerge_core::store::Store;

pub fn execute() -> Result<()> {
    // Create quizmerge.toml
    if Path::new("quizmerge.toml").exists() {
        println!("quizmerge.toml already exists, skipping.");
    } else {
        std::fs::write("quizmerge.toml", SAMPLE_CONFIG)
            .context("failed to write quizmerge.toml")?;
        println!("Created quizmerge.toml");
    }

    // Create an empty store
    let store_path = Path::new("genai.json");
    if store_path.exists() {
        println!("genai.json already exists, skipping.");
    } else {
        Store::new().save(store_path)?;
        println!("Created genai.json");
    }

    println!("\nNext steps:");
    println!("  1. Point quizmerge.toml at your question bank and answer key");
    println!("  2. Run: quizmerge inspect");
    println!("  3. Run: quizmerge merge");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmerge configuration

# Plain-text question bank: "1. (1 pt) Question?" followed by options a. to d.
questions = "ASTQB-GenAI_Sample-Questions.clean.txt"

# Plain-text answer key: "1. (1 pt)" followed by "B is correct. Explanation..."
answers = "ASTQB-GenAI_Sample-Answers.clean.txt"

# JSON question store, rewritten in place
store = "genai.json"
"#;
