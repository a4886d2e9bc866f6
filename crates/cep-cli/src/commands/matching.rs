//! Match command implementation.

use cep_classifier::{best_match, MatchConfig};
use serde::Serialize;

use crate::cli::MatchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};

/// Best folder for a title, if any.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    /// Matched title
    pub title: String,
    /// The winning candidate
    pub best: Option<MatchedFolder>,
}

/// A winning candidate.
#[derive(Debug, Serialize)]
pub struct MatchedFolder {
    /// Position in the candidate list
    pub index: usize,
    /// Candidate name
    pub name: String,
    /// Similarity of the comparison keys
    pub similarity: f64,
    /// Date agreement score
    pub date_score: i32,
}

impl Report for MatchReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["#", "Folder", "Similarity", "Date"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.best
            .iter()
            .map(|b| {
                vec![
                    b.index.to_string(),
                    b.name.clone(),
                    format!("{:.3}", b.similarity),
                    format!("{:+}", b.date_score),
                ]
            })
            .collect()
    }

    fn quiet(&self) -> Vec<String> {
        self.best.iter().map(|b| b.name.clone()).collect()
    }

    fn empty_message(&self) -> &'static str {
        "No matching folder."
    }
}

/// Pick the best candidate for a title.
pub fn match_title(title: &str, candidates: &[String], config: &MatchConfig) -> MatchReport {
    let best = best_match(title, candidates, config).map(|m| MatchedFolder {
        index: m.index,
        name: m.candidate.to_string(),
        similarity: m.similarity,
        date_score: m.date_score,
    });
    MatchReport {
        title: title.to_string(),
        best,
    }
}

/// Execute the match command.
pub fn execute_match(args: MatchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = match_title(&args.title, &args.candidates, &config.layout.matching);
    println!("{}", formatter.render(&report)?);
    Ok(())
}
