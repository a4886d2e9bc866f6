//! Classify command implementation.

use cep_classifier::{Classifier, Layer};
use cep_domain::Category;
use serde::Serialize;

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, Report};

/// Per-category verdicts for one title.
#[derive(Debug, Serialize)]
pub struct ClassifyReport {
    /// Classified title
    pub title: String,
    /// Whether any category matched
    pub special: bool,
    /// One verdict per category
    pub verdicts: Vec<Verdict>,
}

/// Outcome for one category.
#[derive(Debug, Serialize)]
pub struct Verdict {
    /// Category slug
    pub category: String,
    /// Whether the title belongs to it
    pub matched: bool,
    /// Deciding layer
    pub layer: Option<String>,
    /// Semantic score
    pub score: i32,
}

impl Report for ClassifyReport {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Category", "Matched", "Layer", "Score"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.verdicts
            .iter()
            .map(|v| {
                vec![
                    v.category.clone(),
                    if v.matched { "yes" } else { "no" }.to_string(),
                    v.layer.clone().unwrap_or_else(|| "-".to_string()),
                    v.score.to_string(),
                ]
            })
            .collect()
    }

    fn quiet(&self) -> Vec<String> {
        self.verdicts
            .iter()
            .filter(|v| v.matched)
            .map(|v| v.category.clone())
            .collect()
    }
}

fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Veto => "veto",
        Layer::Reality => "reality",
        Layer::Semantic => "semantic",
        Layer::Structural => "structural",
        Layer::Fallback => "fallback",
    }
}

/// Evaluate every category for a title.
pub fn classify_title(classifier: &Classifier, title: &str, hint: &str, folders: &[String]) -> ClassifyReport {
    let verdicts: Vec<Verdict> = Category::ALL
        .into_iter()
        .map(|category| {
            let decision = classifier.evaluate(category, title, hint, folders);
            Verdict {
                category: category.slug().to_string(),
                matched: decision.matched,
                layer: decision.layer.map(|l| layer_name(l).to_string()),
                score: decision.score,
            }
        })
        .collect();

    ClassifyReport {
        title: title.to_string(),
        special: verdicts.iter().any(|v| v.matched),
        verdicts,
    }
}

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let classifier = super::build_classifier(config)?;
    let report = classify_title(&classifier, &args.title, &args.hint, &args.folders);
    println!("{}", formatter.render(&report)?);
    Ok(())
}
