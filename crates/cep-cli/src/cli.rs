//! CLI command definitions and argument parsing.

use std::path::PathBuf;

use cep_classifier::{Scope, Selection};
use cep_domain::{Category, OrgPath};
use clap::{Args, Parser, Subcommand};

/// cep - classify work items, resolve their evidence and extract records.
#[derive(Debug, Parser)]
#[command(name = "cep")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Evidence root, overriding the configured one
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// More log output (-v info, -vv debug); otherwise CEP_LOG applies
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (bare values)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show how a title is classified, layer by layer
    Classify(ClassifyArgs),

    /// Fuzzy-match a title against folder names
    Match(MatchArgs),

    /// Resolve the evidence for a category and org
    Resolve(ResolveArgs),

    /// Extract the record text of an evidence folder
    Extract(ExtractArgs),

    /// Pick an evidence image for a category and org
    PickImage(PickImageArgs),

    /// Report which evidence exists for each org
    Health(HealthArgs),

    /// Plan evidence for every account's pending work items
    Plan(PlanArgs),
}

/// Organizational identity of one account.
#[derive(Debug, Clone, Args)]
pub struct OrgArgs {
    /// Institution (school) name
    #[arg(long)]
    pub institution: String,

    /// Cohort (grade) name
    #[arg(long)]
    pub cohort: String,

    /// Section (class) name; a leading cohort name is dropped
    #[arg(long)]
    pub section: String,
}

impl OrgArgs {
    /// Sanitized org path.
    pub fn org_path(&self) -> OrgPath {
        OrgPath::new(&self.institution, &self.cohort, &self.section)
    }
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Work item title
    pub title: String,

    /// Dimension label reported with the item
    #[arg(long, default_value = "")]
    pub hint: String,

    /// Known evidence folder names for the reality check
    #[arg(long = "folder")]
    pub folders: Vec<String>,
}

/// Arguments for the match command.
#[derive(Debug, Parser)]
pub struct MatchArgs {
    /// Work item title
    pub title: String,

    /// Candidate folder names
    #[arg(required = true)]
    pub candidates: Vec<String>,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Category slug (theme-session, labor, military, public-speech)
    #[arg(value_parser = parse_category)]
    pub category: Category,

    #[command(flatten)]
    pub org: OrgArgs,

    /// Title used to pick a topic sub-package
    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Evidence folder
    pub folder: PathBuf,

    /// Skip the vision path for PDFs
    #[arg(long)]
    pub no_vision: bool,
}

/// Arguments for the pick-image command.
#[derive(Debug, Parser)]
pub struct PickImageArgs {
    /// Category slug
    #[arg(value_parser = parse_category)]
    pub category: Category,

    #[command(flatten)]
    pub org: OrgArgs,

    /// Title used to pick a topic sub-package
    #[arg(long)]
    pub title: Option<String>,

    /// Seed for a reproducible pick
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the health command.
#[derive(Debug, Parser)]
pub struct HealthArgs {
    /// Accounts file (JSON list with institution/cohort/section)
    #[arg(long, conflicts_with_all = ["institution", "cohort", "section"])]
    pub accounts: Option<PathBuf>,

    /// Institution name, for a single org
    #[arg(long, requires_all = ["cohort", "section"])]
    pub institution: Option<String>,

    /// Cohort name, for a single org
    #[arg(long)]
    pub cohort: Option<String>,

    /// Section name, for a single org
    #[arg(long)]
    pub section: Option<String>,
}

/// Arguments for the plan command.
#[derive(Debug, Parser)]
pub struct PlanArgs {
    /// Accounts file (JSON list with institution/cohort/section)
    #[arg(long)]
    pub accounts: PathBuf,

    /// Task list used for accounts without their own
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Which statuses to consider: pending, done, all
    #[arg(long, default_value = "pending", value_parser = parse_scope)]
    pub scope: Scope,

    /// Which items to plan: special, a category slug, or indices like 0,3,5
    #[arg(long, default_value = "special", value_parser = parse_selection)]
    pub select: Selection,

    /// Skip the vision path for PDFs
    #[arg(long)]
    pub no_vision: bool,
}

fn parse_category(s: &str) -> Result<Category, String> {
    s.parse()
}

fn parse_scope(s: &str) -> Result<Scope, String> {
    s.parse()
}

fn parse_selection(s: &str) -> Result<Selection, String> {
    s.parse()
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
