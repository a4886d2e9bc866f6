//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Something a command prints.
pub trait Report: Serialize {
    /// Table header.
    fn headers(&self) -> Vec<&'static str>;

    /// Table rows, one cell per header.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Bare values for quiet mode, one per line.
    fn quiet(&self) -> Vec<String>;

    /// Message shown instead of an empty table.
    fn empty_message(&self) -> &'static str {
        "Nothing to show."
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Render a report in the configured format.
    pub fn render<R: Report>(&self, report: &R) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Quiet => Ok(report.quiet().join("\n")),
            OutputFormat::Table => Ok(self.table(report)),
        }
    }

    fn table<R: Report>(&self, report: &R) -> String {
        let rows = report.rows();
        if rows.is_empty() {
            return self.colorize(report.empty_message(), "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(report.headers());
        for row in rows {
            builder.push_record(row);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether table output is active.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Shorten long text for a table cell.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}…", head.replace('\n', " "))
    } else {
        head.replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        names: Vec<String>,
    }

    impl Report for Sample {
        fn headers(&self) -> Vec<&'static str> {
            vec!["Name"]
        }

        fn rows(&self) -> Vec<Vec<String>> {
            self.names.iter().map(|n| vec![n.clone()]).collect()
        }

        fn quiet(&self) -> Vec<String> {
            self.names.clone()
        }
    }

    fn sample() -> Sample {
        Sample {
            names: vec!["消防安全".to_string(), "感恩".to_string()],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.render(&sample()).unwrap();
        assert!(output.contains("\"names\""));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        assert_eq!(formatter.render(&sample()).unwrap(), "消防安全\n感恩");
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.render(&sample()).unwrap();
        assert!(output.contains("Name"));
        assert!(output.contains("感恩"));
    }

    #[test]
    fn test_empty_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.render(&Sample { names: Vec::new() }).unwrap();
        assert_eq!(output, "Nothing to show.");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("test"), "⚠ test");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("abc", 5), "abc");
        assert_eq!(preview("a\nbcdef", 3), "a b…");
    }
}
