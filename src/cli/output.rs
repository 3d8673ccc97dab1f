use crate::error::ScanError;
use crate::trigger::controller::{Progress, Reporter};
use crate::ScanResult;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub document: &'a str,
    #[serde(flatten)]
    pub result: &'a ScanResult,
}

/// Prints each scan of one document to stdout. In JSON mode every scan is
/// one line, so a long-running watch produces newline-delimited JSON.
pub struct OverlayReporter {
    label: String,
    colored: bool,
    format: OutputFormat,
}

impl OverlayReporter {
    pub fn new(label: impl Into<String>, colored: bool, format: OutputFormat) -> Self {
        Self {
            label: label.into(),
            colored,
            format,
        }
    }
}

impl Reporter for OverlayReporter {
    fn report(&mut self, result: ScanResult) {
        print_report(&self.label, &result, self.colored, self.format);
    }

    fn dictionary_unavailable(&mut self, error: &ScanError) {
        print_dictionary_warning(error, self.colored);
    }
}

pub fn print_report(label: &str, result: &ScanResult, colored_output: bool, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text_report(label, result, colored_output),
        OutputFormat::Json => print_json_line(label, result),
    }
}

fn print_text_report(label: &str, result: &ScanResult, colored_output: bool) {
    let scanned = format!("Words Scanned: {}", result.total_tokens_scanned);

    if colored_output {
        println!("\n{}", label.bold().underline());
        println!("{}", "Spelling Mistakes".yellow().bold());
        println!("  {}", scanned.dimmed());
    } else {
        println!("\n{}", label);
        println!("Spelling Mistakes");
        println!("  {}", scanned);
    }

    if result.mistakes.is_empty() {
        if colored_output {
            println!("  {}", "none".green());
        } else {
            println!("  none");
        }
        return;
    }

    for (word, count) in result.mistakes.ranked() {
        if colored_output {
            println!("  {} {}", word.red().bold(), format!("({})", count).dimmed());
        } else {
            println!("  {} ({})", word, count);
        }
    }
}

fn print_json_line(label: &str, result: &ScanResult) {
    let output = JsonReport {
        document: label,
        result,
    };

    match serde_json::to_string(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Failed to serialize report for {}: {}", label, e),
    }
}

/// Print every report of a one-shot run as a single JSON array.
pub fn print_json_reports(reports: &[JsonReport<'_>]) {
    match serde_json::to_string_pretty(reports) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Failed to serialize reports: {}", e),
    }
}

pub fn print_dictionary_warning(error: &ScanError, colored: bool) {
    let message = format!("{}; every word will be reported", error);
    if colored {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

pub fn print_scan_summary(total_mistakes: usize, documents: usize, colored: bool) {
    let doc_word = if documents == 1 { "document" } else { "documents" };

    println!();
    if total_mistakes == 0 {
        if colored {
            println!("{}", "✓ No spelling mistakes found!".green().bold());
        } else {
            println!("✓ No spelling mistakes found!");
        }
    } else {
        let mistake_word = if total_mistakes == 1 { "mistake" } else { "mistakes" };
        if colored {
            println!(
                "{} {} {} found in {} {}",
                "✗".red().bold(),
                total_mistakes.to_string().red().bold(),
                mistake_word,
                documents,
                doc_word
            );
        } else {
            println!(
                "✗ {} {} found in {} {}",
                total_mistakes, mistake_word, documents, doc_word
            );
        }
    }
}

/// Spinner shown on stderr while the word list loads.
#[derive(Default)]
pub struct SpinnerProgress {
    bar: Option<ProgressBar>,
}

impl Progress for SpinnerProgress {
    fn loading_started(&mut self) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Loading dictionary...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(pb);
    }

    fn loading_finished(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MistakeRecord;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_json_report_shape() {
        let mut mistakes = MistakeRecord::new();
        mistakes.increment("helo");
        mistakes.increment("helo");
        let result = ScanResult {
            total_tokens_scanned: 3,
            mistakes,
        };

        let value = serde_json::to_value(JsonReport {
            document: "page.txt",
            result: &result,
        })
        .unwrap();

        assert_eq!(value["document"], "page.txt");
        assert_eq!(value["total_tokens_scanned"], 3);
        assert_eq!(value["mistakes"]["helo"], 2);
    }

    #[test]
    fn test_several_reports_form_one_array() {
        let clean = ScanResult::default();
        let mut mistakes = MistakeRecord::new();
        mistakes.increment("teh");
        let dirty = ScanResult {
            total_tokens_scanned: 2,
            mistakes,
        };

        let reports = vec![
            JsonReport {
                document: "a.txt",
                result: &clean,
            },
            JsonReport {
                document: "b.txt",
                result: &dirty,
            },
        ];
        let json = serde_json::to_string_pretty(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["document"], "a.txt");
        assert_eq!(array[1]["mistakes"]["teh"], 1);
    }

    #[test]
    fn test_spinner_brackets_loading() {
        let mut progress = SpinnerProgress::default();
        progress.loading_started();
        assert!(progress.bar.is_some());
        progress.loading_finished();
        assert!(progress.bar.is_none());
    }
}
