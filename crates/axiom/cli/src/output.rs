//! Output formatting for the console

use axiom_shell::{LogEntry, LogLevel};
use axiom_types::{ChatMessage, ChatRole, SynthesisResult};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use crate::error::CliResult;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Table row for history listings
#[derive(Debug, Serialize, Tabled)]
pub struct HistoryRow {
    /// Position in history, 0 is the newest
    #[tabled(rename = "#")]
    pub index: usize,
    pub signature: String,
    pub axiom: String,
    pub entropy: String,
    pub received: String,
}

impl HistoryRow {
    pub fn new(index: usize, result: &SynthesisResult) -> Self {
        Self {
            index,
            signature: result.signature.clone(),
            axiom: truncate(&result.axiom, 48),
            entropy: format!("{:.3}", result.metrics.entropy),
            received: result.timestamp.format("%H:%M:%S").to_string(),
        }
    }
}

/// Print rows in the specified format
pub fn print_rows<T: Serialize + Tabled>(rows: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&rows)?),
    }
    Ok(())
}

/// Print a synthesis result in the specified format
pub fn print_result(result: &SynthesisResult, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => println!("{}", render_result(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(result)?),
    }
    Ok(())
}

/// Print a plain text answer in the specified format
pub fn print_text(label: &str, text: &str, format: OutputFormat) -> CliResult<()> {
    let mut value = serde_json::Map::new();
    value.insert(label.to_string(), serde_json::Value::String(text.to_string()));
    match format {
        OutputFormat::Table => println!("{}", text),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&value)?),
    }
    Ok(())
}

/// Print any serializable value as JSON or YAML
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

pub fn render_result(result: &SynthesisResult) -> String {
    let header = format!("PROTOCOL {}", result.signature);
    let header = if result.is_sentinel() {
        header.red().bold()
    } else {
        header.cyan().bold()
    };

    let mut lines = vec![
        format!("{} {}", header, result.timestamp.to_rfc3339().dimmed()),
        "=".repeat(60),
        format!("{} {}", "AXIOM".bold().yellow(), result.axiom),
        format!("{}", "SYNTHESIS".bold().yellow()),
    ];
    lines.extend(result.paragraphs().map(|p| format!("  {}", p)));
    lines.push(format!("{} {}", "VALIDATION".bold().yellow(), result.validation));
    lines.push(format!(
        "{} entropy {:.3} | latency {} | pruning {} | valuation {}",
        "METRICS".bold().yellow(),
        result.metrics.entropy,
        result.metrics.latency,
        result.metrics.pruning_rate,
        result.metrics.valuation
    ));
    lines.join("\n")
}

pub fn render_chat(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("{} {}", "you>".bold(), message.text),
        ChatRole::Model => format!("{} {}", "axiom>".bold().cyan(), message.text),
    }
}

pub fn render_log(entry: &LogEntry) -> String {
    let level = match entry.level {
        LogLevel::Info => entry.level.to_string().blue(),
        LogLevel::Warn => entry.level.to_string().yellow(),
        LogLevel::Error => entry.level.to_string().red(),
    };
    format!(
        "{} {:<5} {}",
        entry.at.format("%H:%M:%S").to_string().dimmed(),
        level,
        entry.message
    )
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
