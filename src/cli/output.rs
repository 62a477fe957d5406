//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Current price report
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    pub symbol: String,
    pub price: f64,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breached: Option<bool>,
}

impl TableDisplay for PriceReport {
    fn to_table(&self) -> String {
        let mut output = format!("Symbol: {}\n", self.symbol);
        output.push_str(&format!("Price:  {:.6}\n", self.price));
        output.push_str(&format!("Source: {}", self.source));

        if let (Some(threshold), Some(breached)) = (self.threshold, self.breached) {
            output.push_str(&format!(
                "\nTarget: {} ({})",
                threshold,
                if breached { "BREACHED" } else { "below" }
            ));
        }

        output
    }

    fn to_compact(&self) -> String {
        match self.breached {
            Some(true) => format!("{}:{:.6}:BREACHED", self.symbol, self.price),
            _ => format!("{}:{:.6}", self.symbol, self.price),
        }
    }
}

/// Notification delivery report
#[derive(Debug, Clone, Serialize)]
pub struct NotifyReport {
    pub channel: String,
    pub title: String,
    pub priority: i8,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TableDisplay for NotifyReport {
    fn to_table(&self) -> String {
        let status = if self.delivered { "✓ delivered" } else { "✗ failed" };
        let mut output = format!(
            "{} [{}] \"{}\" (priority {})",
            status, self.channel, self.title, self.priority
        );
        if let Some(error) = &self.error {
            output.push_str(&format!("\n  Error: {}", error));
        }
        output
    }
}

impl TableDisplay for Config {
    fn to_table(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|e| format!("<unprintable: {}>", e))
    }

    fn to_compact(&self) -> String {
        format!(
            "symbol={} threshold={} interval={}s backoff={}s pushover={}",
            self.watch.symbol,
            self.watch
                .threshold
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unset".to_string()),
            self.watch.interval_seconds,
            self.watch.backoff_seconds,
            if self.pushover.credentials().is_configured() {
                "configured"
            } else {
                "unconfigured"
            }
        )
    }
}
