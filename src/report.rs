//! Report sinks and structured reports
//!
//! The harness and the CLI never print directly. They hand plain-text lines to
//! a [`ReportSink`], which the caller chooses: styled console output for the
//! binary, tracing events for embedding, or an in-memory buffer for tests.

use console::style;
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;

/// Receives one plain-text line per report
pub trait ReportSink: Send + Sync {
    fn emit(&self, line: &str);
}

/// Writes reports to stdout with a styled marker
#[derive(Debug, Default)]
pub struct ConsoleSink {
    quiet: bool,
}

impl ConsoleSink {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ReportSink for ConsoleSink {
    fn emit(&self, line: &str) {
        if !self.quiet {
            println!("{} {}", style("⏱").cyan(), line);
        }
    }
}

/// Forwards reports as `tracing` info events
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "reckon::report", "{line}");
    }
}

/// Collects reports in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_string());
        }
    }
}

/// Output format for structured reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// One aggregate outcome with its timing
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub label: String,
    pub value: serde_json::Value,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Human-readable rendering of `value` for text output
    #[serde(skip)]
    pub display: Option<String>,
}

impl Report {
    pub fn new(label: impl Into<String>, value: impl Serialize, elapsed: Duration) -> Self {
        Self {
            label: label.into(),
            value: serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
            elapsed_ms: elapsed.as_millis() as u64,
            strategy: None,
            display: None,
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// The value as shown to humans; strings unquoted, null as `none`
    pub fn display_value(&self) -> String {
        if let Some(display) = &self.display {
            return display.clone();
        }
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "none".to_string(),
            other => other.to_string(),
        }
    }

    /// One plain-text line, e.g. `total weight = 463 (12 ms)`
    pub fn to_line(&self) -> String {
        let value = self.display_value();
        match &self.strategy {
            Some(strategy) => format!("{} = {} ({} ms, {})", self.label, value, self.elapsed_ms, strategy),
            None => format!("{} = {} ({} ms)", self.label, value, self.elapsed_ms),
        }
    }
}

/// Render a batch of reports in the requested format
pub fn render(reports: &[Report], format: ReportFormat) -> anyhow::Result<String> {
    Ok(match format {
        ReportFormat::Text => reports
            .iter()
            .map(Report::to_line)
            .collect::<Vec<_>>()
            .join("\n"),
        ReportFormat::Json => serde_json::to_string_pretty(reports)?,
        ReportFormat::Yaml => serde_yml::to_string(reports)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects_lines() {
        let sink = MemorySink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_report_line() {
        let report = Report::new("total weight", 463u64, Duration::from_millis(12));
        assert_eq!(report.to_line(), "total weight = 463 (12 ms)");

        let report = Report::new("lightest", "Tweety", Duration::ZERO).with_strategy("sequential");
        assert_eq!(report.to_line(), "lightest = Tweety (0 ms, sequential)");

        let none: Option<&str> = None;
        assert_eq!(Report::new("lightest", none, Duration::ZERO).to_line(), "lightest = none (0 ms)");
    }

    #[test]
    fn test_display_text_keeps_structured_value() {
        let tweety = serde_json::json!({ "name": "Tweety", "weight_kg": 45, "height_m": 1.65 });
        let report = Report::new("lightest", &tweety, Duration::ZERO)
            .with_display("Tweety (45kg, 1.65m)");
        assert_eq!(report.display_value(), "Tweety (45kg, 1.65m)");
        assert_eq!(report.to_line(), "lightest = Tweety (45kg, 1.65m) (0 ms)");

        let json = render(&[report], ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["value"]["name"], "Tweety");
        assert!(parsed[0].get("display").is_none());
    }

    #[test]
    fn test_render_json() {
        let reports = vec![Report::new("total weight", 463u64, Duration::from_millis(3))];
        let json = render(&reports, ReportFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["value"], 463);
        assert_eq!(parsed[0]["elapsed_ms"], 3);
    }

    #[test]
    fn test_render_yaml() {
        let reports = vec![Report::new("lightest", "Tweety", Duration::ZERO)];
        let yaml = render(&reports, ReportFormat::Yaml).unwrap();
        assert!(yaml.contains("label: lightest"));
        assert!(yaml.contains("value: Tweety"));
    }
}
