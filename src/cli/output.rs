//! Styled terminal output for the reckon CLI
//!
//! Text-mode commands talk to the user through [`Output`]. Structured formats
//! (JSON, YAML) bypass it and print the rendered reports only.

use console::style;

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Whether non-error output is suppressed
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a category heading
    pub fn category(&self, category: &str) {
        if !self.quiet {
            println!("\n{}", style(category).bold().cyan());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {} {}", style(key).dim(), styled_value);
        }
    }

    /// Print one aggregate with its timing, e.g. `total weight  463  (12 ms)`
    pub fn result(&self, label: &str, value: &str, elapsed_ms: u64) {
        if !self.quiet {
            println!(
                "{} {:<24} {} {}",
                style("❯").cyan(),
                style(label).bold(),
                style(value).green().bold(),
                style(format!("({elapsed_ms} ms)")).dim()
            );
        }
    }
}
