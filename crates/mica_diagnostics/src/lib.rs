pub mod diagnostic_report;
pub mod message;

use colored::*;
use diagnostic_report::{Diagnostic, Severity};

/// Writes one diagnostic to stderr as `<kind>: <subject>`, followed by its notes.
pub fn render(diag: &Diagnostic) {
  let kind = match diag.severity {
    Severity::Info => diag.kind.blue().bold(),
    Severity::Warning => diag.kind.yellow().bold(),
    Severity::Error => diag.kind.red().bold(),
    Severity::Hint => diag.kind.cyan().bold(),
  };

  eprintln!("{}: {}", kind, diag.message);

  for note in &diag.notes {
    eprintln!("  {} {}", "note:".cyan().bold(), note);
  }
}

pub fn render_batch(diagnostics: &[Diagnostic]) {
  for diag in diagnostics {
    render(diag);
  }
}
