use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Info,
  Warning,
  Error,
  Hint,
}

/// A rendered-ready diagnostic: `<kind>: <message>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub kind: &'static str,
  pub message: String,
  pub error_code: String,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    kind: &'static str,
    message: String,
    error_code: String,
  ) -> Self {
    Self {
      severity,
      kind,
      message,
      error_code,
      notes: Vec::new(),
    }
  }

  pub fn with_note(
    mut self,
    note: String,
  ) -> Self {
    self.notes.push(note);
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}

impl fmt::Display for Diagnostic {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{}: {}", self.kind, self.message)
  }
}
