use std::fmt;

use super::diagnostic_report::{Diagnostic, Severity};

/// Problems found while lowering the AST.
///
/// None of them stops the translation: the offending node yields a null
/// value and its parent keeps going.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticMessage {
  /// Identifier not bound in the current frame (reads and assignment targets).
  NameError(String),
  /// Call to a name missing from the module's function table.
  UndefinedFunction(String),
  /// Binary operator the code generator has no instruction for.
  UnsupportedOperator(String),
  /// Type name other than `int`/`double`; the binding falls back to `void`.
  UnknownType(String),
}

impl DiagnosticMessage {
  pub fn kind(&self) -> &'static str {
    match self {
      DiagnosticMessage::NameError(_) => "NameError",
      DiagnosticMessage::UndefinedFunction(_) => "UndefinedFunctionError",
      DiagnosticMessage::UnsupportedOperator(_) => "UnsupportedOperatorError",
      DiagnosticMessage::UnknownType(_) => "UnknownTypeError",
    }
  }

  /// The identifier, function name, operator or type name at fault.
  pub fn subject(&self) -> &str {
    match self {
      DiagnosticMessage::NameError(name)
      | DiagnosticMessage::UndefinedFunction(name)
      | DiagnosticMessage::UnsupportedOperator(name)
      | DiagnosticMessage::UnknownType(name) => name,
    }
  }

  pub fn code(&self) -> String {
    match self {
      DiagnosticMessage::NameError(_) => "M0001",
      DiagnosticMessage::UndefinedFunction(_) => "M0002",
      DiagnosticMessage::UnsupportedOperator(_) => "M0003",
      DiagnosticMessage::UnknownType(_) => "M0004",
    }
    .to_string()
  }

  pub fn level(&self) -> Severity {
    Severity::Error
  }

  pub fn report(&self) -> Diagnostic {
    let diagnostic = Diagnostic::new(self.level(), self.kind(), self.subject().to_string(), self.code());

    match self {
      DiagnosticMessage::UnknownType(_) => {
        diagnostic.with_note("only `int` and `double` are recognized; the binding is void".to_string())
      },
      _ => diagnostic,
    }
  }
}

impl fmt::Display for DiagnosticMessage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{}: {}", self.kind(), self.subject())
  }
}
