use std::fmt;

/// Failures while running a module.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionError {
  /// The backend could not be brought up (unsupported host, feature not
  /// compiled in). Fatal for the command line.
  BackendInitialization { backend: String, message: String },

  /// The backend could not translate the module.
  Compilation { function: String, message: String },

  /// The module has no entry routine, or it takes parameters.
  InvalidEntryPoint(String),

  /// An import the host does not provide.
  UnresolvedImport(String),

  /// The module is malformed at run time (unknown temp, handle used as a value,
  /// access to a `void` slot). Verification rules these out.
  InvalidModule { function: String, message: String },

  DivisionByZero { function: String },

  CallDepthExceeded { limit: usize },

  /// Writing program output failed.
  Output(String),
}

impl fmt::Display for ExecutionError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ExecutionError::BackendInitialization { backend, message } => {
        write!(f, "failed to initialize the {} backend: {}", backend, message)
      },
      ExecutionError::Compilation { function, message } => {
        write!(f, "failed to compile '{}': {}", function, message)
      },
      ExecutionError::InvalidEntryPoint(message) => write!(f, "invalid entry point: {}", message),
      ExecutionError::UnresolvedImport(name) => write!(f, "unresolved import '{}'", name),
      ExecutionError::InvalidModule { function, message } => {
        write!(f, "invalid module in '{}': {}", function, message)
      },
      ExecutionError::DivisionByZero { function } => write!(f, "division by zero in '{}'", function),
      ExecutionError::CallDepthExceeded { limit } => write!(f, "call depth exceeded ({} frames)", limit),
      ExecutionError::Output(message) => write!(f, "failed to write program output: {}", message),
    }
  }
}

impl std::error::Error for ExecutionError {}

impl From<std::io::Error> for ExecutionError {
  fn from(value: std::io::Error) -> Self {
    ExecutionError::Output(value.to_string())
  }
}
