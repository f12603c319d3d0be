use std::fmt;

use mica_backend::ExecutionError;
use mica_ir::VerifyError;

#[derive(Debug)]
pub enum DriverError {
  Read { path: String, message: String },
  /// The input is not a valid syntax tree.
  Parse { path: String, message: String },
  /// Verification found errors; the module is not run.
  InvalidModule(Vec<VerifyError>),
  Dump { path: String, message: String },
  Execution(ExecutionError),
}

impl DriverError {
  /// Whether the process should stop right away. Only a backend that cannot
  /// start qualifies.
  pub fn is_fatal(&self) -> bool {
    matches!(
      self,
      DriverError::Execution(ExecutionError::BackendInitialization { .. })
    )
  }
}

impl fmt::Display for DriverError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      DriverError::Read { path, message } => write!(f, "failed to read file '{}': {}", path, message),
      DriverError::Parse { path, message } => write!(f, "{}: {}", path, message),
      DriverError::InvalidModule(errors) => {
        write!(f, "module failed verification with {} error(s)", errors.len())
      },
      DriverError::Dump { path, message } => write!(f, "failed to write dump '{}': {}", path, message),
      DriverError::Execution(error) => write!(f, "{}", error),
    }
  }
}

impl std::error::Error for DriverError {}

impl From<ExecutionError> for DriverError {
  fn from(value: ExecutionError) -> Self {
    DriverError::Execution(value)
  }
}
