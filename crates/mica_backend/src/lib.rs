pub mod error;
pub mod interpreter;
#[cfg(feature = "jit")]
pub mod jit;
pub mod value;

use std::io::Write;

use mica_config::{BackendKind, MicaConfig};
use mica_ir::{FunctionId, Module};

pub use error::ExecutionError;
pub use interpreter::Interpreter;
#[cfg(feature = "jit")]
pub use jit::JitBackend;
pub use value::GenericValue;

/// Something that can run a lowered module.
pub trait ExecutionBackend {
  fn name(&self) -> &'static str;

  /// Runs `entry` with no arguments. Program output goes to `out`.
  fn execute(
    &mut self,
    module: &Module,
    entry: FunctionId,
    out: &mut dyn Write,
  ) -> Result<GenericValue, ExecutionError>;
}

/// Brings up the backend selected by `kind`.
pub fn backend_for(
  kind: BackendKind,
  config: &MicaConfig,
) -> Result<Box<dyn ExecutionBackend>, ExecutionError> {
  match kind {
    BackendKind::Interpreter => Ok(Box::new(Interpreter::new(config))),
    BackendKind::Jit => jit_backend(config),
  }
}

#[cfg(feature = "jit")]
fn jit_backend(config: &MicaConfig) -> Result<Box<dyn ExecutionBackend>, ExecutionError> {
  Ok(Box::new(JitBackend::new(config)?))
}

#[cfg(not(feature = "jit"))]
fn jit_backend(_config: &MicaConfig) -> Result<Box<dyn ExecutionBackend>, ExecutionError> {
  Err(ExecutionError::BackendInitialization {
    backend: BackendKind::Jit.to_string(),
    message: "this build does not include the `jit` feature".to_string(),
  })
}
