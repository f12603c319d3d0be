use std::io::Write;
use std::path::Path;

use colored::*;
use mica_ast::{display::format_program, ASTBlock};
use mica_backend::{backend_for, GenericValue};
use mica_codegen::{lower_program, CodegenOptions};
use mica_config::{DebugTrace, DumpKind, MicaConfig};
use mica_diagnostics::diagnostic_report::Diagnostic;
use mica_ir::{print_module, verify_module, Module, VerifyError};
use mica_log::{log_dbg, log_trc, phase_log, phase_ok, phase_warn, trace_dbg};

use crate::error::DriverError;

/// A lowered and verified program.
#[derive(Debug)]
pub struct Compilation {
  pub module: Module,
  /// Lowering problems. They never stop lowering; the verifier decides
  /// whether the result can run.
  pub diagnostics: Vec<Diagnostic>,
  /// Everything the verifier reported, warnings included.
  pub verify_errors: Vec<VerifyError>,
}

impl Compilation {
  pub fn errors(&self) -> impl Iterator<Item = &VerifyError> {
    self.verify_errors.iter().filter(|e| !e.is_warning())
  }

  pub fn warnings(&self) -> impl Iterator<Item = &VerifyError> {
    self.verify_errors.iter().filter(|e| e.is_warning())
  }

  pub fn is_runnable(&self) -> bool {
    self.errors().next().is_none()
  }
}

/// Lowers `program` into a module named `name` and verifies it.
pub fn compile(
  config: &MicaConfig,
  name: &str,
  program: &ASTBlock,
) -> Compilation {
  phase_log!(config, "Generating code...");

  let output = lower_program(config, CodegenOptions::from_config(config), name, program);
  log_dbg!(
    config,
    "lowered {} routine(s), {} diagnostic(s)",
    output.module.functions.len(),
    output.diagnostics.len()
  );

  let verify_errors = match verify_module(&output.module) {
    Ok(()) => Vec::new(),
    Err(errors) => errors,
  };

  log_trc!(
    config,
    "verified {} routine(s), {} finding(s)",
    output.module.functions.len(),
    verify_errors.len()
  );

  for error in &verify_errors {
    trace_dbg!(config, DebugTrace::Verify, "{}", error);
  }

  phase_ok!(config, "Code is generated.");

  Compilation {
    module: output.module,
    diagnostics: output.diagnostics,
    verify_errors,
  }
}

/// Runs the entry routine on the configured backend. A module with
/// verification errors is refused.
pub fn execute(
  config: &MicaConfig,
  compilation: &Compilation,
  out: &mut dyn Write,
) -> Result<GenericValue, DriverError> {
  if !compilation.is_runnable() {
    return Err(DriverError::InvalidModule(compilation.errors().cloned().collect()));
  }

  let Some(entry) = compilation.module.entry_point else {
    return Err(DriverError::InvalidModule(vec![VerifyError::MissingEntryPoint]));
  };

  let mut backend = backend_for(config.run_config.backend, config)?;

  phase_log!(config, "Running code... ({})", backend.name());
  let result = backend.execute(&compilation.module, entry, out)?;
  phase_ok!(config, "Code was run.");

  Ok(result)
}

/// Reads a JSON syntax tree, compiles it, prints diagnostics and requested
/// dumps, then runs it with program output on stdout.
pub fn run_file(
  config: &MicaConfig,
  file_path: &str,
) -> Result<GenericValue, DriverError> {
  let compilation = load_and_compile(config, file_path)?;

  if config.run_config.check_only {
    return Ok(GenericValue::Unit);
  }

  let stdout = std::io::stdout();
  let mut out = stdout.lock();
  let result = execute(config, &compilation, &mut out);
  out.flush().map_err(|e| DriverError::Execution(e.into()))?;

  result
}

/// Compiles and verifies without running.
pub fn check_file(
  config: &MicaConfig,
  file_path: &str,
) -> Result<(), DriverError> {
  load_and_compile(config, file_path).map(|_| ())
}

fn load_and_compile(
  config: &MicaConfig,
  file_path: &str,
) -> Result<Compilation, DriverError> {
  let text = std::fs::read_to_string(file_path).map_err(|e| DriverError::Read {
    path: file_path.to_string(),
    message: e.to_string(),
  })?;

  phase_log!(config, "Reading... {}", file_path);

  let program = mica_ast::program_from_json(&text).map_err(|e| DriverError::Parse {
    path: file_path.to_string(),
    message: e.to_string(),
  })?;

  if config.dump_requested(DumpKind::Ast) {
    write_dump_output(config, "dump-ast.txt", &format_program(&program))?;
  }

  let compilation = compile(config, &module_name(config, file_path), &program);

  mica_diagnostics::render_batch(&compilation.diagnostics);

  for warning in compilation.warnings() {
    phase_warn!(config, "{}", warning);
  }

  if config.dump_requested(DumpKind::Ir) {
    write_dump_output(config, "dump-ir.txt", &print_module(&compilation.module))?;
  }

  if !compilation.is_runnable() {
    for error in compilation.errors() {
      eprintln!("{} {}", "error:".red().bold(), error);
    }

    return Err(DriverError::InvalidModule(compilation.errors().cloned().collect()));
  }

  Ok(compilation)
}

/// The project name from `mica.toml` when there is one, else the file stem.
fn module_name(
  config: &MicaConfig,
  file_path: &str,
) -> String {
  if let Some(project) = &config.project_config {
    if !project.name.is_empty() {
      return project.name.clone();
    }
  }

  Path::new(file_path)
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| "main".to_string())
}

/// Writes a dump into the dump directory, or to stdout when none is set.
fn write_dump_output(
  config: &MicaConfig,
  file_name: &str,
  content: &str,
) -> Result<(), DriverError> {
  let Some(dump_dir) = &config.run_config.dump_dir else {
    println!("\n{}", content);
    return Ok(());
  };

  let output_dir = Path::new(dump_dir);
  std::fs::create_dir_all(output_dir).map_err(|e| DriverError::Dump {
    path: output_dir.display().to_string(),
    message: e.to_string(),
  })?;

  let output_path = output_dir.join(file_name);
  std::fs::write(&output_path, content).map_err(|e| DriverError::Dump {
    path: output_path.display().to_string(),
    message: e.to_string(),
  })
}
