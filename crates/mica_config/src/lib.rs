use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name looked up in the working directory for project defaults.
pub const PROJECT_FILE: &str = "mica.toml";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpKind {
  Ast,
  Ir,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Codegen,
  Scope,
  Verify,
  Backend,
}

/// Which execution backend runs the lowered module.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
  #[default]
  Interpreter,
  Jit,
}

impl fmt::Display for BackendKind {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      BackendKind::Interpreter => write!(f, "interpreter"),
      BackendKind::Jit => write!(f, "jit"),
    }
  }
}

/// `[run]` table of `mica.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MicaProjectRunConfig {
  pub backend: BackendKind,
  pub dump: Vec<DumpKind>,
  pub host_imports: bool,
  pub max_call_depth: usize,
}

impl Default for MicaProjectRunConfig {
  fn default() -> Self {
    Self {
      backend: BackendKind::default(),
      dump: Vec::new(),
      host_imports: true,
      max_call_depth: DEFAULT_MAX_CALL_DEPTH,
    }
  }
}

/// Contents of `mica.toml`.
///
/// ```toml
/// name = "demo"
///
/// [run]
/// backend = "interpreter"
/// dump = ["ir"]
/// host_imports = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MicaProjectConfig {
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub entry: Option<String>,
  #[serde(default)]
  pub run: MicaProjectRunConfig,
}

#[derive(Debug)]
pub enum ConfigError {
  Io { path: String, message: String },
  Parse { path: String, message: String },
}

impl fmt::Display for ConfigError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ConfigError::Io { path, message } => write!(f, "failed to read '{}': {}", path, message),
      ConfigError::Parse { path, message } => write!(f, "invalid project file '{}': {}", path, message),
    }
  }
}

impl std::error::Error for ConfigError {}

impl MicaProjectConfig {
  pub fn from_toml_str(
    path: &str,
    content: &str,
  ) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
      path: path.to_string(),
      message: e.to_string(),
    })
  }

  /// Reads `mica.toml` from `dir`. Missing file is not an error.
  pub fn load_from_dir(dir: &Path) -> Result<Option<Self>, ConfigError> {
    let file_path = dir.join(PROJECT_FILE);

    if !file_path.exists() {
      return Ok(None);
    }

    let display = file_path.display().to_string();
    let content = std::fs::read_to_string(&file_path).map_err(|e| ConfigError::Io {
      path: display.clone(),
      message: e.to_string(),
    })?;

    Self::from_toml_str(&display, &content).map(Some)
  }
}

pub const DEFAULT_MAX_CALL_DEPTH: usize = 1024;

#[derive(Debug, Clone)]
pub struct MicaRunConfig {
  pub file: Option<String>,
  pub backend: BackendKind,
  pub dump: Vec<DumpKind>,
  pub dump_dir: Option<String>,
  pub check_only: bool,
}

impl MicaRunConfig {
  pub fn new(
    file: Option<String>,
    backend: BackendKind,
    dump: Vec<DumpKind>,
    dump_dir: Option<String>,
    check_only: bool,
  ) -> Self {
    Self {
      file,
      backend,
      dump,
      dump_dir,
      check_only,
    }
  }
}

impl Default for MicaRunConfig {
  fn default() -> Self {
    Self::new(None, BackendKind::default(), Vec::new(), None, false)
  }
}

#[derive(Debug, Clone)]
pub struct MicaConfig {
  pub project_config: Option<MicaProjectConfig>,
  pub run_config: MicaRunConfig,
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
  pub host_imports: bool,
  pub max_call_depth: usize,
}

impl Default for MicaConfig {
  fn default() -> Self {
    Self {
      project_config: None,
      run_config: MicaRunConfig::default(),
      debug: false,
      debug_trace: Vec::new(),
      quiet: false,
      verbose: 0,
      host_imports: true,
      max_call_depth: DEFAULT_MAX_CALL_DEPTH,
    }
  }
}

impl MicaConfig {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      ..Self::default()
    }
  }

  /// Quiet configuration used by tests and embedders.
  pub fn silent() -> Self {
    Self {
      quiet: true,
      ..Self::default()
    }
  }

  /// Applies project defaults. Values given on the command line win, so this
  /// runs before the CLI overrides.
  pub fn apply_project(
    &mut self,
    project: MicaProjectConfig,
  ) {
    self.run_config.backend = project.run.backend;
    self.run_config.dump.clone_from(&project.run.dump);
    self.host_imports = project.run.host_imports;
    self.max_call_depth = project.run.max_call_depth;

    if self.run_config.file.is_none() {
      self.run_config.file.clone_from(&project.entry);
    }

    self.project_config = Some(project);
  }

  pub fn dump_requested(
    &self,
    kind: DumpKind,
  ) -> bool {
    self.run_config.dump.contains(&kind)
  }
}
