use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use mica_config::{BackendKind, DebugTrace, DumpKind};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DumpKindCli {
  /// Dump the syntax tree as source
  Ast,
  /// Dump the lowered IR
  Ir,
}

impl From<DumpKindCli> for DumpKind {
  fn from(value: DumpKindCli) -> DumpKind {
    match value {
      DumpKindCli::Ast => DumpKind::Ast,
      DumpKindCli::Ir => DumpKind::Ir,
    }
  }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugTraceCli {
  Codegen,
  Scope,
  Verify,
  Backend,
}

impl From<DebugTraceCli> for DebugTrace {
  fn from(value: DebugTraceCli) -> DebugTrace {
    match value {
      DebugTraceCli::Codegen => DebugTrace::Codegen,
      DebugTraceCli::Scope => DebugTrace::Scope,
      DebugTraceCli::Verify => DebugTrace::Verify,
      DebugTraceCli::Backend => DebugTrace::Backend,
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Backend {
  /// Walk the IR directly
  Interpreter,
  /// Compile to native code in memory (needs the `jit` feature)
  Jit,
}

impl From<Backend> for BackendKind {
  fn from(value: Backend) -> Self {
    match value {
      Backend::Interpreter => BackendKind::Interpreter,
      Backend::Jit => BackendKind::Jit,
    }
  }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunCommand {
  /// Syntax tree file (JSON). Falls back to the `entry` of mica.toml
  pub file_path: Option<String>,

  /// Execution backend (overrides mica.toml)
  #[arg(short, long, value_enum)]
  pub backend: Option<Backend>,

  /// Do not declare the print_int/print_double host routines
  #[arg(long)]
  pub no_host_imports: bool,

  /// Maximum call depth for the interpreter
  #[arg(long)]
  pub max_call_depth: Option<usize>,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckCommand {
  /// Syntax tree file (JSON). Falls back to the `entry` of mica.toml
  pub file_path: Option<String>,

  /// Do not declare the print_int/print_double host routines
  #[arg(long)]
  pub no_host_imports: bool,
}

#[derive(Subcommand, Clone, PartialEq)]
pub enum SubCommand {
  /// Lower, verify and run a program
  Run(RunCommand),
  /// Lower and verify a program without running it
  Check(CheckCommand),
}

#[derive(Parser)]
#[command(author, version, about = "The Mica compiler", long_about = None)]
#[command(propagate_version = true)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  #[command(subcommand)]
  pub subcommand: SubCommand,

  /// Dump internal compiler representations
  #[arg(long, value_enum, value_delimiter = ',', action = clap::ArgAction::Append, global = true)]
  pub dump: Vec<DumpKindCli>,

  /// Write dumps to this directory (otherwise stdout)
  #[arg(long, global = true)]
  pub dump_dir: Option<String>,

  /// Enable internal debug mode
  #[arg(long, default_value = "false", global = true)]
  pub debug: bool,

  /// Enable debug tracing for subsystems
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub debug_trace: Vec<DebugTraceCli>,

  /// Don't print any output
  #[arg(long, short = 'q', default_value = "false", global = true)]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}
