//! Logging utilities for the Mica compiler.
//!
//! Provides macros for:
//! - Phase logging (`phase_log!`, `phase_ok!`, `phase_warn!`)
//! - Debug traces by category (`trace_dbg!`)
//! - Verbose logging (`log_dbg!`, `log_trc!`)
//!
//! Everything is written to stderr so IR dumps and program output on stdout
//! stay clean.

use mica_config::{DebugTrace, MicaConfig};

pub use colored;

pub fn effective_verbose(config: &MicaConfig) -> u8 {
  if config.quiet {
    return 0;
  }

  if config.debug && config.verbose < 2 {
    return 2;
  }

  config.verbose
}

pub fn log_phase(config: &MicaConfig) -> bool {
  !config.quiet
}

pub fn log_info(config: &MicaConfig) -> bool {
  effective_verbose(config) >= 1
}

pub fn log_debug(config: &MicaConfig) -> bool {
  effective_verbose(config) >= 2
}

pub fn log_trace(config: &MicaConfig) -> bool {
  effective_verbose(config) >= 3
}

pub fn debug_trace_enabled(
  config: &MicaConfig,
  trace: DebugTrace,
) -> bool {
  !config.quiet && (config.debug || config.debug_trace.contains(&trace))
}

pub fn trace_name(trace: DebugTrace) -> &'static str {
  match trace {
    DebugTrace::Codegen => "codegen",
    DebugTrace::Scope => "scope",
    DebugTrace::Verify => "verify",
    DebugTrace::Backend => "backend",
  }
}

/// Log a compiler phase message with an arrow prefix.
///
/// # Examples
///
/// ```ignore
/// phase_log!(&config, "Generating code...");
/// phase_log!(&config, indent = 8, "lowering {}", name);
/// ```
#[macro_export]
macro_rules! phase_log {
  ($config:expr, indent = $indent:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!(
        "{:indent$}{} {}",
        "",
        "-->".bright_green().bold(),
        format!($fmt $(, $arg)*),
        indent = $indent
      );
    }
  }};

  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    $crate::phase_log!($config, indent = 4, $fmt $(, $arg)*);
  }};
}

/// Log a successful phase completion (green arrow, no indent).
///
/// # Examples
///
/// ```ignore
/// phase_ok!(&config, "Code was run.");
/// ```
#[macro_export]
macro_rules! phase_ok {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!("{} {}", "-->".bright_green().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// Log a warning during a phase (yellow arrow, no indent).
///
/// # Examples
///
/// ```ignore
/// phase_warn!(&config, "{}", verify_warning);
/// ```
#[macro_export]
macro_rules! phase_warn {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_phase($config) {
      use $crate::colored::Colorize;
      eprintln!("{} {}", "-->".bright_yellow().bold(), format!($fmt $(, $arg)*));
    }
  }};
}

/// Log a debug trace for one compiler component.
///
/// Output format: `debug[component]: message`
///
/// # Examples
///
/// ```ignore
/// trace_dbg!(&config, DebugTrace::Scope, "push frame #{}", depth);
/// // Output: debug[scope]: push frame #1
/// ```
#[macro_export]
macro_rules! trace_dbg {
  ($config:expr, $trace:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::debug_trace_enabled($config, $trace) {
      eprintln!(
        "debug[{}]: {}",
        $crate::trace_name($trace),
        format!($fmt $(, $arg)*)
      );
    }
  }};
}

/// Log a verbose message (verbosity >= 1).
///
/// # Examples
///
/// ```ignore
/// log_info!(&config, "entry returned {}", value);
/// // Output: info: entry returned 8
/// ```
#[macro_export]
macro_rules! log_info {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_info($config) {
      eprintln!("info: {}", format!($fmt $(, $arg)*));
    }
  }};
}

/// Log a verbose debug message (verbosity >= 2).
///
/// # Examples
///
/// ```ignore
/// log_dbg!(&config, "lowering fn {} as @{}", name, unique_name);
/// // Output: debug: lowering fn add as @add
/// ```
#[macro_export]
macro_rules! log_dbg {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_debug($config) {
      eprintln!("debug: {}", format!($fmt $(, $arg)*));
    }
  }};
}

/// Log a trace message (verbosity >= 3).
///
/// # Examples
///
/// ```ignore
/// log_trc!(&config, "verified {} routine(s)", count);
/// // Output: trace: verified 3 routine(s)
/// ```
#[macro_export]
macro_rules! log_trc {
  ($config:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
    if $crate::log_trace($config) {
      eprintln!("trace: {}", format!($fmt $(, $arg)*));
    }
  }};
}
