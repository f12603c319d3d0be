use mica_config::{DebugTrace, MicaConfig};
use mica_diagnostics::{diagnostic_report::Diagnostic, message::DiagnosticMessage};
use mica_ir::{host, InsertionPoint, LocalId, Module, ModuleBuilder};
use mica_log::trace_dbg;

use crate::scope::{ScopeFrame, ScopeStack};

#[derive(Debug, Clone, Copy)]
pub struct CodegenOptions {
  /// Pre-declare `print_int` and `print_double`.
  pub host_imports: bool,
}

impl Default for CodegenOptions {
  fn default() -> Self {
    Self { host_imports: true }
  }
}

impl CodegenOptions {
  pub fn from_config(config: &MicaConfig) -> Self {
    Self {
      host_imports: config.host_imports,
    }
  }
}

/// Result of lowering one program.
#[derive(Debug)]
pub struct CodegenOutput {
  pub module: Module,
  pub diagnostics: Vec<Diagnostic>,
}

impl CodegenOutput {
  pub fn has_errors(&self) -> bool {
    self.diagnostics.iter().any(Diagnostic::is_error)
  }
}

/// State of one compilation: the module under construction, the insertion
/// cursor (inside the builder), the scope stack and the diagnostics so far.
pub struct TranslationContext<'a> {
  pub(crate) config: &'a MicaConfig,
  pub(crate) builder: ModuleBuilder,
  scopes: ScopeStack,
  diagnostics: Vec<Diagnostic>,
}

impl<'a> TranslationContext<'a> {
  pub fn new(
    config: &'a MicaConfig,
    module_name: &str,
    options: CodegenOptions,
  ) -> Self {
    let mut builder = ModuleBuilder::new(module_name);

    if options.host_imports {
      host::declare_host_imports(&mut builder);
    }

    Self {
      config,
      builder,
      scopes: ScopeStack::new(),
      diagnostics: Vec::new(),
    }
  }

  pub fn builder(&self) -> &ModuleBuilder {
    &self.builder
  }

  pub fn diagnostics(&self) -> &[Diagnostic] {
    &self.diagnostics
  }

  pub fn finish(self) -> CodegenOutput {
    CodegenOutput {
      module: self.builder.finish(),
      diagnostics: self.diagnostics,
    }
  }

  pub(crate) fn report(
    &mut self,
    message: DiagnosticMessage,
  ) {
    trace_dbg!(self.config, DebugTrace::Codegen, "{}", message);
    self.diagnostics.push(message.report());
  }

  /// Opens a frame for `point` and moves the cursor there.
  pub fn push_scope(
    &mut self,
    point: InsertionPoint,
  ) {
    self.scopes.push(point);
    self.builder.set_insertion_point(point);
    trace_dbg!(self.config, DebugTrace::Scope, "push frame #{}", self.scopes.depth());
  }

  /// Closes the top frame. The cursor goes back to where the enclosing frame
  /// was inserting.
  pub fn pop_scope(&mut self) {
    let depth = self.scopes.depth();

    match self.scopes.pop().map(|frame| frame.insertion_point) {
      Some(point) => self.builder.set_insertion_point(point),
      None => self.builder.clear_insertion_point(),
    }

    trace_dbg!(self.config, DebugTrace::Scope, "pop frame #{}", depth);
  }

  pub fn current_frame(&self) -> Option<&ScopeFrame> {
    self.scopes.current()
  }

  pub fn scope_depth(&self) -> usize {
    self.scopes.depth()
  }

  pub(crate) fn bind(
    &mut self,
    name: &str,
    local: LocalId,
  ) {
    if let Some(frame) = self.scopes.current_mut() {
      frame.bind(name, local);
      trace_dbg!(self.config, DebugTrace::Scope, "bind {} -> %{}", name, local.index());
    }
  }

  /// Resolves `name` in the top frame, reporting `NameError` when unbound.
  pub(crate) fn resolve_local(
    &mut self,
    name: &str,
  ) -> Option<LocalId> {
    let local = self.scopes.lookup(name);

    if local.is_none() {
      self.report(DiagnosticMessage::NameError(name.to_string()));
    }

    local
  }
}
