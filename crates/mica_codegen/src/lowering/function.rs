use mica_ast::{ASTBlock, ASTFunction};
use mica_config::DebugTrace;
use mica_ir::{Operand, ParamData, Type};
use mica_log::{log_dbg, trace_dbg};

use super::ENTRY_ROUTINE;
use crate::context::TranslationContext;

impl TranslationContext<'_> {
  /// Registers the routine, binds each parameter to a fresh local holding the
  /// incoming value and lowers the body. The routine always ends in `ret`
  /// without a value, whatever its declared return type.
  pub fn lower_function(
    &mut self,
    function: &ASTFunction,
  ) -> Option<Operand> {
    let params: Vec<ParamData> = function
      .parameters
      .iter()
      .map(|param| ParamData {
        name: param.name.name.clone(),
        ty: self.resolve_type(&param.type_),
      })
      .collect();
    let return_type = self.resolve_type(&function.return_type);

    let id = self.builder.declare_function(&function.name.name, params.clone(), return_type);
    log_dbg!(
      self.config,
      "lowering fn {} as @{}",
      function.name.name,
      self.builder.module().function(id).name
    );

    let entry = self.builder.append_block(id, "entry");
    self.push_scope(entry);

    for (index, param) in params.iter().enumerate() {
      let local = self.builder.alloc_local(param.ty, &param.name);

      if let Some(incoming) = self.builder.param(index) {
        self.builder.build_store(local, incoming);
      }

      self.bind(&param.name, local);
    }

    self.lower_block(&function.body);
    self.builder.build_return(None);
    self.pop_scope();

    Some(Operand::Function(id))
  }

  /// Wraps the top-level statements in `main() -> void` and makes it the
  /// entry point.
  pub(crate) fn lower_entry_routine(
    &mut self,
    program: &ASTBlock,
  ) {
    let main = self.builder.declare_function(ENTRY_ROUTINE, Vec::new(), Type::Void);
    self.builder.set_entry_point(main);

    let entry = self.builder.append_block(main, "entry");
    self.push_scope(entry);

    trace_dbg!(
      self.config,
      DebugTrace::Codegen,
      "lowering {} top-level statement(s)",
      program.statements.len()
    );

    self.lower_block(program);
    self.builder.build_return(None);
    self.pop_scope();
  }
}
