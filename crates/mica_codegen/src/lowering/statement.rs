use mica_ast::{statements::ASTStatement, ASTIdentifier, ASTVariable};
use mica_diagnostics::message::DiagnosticMessage;
use mica_ir::{Operand, Type};

use crate::context::TranslationContext;

impl TranslationContext<'_> {
  pub fn lower_statement(
    &mut self,
    statement: &ASTStatement,
  ) -> Option<Operand> {
    match statement {
      ASTStatement::Expression(expression) => self.lower_expression(expression),
      ASTStatement::Variable(variable) => self.lower_variable(variable),
      ASTStatement::Function(function) => self.lower_function(function),
    }
  }

  /// `int` and `double` are the only type names. Anything else is reported
  /// and becomes `void`.
  pub(crate) fn resolve_type(
    &mut self,
    name: &ASTIdentifier,
  ) -> Type {
    match name.name.as_str() {
      "int" => Type::I64,
      "double" => Type::F64,
      other => {
        self.report(DiagnosticMessage::UnknownType(other.to_string()));
        Type::Void
      },
    }
  }

  /// Allocates and binds the slot, then stores the initializer if present.
  /// Yields the storage handle.
  fn lower_variable(
    &mut self,
    variable: &ASTVariable,
  ) -> Option<Operand> {
    let ty = self.resolve_type(&variable.type_);
    let local = self.builder.alloc_local(ty, &variable.name.name);
    self.bind(&variable.name.name, local);

    if let Some(value) = &variable.value {
      self.lower_store(&variable.name, value);
    }

    Some(Operand::Local(local))
  }
}
