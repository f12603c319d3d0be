use mica_ast::{
  expressions::ASTExpression, ASTAssignment, ASTBinary, ASTBinaryOperator, ASTBlock, ASTCall, ASTIdentifier,
};
use mica_config::DebugTrace;
use mica_diagnostics::message::DiagnosticMessage;
use mica_ir::{BinaryOp, ConstValue, Operand};
use mica_log::trace_dbg;

use crate::context::TranslationContext;

impl TranslationContext<'_> {
  pub fn lower_expression(
    &mut self,
    expression: &ASTExpression,
  ) -> Option<Operand> {
    match expression {
      ASTExpression::Integer(value) => Some(Operand::Const(ConstValue::Int(*value))),
      ASTExpression::Double(value) => Some(Operand::Const(ConstValue::Float(*value))),
      ASTExpression::Identifier(identifier) => self.lower_identifier(identifier),
      ASTExpression::Call(call) => self.lower_call(call),
      ASTExpression::Binary(binary) => self.lower_binary(binary),
      ASTExpression::Assignment(assignment) => self.lower_assignment(assignment),
      ASTExpression::Block(block) => self.lower_block(block),
    }
  }

  fn lower_identifier(
    &mut self,
    identifier: &ASTIdentifier,
  ) -> Option<Operand> {
    let local = self.resolve_local(&identifier.name)?;
    Some(self.builder.build_load(local))
  }

  /// Callees come from the module's function table, not from the scope stack.
  /// Arguments that lower to null are left out of the call.
  fn lower_call(
    &mut self,
    call: &ASTCall,
  ) -> Option<Operand> {
    let Some(callee) = self.builder.get_function(&call.callee.name) else {
      self.report(DiagnosticMessage::UndefinedFunction(call.callee.name.clone()));
      return None;
    };

    let args: Vec<Operand> = call
      .arguments
      .iter()
      .filter_map(|argument| self.lower_expression(argument))
      .collect();

    trace_dbg!(
      self.config,
      DebugTrace::Codegen,
      "call {} with {} argument(s)",
      call.callee.name,
      args.len()
    );

    Some(self.builder.build_call(callee, args))
  }

  /// Left operand first, then right.
  fn lower_binary(
    &mut self,
    binary: &ASTBinary,
  ) -> Option<Operand> {
    let left = self.lower_expression(&binary.left);
    let right = self.lower_expression(&binary.right);
    let (left, right) = (left?, right?);

    let op = match binary.operator {
      ASTBinaryOperator::Add => BinaryOp::Add,
      ASTBinaryOperator::Subtract => BinaryOp::Sub,
      ASTBinaryOperator::Multiply => BinaryOp::Mul,
      ASTBinaryOperator::Divide => BinaryOp::SDiv,
      other => {
        self.report(DiagnosticMessage::UnsupportedOperator(other.symbol().to_string()));
        return None;
      },
    };

    Some(self.builder.build_binop(op, left, right))
  }

  fn lower_assignment(
    &mut self,
    assignment: &ASTAssignment,
  ) -> Option<Operand> {
    self.lower_store(&assignment.target, &assignment.value)
  }

  /// Value first, then the target. Yields the stored value.
  pub(crate) fn lower_store(
    &mut self,
    target: &ASTIdentifier,
    value: &ASTExpression,
  ) -> Option<Operand> {
    let value = self.lower_expression(value)?;
    let local = self.resolve_local(&target.name)?;

    self.builder.build_store(local, value.clone());
    Some(value)
  }

  /// The value of a block is the value of its last statement.
  pub fn lower_block(
    &mut self,
    block: &ASTBlock,
  ) -> Option<Operand> {
    let mut last = None;

    for statement in &block.statements {
      last = self.lower_statement(statement);
    }

    last
  }
}
