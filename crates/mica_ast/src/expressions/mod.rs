pub mod assignment;
pub mod binary;
pub mod call;
pub mod identifier;

use serde::{Deserialize, Serialize};

use crate::statements::block::ASTBlock;

use self::{
  assignment::ASTAssignment,
  binary::{ASTBinary, ASTBinaryOperator},
  call::ASTCall,
  identifier::ASTIdentifier,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ASTExpression {
  Integer(i64),
  Double(f64),
  Identifier(ASTIdentifier),
  Call(ASTCall),
  Binary(ASTBinary),
  Assignment(ASTAssignment),
  /// A block used as an expression; its value is the last statement's value.
  Block(ASTBlock),
}

impl ASTExpression {
  pub fn identifier(name: &str) -> Self {
    ASTExpression::Identifier(ASTIdentifier::new(name))
  }

  pub fn call(
    callee: &str,
    arguments: Vec<ASTExpression>,
  ) -> Self {
    ASTExpression::Call(ASTCall::new(ASTIdentifier::new(callee), arguments))
  }

  pub fn binary(
    left: ASTExpression,
    operator: ASTBinaryOperator,
    right: ASTExpression,
  ) -> Self {
    ASTExpression::Binary(ASTBinary::new(left, operator, right))
  }

  pub fn assign(
    target: &str,
    value: ASTExpression,
  ) -> Self {
    ASTExpression::Assignment(ASTAssignment::new(ASTIdentifier::new(target), value))
  }
}
