use serde::{Deserialize, Serialize};

use super::ASTExpression;

/// Operator tags the parser can produce. The code generator only has
/// instructions for the four arithmetic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ASTBinaryOperator {
  Add,
  Subtract,
  Multiply,
  Divide,
  Modulo,
  Equal,
  NotEqual,
  LessThan,
  LessThanOrEqual,
  GreaterThan,
  GreaterThanOrEqual,
}

impl ASTBinaryOperator {
  pub fn symbol(&self) -> &'static str {
    match self {
      ASTBinaryOperator::Add => "+",
      ASTBinaryOperator::Subtract => "-",
      ASTBinaryOperator::Multiply => "*",
      ASTBinaryOperator::Divide => "/",
      ASTBinaryOperator::Modulo => "%",
      ASTBinaryOperator::Equal => "==",
      ASTBinaryOperator::NotEqual => "!=",
      ASTBinaryOperator::LessThan => "<",
      ASTBinaryOperator::LessThanOrEqual => "<=",
      ASTBinaryOperator::GreaterThan => ">",
      ASTBinaryOperator::GreaterThanOrEqual => ">=",
    }
  }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ASTBinary {
  pub left: Box<ASTExpression>,
  pub operator: ASTBinaryOperator,
  pub right: Box<ASTExpression>,
}

impl ASTBinary {
  pub fn new(
    left: ASTExpression,
    operator: ASTBinaryOperator,
    right: ASTExpression,
  ) -> Self {
    Self {
      left: Box::new(left),
      operator,
      right: Box::new(right),
    }
  }
}
