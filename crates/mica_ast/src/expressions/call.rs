use serde::{Deserialize, Serialize};

use super::{ASTExpression, identifier::ASTIdentifier};

/// Call expression: `callee(arg1, arg2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTCall {
  pub callee: ASTIdentifier,
  pub arguments: Vec<ASTExpression>,
}

impl ASTCall {
  pub fn new(
    callee: ASTIdentifier,
    arguments: Vec<ASTExpression>,
  ) -> Self {
    Self { callee, arguments }
  }
}
