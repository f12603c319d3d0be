use serde::{Deserialize, Serialize};

use super::{ASTExpression, identifier::ASTIdentifier};

/// `target = value`, itself an expression producing the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTAssignment {
  pub target: ASTIdentifier,
  pub value: Box<ASTExpression>,
}

impl ASTAssignment {
  pub fn new(
    target: ASTIdentifier,
    value: ASTExpression,
  ) -> Self {
    Self {
      target,
      value: Box::new(value),
    }
  }
}
