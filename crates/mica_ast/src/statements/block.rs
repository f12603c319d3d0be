use serde::{Deserialize, Serialize};

use super::ASTStatement;

/// Sequence of statements. The program root is a block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ASTBlock {
  #[serde(default)]
  pub statements: Vec<ASTStatement>,
}

impl ASTBlock {
  pub fn new(statements: Vec<ASTStatement>) -> Self {
    Self { statements }
  }

  pub fn is_empty(&self) -> bool {
    self.statements.is_empty()
  }
}
