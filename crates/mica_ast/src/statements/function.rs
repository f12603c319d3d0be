use serde::{Deserialize, Serialize};

use super::{block::ASTBlock, variable::ASTVariable};
use crate::expressions::identifier::ASTIdentifier;

/// `return_type name(parameters) { body }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTFunction {
  pub return_type: ASTIdentifier,
  pub name: ASTIdentifier,
  #[serde(default)]
  pub parameters: Vec<ASTVariable>,
  pub body: ASTBlock,
}

impl ASTFunction {
  pub fn new(
    return_type: &str,
    name: &str,
    parameters: Vec<ASTVariable>,
    body: ASTBlock,
  ) -> Self {
    Self {
      return_type: ASTIdentifier::new(return_type),
      name: ASTIdentifier::new(name),
      parameters,
      body,
    }
  }
}
