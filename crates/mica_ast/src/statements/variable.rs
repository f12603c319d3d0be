use serde::{Deserialize, Serialize};

use crate::expressions::{ASTExpression, identifier::ASTIdentifier};

/// `type_ name [= value]`. Also used for function parameters, where `value`
/// is always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ASTVariable {
  pub type_: ASTIdentifier,
  pub name: ASTIdentifier,
  #[serde(default)]
  pub value: Option<Box<ASTExpression>>,
}

impl ASTVariable {
  pub fn new(
    type_: &str,
    name: &str,
    value: Option<ASTExpression>,
  ) -> Self {
    Self {
      type_: ASTIdentifier::new(type_),
      name: ASTIdentifier::new(name),
      value: value.map(Box::new),
    }
  }
}
