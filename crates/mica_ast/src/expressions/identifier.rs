use serde::{Deserialize, Serialize};

/// A bare name: variable, function or type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ASTIdentifier {
  pub name: String,
}

impl ASTIdentifier {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

impl From<&str> for ASTIdentifier {
  fn from(value: &str) -> Self {
    Self::new(value)
  }
}
