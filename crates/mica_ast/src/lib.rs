//! Syntax tree handed to the code generator by the parser.
//!
//! The tree is a closed set of node kinds. The parser builds and owns it; the
//! code generator only borrows it. Trees can be exchanged as JSON, which is how
//! an external parser feeds the `mica` binary.

pub mod display;
pub mod expressions;
pub mod statements;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;
use crate::statements::ASTStatement;

pub use expressions::{
  assignment::ASTAssignment,
  binary::{ASTBinary, ASTBinaryOperator},
  call::ASTCall,
  identifier::ASTIdentifier,
};
pub use statements::{block::ASTBlock, function::ASTFunction, variable::ASTVariable};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum ASTNode {
  Expression(ASTExpression),
  Statement(ASTStatement),
}

impl From<ASTExpression> for ASTNode {
  fn from(value: ASTExpression) -> Self {
    ASTNode::Expression(value)
  }
}

impl From<ASTStatement> for ASTNode {
  fn from(value: ASTStatement) -> Self {
    ASTNode::Statement(value)
  }
}

#[derive(Debug)]
pub struct ASTReadError(pub String);

impl fmt::Display for ASTReadError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "invalid syntax tree: {}", self.0)
  }
}

impl std::error::Error for ASTReadError {}

/// Decodes a program root from its JSON form.
pub fn program_from_json(text: &str) -> Result<ASTBlock, ASTReadError> {
  serde_json::from_str(text).map_err(|e| ASTReadError(e.to_string()))
}

pub fn program_to_json(program: &ASTBlock) -> String {
  serde_json::to_string_pretty(program).unwrap_or_default()
}
