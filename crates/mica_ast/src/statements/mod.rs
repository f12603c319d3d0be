pub mod block;
pub mod function;
pub mod variable;

use serde::{Deserialize, Serialize};

use crate::expressions::ASTExpression;

use self::{block::ASTBlock, function::ASTFunction, variable::ASTVariable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ASTStatement {
  /// Expression evaluated for its effect.
  Expression(ASTExpression),
  Variable(ASTVariable),
  Function(ASTFunction),
}

impl ASTStatement {
  pub fn expression(expression: ASTExpression) -> Self {
    ASTStatement::Expression(expression)
  }

  pub fn variable(
    type_: &str,
    name: &str,
    value: Option<ASTExpression>,
  ) -> Self {
    ASTStatement::Variable(ASTVariable::new(type_, name, value))
  }

  pub fn function(
    return_type: &str,
    name: &str,
    parameters: Vec<ASTVariable>,
    body: ASTBlock,
  ) -> Self {
    ASTStatement::Function(ASTFunction::new(return_type, name, parameters, body))
  }
}
