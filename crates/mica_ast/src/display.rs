use std::fmt::{self, Display, Formatter};

use crate::{
  expressions::ASTExpression,
  statements::{ASTStatement, block::ASTBlock, variable::ASTVariable},
};

/// Renders a program back in surface syntax, used by `--dump ast`.
pub fn format_program(program: &ASTBlock) -> String {
  let mut output = String::new();

  for statement in &program.statements {
    write_statement(&mut output, statement, 0);
  }

  output
}

fn write_statement(
  output: &mut String,
  statement: &ASTStatement,
  indent: usize,
) {
  let pad = "  ".repeat(indent);

  match statement {
    ASTStatement::Expression(ASTExpression::Block(block)) => {
      output.push_str(&format!("{}{{\n", pad));
      for inner in &block.statements {
        write_statement(output, inner, indent + 1);
      }
      output.push_str(&format!("{}}}\n", pad));
    },
    ASTStatement::Expression(expression) => {
      output.push_str(&format!("{}{};\n", pad, expression));
    },
    ASTStatement::Variable(variable) => {
      output.push_str(&format!("{}{};\n", pad, variable));
    },
    ASTStatement::Function(function) => {
      let parameters = function
        .parameters
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<String>>()
        .join(", ");

      output.push_str(&format!(
        "{}{} {}({}) {{\n",
        pad, function.return_type.name, function.name.name, parameters
      ));
      for inner in &function.body.statements {
        write_statement(output, inner, indent + 1);
      }
      output.push_str(&format!("{}}}\n", pad));
    },
  }
}

impl Display for ASTVariable {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match &self.value {
      Some(value) => write!(f, "{} {} = {}", self.type_.name, self.name.name, value),
      None => write!(f, "{} {}", self.type_.name, self.name.name),
    }
  }
}

impl Display for ASTExpression {
  fn fmt(
    &self,
    f: &mut Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ASTExpression::Integer(value) => write!(f, "{}", value),
      ASTExpression::Double(value) => write!(f, "{:?}", value),
      ASTExpression::Identifier(identifier) => write!(f, "{}", identifier.name),
      ASTExpression::Call(call) => {
        let arguments = call
          .arguments
          .iter()
          .map(|a| a.to_string())
          .collect::<Vec<String>>()
          .join(", ");

        write!(f, "{}({})", call.callee.name, arguments)
      },
      ASTExpression::Binary(binary) => {
        write!(f, "({} {} {})", binary.left, binary.operator.symbol(), binary.right)
      },
      ASTExpression::Assignment(assignment) => write!(f, "{} = {}", assignment.target.name, assignment.value),
      ASTExpression::Block(block) => {
        let statements = block.statements.len();
        write!(f, "{{ {} statement(s) }}", statements)
      },
    }
  }
}
