mod expression;
mod function;
mod statement;

use mica_ast::{ASTBlock, ASTNode};
use mica_config::MicaConfig;
use mica_ir::Operand;

use crate::context::{CodegenOptions, CodegenOutput, TranslationContext};

/// Name of the routine synthesized around the program's top-level statements.
pub const ENTRY_ROUTINE: &str = "main";

impl TranslationContext<'_> {
  /// Lowers one node at the cursor. `None` is the null value: either the node
  /// produces nothing or an error was reported for it.
  pub fn lower_node(
    &mut self,
    node: &ASTNode,
  ) -> Option<Operand> {
    match node {
      ASTNode::Expression(expression) => self.lower_expression(expression),
      ASTNode::Statement(statement) => self.lower_statement(statement),
    }
  }
}

/// Lowers a whole program into a module whose entry point is `main`.
pub fn lower_program(
  config: &MicaConfig,
  options: CodegenOptions,
  module_name: &str,
  program: &ASTBlock,
) -> CodegenOutput {
  let mut ctx = TranslationContext::new(config, module_name, options);
  ctx.lower_entry_routine(program);
  ctx.finish()
}
