#![allow(dead_code)]

use mica_ast::{expressions::ASTExpression, statements::ASTStatement, ASTBinaryOperator, ASTBlock, ASTVariable};
use mica_codegen::{lower_program, CodegenOptions, CodegenOutput};
use mica_config::MicaConfig;
use mica_ir::{FunctionIr, Instr};

pub fn lower(statements: Vec<ASTStatement>) -> CodegenOutput {
  lower_with(CodegenOptions::default(), statements)
}

/// Lowers without the host imports so dumps only show user routines.
pub fn lower_plain(statements: Vec<ASTStatement>) -> CodegenOutput {
  lower_with(CodegenOptions { host_imports: false }, statements)
}

fn lower_with(
  options: CodegenOptions,
  statements: Vec<ASTStatement>,
) -> CodegenOutput {
  lower_program(&MicaConfig::silent(), options, "test", &ASTBlock::new(statements))
}

pub fn messages(output: &CodegenOutput) -> Vec<String> {
  output.diagnostics.iter().map(|d| d.to_string()).collect()
}

pub fn function<'a>(
  output: &'a CodegenOutput,
  name: &str,
) -> &'a FunctionIr {
  output
    .module
    .function_named(name)
    .unwrap_or_else(|| panic!("no routine named {}", name))
}

pub fn entry_instructions<'a>(
  output: &'a CodegenOutput,
  name: &str,
) -> &'a [Instr] {
  &function(output, name).blocks.get_all()[0].instructions
}

pub fn int(value: i64) -> ASTExpression {
  ASTExpression::Integer(value)
}

pub fn ident(name: &str) -> ASTExpression {
  ASTExpression::identifier(name)
}

pub fn bin(
  left: ASTExpression,
  operator: ASTBinaryOperator,
  right: ASTExpression,
) -> ASTExpression {
  ASTExpression::binary(left, operator, right)
}

pub fn expr(expression: ASTExpression) -> ASTStatement {
  ASTStatement::expression(expression)
}

pub fn var(
  type_: &str,
  name: &str,
  value: Option<ASTExpression>,
) -> ASTStatement {
  ASTStatement::variable(type_, name, value)
}

pub fn param(
  type_: &str,
  name: &str,
) -> ASTVariable {
  ASTVariable::new(type_, name, None)
}

pub fn func(
  return_type: &str,
  name: &str,
  params: Vec<ASTVariable>,
  body: Vec<ASTStatement>,
) -> ASTStatement {
  ASTStatement::function(return_type, name, params, ASTBlock::new(body))
}
