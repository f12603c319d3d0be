#![allow(dead_code)]

use mica_ast::{expressions::ASTExpression, statements::ASTStatement, ASTBinaryOperator, ASTBlock, ASTVariable};
use mica_backend::GenericValue;
use mica_config::{BackendKind, MicaConfig};
use mica_driver::{compile, execute, Compilation, DriverError};

pub struct RunResult {
  pub compilation: Compilation,
  pub result: Result<GenericValue, DriverError>,
  pub stdout: String,
}

impl RunResult {
  pub fn messages(&self) -> Vec<String> {
    self.compilation.diagnostics.iter().map(|d| d.to_string()).collect()
  }
}

pub fn run(statements: Vec<ASTStatement>) -> RunResult {
  run_with(&MicaConfig::silent(), statements)
}

pub fn run_with(
  config: &MicaConfig,
  statements: Vec<ASTStatement>,
) -> RunResult {
  let compilation = compile(config, "test", &ASTBlock::new(statements));
  let mut out = Vec::new();
  let result = execute(config, &compilation, &mut out);

  RunResult {
    compilation,
    result,
    stdout: String::from_utf8(out).unwrap(),
  }
}

/// Backends compiled into this build.
pub fn backends() -> Vec<BackendKind> {
  let mut kinds = vec![BackendKind::Interpreter];

  if cfg!(feature = "jit") {
    kinds.push(BackendKind::Jit);
  }

  kinds
}

/// Runs the same program once per available backend.
pub fn run_each(statements: Vec<ASTStatement>) -> Vec<(BackendKind, RunResult)> {
  backends()
    .into_iter()
    .map(|backend| {
      let mut config = MicaConfig::silent();
      config.run_config.backend = backend;
      (backend, run_with(&config, statements.clone()))
    })
    .collect()
}

pub fn demo_path(name: &str) -> String {
  format!("{}/../../demos/{}", env!("CARGO_MANIFEST_DIR"), name)
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

pub fn print_int(value: ASTExpression) -> ASTStatement {
  expr(ASTExpression::call("print_int", vec![value]))
}

pub fn print_double(value: ASTExpression) -> ASTStatement {
  expr(ASTExpression::call("print_double", vec![value]))
}
