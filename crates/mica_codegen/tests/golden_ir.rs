mod common;

use common::{bin, expr, func, ident, int, param, var};
use insta::assert_snapshot;
use mica_ast::{expressions::ASTExpression, ASTBinaryOperator};
use mica_ir::print_module;

#[test]
fn ir_arithmetic_on_locals() {
  let output = common::lower_plain(vec![
    var("int", "x", Some(int(2))),
    var("int", "y", Some(int(3))),
    var(
      "int",
      "z",
      Some(bin(
        ident("x"),
        ASTBinaryOperator::Add,
        bin(ident("y"), ASTBinaryOperator::Multiply, int(2)),
      )),
    ),
  ]);

  assert!(output.diagnostics.is_empty());
  assert_snapshot!(print_module(&output.module), @r"
=== IR: test ===

Entry: main

fn main(): void {
  locals:
    %0: i64 = x
    %1: i64 = y
    %2: i64 = z

  entry_0:
    store %0, 2
    store %1, 3
    t0 = load %0 : i64
    t1 = load %1 : i64
    t2 = mul t1, 2 : i64
    t3 = add t0, t2 : i64
    store %2, t3
    ret
}
");
}

#[test]
fn ir_function_with_parameters() {
  let output = common::lower_plain(vec![
    func(
      "int",
      "add",
      vec![param("int", "a"), param("int", "b")],
      vec![expr(ASTExpression::assign(
        "a",
        bin(ident("a"), ASTBinaryOperator::Add, ident("b")),
      ))],
    ),
    var("int", "r", Some(ASTExpression::call("add", vec![int(2), int(3)]))),
  ]);

  assert!(output.diagnostics.is_empty());
  assert_snapshot!(print_module(&output.module), @r"
=== IR: test ===

Entry: main

fn main(): void {
  locals:
    %0: i64 = r

  entry_0:
    t0 = call @add(2, 3) : i64
    store %0, t0
    ret
}

fn add(a: i64, b: i64): i64 {
  locals:
    %0: i64 = a
    %1: i64 = b

  entry_0:
    store %0, t0
    store %1, t1
    t2 = load %0 : i64
    t3 = load %1 : i64
    t4 = add t2, t3 : i64
    store %0, t4
    ret
}
");
}

#[test]
fn ir_host_imports() {
  let output = common::lower(vec![
    expr(ASTExpression::call("print_int", vec![int(7)])),
    expr(ASTExpression::call("print_double", vec![ASTExpression::Double(2.5)])),
  ]);

  assert_snapshot!(print_module(&output.module), @r"
=== IR: test ===

Entry: main

fn print_int(value: i64): void [import]

fn print_double(value: f64): void [import]

fn main(): void {

  entry_0:
    t0 = call @print_int(7) : void
    t1 = call @print_double(2.5) : void
    ret
}
");
}
