mod common;

use insta::assert_snapshot;
use mica_ir::{print_module, BinaryOp, Type};

#[test]
fn ir_calls_and_locals() {
  let module = common::add_module().finish();

  assert_snapshot!(print_module(&module), @r"
=== IR: demo ===

Entry: main

fn print_int(value: i64): void [import]

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

fn main(): void {

  entry_0:
    t0 = call @add(2, 3) : i64
    t1 = call @print_int(t0) : void
    ret
}
");
}

#[test]
fn ir_double_arithmetic() {
  let mut builder = mica_ir::ModuleBuilder::new("doubles");
  let (main, _) = common::begin_function(&mut builder, "main", Vec::new(), Type::Void);
  let x = builder.alloc_local(Type::F64, "x");
  let quotient = builder.build_binop(BinaryOp::SDiv, common::double(1.5), common::double(0.5));
  builder.build_store(x, quotient);
  builder.build_return(None);
  builder.set_entry_point(main);

  assert_snapshot!(print_module(&builder.finish()), @r"
=== IR: doubles ===

Entry: main

fn main(): void {
  locals:
    %0: f64 = x

  entry_0:
    t0 = sdiv 1.5, 0.5 : f64
    store %0, t0
    ret
}
");
}

#[test]
fn ir_unterminated_block() {
  let mut builder = mica_ir::ModuleBuilder::new("open");
  common::begin_function(&mut builder, "main", Vec::new(), Type::Void);

  assert_snapshot!(print_module(&builder.finish()), @r"
=== IR: open ===

fn main(): void {

  entry_0:
    unreachable
}
");
}
