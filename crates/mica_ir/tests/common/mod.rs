#![allow(dead_code)]

use mica_ir::{ConstValue, FunctionId, InsertionPoint, ModuleBuilder, Operand, ParamData, Type};

pub fn param(
  name: &str,
  ty: Type,
) -> ParamData {
  ParamData {
    name: name.to_string(),
    ty,
  }
}

pub fn int(value: i64) -> Operand {
  Operand::Const(ConstValue::Int(value))
}

pub fn double(value: f64) -> Operand {
  Operand::Const(ConstValue::Float(value))
}

/// Declares `name` and moves the cursor into a fresh entry block.
pub fn begin_function(
  builder: &mut ModuleBuilder,
  name: &str,
  params: Vec<ParamData>,
  return_type: Type,
) -> (FunctionId, InsertionPoint) {
  let id = builder.declare_function(name, params, return_type);
  let entry = builder.append_block(id, "entry");
  builder.set_insertion_point(entry);
  (id, entry)
}

/// `add(a, b)` stores `a + b` back into `a`; `main` prints `add(2, 3)`.
pub fn add_module() -> ModuleBuilder {
  let mut builder = ModuleBuilder::new("demo");
  let print_int = builder.declare_import("print_int", vec![param("value", Type::I64)], Type::Void);

  let (add, _) = begin_function(
    &mut builder,
    "add",
    vec![param("a", Type::I64), param("b", Type::I64)],
    Type::I64,
  );
  let a = builder.alloc_local(Type::I64, "a");
  let incoming_a = builder.param(0).unwrap();
  builder.build_store(a, incoming_a);
  let b = builder.alloc_local(Type::I64, "b");
  let incoming_b = builder.param(1).unwrap();
  builder.build_store(b, incoming_b);
  let left = builder.build_load(a);
  let right = builder.build_load(b);
  let sum = builder.build_binop(mica_ir::BinaryOp::Add, left, right);
  builder.build_store(a, sum);
  builder.build_return(None);

  let (main, _) = begin_function(&mut builder, "main", Vec::new(), Type::Void);
  let result = builder.build_call(add, vec![int(2), int(3)]);
  builder.build_call(print_int, vec![result]);
  builder.build_return(None);
  builder.set_entry_point(main);

  builder
}
