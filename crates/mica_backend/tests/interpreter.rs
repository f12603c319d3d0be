mod common;

use common::{begin, double, int, interpret, param};
use mica_backend::{backend_for, ExecutionError, GenericValue, Interpreter};
use mica_config::{BackendKind, MicaConfig};
use mica_ir::{host, BinaryOp, ModuleBuilder, Type};

#[test]
fn void_entry_returns_unit() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_return(None);
  builder.set_entry_point(main);

  let (result, output) = interpret(builder);

  assert_eq!(result, Ok(GenericValue::Unit));
  assert!(output.is_empty());
}

#[test]
fn entry_can_return_a_value() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::I64);
  let x = builder.alloc_local(Type::I64, "x");
  builder.build_store(x, int(i64::MAX));
  let loaded = builder.build_load(x);
  builder.build_return(Some(loaded));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Int(i64::MAX)));
}

#[test]
fn host_imports_write_to_the_output() {
  let mut builder = ModuleBuilder::new("t");
  host::declare_host_imports(&mut builder);
  let print_int = builder.get_function(host::PRINT_INT).unwrap();
  let print_double = builder.get_function(host::PRINT_DOUBLE).unwrap();

  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  let sum = builder.build_binop(BinaryOp::Add, int(40), int(2));
  builder.build_call(print_int, vec![sum]);
  let half = builder.build_binop(BinaryOp::SDiv, double(1.0), double(4.0));
  builder.build_call(print_double, vec![half]);
  builder.build_return(None);
  builder.set_entry_point(main);

  let (result, output) = interpret(builder);

  assert_eq!(result, Ok(GenericValue::Unit));
  assert_eq!(output, "42\n0.25\n");
}

#[test]
fn locals_start_at_zero_on_every_call() {
  let mut builder = ModuleBuilder::new("t");
  host::declare_host_imports(&mut builder);
  let print_int = builder.get_function(host::PRINT_INT).unwrap();

  // bump(): counter = counter + 1; print_int(counter)
  let bump = begin(&mut builder, "bump", Vec::new(), Type::Void);
  let counter = builder.alloc_local(Type::I64, "counter");
  let current = builder.build_load(counter);
  let next = builder.build_binop(BinaryOp::Add, current, int(1));
  builder.build_store(counter, next.clone());
  builder.build_call(print_int, vec![next]);
  builder.build_return(None);

  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_call(bump, Vec::new());
  builder.build_call(bump, Vec::new());
  builder.build_return(None);
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).1, "1\n1\n");
}

#[test]
fn missing_return_value_yields_zero() {
  let mut builder = ModuleBuilder::new("t");
  let seven = begin(&mut builder, "seven", vec![param("x", Type::F64)], Type::F64);
  builder.build_return(None);

  let main = begin(&mut builder, "main", Vec::new(), Type::F64);
  let result = builder.build_call(seven, vec![double(7.0)]);
  builder.build_return(Some(result));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Double(0.0)));
}

#[test]
fn integer_arithmetic_wraps() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::I64);
  let result = builder.build_binop(BinaryOp::Mul, int(i64::MAX), int(2));
  builder.build_return(Some(result));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Int(-2)));
}

#[test]
fn integer_division_truncates_toward_zero() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::I64);
  let result = builder.build_binop(BinaryOp::SDiv, int(-7), int(2));
  builder.build_return(Some(result));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Int(-3)));
}

#[test]
fn integer_division_by_zero_is_an_error() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_binop(BinaryOp::SDiv, int(1), int(0));
  builder.build_return(None);
  builder.set_entry_point(main);

  assert_eq!(
    interpret(builder).0,
    Err(ExecutionError::DivisionByZero {
      function: "main".to_string()
    })
  );
}

#[test]
fn double_division_by_zero_is_infinite() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::F64);
  let result = builder.build_binop(BinaryOp::SDiv, double(1.0), double(0.0));
  builder.build_return(Some(result));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Double(f64::INFINITY)));
}

#[test]
fn unbounded_recursion_hits_the_depth_limit() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_call(main, Vec::new());
  builder.build_return(None);
  builder.set_entry_point(main);

  let mut interpreter = Interpreter::new(&MicaConfig::silent()).with_max_call_depth(16);
  let (result, _) = common::run_with(&mut interpreter, builder);

  assert_eq!(result, Err(ExecutionError::CallDepthExceeded { limit: 16 }));
}

#[test]
fn deep_recursion_does_not_use_the_native_stack() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_call(main, Vec::new());
  builder.build_return(None);
  builder.set_entry_point(main);

  let mut interpreter = Interpreter::new(&MicaConfig::silent()).with_max_call_depth(200_000);
  let (result, _) = common::run_with(&mut interpreter, builder);

  assert_eq!(result, Err(ExecutionError::CallDepthExceeded { limit: 200_000 }));
}

#[test]
fn results_flow_back_through_nested_calls() {
  let mut builder = ModuleBuilder::new("t");

  let inner = begin(&mut builder, "inner", vec![param("x", Type::I64)], Type::I64);
  let x = builder.param(0).unwrap();
  let doubled = builder.build_binop(BinaryOp::Mul, x, int(2));
  builder.build_return(Some(doubled));

  let outer = begin(&mut builder, "outer", vec![param("x", Type::I64)], Type::I64);
  let x = builder.param(0).unwrap();
  let once = builder.build_call(inner, vec![x]);
  let twice = builder.build_call(inner, vec![once]);
  let result = builder.build_binop(BinaryOp::Add, twice, int(1));
  builder.build_return(Some(result));

  let main = begin(&mut builder, "main", Vec::new(), Type::I64);
  let result = builder.build_call(outer, vec![int(5)]);
  builder.build_return(Some(result));
  builder.set_entry_point(main);

  assert_eq!(interpret(builder).0, Ok(GenericValue::Int(21)));
}

#[test]
fn unknown_imports_are_unresolved() {
  let mut builder = ModuleBuilder::new("t");
  let read = builder.declare_import("read_int", Vec::new(), Type::I64);
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  builder.build_call(read, Vec::new());
  builder.build_return(None);
  builder.set_entry_point(main);

  assert_eq!(
    interpret(builder).0,
    Err(ExecutionError::UnresolvedImport("read_int".to_string()))
  );
}

#[test]
fn entry_with_parameters_is_rejected() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", vec![param("argc", Type::I64)], Type::Void);
  builder.build_return(None);
  builder.set_entry_point(main);

  assert!(matches!(interpret(builder).0, Err(ExecutionError::InvalidEntryPoint(_))));
}

#[test]
fn void_slots_cannot_be_written() {
  let mut builder = ModuleBuilder::new("t");
  let main = begin(&mut builder, "main", Vec::new(), Type::Void);
  let slot = builder.alloc_local(Type::Void, "s");
  builder.build_store(slot, int(1));
  builder.build_return(None);
  builder.set_entry_point(main);

  assert!(matches!(interpret(builder).0, Err(ExecutionError::InvalidModule { .. })));
}

#[test]
fn interpreter_is_the_default_backend() {
  let backend = backend_for(BackendKind::default(), &MicaConfig::silent()).unwrap();
  assert_eq!(backend.name(), "interpreter");
}

#[cfg(not(feature = "jit"))]
#[test]
fn jit_requires_the_feature() {
  let err = backend_for(BackendKind::Jit, &MicaConfig::silent()).err().unwrap();
  assert!(matches!(err, ExecutionError::BackendInitialization { .. }));
}
