#![allow(dead_code)]

use mica_backend::{ExecutionBackend, ExecutionError, GenericValue, Interpreter};
use mica_config::MicaConfig;
use mica_ir::{ConstValue, FunctionId, ModuleBuilder, Operand, ParamData, Type};

pub fn int(value: i64) -> Operand {
  Operand::Const(ConstValue::Int(value))
}

pub fn double(value: f64) -> Operand {
  Operand::Const(ConstValue::Float(value))
}

pub fn param(
  name: &str,
  ty: Type,
) -> ParamData {
  ParamData {
    name: name.to_string(),
    ty,
  }
}

/// Declares `name` and moves the cursor into its entry block.
pub fn begin(
  builder: &mut ModuleBuilder,
  name: &str,
  params: Vec<ParamData>,
  return_type: Type,
) -> FunctionId {
  let id = builder.declare_function(name, params, return_type);
  let entry = builder.append_block(id, "entry");
  builder.set_insertion_point(entry);
  id
}

pub fn run_with(
  backend: &mut dyn ExecutionBackend,
  builder: ModuleBuilder,
) -> (Result<GenericValue, ExecutionError>, String) {
  let module = builder.finish();
  let entry = module.entry_point.expect("module has an entry point");
  let mut out = Vec::new();
  let result = backend.execute(&module, entry, &mut out);
  (result, String::from_utf8(out).unwrap())
}

pub fn interpret(builder: ModuleBuilder) -> (Result<GenericValue, ExecutionError>, String) {
  run_with(&mut Interpreter::new(&MicaConfig::silent()), builder)
}
