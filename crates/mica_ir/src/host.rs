//! Output routines the host provides to every program.

use crate::{FunctionId, ModuleBuilder, ParamData, Type};

pub const PRINT_INT: &str = "print_int";
pub const PRINT_DOUBLE: &str = "print_double";

/// Declares `print_int(int)` and `print_double(double)` as imports.
pub fn declare_host_imports(builder: &mut ModuleBuilder) -> Vec<FunctionId> {
  [(PRINT_INT, Type::I64), (PRINT_DOUBLE, Type::F64)]
    .into_iter()
    .map(|(name, ty)| {
      let params = vec![ParamData {
        name: "value".to_string(),
        ty,
      }];
      builder.declare_import(name, params, Type::Void)
    })
    .collect()
}
