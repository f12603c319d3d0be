use crate::{FunctionId, LocalId, TempId, Type};

/// Opaque value handle returned by every build request.
///
/// `Temp` and `Const` are data. `Local` (a storage slot) and `Function` (a
/// routine) are handles that lowering may hand back but that are not valid
/// instruction inputs; the verifier reports them when they are used as data.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
  Temp(TempId),
  Const(ConstValue),
  Local(LocalId),
  Function(FunctionId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
  Int(i64),
  Float(f64),
}

impl ConstValue {
  pub fn ty(&self) -> Type {
    match self {
      ConstValue::Int(_) => Type::I64,
      ConstValue::Float(_) => Type::F64,
    }
  }
}
