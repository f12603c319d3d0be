use std::fmt;

use mica_ir::{ConstValue, Type};

/// A machine value produced by running a routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenericValue {
  /// Result of a `void` routine.
  Unit,
  Int(i64),
  Double(f64),
}

impl GenericValue {
  /// Zero of `ty`; `Unit` for `void`.
  pub fn zero(ty: Type) -> Self {
    match ty {
      Type::I64 => GenericValue::Int(0),
      Type::F64 => GenericValue::Double(0.0),
      Type::Void => GenericValue::Unit,
    }
  }

  pub fn ty(&self) -> Type {
    match self {
      GenericValue::Unit => Type::Void,
      GenericValue::Int(_) => Type::I64,
      GenericValue::Double(_) => Type::F64,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      GenericValue::Int(v) => Some(*v),
      _ => None,
    }
  }

  pub fn as_double(&self) -> Option<f64> {
    match self {
      GenericValue::Double(v) => Some(*v),
      _ => None,
    }
  }
}

impl From<&ConstValue> for GenericValue {
  fn from(value: &ConstValue) -> Self {
    match value {
      ConstValue::Int(v) => GenericValue::Int(*v),
      ConstValue::Float(v) => GenericValue::Double(*v),
    }
  }
}

impl fmt::Display for GenericValue {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      GenericValue::Unit => write!(f, "()"),
      GenericValue::Int(v) => write!(f, "{}", v),
      GenericValue::Double(v) => write!(f, "{}", v),
    }
  }
}
