use std::fmt;

/// Storage and value types understood by the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
  /// 64-bit signed integer.
  I64,
  /// IEEE 754 double.
  F64,
  /// No value. A `void` local is a zero-sized slot that cannot be read or written.
  Void,
}

impl Type {
  pub fn is_void(&self) -> bool {
    matches!(self, Type::Void)
  }
}

impl fmt::Display for Type {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Type::I64 => write!(f, "i64"),
      Type::F64 => write!(f, "f64"),
      Type::Void => write!(f, "void"),
    }
  }
}
