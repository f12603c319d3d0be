use std::fmt;

use crate::{FunctionId, LocalId, Operand, TempId};

/// Arithmetic instructions. On `f64` operands they are the floating-point
/// counterparts; `SDiv` is signed division for integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  SDiv,
}

impl fmt::Display for BinaryOp {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      BinaryOp::Add => write!(f, "add"),
      BinaryOp::Sub => write!(f, "sub"),
      BinaryOp::Mul => write!(f, "mul"),
      BinaryOp::SDiv => write!(f, "sdiv"),
    }
  }
}

/// A single instruction in three-address form.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
  /// `dest = *source`
  Load { dest: TempId, source: LocalId },

  /// `*dest = value`
  Store { dest: LocalId, value: Operand },

  /// `dest = left op right`
  BinOp {
    dest: TempId,
    op: BinaryOp,
    left: Operand,
    right: Operand,
  },

  /// `dest = callee(args...)`. Calls to `void` routines still get a
  /// `void`-typed destination.
  Call {
    dest: TempId,
    callee: FunctionId,
    args: Vec<Operand>,
  },
}
