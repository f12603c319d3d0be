use crate::{Instr, Operand};

/// A basic block: a sequence of instructions ending with a terminator.
#[derive(Debug, Clone)]
pub struct Block {
  pub label: String,
  pub instructions: Vec<Instr>,
  pub terminator: Terminator,
}

impl Block {
  pub fn new(label: String) -> Self {
    Self {
      label,
      instructions: Vec::new(),
      terminator: Terminator::Unreachable,
    }
  }

  pub fn is_terminated(&self) -> bool {
    !matches!(self.terminator, Terminator::Unreachable)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
  Return(Option<Operand>),
  /// Not terminated yet.
  Unreachable,
}
