use std::collections::HashSet;
use std::fmt;

use crate::{Block, FunctionId, FunctionIr, Instr, LocalId, Module, Operand, TempId, Terminator, Type};

/// Problems found during IR verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
  /// The module has no entry routine.
  MissingEntryPoint,

  /// A block has no terminator set (still Unreachable when it shouldn't be).
  MissingTerminator { function: String, block: String },

  /// Reference to a non-existent local.
  InvalidLocalRef {
    function: String,
    block: String,
    local: LocalId,
  },

  /// Reference to a non-existent temp.
  InvalidTempRef {
    function: String,
    block: String,
    temp: TempId,
  },

  /// Temp used before it was defined.
  TempUsedBeforeDef {
    function: String,
    block: String,
    temp: TempId,
  },

  /// Call to a routine the module does not contain.
  InvalidFunctionRef {
    function: String,
    block: String,
    callee: FunctionId,
  },

  /// A storage slot or routine handle used where a value is expected.
  NonDataOperand { function: String, block: String },

  /// A `void` value used where a value is expected.
  VoidOperand { function: String, block: String },

  /// Load from or store to a `void` slot.
  VoidLocalAccess {
    function: String,
    block: String,
    local: LocalId,
  },

  /// Arithmetic on operands of different types.
  OperandTypeMismatch {
    function: String,
    block: String,
    left: Type,
    right: Type,
  },

  StoreTypeMismatch {
    function: String,
    block: String,
    local: LocalId,
    expected: Type,
    actual: Type,
  },

  ArgumentCountMismatch {
    function: String,
    block: String,
    callee: String,
    expected: usize,
    actual: usize,
  },

  ArgumentTypeMismatch {
    function: String,
    block: String,
    callee: String,
    index: usize,
    expected: Type,
    actual: Type,
  },

  /// Return value type doesn't match function signature.
  ReturnTypeMismatch {
    function: String,
    block: String,
    expected: Type,
    actual: Type,
  },

  /// Missing return value when function expects one.
  MissingReturnValue {
    function: String,
    block: String,
    expected: Type,
  },

  /// Unexpected return value when function returns void.
  UnexpectedReturnValue { function: String, block: String },
}

impl VerifyError {
  /// Routines never lower an explicit `return`, so every value-returning
  /// routine ends in `ret` without a value. That case is reported but does
  /// not make the module unrunnable.
  pub fn is_warning(&self) -> bool {
    matches!(self, VerifyError::MissingReturnValue { .. })
  }
}

impl fmt::Display for VerifyError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      VerifyError::MissingEntryPoint => write!(f, "module has no entry point"),
      VerifyError::MissingTerminator { function, block } => {
        write!(f, "{}/{}: block has no terminator", function, block)
      },
      VerifyError::InvalidLocalRef { function, block, local } => {
        write!(f, "{}/{}: unknown local %{}", function, block, local.index())
      },
      VerifyError::InvalidTempRef { function, block, temp } => {
        write!(f, "{}/{}: unknown temp t{}", function, block, temp.index())
      },
      VerifyError::TempUsedBeforeDef { function, block, temp } => {
        write!(f, "{}/{}: t{} used before definition", function, block, temp.index())
      },
      VerifyError::InvalidFunctionRef { function, block, callee } => {
        write!(f, "{}/{}: call to unknown routine #{}", function, block, callee.index())
      },
      VerifyError::NonDataOperand { function, block } => {
        write!(f, "{}/{}: storage or routine handle used as a value", function, block)
      },
      VerifyError::VoidOperand { function, block } => {
        write!(f, "{}/{}: void value used as a value", function, block)
      },
      VerifyError::VoidLocalAccess { function, block, local } => {
        write!(f, "{}/{}: access to void local %{}", function, block, local.index())
      },
      VerifyError::OperandTypeMismatch {
        function,
        block,
        left,
        right,
      } => write!(f, "{}/{}: operand types differ ({} and {})", function, block, left, right),
      VerifyError::StoreTypeMismatch {
        function,
        block,
        local,
        expected,
        actual,
      } => write!(
        f,
        "{}/{}: store of {} into %{} of type {}",
        function,
        block,
        actual,
        local.index(),
        expected
      ),
      VerifyError::ArgumentCountMismatch {
        function,
        block,
        callee,
        expected,
        actual,
      } => write!(
        f,
        "{}/{}: @{} takes {} argument(s), got {}",
        function, block, callee, expected, actual
      ),
      VerifyError::ArgumentTypeMismatch {
        function,
        block,
        callee,
        index,
        expected,
        actual,
      } => write!(
        f,
        "{}/{}: argument {} of @{} is {}, expected {}",
        function, block, index, callee, actual, expected
      ),
      VerifyError::ReturnTypeMismatch {
        function,
        block,
        expected,
        actual,
      } => write!(f, "{}/{}: returns {}, expected {}", function, block, actual, expected),
      VerifyError::MissingReturnValue {
        function,
        block,
        expected,
      } => write!(f, "{}/{}: returns no value, expected {}", function, block, expected),
      VerifyError::UnexpectedReturnValue { function, block } => {
        write!(f, "{}/{}: returns a value from a void routine", function, block)
      },
    }
  }
}

impl std::error::Error for VerifyError {}

/// IR verification result.
pub type VerifyResult = Result<(), Vec<VerifyError>>;

/// Verifier for IR modules.
pub struct ModuleVerifier<'a> {
  module: &'a Module,
  errors: Vec<VerifyError>,
}

impl<'a> ModuleVerifier<'a> {
  pub fn new(module: &'a Module) -> Self {
    Self {
      module,
      errors: Vec::new(),
    }
  }

  /// Verify the entire module.
  pub fn verify(mut self) -> VerifyResult {
    if self.module.entry_point.is_none() {
      self.errors.push(VerifyError::MissingEntryPoint);
    }

    for (_, func) in self.module.functions.iter() {
      if !func.is_import() {
        self.verify_function(func);
      }
    }

    if self.errors.is_empty() {
      Ok(())
    } else {
      Err(self.errors)
    }
  }

  fn verify_function(
    &mut self,
    func: &FunctionIr,
  ) {
    // Parameters are implicitly defined as temps t0, t1, ...
    let mut defined_temps: HashSet<TempId> = (0..func.params.len()).map(|i| TempId::new(i as u32)).collect();

    for block in func.blocks.get_all() {
      self.verify_block(func, block, &mut defined_temps);
    }
  }

  fn verify_block(
    &mut self,
    func: &FunctionIr,
    block: &Block,
    defined_temps: &mut HashSet<TempId>,
  ) {
    let at = Location {
      function: &func.name,
      block: &block.label,
    };

    for instr in &block.instructions {
      self.verify_instr(func, &at, instr, defined_temps);
    }

    self.verify_terminator(func, &at, &block.terminator, defined_temps);
  }

  fn verify_instr(
    &mut self,
    func: &FunctionIr,
    at: &Location<'_>,
    instr: &Instr,
    defined_temps: &mut HashSet<TempId>,
  ) {
    match instr {
      Instr::Load { dest, source } => {
        self.check_local_access(func, at, *source);
        defined_temps.insert(*dest);
      },
      Instr::Store { dest, value } => {
        let value_ty = self.check_operand(func, at, value, defined_temps);

        if let Some(local_ty) = self.check_local_access(func, at, *dest) {
          if let Some(actual) = value_ty {
            if actual != local_ty {
              self.errors.push(VerifyError::StoreTypeMismatch {
                function: at.function.to_string(),
                block: at.block.to_string(),
                local: *dest,
                expected: local_ty,
                actual,
              });
            }
          }
        }
      },
      Instr::BinOp { dest, left, right, .. } => {
        let l = self.check_operand(func, at, left, defined_temps);
        let r = self.check_operand(func, at, right, defined_temps);

        if let (Some(left), Some(right)) = (l, r) {
          if left != right {
            self.errors.push(VerifyError::OperandTypeMismatch {
              function: at.function.to_string(),
              block: at.block.to_string(),
              left,
              right,
            });
          }
        }

        defined_temps.insert(*dest);
      },
      Instr::Call { dest, callee, args } => {
        let arg_types: Vec<_> = args
          .iter()
          .map(|arg| self.check_operand(func, at, arg, defined_temps))
          .collect();

        self.check_call(at, *callee, &arg_types);
        defined_temps.insert(*dest);
      },
    }
  }

  fn verify_terminator(
    &mut self,
    func: &FunctionIr,
    at: &Location<'_>,
    term: &Terminator,
    defined_temps: &HashSet<TempId>,
  ) {
    match term {
      Terminator::Unreachable => {
        self.errors.push(VerifyError::MissingTerminator {
          function: at.function.to_string(),
          block: at.block.to_string(),
        });
      },
      Terminator::Return(None) => {
        if !func.return_type.is_void() {
          self.errors.push(VerifyError::MissingReturnValue {
            function: at.function.to_string(),
            block: at.block.to_string(),
            expected: func.return_type,
          });
        }
      },
      Terminator::Return(Some(value)) => {
        let actual = self.check_operand(func, at, value, defined_temps);

        if func.return_type.is_void() {
          self.errors.push(VerifyError::UnexpectedReturnValue {
            function: at.function.to_string(),
            block: at.block.to_string(),
          });
        } else if let Some(actual) = actual {
          if actual != func.return_type {
            self.errors.push(VerifyError::ReturnTypeMismatch {
              function: at.function.to_string(),
              block: at.block.to_string(),
              expected: func.return_type,
              actual,
            });
          }
        }
      },
    }
  }

  fn check_call(
    &mut self,
    at: &Location<'_>,
    callee: FunctionId,
    arg_types: &[Option<Type>],
  ) {
    let Some(target) = self.module.functions.try_get(&callee) else {
      self.errors.push(VerifyError::InvalidFunctionRef {
        function: at.function.to_string(),
        block: at.block.to_string(),
        callee,
      });
      return;
    };

    if target.params.len() != arg_types.len() {
      self.errors.push(VerifyError::ArgumentCountMismatch {
        function: at.function.to_string(),
        block: at.block.to_string(),
        callee: target.name.clone(),
        expected: target.params.len(),
        actual: arg_types.len(),
      });
      return;
    }

    for (index, (param, actual)) in target.params.iter().zip(arg_types).enumerate() {
      if let Some(actual) = actual {
        if *actual != param.ty {
          self.errors.push(VerifyError::ArgumentTypeMismatch {
            function: at.function.to_string(),
            block: at.block.to_string(),
            callee: target.name.clone(),
            index,
            expected: param.ty,
            actual: *actual,
          });
        }
      }
    }
  }

  /// Returns the local's type when it exists and is not `void`.
  fn check_local_access(
    &mut self,
    func: &FunctionIr,
    at: &Location<'_>,
    local: LocalId,
  ) -> Option<Type> {
    let Some(data) = func.locals.try_get(&local) else {
      self.errors.push(VerifyError::InvalidLocalRef {
        function: at.function.to_string(),
        block: at.block.to_string(),
        local,
      });
      return None;
    };

    if data.ty.is_void() {
      self.errors.push(VerifyError::VoidLocalAccess {
        function: at.function.to_string(),
        block: at.block.to_string(),
        local,
      });
      return None;
    }

    Some(data.ty)
  }

  /// Returns the operand's type when it is a well-formed value.
  fn check_operand(
    &mut self,
    func: &FunctionIr,
    at: &Location<'_>,
    operand: &Operand,
    defined_temps: &HashSet<TempId>,
  ) -> Option<Type> {
    match operand {
      Operand::Temp(temp) => {
        let Some(data) = func.temps.try_get(temp) else {
          self.errors.push(VerifyError::InvalidTempRef {
            function: at.function.to_string(),
            block: at.block.to_string(),
            temp: *temp,
          });
          return None;
        };

        if !defined_temps.contains(temp) {
          self.errors.push(VerifyError::TempUsedBeforeDef {
            function: at.function.to_string(),
            block: at.block.to_string(),
            temp: *temp,
          });
        }

        if data.ty.is_void() {
          self.errors.push(VerifyError::VoidOperand {
            function: at.function.to_string(),
            block: at.block.to_string(),
          });
          return None;
        }

        Some(data.ty)
      },
      Operand::Const(value) => Some(value.ty()),
      Operand::Local(_) | Operand::Function(_) => {
        self.errors.push(VerifyError::NonDataOperand {
          function: at.function.to_string(),
          block: at.block.to_string(),
        });
        None
      },
    }
  }
}

struct Location<'a> {
  function: &'a str,
  block: &'a str,
}

/// Convenience function to verify a module.
pub fn verify_module(module: &Module) -> VerifyResult {
  ModuleVerifier::new(module).verify()
}
