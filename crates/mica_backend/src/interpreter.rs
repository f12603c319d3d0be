use std::io::Write;

use mica_config::{DebugTrace, MicaConfig};
use mica_ir::{host, BinaryOp, Block, FunctionId, FunctionIr, Instr, LocalId, Module, Operand, TempId, Terminator};
use mica_log::trace_dbg;

use crate::{ExecutionBackend, ExecutionError, GenericValue};

/// Walks the IR directly. Always available.
///
/// Locals start at zero on every call. Integer arithmetic wraps; `f64`
/// arithmetic follows IEEE 754. A routine that reaches `ret` without a value
/// returns the zero of its declared type.
pub struct Interpreter {
  config: MicaConfig,
  max_call_depth: usize,
}

impl Interpreter {
  pub fn new(config: &MicaConfig) -> Self {
    Self {
      config: config.clone(),
      max_call_depth: config.max_call_depth,
    }
  }

  pub fn with_max_call_depth(
    mut self,
    limit: usize,
  ) -> Self {
    self.max_call_depth = limit;
    self
  }
}

impl ExecutionBackend for Interpreter {
  fn name(&self) -> &'static str {
    "interpreter"
  }

  fn execute(
    &mut self,
    module: &Module,
    entry: FunctionId,
    out: &mut dyn Write,
  ) -> Result<GenericValue, ExecutionError> {
    let Some(function) = module.functions.try_get(&entry) else {
      return Err(ExecutionError::InvalidEntryPoint("unknown routine".to_string()));
    };

    if !function.params.is_empty() {
      return Err(ExecutionError::InvalidEntryPoint(format!(
        "'{}' takes {} parameter(s)",
        function.name,
        function.params.len()
      )));
    }

    let mut run = Run {
      config: &self.config,
      module,
      out,
      max_call_depth: self.max_call_depth,
    };

    run.run(entry)
  }
}

struct Run<'a> {
  config: &'a MicaConfig,
  module: &'a Module,
  out: &'a mut dyn Write,
  max_call_depth: usize,
}

/// What the current frame asks the run loop to do next.
enum Step {
  Next,
  Call {
    dest: TempId,
    callee: FunctionId,
    args: Vec<GenericValue>,
  },
  Return(GenericValue),
}

struct Frame<'f> {
  function: &'f FunctionIr,
  block: &'f Block,
  pc: usize,
  locals: Vec<GenericValue>,
  temps: Vec<Option<GenericValue>>,
  /// Caller temp that receives the result.
  return_to: Option<TempId>,
}

impl<'f> Frame<'f> {
  fn new(
    function: &'f FunctionIr,
    args: Vec<GenericValue>,
    return_to: Option<TempId>,
  ) -> Result<Self, ExecutionError> {
    let Some(entry) = function.entry_block() else {
      return Err(ExecutionError::InvalidModule {
        function: function.name.clone(),
        message: "routine has no blocks".to_string(),
      });
    };

    let locals = function.locals.get_all().iter().map(|l| GenericValue::zero(l.ty)).collect();
    let mut temps = vec![None; function.temps.len()];

    for (slot, arg) in temps.iter_mut().zip(args) {
      *slot = Some(arg);
    }

    Ok(Self {
      function,
      block: function.blocks.get(&entry),
      pc: 0,
      locals,
      temps,
      return_to,
    })
  }

  fn invalid(
    &self,
    message: impl Into<String>,
  ) -> ExecutionError {
    ExecutionError::InvalidModule {
      function: self.function.name.clone(),
      message: message.into(),
    }
  }

  fn value(
    &self,
    operand: &Operand,
  ) -> Result<GenericValue, ExecutionError> {
    match operand {
      Operand::Const(value) => Ok(GenericValue::from(value)),
      Operand::Temp(temp) => self
        .temps
        .get(temp.index() as usize)
        .copied()
        .flatten()
        .ok_or_else(|| self.invalid(format!("t{} has no value", temp.index()))),
      Operand::Local(_) | Operand::Function(_) => Err(self.invalid("handle used as a value")),
    }
  }

  fn set_temp(
    &mut self,
    temp: TempId,
    value: GenericValue,
  ) -> Result<(), ExecutionError> {
    match self.temps.get_mut(temp.index() as usize) {
      Some(slot) => {
        *slot = Some(value);
        Ok(())
      },
      None => Err(self.invalid(format!("unknown temp t{}", temp.index()))),
    }
  }

  fn local_index(
    &self,
    local: LocalId,
  ) -> Result<usize, ExecutionError> {
    let index = local.index() as usize;

    match self.function.locals.try_get(&local) {
      Some(data) if !data.ty.is_void() => Ok(index),
      Some(_) => Err(self.invalid(format!("access to void local %{}", index))),
      None => Err(self.invalid(format!("unknown local %{}", index))),
    }
  }

  /// Executes one instruction, or the terminator once the block is done.
  fn step(&mut self) -> Result<Step, ExecutionError> {
    let block = self.block;

    let Some(instr) = block.instructions.get(self.pc) else {
      return match &block.terminator {
        Terminator::Return(Some(value)) => self.value(value).map(Step::Return),
        Terminator::Return(None) => Ok(Step::Return(GenericValue::zero(self.function.return_type))),
        Terminator::Unreachable => Err(self.invalid(format!("block {} has no terminator", block.label))),
      };
    };

    self.pc += 1;

    match instr {
      Instr::Load { dest, source } => {
        let index = self.local_index(*source)?;
        let value = self.locals[index];
        self.set_temp(*dest, value)?;
      },
      Instr::Store { dest, value } => {
        let index = self.local_index(*dest)?;
        let value = self.value(value)?;

        if value.ty() != self.locals[index].ty() {
          return Err(self.invalid(format!("store of {} into %{}", value.ty(), index)));
        }

        self.locals[index] = value;
      },
      Instr::BinOp { dest, op, left, right } => {
        let left = self.value(left)?;
        let right = self.value(right)?;
        let result = binary(self, *op, left, right)?;
        self.set_temp(*dest, result)?;
      },
      Instr::Call { dest, callee, args } => {
        let args = args.iter().map(|a| self.value(a)).collect::<Result<Vec<_>, _>>()?;
        return Ok(Step::Call {
          dest: *dest,
          callee: *callee,
          args,
        });
      },
    }

    Ok(Step::Next)
  }
}

impl<'a> Run<'a> {
  /// Runs `entry` to completion. Calls push frames on an explicit stack, so
  /// deep recursion is limited by `max_call_depth` only.
  fn run(
    &mut self,
    entry: FunctionId,
  ) -> Result<GenericValue, ExecutionError> {
    let module: &'a Module = self.module;
    let mut stack: Vec<Frame<'a>> = Vec::new();

    self.enter(&mut stack, entry, Vec::new(), None)?;

    while let Some(frame) = stack.last_mut() {
      match frame.step()? {
        Step::Next => {},
        Step::Call { dest, callee, args } => {
          let Some(function) = module.functions.try_get(&callee) else {
            return Err(frame.invalid(format!("call to unknown routine #{}", callee.index())));
          };

          if function.is_import() {
            let value = self.call_host(function, &args)?;
            frame.set_temp(dest, value)?;
          } else {
            self.enter(&mut stack, callee, args, Some(dest))?;
          }
        },
        Step::Return(value) => {
          let return_to = stack.pop().and_then(|finished| finished.return_to);

          match (stack.last_mut(), return_to) {
            (Some(caller), Some(dest)) => caller.set_temp(dest, value)?,
            _ => return Ok(value),
          }
        },
      }
    }

    Ok(GenericValue::Unit)
  }

  fn enter(
    &self,
    stack: &mut Vec<Frame<'a>>,
    id: FunctionId,
    args: Vec<GenericValue>,
    return_to: Option<TempId>,
  ) -> Result<(), ExecutionError> {
    if stack.len() >= self.max_call_depth {
      return Err(ExecutionError::CallDepthExceeded {
        limit: self.max_call_depth,
      });
    }

    let module: &'a Module = self.module;
    let function = module.function(id);
    trace_dbg!(self.config, DebugTrace::Backend, "call @{} (depth {})", function.name, stack.len());

    stack.push(Frame::new(function, args, return_to)?);
    Ok(())
  }

  fn call_host(
    &mut self,
    function: &FunctionIr,
    args: &[GenericValue],
  ) -> Result<GenericValue, ExecutionError> {
    match (function.name.as_str(), args) {
      (host::PRINT_INT, [GenericValue::Int(v)]) => writeln!(self.out, "{}", v)?,
      (host::PRINT_DOUBLE, [GenericValue::Double(v)]) => writeln!(self.out, "{}", v)?,
      (host::PRINT_INT | host::PRINT_DOUBLE, _) => {
        return Err(ExecutionError::InvalidModule {
          function: function.name.clone(),
          message: format!("bad arguments {:?}", args),
        });
      },
      (name, _) => return Err(ExecutionError::UnresolvedImport(name.to_string())),
    }

    Ok(GenericValue::Unit)
  }
}

fn binary(
  frame: &Frame<'_>,
  op: BinaryOp,
  left: GenericValue,
  right: GenericValue,
) -> Result<GenericValue, ExecutionError> {
  let value = match (left, right) {
    (GenericValue::Int(l), GenericValue::Int(r)) => GenericValue::Int(match op {
      BinaryOp::Add => l.wrapping_add(r),
      BinaryOp::Sub => l.wrapping_sub(r),
      BinaryOp::Mul => l.wrapping_mul(r),
      BinaryOp::SDiv => {
        if r == 0 {
          return Err(ExecutionError::DivisionByZero {
            function: frame.function.name.clone(),
          });
        }
        l.wrapping_div(r)
      },
    }),
    (GenericValue::Double(l), GenericValue::Double(r)) => GenericValue::Double(match op {
      BinaryOp::Add => l + r,
      BinaryOp::Sub => l - r,
      BinaryOp::Mul => l * r,
      BinaryOp::SDiv => l / r,
    }),
    (l, r) => return Err(frame.invalid(format!("{} on {} and {}", op, l.ty(), r.ty()))),
  };

  Ok(value)
}
