use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;

use cranelift_codegen::ir::{types, AbiParam, InstBuilder, Signature, Value};
use cranelift_codegen::isa::OwnedTargetIsa;
use cranelift_codegen::settings::{self, Configurable};
use cranelift_frontend::{FunctionBuilder, FunctionBuilderContext, Variable};
use cranelift_jit::{JITBuilder, JITModule};
use cranelift_module::{FuncId, Linkage, Module as _};
use mica_config::{DebugTrace, MicaConfig};
use mica_ir::{host, BinaryOp, ConstValue, FunctionId, FunctionIr, Instr, Module, Operand, TempId, Terminator, Type};
use mica_log::trace_dbg;

use crate::{ExecutionBackend, ExecutionError, GenericValue};

const SDIV_HELPER: &str = "__mica_sdiv";
const ENTER_HELPER: &str = "__mica_enter";
const LEAVE_HELPER: &str = "__mica_leave";
const FAULTED_HELPER: &str = "__mica_faulted";

/// First runtime fault of a run. Compiled code checks for it after every call
/// and returns straight away once it is set.
#[derive(Debug, Clone, Copy)]
enum Fault {
  DivisionByZero(u32),
  CallDepth,
}

thread_local! {
  static OUTPUT: RefCell<String> = const { RefCell::new(String::new()) };
  static FAULT: Cell<Option<Fault>> = const { Cell::new(None) };
  static DEPTH: Cell<usize> = const { Cell::new(0) };
  static DEPTH_LIMIT: Cell<usize> = const { Cell::new(0) };
}

fn record_fault(fault: Fault) {
  FAULT.with(|slot| {
    if slot.get().is_none() {
      slot.set(Some(fault));
    }
  });
}

fn reset_run_state(limit: usize) {
  OUTPUT.with(|out| out.borrow_mut().clear());
  FAULT.with(|slot| slot.set(None));
  DEPTH.with(|depth| depth.set(0));
  DEPTH_LIMIT.with(|slot| slot.set(limit));
}

extern "C" fn mica_print_int(value: i64) {
  OUTPUT.with(|out| out.borrow_mut().push_str(&format!("{}\n", value)));
}

extern "C" fn mica_print_double(value: f64) {
  OUTPUT.with(|out| out.borrow_mut().push_str(&format!("{}\n", value)));
}

/// Signed division without the hardware trap. A zero divisor records the
/// fault and yields 0; the caller bails out right after.
extern "C" fn mica_sdiv(
  left: i64,
  right: i64,
  function: i64,
) -> i64 {
  if right == 0 {
    record_fault(Fault::DivisionByZero(function as u32));
    return 0;
  }

  left.wrapping_div(right)
}

/// Called on routine entry. Returns non-zero when the call would exceed the
/// depth limit.
extern "C" fn mica_enter() -> i64 {
  let depth = DEPTH.with(Cell::get);

  if depth >= DEPTH_LIMIT.with(Cell::get) {
    record_fault(Fault::CallDepth);
    return 1;
  }

  DEPTH.with(|slot| slot.set(depth + 1));
  0
}

extern "C" fn mica_leave() {
  DEPTH.with(|slot| slot.set(slot.get().saturating_sub(1)));
}

extern "C" fn mica_faulted() -> i64 {
  i64::from(FAULT.with(Cell::get).is_some())
}

/// Runtime helpers imported by every compiled routine.
#[derive(Clone, Copy)]
struct Helpers {
  sdiv: FuncId,
  enter: FuncId,
  leave: FuncId,
  faulted: FuncId,
}

/// Compiles the module to native code with Cranelift and calls the entry.
///
/// Host output is buffered and copied to the writer once the entry returns.
/// A division by zero or a call past `max_call_depth` unwinds every active
/// routine, so nothing runs after the fault.
pub struct JitBackend {
  config: MicaConfig,
  isa: OwnedTargetIsa,
}

impl JitBackend {
  pub fn new(config: &MicaConfig) -> Result<Self, ExecutionError> {
    let init_error = |message: String| ExecutionError::BackendInitialization {
      backend: "jit".to_string(),
      message,
    };

    let mut flag_builder = settings::builder();
    flag_builder
      .set("use_colocated_libcalls", "false")
      .map_err(|e| init_error(e.to_string()))?;
    flag_builder.set("is_pic", "false").map_err(|e| init_error(e.to_string()))?;

    let isa_builder = cranelift_native::builder().map_err(|e| init_error(format!("host ISA not supported: {}", e)))?;
    let isa = isa_builder
      .finish(settings::Flags::new(flag_builder))
      .map_err(|e| init_error(e.to_string()))?;

    trace_dbg!(config, DebugTrace::Backend, "jit: host ISA {}", isa.triple());

    Ok(Self {
      config: config.clone(),
      isa,
    })
  }
}

impl ExecutionBackend for JitBackend {
  fn name(&self) -> &'static str {
    "jit"
  }

  fn execute(
    &mut self,
    module: &Module,
    entry: FunctionId,
    out: &mut dyn Write,
  ) -> Result<GenericValue, ExecutionError> {
    let Some(entry_fn) = module.functions.try_get(&entry) else {
      return Err(ExecutionError::InvalidEntryPoint("unknown routine".to_string()));
    };

    if !entry_fn.params.is_empty() {
      return Err(ExecutionError::InvalidEntryPoint(format!(
        "'{}' takes {} parameter(s)",
        entry_fn.name,
        entry_fn.params.len()
      )));
    }

    let mut builder = JITBuilder::with_isa(self.isa.clone(), cranelift_module::default_libcall_names());
    builder.symbol(host::PRINT_INT, mica_print_int as *const u8);
    builder.symbol(host::PRINT_DOUBLE, mica_print_double as *const u8);
    builder.symbol(SDIV_HELPER, mica_sdiv as *const u8);
    builder.symbol(ENTER_HELPER, mica_enter as *const u8);
    builder.symbol(LEAVE_HELPER, mica_leave as *const u8);
    builder.symbol(FAULTED_HELPER, mica_faulted as *const u8);
    let mut jit = JITModule::new(builder);

    reset_run_state(self.config.max_call_depth);

    let compiled = compile_module(&self.config, &mut jit, module);
    let result = compiled.and_then(|func_ids| run_entry(&mut jit, &func_ids, entry_fn, entry));

    // SAFETY: no pointer into the compiled code outlives `run_entry`.
    unsafe { jit.free_memory() };

    let output = OUTPUT.with(|buffer| std::mem::take(&mut *buffer.borrow_mut()));
    out.write_all(output.as_bytes())?;

    match FAULT.with(Cell::take) {
      Some(Fault::DivisionByZero(function)) => {
        let function = module
          .functions
          .try_get(&FunctionId::new(function))
          .map(|f| f.name.clone())
          .unwrap_or_default();
        Err(ExecutionError::DivisionByZero { function })
      },
      Some(Fault::CallDepth) => Err(ExecutionError::CallDepthExceeded {
        limit: self.config.max_call_depth,
      }),
      None => result,
    }
  }
}

fn run_entry(
  jit: &mut JITModule,
  func_ids: &HashMap<FunctionId, FuncId>,
  entry_fn: &FunctionIr,
  entry: FunctionId,
) -> Result<GenericValue, ExecutionError> {
  let compilation_error = |message: String| ExecutionError::Compilation {
    function: entry_fn.name.clone(),
    message,
  };

  jit.finalize_definitions().map_err(|e| compilation_error(e.to_string()))?;

  let Some(&entry_id) = func_ids.get(&entry) else {
    return Err(compilation_error("entry routine was not compiled".to_string()));
  };
  let code = jit.get_finalized_function(entry_id);

  // SAFETY: the entry routine takes no parameters and its native signature
  // was built from `return_type`, which selects the pointer type below.
  let value = unsafe {
    match entry_fn.return_type {
      Type::Void => {
        let f = std::mem::transmute::<*const u8, extern "C" fn()>(code);
        f();
        GenericValue::Unit
      },
      Type::I64 => {
        let f = std::mem::transmute::<*const u8, extern "C" fn() -> i64>(code);
        GenericValue::Int(f())
      },
      Type::F64 => {
        let f = std::mem::transmute::<*const u8, extern "C" fn() -> f64>(code);
        GenericValue::Double(f())
      },
    }
  };

  Ok(value)
}

fn clif_type(ty: Type) -> Option<types::Type> {
  match ty {
    Type::I64 => Some(types::I64),
    Type::F64 => Some(types::F64),
    Type::Void => None,
  }
}

fn signature(
  jit: &JITModule,
  function: &FunctionIr,
) -> Signature {
  let mut sig = jit.make_signature();

  for param in &function.params {
    if let Some(ty) = clif_type(param.ty) {
      sig.params.push(AbiParam::new(ty));
    }
  }

  if let Some(ty) = clif_type(function.return_type) {
    sig.returns.push(AbiParam::new(ty));
  }

  sig
}

fn compile_module(
  config: &MicaConfig,
  jit: &mut JITModule,
  module: &Module,
) -> Result<HashMap<FunctionId, FuncId>, ExecutionError> {
  let mut func_ids = HashMap::new();

  for (id, function) in module.functions.iter() {
    let linkage = if function.is_import() {
      if function.name != host::PRINT_INT && function.name != host::PRINT_DOUBLE {
        return Err(ExecutionError::UnresolvedImport(function.name.clone()));
      }
      Linkage::Import
    } else {
      Linkage::Local
    };

    let sig = signature(jit, function);
    let func_id = jit
      .declare_function(&function.name, linkage, &sig)
      .map_err(|e| ExecutionError::Compilation {
        function: function.name.clone(),
        message: e.to_string(),
      })?;
    func_ids.insert(id, func_id);
  }

  let helpers = declare_helpers(jit)?;

  let mut builder_context = FunctionBuilderContext::new();

  for (id, function) in module.functions.iter() {
    if function.is_import() {
      continue;
    }

    let mut context = jit.make_context();
    context.func.signature = signature(jit, function);

    {
      let builder = FunctionBuilder::new(&mut context.func, &mut builder_context);
      let translator = FunctionTranslator {
        jit: &mut *jit,
        func_ids: &func_ids,
        helpers,
        module,
        function,
        function_index: id.index(),
        builder,
        temps: HashMap::new(),
        vars: HashMap::new(),
      };
      translator.translate()?;
    }

    jit
      .define_function(func_ids[&id], &mut context)
      .map_err(|e| ExecutionError::Compilation {
        function: function.name.clone(),
        message: format!("{:?}", e),
      })?;
    jit.clear_context(&mut context);

    trace_dbg!(config, DebugTrace::Backend, "jit: defined @{}", function.name);
  }

  Ok(func_ids)
}

fn declare_helpers(jit: &mut JITModule) -> Result<Helpers, ExecutionError> {
  let mut declare = |name: &str, params: usize, returns: bool| {
    let mut sig = jit.make_signature();
    sig.params.extend(std::iter::repeat(AbiParam::new(types::I64)).take(params));
    if returns {
      sig.returns.push(AbiParam::new(types::I64));
    }

    jit
      .declare_function(name, Linkage::Import, &sig)
      .map_err(|e| ExecutionError::Compilation {
        function: name.to_string(),
        message: e.to_string(),
      })
  };

  Ok(Helpers {
    sdiv: declare(SDIV_HELPER, 3, true)?,
    enter: declare(ENTER_HELPER, 0, true)?,
    leave: declare(LEAVE_HELPER, 0, false)?,
    faulted: declare(FAULTED_HELPER, 0, true)?,
  })
}

struct FunctionTranslator<'a, 'b> {
  jit: &'a mut JITModule,
  func_ids: &'a HashMap<FunctionId, FuncId>,
  helpers: Helpers,
  module: &'a Module,
  function: &'a FunctionIr,
  function_index: u32,
  builder: FunctionBuilder<'b>,
  temps: HashMap<TempId, Value>,
  vars: HashMap<u32, Variable>,
}

impl FunctionTranslator<'_, '_> {
  fn error(
    &self,
    message: impl Into<String>,
  ) -> ExecutionError {
    ExecutionError::Compilation {
      function: self.function.name.clone(),
      message: message.into(),
    }
  }

  fn translate(mut self) -> Result<(), ExecutionError> {
    let Some(entry) = self.function.entry_block() else {
      return Err(self.error("routine has no blocks"));
    };

    let block = self.builder.create_block();
    self.builder.append_block_params_for_function_params(block);
    self.builder.switch_to_block(block);

    let params = self.builder.block_params(block).to_vec();
    for (index, value) in params.into_iter().enumerate() {
      self.temps.insert(TempId::new(index as u32), value);
    }

    let over_limit = self.emit_call(self.helpers.enter, &[]);
    self.bail_if(over_limit);

    // Locals live in SSA variables, zeroed on entry.
    for (local, data) in self.function.locals.iter() {
      if let Some(ty) = clif_type(data.ty) {
        let var = Variable::from_u32(local.index());
        self.builder.declare_var(var, ty);
        let zero = self.zero(ty);
        self.builder.def_var(var, zero);
        self.vars.insert(local.index(), var);
      }
    }

    let ir_block = self.function.blocks.get(&entry);

    for instr in &ir_block.instructions {
      self.translate_instr(instr)?;
    }

    match &ir_block.terminator {
      Terminator::Return(Some(value)) => {
        let value = self.operand(value)?;
        self.emit_call(self.helpers.leave, &[]);
        self.builder.ins().return_(&[value]);
      },
      Terminator::Return(None) => {
        self.emit_call(self.helpers.leave, &[]);
        self.return_zero();
      },
      Terminator::Unreachable => {
        return Err(self.error(format!("block {} has no terminator", ir_block.label)));
      },
    }

    self.builder.seal_all_blocks();
    self.builder.finalize();
    Ok(())
  }

  /// Calls `callee` and yields its result, if it has one.
  fn emit_call(
    &mut self,
    callee: FuncId,
    args: &[Value],
  ) -> Option<Value> {
    let func_ref = self.jit.declare_func_in_func(callee, self.builder.func);
    let call = self.builder.ins().call(func_ref, args);
    self.builder.inst_results(call).first().copied()
  }

  /// Returns the zero value of the routine's type when `flag` is non-zero,
  /// and carries on in a fresh block otherwise.
  fn bail_if(
    &mut self,
    flag: Option<Value>,
  ) {
    let Some(flag) = flag else {
      return;
    };

    let bail = self.builder.create_block();
    let resume = self.builder.create_block();
    self.builder.ins().brif(flag, bail, &[], resume, &[]);

    self.builder.switch_to_block(bail);
    self.return_zero();

    self.builder.switch_to_block(resume);
  }

  fn bail_on_fault(&mut self) {
    let faulted = self.emit_call(self.helpers.faulted, &[]);
    self.bail_if(faulted);
  }

  fn return_zero(&mut self) {
    match clif_type(self.function.return_type) {
      Some(ty) => {
        let zero = self.zero(ty);
        self.builder.ins().return_(&[zero]);
      },
      None => {
        self.builder.ins().return_(&[]);
      },
    }
  }

  fn translate_instr(
    &mut self,
    instr: &Instr,
  ) -> Result<(), ExecutionError> {
    match instr {
      Instr::Load { dest, source } => {
        let var = self.var(source.index())?;
        let value = self.builder.use_var(var);
        self.temps.insert(*dest, value);
      },
      Instr::Store { dest, value } => {
        let var = self.var(dest.index())?;
        let value = self.operand(value)?;
        self.builder.def_var(var, value);
      },
      Instr::BinOp { dest, op, left, right } => {
        let l = self.operand(left)?;
        let r = self.operand(right)?;
        let value = self.binary(*op, l, r)?;
        self.temps.insert(*dest, value);
      },
      Instr::Call { dest, callee, args } => {
        let Some(&callee_id) = self.func_ids.get(callee) else {
          return Err(self.error(format!("call to unknown routine #{}", callee.index())));
        };

        let args = args.iter().map(|a| self.operand(a)).collect::<Result<Vec<_>, _>>()?;
        let is_import = self.module.function(*callee).is_import();

        if let Some(result) = self.emit_call(callee_id, &args) {
          self.temps.insert(*dest, result);
        }

        if !is_import {
          self.bail_on_fault();
        }
      },
    }

    Ok(())
  }

  fn binary(
    &mut self,
    op: BinaryOp,
    l: Value,
    r: Value,
  ) -> Result<Value, ExecutionError> {
    let ty = self.builder.func.dfg.value_type(l);

    if ty != self.builder.func.dfg.value_type(r) {
      return Err(self.error(format!("{} on mismatched operands", op)));
    }

    let value = if ty == types::F64 {
      match op {
        BinaryOp::Add => self.builder.ins().fadd(l, r),
        BinaryOp::Sub => self.builder.ins().fsub(l, r),
        BinaryOp::Mul => self.builder.ins().fmul(l, r),
        BinaryOp::SDiv => self.builder.ins().fdiv(l, r),
      }
    } else {
      match op {
        BinaryOp::Add => self.builder.ins().iadd(l, r),
        BinaryOp::Sub => self.builder.ins().isub(l, r),
        BinaryOp::Mul => self.builder.ins().imul(l, r),
        BinaryOp::SDiv => {
          let function = self.builder.ins().iconst(types::I64, i64::from(self.function_index));
          let quotient = self.emit_call(self.helpers.sdiv, &[l, r, function]);
          self.bail_on_fault();
          match quotient {
            Some(quotient) => quotient,
            None => return Err(self.error("division helper returned nothing")),
          }
        },
      }
    };

    Ok(value)
  }

  fn operand(
    &mut self,
    operand: &Operand,
  ) -> Result<Value, ExecutionError> {
    match operand {
      Operand::Const(ConstValue::Int(v)) => Ok(self.builder.ins().iconst(types::I64, *v)),
      Operand::Const(ConstValue::Float(v)) => Ok(self.builder.ins().f64const(*v)),
      Operand::Temp(temp) => self
        .temps
        .get(temp)
        .copied()
        .ok_or_else(|| self.error(format!("t{} has no value", temp.index()))),
      Operand::Local(_) | Operand::Function(_) => Err(self.error("handle used as a value")),
    }
  }

  fn var(
    &self,
    local: u32,
  ) -> Result<Variable, ExecutionError> {
    self
      .vars
      .get(&local)
      .copied()
      .ok_or_else(|| self.error(format!("access to void or unknown local %{}", local)))
  }

  fn zero(
    &mut self,
    ty: types::Type,
  ) -> Value {
    if ty == types::F64 {
      self.builder.ins().f64const(0.0)
    } else {
      self.builder.ins().iconst(ty, 0)
    }
  }
}
