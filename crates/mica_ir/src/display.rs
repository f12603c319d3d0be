use std::fmt::Write;

use crate::{Block, ConstValue, FunctionIr, Instr, Module, Operand, Terminator};

/// Pretty printer for IR modules.
pub struct ModulePrinter<'a> {
  module: &'a Module,
  output: String,
}

impl<'a> ModulePrinter<'a> {
  pub fn new(module: &'a Module) -> Self {
    Self {
      module,
      output: String::new(),
    }
  }

  pub fn print(mut self) -> String {
    writeln!(self.output, "=== IR: {} ===\n", self.module.name).unwrap();

    if let Some(entry) = self.module.entry_point {
      let name = &self.module.function(entry).name;
      writeln!(self.output, "Entry: {}\n", name).unwrap();
    }

    for (_, func) in self.module.functions.iter() {
      self.print_function(func);
    }

    self.output
  }

  fn print_function(
    &mut self,
    func: &FunctionIr,
  ) {
    let params: Vec<_> = func.params.iter().map(|p| format!("{}: {}", p.name, p.ty)).collect();

    if func.is_import() {
      writeln!(
        self.output,
        "fn {}({}): {} [import]\n",
        func.name,
        params.join(", "),
        func.return_type
      )
      .unwrap();
      return;
    }

    writeln!(self.output, "fn {}({}): {} {{", func.name, params.join(", "), func.return_type).unwrap();

    if !func.locals.is_empty() {
      writeln!(self.output, "  locals:").unwrap();
      for (idx, local) in func.locals.get_all().iter().enumerate() {
        let lname = local.name.as_deref().unwrap_or("_");
        writeln!(self.output, "    %{}: {} = {}", idx, local.ty, lname).unwrap();
      }
    }

    for block in func.blocks.get_all() {
      writeln!(self.output).unwrap();
      self.print_block(func, block);
    }

    writeln!(self.output, "}}\n").unwrap();
  }

  fn print_block(
    &mut self,
    func: &FunctionIr,
    block: &Block,
  ) {
    writeln!(self.output, "  {}:", block.label).unwrap();

    for instr in &block.instructions {
      write!(self.output, "    ").unwrap();
      self.print_instr(func, instr);
    }

    write!(self.output, "    ").unwrap();
    self.print_terminator(&block.terminator);
  }

  fn print_instr(
    &mut self,
    func: &FunctionIr,
    instr: &Instr,
  ) {
    match instr {
      Instr::Load { dest, source } => {
        let ty = func.temp_type(*dest);
        writeln!(self.output, "t{} = load %{} : {}", dest.index(), source.index(), ty).unwrap();
      },
      Instr::Store { dest, value } => {
        let val = self.format_operand(value);
        writeln!(self.output, "store %{}, {}", dest.index(), val).unwrap();
      },
      Instr::BinOp { dest, op, left, right } => {
        let l = self.format_operand(left);
        let r = self.format_operand(right);
        let ty = func.temp_type(*dest);
        writeln!(self.output, "t{} = {} {}, {} : {}", dest.index(), op, l, r, ty).unwrap();
      },
      Instr::Call { dest, callee, args } => {
        let name = self.function_name(*callee);
        let args_str: Vec<_> = args.iter().map(|a| self.format_operand(a)).collect();
        let ty = func.temp_type(*dest);
        writeln!(self.output, "t{} = call @{}({}) : {}", dest.index(), name, args_str.join(", "), ty).unwrap();
      },
    }
  }

  fn print_terminator(
    &mut self,
    term: &Terminator,
  ) {
    match term {
      Terminator::Return(None) => writeln!(self.output, "ret").unwrap(),
      Terminator::Return(Some(value)) => {
        let v = self.format_operand(value);
        writeln!(self.output, "ret {}", v).unwrap();
      },
      Terminator::Unreachable => writeln!(self.output, "unreachable").unwrap(),
    }
  }

  fn format_operand(
    &self,
    operand: &Operand,
  ) -> String {
    match operand {
      Operand::Temp(t) => format!("t{}", t.index()),
      Operand::Const(ConstValue::Int(v)) => v.to_string(),
      Operand::Const(ConstValue::Float(v)) => format!("{:?}", v),
      Operand::Local(l) => format!("%{}", l.index()),
      Operand::Function(f) => format!("@{}", self.function_name(*f)),
    }
  }

  fn function_name(
    &self,
    id: crate::FunctionId,
  ) -> String {
    match self.module.functions.try_get(&id) {
      Some(func) => func.name.clone(),
      None => format!("fn{}", id.index()),
    }
  }
}

/// Renders `module` as text.
pub fn print_module(module: &Module) -> String {
  ModulePrinter::new(module).print()
}
