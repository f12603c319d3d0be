use crate::{
  BinaryOp, BlockId, FunctionId, FunctionIr, Instr, Linkage, LocalData, LocalId, Module, Operand, ParamData,
  Terminator, Type,
};

/// Position where the next instruction goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPoint {
  pub function: FunctionId,
  pub block: BlockId,
}

/// Builds a [`Module`] through an insertion cursor, handing back opaque
/// [`Operand`] handles for every value it creates.
pub struct ModuleBuilder {
  module: Module,
  cursor: Option<InsertionPoint>,
}

impl ModuleBuilder {
  pub fn new(name: &str) -> Self {
    Self {
      module: Module::new(name),
      cursor: None,
    }
  }

  pub fn module(&self) -> &Module {
    &self.module
  }

  pub fn finish(self) -> Module {
    self.module
  }

  pub fn set_entry_point(
    &mut self,
    function: FunctionId,
  ) {
    self.module.entry_point = Some(function);
  }

  /// Registers a routine defined in this module.
  pub fn declare_function(
    &mut self,
    name: &str,
    params: Vec<ParamData>,
    return_type: Type,
  ) -> FunctionId {
    let function = FunctionIr::new(name.to_string(), params, return_type, Linkage::Internal);
    self.module.add_function(function)
  }

  /// Registers a routine the host provides at execution time.
  pub fn declare_import(
    &mut self,
    name: &str,
    params: Vec<ParamData>,
    return_type: Type,
  ) -> FunctionId {
    let function = FunctionIr::new(name.to_string(), params, return_type, Linkage::Import);
    self.module.add_function(function)
  }

  pub fn get_function(
    &self,
    name: &str,
  ) -> Option<FunctionId> {
    self.module.get_function(name)
  }

  /// Creates a block in `function` and returns its insertion point. Does not
  /// move the cursor.
  pub fn append_block(
    &mut self,
    function: FunctionId,
    prefix: &str,
  ) -> InsertionPoint {
    let block = self.module.function_mut(function).create_block(prefix);
    InsertionPoint { function, block }
  }

  pub fn set_insertion_point(
    &mut self,
    point: InsertionPoint,
  ) {
    self.cursor = Some(point);
  }

  pub fn insertion_point(&self) -> Option<InsertionPoint> {
    self.cursor
  }

  pub fn clear_insertion_point(&mut self) {
    self.cursor = None;
  }

  fn cursor(&self) -> InsertionPoint {
    self.cursor.expect("no insertion point")
  }

  fn current_function(&mut self) -> &mut FunctionIr {
    let cursor = self.cursor();
    self.module.function_mut(cursor.function)
  }

  fn emit(
    &mut self,
    instr: Instr,
  ) {
    let cursor = self.cursor();
    let function = self.module.function_mut(cursor.function);
    function.blocks.get_mut(cursor.block).instructions.push(instr);
  }

  /// Incoming value of parameter `index` of the routine under the cursor.
  pub fn param(
    &self,
    index: usize,
  ) -> Option<Operand> {
    let cursor = self.cursor();
    self.module.function(cursor.function).param_temp(index).map(Operand::Temp)
  }

  /// Reserves a storage slot in the routine under the cursor.
  pub fn alloc_local(
    &mut self,
    ty: Type,
    name: &str,
  ) -> LocalId {
    self.current_function().alloc_local(LocalData {
      ty,
      name: Some(name.to_string()),
    })
  }

  pub fn local_type(
    &self,
    local: LocalId,
  ) -> Type {
    let cursor = self.cursor();
    self.module.function(cursor.function).local_type(local)
  }

  pub fn operand_type(
    &self,
    operand: &Operand,
  ) -> Option<Type> {
    let cursor = self.cursor();
    self.module.function(cursor.function).operand_type(operand)
  }

  pub fn build_load(
    &mut self,
    source: LocalId,
  ) -> Operand {
    let ty = self.local_type(source);
    let dest = self.current_function().alloc_temp(ty);
    self.emit(Instr::Load { dest, source });
    Operand::Temp(dest)
  }

  pub fn build_store(
    &mut self,
    dest: LocalId,
    value: Operand,
  ) {
    self.emit(Instr::Store { dest, value });
  }

  /// The result takes the type of the left operand.
  pub fn build_binop(
    &mut self,
    op: BinaryOp,
    left: Operand,
    right: Operand,
  ) -> Operand {
    let ty = self.operand_type(&left).unwrap_or(Type::Void);
    let dest = self.current_function().alloc_temp(ty);
    self.emit(Instr::BinOp { dest, op, left, right });
    Operand::Temp(dest)
  }

  pub fn build_call(
    &mut self,
    callee: FunctionId,
    args: Vec<Operand>,
  ) -> Operand {
    let ty = self.module.function(callee).return_type;
    let dest = self.current_function().alloc_temp(ty);
    self.emit(Instr::Call { dest, callee, args });
    Operand::Temp(dest)
  }

  pub fn build_return(
    &mut self,
    value: Option<Operand>,
  ) {
    let cursor = self.cursor();
    let function = self.module.function_mut(cursor.function);
    function.blocks.get_mut(cursor.block).terminator = Terminator::Return(value);
  }

  pub fn is_terminated(&self) -> bool {
    let cursor = self.cursor();
    self.module.function(cursor.function).blocks.get(&cursor.block).is_terminated()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ConstValue;

  fn int_param(name: &str) -> ParamData {
    ParamData {
      name: name.to_string(),
      ty: Type::I64,
    }
  }

  #[test]
  fn clashing_names_get_a_suffix() {
    let mut builder = ModuleBuilder::new("test");
    let first = builder.declare_function("f", Vec::new(), Type::Void);
    let second = builder.declare_function("f", Vec::new(), Type::Void);
    let third = builder.declare_function("f", Vec::new(), Type::Void);

    let module = builder.finish();
    assert_eq!(module.get_function("f"), Some(first));
    assert_eq!(module.function(second).name, "f.1");
    assert_eq!(module.function(third).name, "f.2");
  }

  #[test]
  fn parameters_are_the_first_temps() {
    let mut builder = ModuleBuilder::new("test");
    let add = builder.declare_function("add", vec![int_param("a"), int_param("b")], Type::I64);
    let entry = builder.append_block(add, "entry");
    builder.set_insertion_point(entry);

    assert_eq!(builder.param(1), Some(Operand::Temp(crate::TempId::new(1))));
    assert_eq!(builder.param(2), None);

    let local = builder.alloc_local(Type::I64, "a");
    builder.build_store(local, builder.param(0).unwrap());
    let loaded = builder.build_load(local);

    assert_eq!(loaded, Operand::Temp(crate::TempId::new(2)));
    assert_eq!(builder.operand_type(&loaded), Some(Type::I64));
  }

  #[test]
  fn results_are_typed() {
    let mut builder = ModuleBuilder::new("test");
    let show = builder.declare_import("show", vec![int_param("value")], Type::Void);
    let main = builder.declare_function("main", Vec::new(), Type::Void);
    let entry = builder.append_block(main, "entry");
    builder.set_insertion_point(entry);

    let sum = builder.build_binop(
      BinaryOp::Add,
      Operand::Const(ConstValue::Float(1.0)),
      Operand::Const(ConstValue::Float(2.0)),
    );
    let call = builder.build_call(show, vec![Operand::Const(ConstValue::Int(1))]);

    assert_eq!(builder.operand_type(&sum), Some(Type::F64));
    assert_eq!(builder.operand_type(&call), Some(Type::Void));
    assert!(!builder.is_terminated());

    builder.build_return(None);
    assert!(builder.is_terminated());
  }
}
