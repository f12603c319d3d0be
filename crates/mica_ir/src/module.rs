use std::collections::HashMap;

use crate::{Block, BlockId, FunctionId, LocalId, Operand, Store, TempId, Type};

/// Where a routine's code lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
  /// Defined in this module and only visible inside it.
  Internal,
  /// Provided by the host at execution time; has no body.
  Import,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamData {
  pub name: String,
  pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalData {
  pub ty: Type,
  /// Debug name (for pretty printing).
  pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempData {
  pub ty: Type,
}

/// One routine. Parameters arrive as the implicit temps `t0..tn`.
#[derive(Debug, Clone)]
pub struct FunctionIr {
  pub name: String,
  pub params: Vec<ParamData>,
  pub return_type: Type,
  pub linkage: Linkage,
  pub locals: Store<LocalData>,
  pub temps: Store<TempData>,
  pub blocks: Store<Block>,
  block_counter: u32,
}

impl FunctionIr {
  pub fn new(
    name: String,
    params: Vec<ParamData>,
    return_type: Type,
    linkage: Linkage,
  ) -> Self {
    let mut temps = Store::new();

    if linkage == Linkage::Internal {
      for param in &params {
        temps.alloc(TempData { ty: param.ty });
      }
    }

    Self {
      name,
      params,
      return_type,
      linkage,
      locals: Store::new(),
      temps,
      blocks: Store::new(),
      block_counter: 0,
    }
  }

  pub fn is_import(&self) -> bool {
    self.linkage == Linkage::Import
  }

  /// The first block ever created, if any.
  pub fn entry_block(&self) -> Option<BlockId> {
    if self.blocks.is_empty() {
      None
    } else {
      Some(BlockId::new(0))
    }
  }

  pub fn create_block(
    &mut self,
    prefix: &str,
  ) -> BlockId {
    let label = format!("{}_{}", prefix, self.block_counter);
    self.block_counter += 1;
    self.blocks.alloc(Block::new(label))
  }

  pub fn alloc_local(
    &mut self,
    data: LocalData,
  ) -> LocalId {
    self.locals.alloc(data)
  }

  pub fn alloc_temp(
    &mut self,
    ty: Type,
  ) -> TempId {
    self.temps.alloc(TempData { ty })
  }

  pub fn param_temp(
    &self,
    index: usize,
  ) -> Option<TempId> {
    if index < self.params.len() {
      Some(TempId::new(index as u32))
    } else {
      None
    }
  }

  pub fn local_type(
    &self,
    local: LocalId,
  ) -> Type {
    self.locals.get(&local).ty
  }

  pub fn temp_type(
    &self,
    temp: TempId,
  ) -> Type {
    self.temps.get(&temp).ty
  }

  /// Type of a data operand. `None` for handles that are not data, or for
  /// temps this routine never allocated.
  pub fn operand_type(
    &self,
    operand: &Operand,
  ) -> Option<Type> {
    match operand {
      Operand::Temp(temp) => self.temps.try_get(temp).map(|t| t.ty),
      Operand::Const(value) => Some(value.ty()),
      Operand::Local(_) | Operand::Function(_) => None,
    }
  }
}

/// A translation unit: routines plus the flat function table used to
/// resolve calls by name.
#[derive(Debug, Clone)]
pub struct Module {
  pub name: String,
  pub functions: Store<FunctionIr>,
  function_table: HashMap<String, FunctionId>,
  pub entry_point: Option<FunctionId>,
}

impl Module {
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      functions: Store::new(),
      function_table: HashMap::new(),
      entry_point: None,
    }
  }

  /// Adds a routine. A taken name gets a `.N` suffix; lookups by the original
  /// name keep resolving to the first routine registered under it.
  pub fn add_function(
    &mut self,
    mut function: FunctionIr,
  ) -> FunctionId {
    if self.function_table.contains_key(&function.name) {
      function.name = self.unique_name(&function.name);
    }

    let name = function.name.clone();
    let id = self.functions.alloc(function);
    self.function_table.insert(name, id);
    id
  }

  fn unique_name(
    &self,
    base: &str,
  ) -> String {
    let mut suffix = 1;
    loop {
      let candidate = format!("{}.{}", base, suffix);
      if !self.function_table.contains_key(&candidate) {
        return candidate;
      }
      suffix += 1;
    }
  }

  pub fn get_function(
    &self,
    name: &str,
  ) -> Option<FunctionId> {
    self.function_table.get(name).copied()
  }

  pub fn function(
    &self,
    id: FunctionId,
  ) -> &FunctionIr {
    self.functions.get(&id)
  }

  pub fn function_mut(
    &mut self,
    id: FunctionId,
  ) -> &mut FunctionIr {
    self.functions.get_mut(id)
  }

  pub fn function_named(
    &self,
    name: &str,
  ) -> Option<&FunctionIr> {
    self.get_function(name).map(|id| self.function(id))
  }
}
