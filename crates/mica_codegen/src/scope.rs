use std::collections::HashMap;

use mica_ir::{Id, InsertionPoint, LocalId, Store};

pub type ScopeFrameId = Id<ScopeFrame>;

/// Name bindings of one function activation.
#[derive(Debug, Clone)]
pub struct ScopeFrame {
  pub insertion_point: InsertionPoint,
  locals: HashMap<String, LocalId>,
}

impl ScopeFrame {
  pub fn new(insertion_point: InsertionPoint) -> Self {
    Self {
      insertion_point,
      locals: HashMap::new(),
    }
  }

  /// Binds `name`, replacing (and returning) any previous binding.
  pub fn bind(
    &mut self,
    name: &str,
    local: LocalId,
  ) -> Option<LocalId> {
    self.locals.insert(name.to_string(), local)
  }

  pub fn lookup(
    &self,
    name: &str,
  ) -> Option<LocalId> {
    self.locals.get(name).copied()
  }

  pub fn len(&self) -> usize {
    self.locals.len()
  }

  pub fn is_empty(&self) -> bool {
    self.locals.is_empty()
  }
}

/// Stack of frames. Frames live in an arena; the stack holds indices into it.
///
/// Lookups only consult the top frame. A function body does not see the
/// variables of the routine it is declared in.
#[derive(Debug, Default)]
pub struct ScopeStack {
  frames: Store<ScopeFrame>,
  stack: Vec<ScopeFrameId>,
}

impl ScopeStack {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(
    &mut self,
    insertion_point: InsertionPoint,
  ) -> ScopeFrameId {
    let id = self.frames.alloc(ScopeFrame::new(insertion_point));
    self.stack.push(id);
    id
  }

  /// Drops the top frame and returns the new top, if any.
  pub fn pop(&mut self) -> Option<&ScopeFrame> {
    self.stack.pop();
    self.current()
  }

  pub fn current(&self) -> Option<&ScopeFrame> {
    self.stack.last().map(|id| self.frames.get(id))
  }

  pub fn current_mut(&mut self) -> Option<&mut ScopeFrame> {
    match self.stack.last() {
      Some(&id) => Some(self.frames.get_mut(id)),
      None => None,
    }
  }

  pub fn lookup(
    &self,
    name: &str,
  ) -> Option<LocalId> {
    self.current().and_then(|frame| frame.lookup(name))
  }

  pub fn depth(&self) -> usize {
    self.stack.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stack.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use mica_ir::{ModuleBuilder, Type};

  use super::*;

  fn two_points() -> (ModuleBuilder, InsertionPoint, InsertionPoint) {
    let mut builder = ModuleBuilder::new("scope");
    let outer = builder.declare_function("outer", Vec::new(), Type::Void);
    let inner = builder.declare_function("inner", Vec::new(), Type::Void);
    let outer_entry = builder.append_block(outer, "entry");
    let inner_entry = builder.append_block(inner, "entry");
    (builder, outer_entry, inner_entry)
  }

  #[test]
  fn lookup_only_sees_the_top_frame() {
    let (_, outer, inner) = two_points();
    let mut scopes = ScopeStack::new();

    scopes.push(outer);
    scopes.current_mut().unwrap().bind("x", LocalId::new(0));
    scopes.push(inner);

    assert_eq!(scopes.depth(), 2);
    assert_eq!(scopes.lookup("x"), None);

    let top = scopes.pop().unwrap();
    assert_eq!(top.insertion_point, outer);
    assert_eq!(scopes.lookup("x"), Some(LocalId::new(0)));
  }

  #[test]
  fn popping_the_last_frame_empties_the_stack() {
    let (_, outer, _) = two_points();
    let mut scopes = ScopeStack::new();

    scopes.push(outer);
    assert!(scopes.pop().is_none());
    assert!(scopes.is_empty());
    assert_eq!(scopes.lookup("x"), None);
  }

  #[test]
  fn popped_frames_stay_in_the_arena() {
    let (_, outer, inner) = two_points();
    let mut scopes = ScopeStack::new();

    let first = scopes.push(outer);
    scopes.pop();
    let second = scopes.push(inner);

    assert_ne!(first, second);
    assert_eq!(second.index(), 1);
    assert_eq!(scopes.current().map(|frame| frame.insertion_point), Some(inner));
  }

  #[test]
  fn rebinding_replaces_the_slot() {
    let (_, outer, _) = two_points();
    let mut frame = ScopeFrame::new(outer);

    assert_eq!(frame.bind("x", LocalId::new(0)), None);
    assert_eq!(frame.bind("x", LocalId::new(3)), Some(LocalId::new(0)));
    assert_eq!(frame.lookup("x"), Some(LocalId::new(3)));
    assert_eq!(frame.len(), 1);
  }
}
