//! Register IR for Mica.
//!
//! Routines are lists of basic blocks in three-address form. Storage lives in
//! typed locals (`%n`), intermediate values in temps (`tn`). Parameters are
//! the implicit temps `t0..tn`.

pub mod arena;
pub mod block;
pub mod builder;
pub mod display;
pub mod host;
pub mod instr;
pub mod module;
pub mod operand;
pub mod types;
pub mod verify;

pub use arena::{Id, Store};
pub use block::{Block, Terminator};
pub use builder::{InsertionPoint, ModuleBuilder};
pub use display::print_module;
pub use instr::{BinaryOp, Instr};
pub use module::{FunctionIr, Linkage, LocalData, Module, ParamData, TempData};
pub use operand::{ConstValue, Operand};
pub use types::Type;
pub use verify::{verify_module, ModuleVerifier, VerifyError, VerifyResult};

pub type TempId = Id<TempData>;
pub type LocalId = Id<LocalData>;
pub type BlockId = Id<Block>;
pub type FunctionId = Id<FunctionIr>;
