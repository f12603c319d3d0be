pub mod context;
pub mod lowering;
pub mod scope;

pub use context::{CodegenOptions, CodegenOutput, TranslationContext};
pub use lowering::lower_program;
pub use scope::{ScopeFrame, ScopeFrameId, ScopeStack};
