mod error;
mod pipeline;

pub use error::DriverError;
pub use pipeline::{check_file, compile, execute, run_file, Compilation};
