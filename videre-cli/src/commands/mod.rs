//! CLI command implementations.
//!
//! - `start`: Resolve a process and run its server and app
//! - `validate`: Check the config file

pub mod start;
pub mod validate;

pub use start::StartCommand;
pub use validate::ValidateCommand;
