pub mod commands;
pub mod error;
pub mod render;

pub use commands::{execute, AddArgs, Command};
pub use error::CliError;
