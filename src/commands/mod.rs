//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and the loaded configuration.

pub mod browse;
pub mod config;
pub mod run;

pub use browse::execute as browse;
pub use config::execute as config;
pub use run::execute as run;
