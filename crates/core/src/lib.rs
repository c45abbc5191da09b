// Jobboard Core - Listing state, ports and formatting
// NO infrastructure dependencies (hexagonal: adapters live in sibling crates)

pub mod application;
pub mod constants;
pub mod domain;
pub mod error;
pub mod port;
pub mod presentation;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
