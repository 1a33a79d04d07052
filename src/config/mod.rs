/// Main configuration module.
///
/// Re-exports submodules for server and game session configuration.
pub mod server;
pub mod session;

pub use server::{ConfigError, ServerConfig};
