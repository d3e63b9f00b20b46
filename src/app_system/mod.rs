//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod tracing;
pub mod user_system;

pub use config::*;
pub use self::tracing::*;
pub use user_system::*;
