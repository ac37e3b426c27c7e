pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod node_pool;
pub mod shortcut;
pub mod spinlock;

pub use config::SpinlockConfig;
pub use error::{Result, SpinlockError};
pub use spinlock::{SpinlockBuffer, SpinlockOutcome};
