use std::collections::TryReserveError;

use thiserror::Error;

/// Errors raised while configuring or building a spinlock buffer.
#[derive(Error, Debug)]
pub enum SpinlockError {
    #[error("step size must be positive, got {step_size}")]
    InvalidStepSize { step_size: i64 },

    #[error("cycle count must not be negative, got {cycles}")]
    NegativeCycles { cycles: i64 },

    #[error("cycle count {cycles} exceeds the maximum of {max}")]
    TooManyCycles { cycles: i64, max: u32 },

    #[error("failed to allocate a pool of {nodes} nodes")]
    Allocation {
        nodes: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("node pool is full ({capacity} nodes)")]
    PoolExhausted { capacity: usize },
}

pub type Result<T> = std::result::Result<T, SpinlockError>;
