//! Successor of 0 without building the sequence.
//!
//! Every insertion lands strictly after index 0, so 0 never moves. Its
//! successor is whichever value was most recently inserted at index 1, and
//! finding that only requires tracking the insertion index.

use tracing::debug;

use crate::config::SpinlockConfig;

/// Value that follows 0 once all insertions described by `config` are done.
pub fn value_after_zero(config: SpinlockConfig) -> u32 {
    let step_size = config.step_size();
    let mut position = 0usize;
    let mut after_zero = 0;

    for value in 1..=config.cycles() {
        // Sequence length before this insertion equals `value`
        position = (position + step_size) % value as usize + 1;
        if position == 1 {
            after_zero = value;
        }
    }

    debug!(
        step_size,
        cycles = config.cycles(),
        after_zero,
        "Shortcut solver complete"
    );

    after_zero
}
