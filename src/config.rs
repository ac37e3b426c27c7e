use crate::error::{Result, SpinlockError};

/// Step size of the reference run
pub const REFERENCE_STEP_SIZE: usize = 355;
/// Number of insertions in the reference run
pub const REFERENCE_CYCLES: u32 = 50_000_000;

/// Largest cycle count whose pool still fits the `u32` index space
/// (node indices run from 0 to `cycles` inclusive).
pub const MAX_CYCLES: u32 = u32::MAX - 1;

/// Validated simulation parameters.
///
/// Built from signed inputs so that negative values coming from the command
/// line are rejected here, before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinlockConfig {
    step_size: usize,
    cycles: u32,
}

impl Default for SpinlockConfig {
    fn default() -> Self {
        SpinlockConfig {
            step_size: REFERENCE_STEP_SIZE,
            cycles: REFERENCE_CYCLES,
        }
    }
}

impl SpinlockConfig {
    pub fn new(step_size: i64, cycles: i64) -> Result<Self> {
        if step_size <= 0 {
            return Err(SpinlockError::InvalidStepSize { step_size });
        }
        if cycles < 0 {
            return Err(SpinlockError::NegativeCycles { cycles });
        }

        let cycles = u32::try_from(cycles)
            .ok()
            .filter(|&c| c <= MAX_CYCLES)
            .ok_or(SpinlockError::TooManyCycles {
                cycles,
                max: MAX_CYCLES,
            })?;
        let step_size = usize::try_from(step_size)
            .map_err(|_| SpinlockError::InvalidStepSize { step_size })?;

        Ok(SpinlockConfig { step_size, cycles })
    }

    /// The reference run: step size 355, fifty million insertions.
    pub fn reference() -> Self {
        Self::default()
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Number of nodes the pool needs: one per insertion plus node 0.
    pub fn pool_size(&self) -> usize {
        self.cycles as usize + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_parameters() {
        let config = SpinlockConfig::new(3, 9).unwrap();
        assert_eq!(config.step_size(), 3);
        assert_eq!(config.cycles(), 9);
        assert_eq!(config.pool_size(), 10);
    }

    #[test]
    fn zero_cycles_is_valid() {
        let config = SpinlockConfig::new(1, 0).unwrap();
        assert_eq!(config.pool_size(), 1);
    }

    #[test]
    fn rejects_non_positive_step_size() {
        for step_size in [0, -1, i64::MIN] {
            match SpinlockConfig::new(step_size, 10) {
                Err(SpinlockError::InvalidStepSize { step_size: got }) => {
                    assert_eq!(got, step_size)
                }
                other => panic!("expected InvalidStepSize, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_negative_cycles() {
        assert!(matches!(
            SpinlockConfig::new(3, -1),
            Err(SpinlockError::NegativeCycles { cycles: -1 })
        ));
    }

    #[test]
    fn step_size_is_checked_before_cycles() {
        assert!(matches!(
            SpinlockConfig::new(0, -5),
            Err(SpinlockError::InvalidStepSize { .. })
        ));
    }

    #[test]
    fn rejects_cycles_beyond_index_space() {
        assert!(SpinlockConfig::new(3, MAX_CYCLES as i64).is_ok());

        for cycles in [u32::MAX as i64, i64::MAX] {
            assert!(matches!(
                SpinlockConfig::new(3, cycles),
                Err(SpinlockError::TooManyCycles { max: MAX_CYCLES, .. })
            ));
        }
    }

    #[test]
    fn default_is_reference_run() {
        let config = SpinlockConfig::reference();
        assert_eq!(config.step_size(), 355);
        assert_eq!(config.cycles(), 50_000_000);
        assert_eq!(config, SpinlockConfig::default());
    }
}
