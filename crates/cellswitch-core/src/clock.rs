//! Step counter for the simulation.
//!
//! The clock is the single source of truth for the current step. It starts
//! at 0 and is advanced once at the start of every step pass, so the first
//! executed step is step 1.

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Step counter would overflow.
    #[error("step counter overflow: cannot advance beyond u64::MAX")]
    StepOverflow,
}

/// Simulation step counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepClock {
    step: u64,
}

impl StepClock {
    /// Create a clock at step 0.
    pub const fn new() -> Self {
        Self { step: 0 }
    }

    /// Advance the clock by one step. Returns the new step number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::StepOverflow`] if the counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.step = self.step.checked_add(1).ok_or(ClockError::StepOverflow)?;
        Ok(self.step)
    }

    /// Return the current step number.
    pub const fn step(&self) -> u64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        assert_eq!(StepClock::new().step(), 0);
    }

    #[test]
    fn clock_advances() {
        let mut clock = StepClock::new();
        assert_eq!(clock.advance().ok(), Some(1));
        assert_eq!(clock.advance().ok(), Some(2));
        assert_eq!(clock.step(), 2);
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = StepClock { step: u64::MAX };
        assert!(matches!(clock.advance(), Err(ClockError::StepOverflow)));
        assert_eq!(clock.step(), u64::MAX);
    }
}
