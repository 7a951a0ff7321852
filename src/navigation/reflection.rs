/// Breathing cycle of the Reflection screen
///
/// Self-contained: the phases advance on a timer while the screen is open
/// and never cause a screen transition.

use std::time::Duration;

use serde::Serialize;

/// Time spent in each phase
pub const BREATH_PHASE_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
    Rest,
}

impl BreathPhase {
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Rest,
            BreathPhase::Rest => BreathPhase::Inhale,
        }
    }
}

/// Phase tracker driven by elapsed time
#[derive(Debug, Clone)]
pub struct BreathCycle {
    phase: BreathPhase,
    /// Time already spent in the current phase
    elapsed: Duration,
}

impl BreathCycle {
    pub fn new() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            elapsed: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Advance by `dt`, stepping through as many phases as have elapsed
    pub fn advance(&mut self, dt: Duration) -> BreathPhase {
        self.elapsed += dt;
        while self.elapsed >= BREATH_PHASE_DURATION {
            self.elapsed -= BREATH_PHASE_DURATION;
            self.phase = self.phase.next();
        }
        self.phase
    }
}

impl Default for BreathCycle {
    fn default() -> Self {
        Self::new()
    }
}
