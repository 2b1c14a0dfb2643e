//! Castle Gate
//!
//! Binary open/closed intent with a continuous progress value eased toward
//! the intent at constant rate. Progress drives the drawbridge rotation in
//! the scene builder.

/// Seconds for a full open or close sweep.
pub const GATE_DURATION: f32 = 1.5;

/// Progress band inside which the gate stops adjusting.
const SETTLE_EPSILON: f32 = 1e-3;

/// Gate state: open intent plus eased progress in [0, 1].
///
/// `progress` 0.0 is fully closed, 1.0 fully open.
#[derive(Debug, Clone)]
pub struct Gate {
    open_intent: bool,
    progress: f32,
}

impl Gate {
    /// A closed, settled gate.
    pub fn new() -> Self {
        Self {
            open_intent: false,
            progress: 0.0,
        }
    }

    /// Flip the open/close intent.
    pub fn toggle(&mut self) {
        self.open_intent = !self.open_intent;
    }

    pub fn is_opening(&self) -> bool {
        self.open_intent
    }

    /// Eased progress in [0, 1].
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// True once progress has settled at its target.
    pub fn is_settled(&self) -> bool {
        let target = if self.open_intent { 1.0 } else { 0.0 };
        (self.progress - target).abs() <= SETTLE_EPSILON
    }

    /// Move progress toward the intent at constant rate, clamped to [0, 1].
    pub fn update(&mut self, delta: f32) {
        if self.is_settled() {
            return;
        }
        let step = delta / GATE_DURATION;
        if self.open_intent {
            self.progress = (self.progress + step).clamp(0.0, 1.0);
        } else {
            self.progress = (self.progress - step).clamp(0.0, 1.0);
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed_and_settled() {
        let gate = Gate::new();
        assert_eq!(gate.progress(), 0.0);
        assert!(!gate.is_opening());
        assert!(gate.is_settled());
    }

    #[test]
    fn test_opens_at_constant_rate() {
        let mut gate = Gate::new();
        gate.toggle();
        gate.update(GATE_DURATION / 2.0);
        assert!((gate.progress() - 0.5).abs() < 1e-4);
        assert!(!gate.is_settled());
    }

    #[test]
    fn test_progress_clamps_at_one() {
        let mut gate = Gate::new();
        gate.toggle();
        gate.update(GATE_DURATION * 10.0);
        assert_eq!(gate.progress(), 1.0);
        assert!(gate.is_settled());
    }

    #[test]
    fn test_close_reverses_midway() {
        let mut gate = Gate::new();
        gate.toggle();
        gate.update(GATE_DURATION * 0.4);
        let mid = gate.progress();

        gate.toggle();
        gate.update(GATE_DURATION * 0.2);
        assert!(gate.progress() < mid);
    }

    #[test]
    fn test_settled_gate_ignores_updates() {
        let mut gate = Gate::new();
        gate.update(100.0);
        assert_eq!(gate.progress(), 0.0);
    }
}
