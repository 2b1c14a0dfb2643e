//! Input Module
//!
//! Pointer tracking for click-versus-drag discrimination. The shell feeds
//! raw winit events in; the tracker answers whether a release was a click
//! (short travel) or the end of a camera drag.

/// Pixels of total travel below which a press/release pair counts as a click.
pub const CLICK_SLOP: f32 = 6.0;

/// Pointer state tracker.
///
/// Accumulates travel while the button is held so a release can be
/// classified as a click or a drag, and always knows the latest cursor
/// position for picking.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    x: f32,
    y: f32,
    pressed: bool,
    travel: f32,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest cursor position.
    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Record cursor motion; accumulates travel while pressed.
    pub fn moved(&mut self, x: f32, y: f32) {
        if self.pressed {
            self.travel += (x - self.x).hypot(y - self.y);
        }
        self.x = x;
        self.y = y;
    }

    /// Button pressed: travel accounting restarts.
    pub fn pressed(&mut self) {
        self.pressed = true;
        self.travel = 0.0;
    }

    /// Button released. Returns `true` when the press/release pair stayed
    /// within [`CLICK_SLOP`] and should be treated as a click.
    pub fn released(&mut self) -> bool {
        self.pressed = false;
        self.travel <= CLICK_SLOP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_is_click() {
        let mut pointer = PointerState::new();
        pointer.moved(100.0, 100.0);
        pointer.pressed();
        pointer.moved(102.0, 101.0);
        assert!(pointer.released());
    }

    #[test]
    fn test_long_drag_is_not_click() {
        let mut pointer = PointerState::new();
        pointer.moved(100.0, 100.0);
        pointer.pressed();
        pointer.moved(160.0, 100.0);
        assert!(!pointer.released());
    }

    #[test]
    fn test_travel_accumulates_back_and_forth() {
        let mut pointer = PointerState::new();
        pointer.moved(100.0, 100.0);
        pointer.pressed();
        // Out and back: net displacement zero, travel large
        pointer.moved(120.0, 100.0);
        pointer.moved(100.0, 100.0);
        assert!(!pointer.released());
    }

    #[test]
    fn test_motion_before_press_ignored() {
        let mut pointer = PointerState::new();
        pointer.moved(0.0, 0.0);
        pointer.moved(500.0, 500.0);
        pointer.pressed();
        assert!(pointer.released());
    }

    #[test]
    fn test_position_tracks_latest() {
        let mut pointer = PointerState::new();
        pointer.moved(42.0, 24.0);
        assert_eq!(pointer.position(), (42.0, 24.0));
    }
}
