//! Input module - key mapping and the simulated accelerometer
//!
//! The terminal has no tilt sensor, so arrow keys nudge a persistent
//! simulated sample. The simulator is the sensor stand-in: the game loop
//! forwards its sample to the core exactly like a real accelerometer would
//! deliver one, orientation included.

pub mod map;

pub use map::{handle_key_event, should_quit, InputEvent, TILT_STEP};

use tui_pairs_types::DeviceOrientation;

/// Persistent simulated accelerometer sample in the device frame.
///
/// Components are clamped to [-1, 1]; `reset` recenters the table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TiltSimulator {
    ax: f32,
    ay: f32,
}

impl TiltSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an arrow-key nudge.
    pub fn nudge(&mut self, dx: f32, dy: f32) {
        self.ax = (self.ax + dx).clamp(-1.0, 1.0);
        self.ay = (self.ay + dy).clamp(-1.0, 1.0);
    }

    /// Recenter to a flat table.
    pub fn reset(&mut self) {
        self.ax = 0.0;
        self.ay = 0.0;
    }

    /// Current sample: (ax, ay, orientation). The terminal is always
    /// upright.
    pub fn sample(&self) -> (f32, f32, DeviceOrientation) {
        (self.ax, self.ay, DeviceOrientation::Upright)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_accumulates_and_clamps() {
        let mut tilt = TiltSimulator::new();
        tilt.nudge(0.25, 0.0);
        tilt.nudge(0.25, -0.5);
        let (ax, ay, orientation) = tilt.sample();
        assert_eq!((ax, ay), (0.5, -0.5));
        assert_eq!(orientation, DeviceOrientation::Upright);

        for _ in 0..10 {
            tilt.nudge(0.25, 0.25);
        }
        let (ax, ay, _) = tilt.sample();
        assert_eq!((ax, ay), (1.0, 1.0));
    }

    #[test]
    fn test_reset_recenters() {
        let mut tilt = TiltSimulator::new();
        tilt.nudge(1.0, -1.0);
        tilt.reset();
        let (ax, ay, _) = tilt.sample();
        assert_eq!((ax, ay), (0.0, 0.0));
    }
}
