use std::f64::consts::{FRAC_PI_2, PI};

/// Drag sensitivity in radians per pixel, used on both axes
pub const SENSITIVITY: f64 = 0.01;

/// Current orientation of the plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Rotation around the vertical axis, unbounded
    pub yaw: f64,
    /// Rotation around the horizontal axis, kept within [-π/2, π/2]
    pub pitch: f64,
}

impl RotationState {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        RotationState {
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Rotation reached by dragging `delta` pixels away from `self`
    pub fn dragged_by(&self, delta: [f64; 2]) -> Self {
        RotationState {
            yaw: self.yaw + delta[0] * SENSITIVITY,
            pitch: clamp_pitch(self.pitch + delta[1] * SENSITIVITY),
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        RotationState::new(PI / 6.0, -PI / 8.0)
    }
}

pub fn clamp_pitch(pitch: f64) -> f64 {
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// An in-progress drag: where it started and the rotation at that moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub origin: [f64; 2],
    pub start: RotationState,
}

impl DragSession {
    pub fn begin(x: f64, y: f64, rotation: RotationState) -> Self {
        DragSession {
            origin: [x, y],
            start: rotation,
        }
    }

    /// Rotation for the pointer now being at `(x, y)`
    pub fn rotation_at(&self, x: f64, y: f64) -> RotationState {
        self.start.dragged_by([x - self.origin[0], y - self.origin[1]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_clamps_pitch() {
        assert_eq!(RotationState::new(0.0, 10.0).pitch, FRAC_PI_2);
        assert_eq!(RotationState::new(0.0, -10.0).pitch, -FRAC_PI_2);
    }

    #[test]
    fn drag_is_measured_from_origin_not_last_move() {
        let session = DragSession::begin(10.0, 10.0, RotationState::new(0.0, 0.0));
        let _ = session.rotation_at(50.0, 10.0);
        let r = session.rotation_at(30.0, 15.0);
        assert_relative_eq!(r.yaw, 0.2, epsilon = 1e-12);
        assert_relative_eq!(r.pitch, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn yaw_is_not_wrapped() {
        let r = RotationState::new(0.0, 0.0).dragged_by([1000.0, 0.0]);
        assert_relative_eq!(r.yaw, 10.0, epsilon = 1e-12);
    }
}
