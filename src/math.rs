use crate::point::Point3D;
use crate::state::RotationState;

/// Smallest perspective depth the projector will divide by
pub const MIN_DEPTH: f64 = 1e-6;

/// Half the space diagonal of the unit cube, the farthest a centered point can sit from the origin
const CUBE_HALF_DIAGONAL: f64 = 0.866_025_403_784_438_6;

/// Fixed lens model for a canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Screen position the cube center projects to
    pub center: [f64; 2],
    /// Pixels per unit of the cube before perspective
    pub axis_len: f64,
    /// Focal length, also the depth of the cube center
    pub focal_length: f64,
    /// Point the rotation pivots around
    pub look_at: [f64; 3],
}

impl ProjectionParams {
    pub fn new(center: [f64; 2], axis_len: f64, focal_length: f64) -> Self {
        let params = ProjectionParams {
            center,
            axis_len,
            focal_length,
            look_at: [0.5, 0.5, 0.5],
        };
        if params.min_depth() <= 0.0 {
            log::warn!(
                "focal length {} is too short for axis length {}; depth will be clamped",
                focal_length,
                axis_len
            );
        }
        params
    }

    /// Lens sized to a `width` x `height` canvas
    pub fn for_canvas(width: usize, height: usize) -> Self {
        let axis_len = width.min(height) as f64 / 3.0;
        ProjectionParams::new(
            [width as f64 / 2.0, height as f64 / 2.0],
            axis_len,
            axis_len * 3.0,
        )
    }

    /// Lower bound of `pz` over every point of the unit cube at any rotation
    pub fn min_depth(&self) -> f64 {
        self.focal_length - self.axis_len * CUBE_HALF_DIAGONAL
    }
}

/// Rotation about the vertical axis
pub fn yaw_matrix(yaw: f64) -> [[f64; 3]; 3] {
    let (sin_y, cos_y) = yaw.sin_cos();
    [[cos_y, 0.0, -sin_y], [0.0, 1.0, 0.0], [sin_y, 0.0, cos_y]]
}

/// Rotation about the horizontal axis
pub fn pitch_matrix(pitch: f64) -> [[f64; 3]; 3] {
    let (sin_p, cos_p) = pitch.sin_cos();
    [[1.0, 0.0, 0.0], [0.0, cos_p, -sin_p], [0.0, sin_p, cos_p]]
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &[[f64; 3]; 3], vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Rotates a point around the look-at center, yaw first then pitch
pub fn rotate(point: &Point3D, rotation: &RotationState, params: &ProjectionParams) -> [f64; 3] {
    let centered = [
        point.r - params.look_at[0],
        point.g - params.look_at[1],
        point.b - params.look_at[2],
    ];
    let yawed = multiply_matrix_vector(&yaw_matrix(rotation.yaw), &centered);
    multiply_matrix_vector(&pitch_matrix(rotation.pitch), &yawed)
}

/// Projects a point of the RGB cube to canvas coordinates
pub fn project(point: &Point3D, rotation: &RotationState, params: &ProjectionParams) -> [f64; 2] {
    let [x, y, z] = rotate(point, rotation, params);
    let px = x * params.axis_len;
    let py = y * params.axis_len;
    let pz = (z * params.axis_len + params.focal_length).max(MIN_DEPTH);
    [
        params.center[0] + px * params.focal_length / pz,
        params.center[1] - py * params.focal_length / pz,
    ]
}
