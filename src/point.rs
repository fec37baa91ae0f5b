/// A pixel color treated as a position inside the unit RGB cube
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Point3D {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Point3D { r, g, b }
    }

    /// Normalizes an 8-bit color into [0,1] per channel
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Point3D {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

/// Converts a row-major RGBA8 buffer into one point per pixel, ignoring alpha
pub fn points_from_rgba(pixel_data: &[u8]) -> Vec<Point3D> {
    pixel_data
        .chunks_exact(4)
        .map(|px| Point3D::from_rgb8(px[0], px[1], px[2]))
        .collect()
}
