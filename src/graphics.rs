/// An opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    /// Scales normalized channels to the display range, rounding to nearest
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        let scale = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb(scale(r), scale(g), scale(b))
    }
}

/// Immediate-mode 2D drawing primitives
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Rgb, width: f64);
    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Rgb);
}

/// Software raster target holding RGBA pixels
#[derive(Debug, Clone, PartialEq)]
pub struct PixelCanvas {
    width: usize,
    height: usize,
    pixel_data: Vec<u8>,
}

impl PixelCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        PixelCanvas {
            width,
            height,
            pixel_data: vec![0u8; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Copies the canvas into an `image` buffer for encoding
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let offset = (y as usize * self.width + x as usize) * 4;
            let px = &self.pixel_data[offset..offset + 4];
            image::Rgba([px[0], px[1], px[2], px[3]])
        })
    }

    /// Color at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some(Rgb(
            self.pixel_data[offset],
            self.pixel_data[offset + 1],
            self.pixel_data[offset + 2],
        ))
    }

    fn put_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        if x >= 0 && x < self.width as isize && y >= 0 && y < self.height as isize {
            let offset = (y as usize * self.width + x as usize) * 4;
            self.pixel_data[offset] = color.0;
            self.pixel_data[offset + 1] = color.1;
            self.pixel_data[offset + 2] = color.2;
            self.pixel_data[offset + 3] = 255;
        }
    }

    /// Paints every pixel whose center lies within `radius` of `center`
    fn stamp(&mut self, center: [f64; 2], radius: f64, color: Rgb) {
        if !center[0].is_finite() || !center[1].is_finite() {
            return;
        }
        let min_x = (center[0] - radius).floor().max(0.0) as isize;
        let max_x = (center[0] + radius).ceil().min(self.width as f64 - 1.0) as isize;
        let min_y = (center[1] - radius).floor().max(0.0) as isize;
        let max_y = (center[1] + radius).ceil().min(self.height as f64 - 1.0) as isize;
        let radius_sq = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let dx = x as f64 + 0.5 - center[0];
                let dy = y as f64 + 0.5 - center[1];
                if dx * dx + dy * dy <= radius_sq {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn clear(&mut self, color: Rgb) {
        for px in self.pixel_data.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.0, color.1, color.2, 255]);
        }
    }

    /// Bresenham's algorithm, widened by stamping a disc at each step
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Rgb, width: f64) {
        if !from.iter().chain(to.iter()).all(|c| c.is_finite()) {
            return;
        }
        let (mut x0, mut y0, x1, y1) = (
            from[0].floor() as isize,
            from[1].floor() as isize,
            to[0].floor() as isize,
            to[1].floor() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy
        let half = width / 2.0;

        loop {
            if width <= 1.0 {
                self.put_pixel(x0, y0, color);
            } else {
                self.stamp([x0 as f64 + 0.5, y0 as f64 + 0.5], half, color);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Rgb) {
        if radius < 1.0 {
            // too small to cover a pixel center reliably; paint the pixel it lands in
            if center[0].is_finite() && center[1].is_finite() {
                self.put_pixel(center[0].floor() as isize, center[1].floor() as isize, color);
            }
        } else {
            self.stamp(center, radius, color);
        }
    }
}

/// A draw call captured by [`RecordingSurface`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Line {
        from: [f64; 2],
        to: [f64; 2],
        color: Rgb,
        width: f64,
    },
    Disc {
        center: [f64; 2],
        radius: f64,
        color: Rgb,
    },
}

/// Surface that only remembers what it was asked to draw
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn lines(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .collect()
    }

    pub fn discs(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Disc { .. }))
            .collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Rgb, width: f64) {
        self.calls.push(DrawCall::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Rgb) {
        self.calls.push(DrawCall::Disc {
            center,
            radius,
            color,
        });
    }
}
