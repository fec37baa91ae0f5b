use crate::error::{Error, Result};
use crate::point::{points_from_rgba, Point3D};
use clap::ValueEnum;
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Side length of generated sample images
const SAMPLE_SIZE: u32 = 64;
/// Checkerboard tile size in pixels
const TILE: u32 = 8;

/// Decodes an image file into one point per pixel
pub fn load_points(path: &Path) -> Result<Vec<Point3D>> {
    let image = image::open(path)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::EmptyImage(path.to_path_buf()));
    }
    log::info!(
        "loaded {} ({}x{}, {} points)",
        path.display(),
        image.width(),
        image.height(),
        image.width() as u64 * image.height() as u64
    );
    Ok(points_from_rgba(image.as_raw()))
}

/// Built-in test images
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    SolidRed,
    SolidGreen,
    SolidBlue,
    SolidCyan,
    SolidMagenta,
    SolidYellow,
    SolidWhite,
    SolidBlack,
    ShadesRed,
    ShadesGreen,
    ShadesBlue,
    ShadesGray,
    GradientBlackToWhite,
    GradientRedToBlue,
    GradientRedToGreen,
    GradientGreenToBlue,
    CheckerboardRedGreen,
    CheckerboardBlueYellow,
    CheckerboardBlackWhite,
}

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const CYAN: [u8; 3] = [0, 255, 255];
const MAGENTA: [u8; 3] = [255, 0, 255];
const YELLOW: [u8; 3] = [255, 255, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

impl Sample {
    /// Renders the sample as an RGBA image
    pub fn image(self) -> RgbaImage {
        match self {
            Sample::SolidRed => solid(RED),
            Sample::SolidGreen => solid(GREEN),
            Sample::SolidBlue => solid(BLUE),
            Sample::SolidCyan => solid(CYAN),
            Sample::SolidMagenta => solid(MAGENTA),
            Sample::SolidYellow => solid(YELLOW),
            Sample::SolidWhite => solid(WHITE),
            Sample::SolidBlack => solid(BLACK),
            Sample::ShadesRed => shades(RED),
            Sample::ShadesGreen => shades(GREEN),
            Sample::ShadesBlue => shades(BLUE),
            Sample::ShadesGray => shades(WHITE),
            Sample::GradientBlackToWhite => gradient(BLACK, WHITE),
            Sample::GradientRedToBlue => gradient(RED, BLUE),
            Sample::GradientRedToGreen => gradient(RED, GREEN),
            Sample::GradientGreenToBlue => gradient(GREEN, BLUE),
            Sample::CheckerboardRedGreen => checkerboard(RED, GREEN),
            Sample::CheckerboardBlueYellow => checkerboard(BLUE, YELLOW),
            Sample::CheckerboardBlackWhite => checkerboard(BLACK, WHITE),
        }
    }

    pub fn points(self) -> Vec<Point3D> {
        points_from_rgba(self.image().as_raw())
    }
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn solid(color: [u8; 3]) -> RgbaImage {
    RgbaImage::from_pixel(SAMPLE_SIZE, SAMPLE_SIZE, opaque(color))
}

/// Every intensity of one hue from black up, in reading order
fn shades(color: [u8; 3]) -> RgbaImage {
    let last = (SAMPLE_SIZE * SAMPLE_SIZE - 1) as f64;
    RgbaImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, y| {
        let t = (y * SAMPLE_SIZE + x) as f64 / last;
        opaque(lerp(BLACK, color, t))
    })
}

/// Left-to-right blend between two colors
fn gradient(from: [u8; 3], to: [u8; 3]) -> RgbaImage {
    let last = (SAMPLE_SIZE - 1) as f64;
    RgbaImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, _| {
        opaque(lerp(from, to, x as f64 / last))
    })
}

fn checkerboard(a: [u8; 3], b: [u8; 3]) -> RgbaImage {
    RgbaImage::from_fn(SAMPLE_SIZE, SAMPLE_SIZE, |x, y| {
        if (x / TILE + y / TILE) % 2 == 0 {
            opaque(a)
        } else {
            opaque(b)
        }
    })
}
