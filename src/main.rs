mod error;
mod graphics;
mod loader;
mod math;
mod point;
mod scene;
mod state;
mod terminal;
mod widget;

use crate::error::{Error, Result};
use crate::graphics::PixelCanvas;
use crate::loader::{load_points, Sample};
use crate::math::ProjectionParams;
use crate::point::Point3D;
use crate::scene::SceneStyle;
use crate::state::RotationState;
use crate::widget::ScatterWidget;
use clap::Parser;
use env_logger::{Env, Target};
use log::LevelFilter;
use std::f64::consts::PI;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Plot an image's pixels as a rotatable cloud inside the RGB cube
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image whose pixels are plotted
    image: Option<PathBuf>,

    /// Plot a built-in sample image instead of a file
    #[arg(long, value_enum, conflicts_with = "image")]
    sample: Option<Sample>,

    /// Initial rotation around the vertical axis, in radians
    #[arg(
        long,
        default_value_t = PI / 6.0,
        allow_hyphen_values = true,
        value_parser = parse_finite
    )]
    yaw: f64,

    /// Initial rotation around the horizontal axis, in radians (clamped to ±π/2)
    #[arg(
        long,
        default_value_t = -PI / 8.0,
        allow_hyphen_values = true,
        value_parser = parse_finite
    )]
    pitch: f64,

    /// Point radius in canvas pixels
    #[arg(long, value_parser = parse_finite)]
    radius: Option<f64>,

    /// Axis stroke width in canvas pixels
    #[arg(long, value_parser = parse_finite)]
    line_width: Option<f64>,

    /// Render a single frame to this PNG file and exit
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Canvas width for --output
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Canvas height for --output
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Write log records to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Accepts any finite number; angles and sizes of NaN or infinity cannot be projected
fn parse_finite(value: &str) -> std::result::Result<f64, String> {
    let number: f64 = value.parse().map_err(|err| format!("{err}"))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("{value} is not a finite number"))
    }
}

impl Args {
    fn canvas_size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    fn interactive(&self) -> bool {
        self.output.is_none()
    }

    /// Scene style, with defaults scaled to the target: terminal cells are coarse pixels
    fn style(&self) -> SceneStyle {
        let (radius, line_width) = if self.interactive() {
            (1.0, 1.0)
        } else {
            let defaults = SceneStyle::default();
            (defaults.point_radius, defaults.axis_width)
        };
        SceneStyle {
            point_radius: self.radius.unwrap_or(radius),
            axis_width: self.line_width.unwrap_or(line_width),
            ..SceneStyle::default()
        }
    }

    fn load(&self) -> Result<Vec<Point3D>> {
        match (&self.image, self.sample) {
            (Some(path), _) => load_points(path),
            (None, Some(sample)) => {
                log::info!("using sample {sample:?}");
                Ok(sample.points())
            }
            (None, None) => Err(Error::NoInput),
        }
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(path) = &args.log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    } else if args.interactive() {
        // stderr shares the screen with the plot
        builder.filter_level(LevelFilter::Error);
    }
    builder.init();
    Ok(())
}

/// Renders one frame headlessly and saves it as a PNG
fn render_to_file(
    path: &Path,
    args: &Args,
    widget: &mut ScatterWidget,
    points: Vec<Point3D>,
) -> Result<()> {
    let (width, height) = args.canvas_size();
    let mut canvas = PixelCanvas::new(width, height);
    widget.plot(points, &mut canvas);
    canvas.to_image().save(path).map_err(|source| Error::Save {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote {}x{} frame to {}",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let points = args.load()?;
    let rotation = RotationState::new(args.yaw, args.pitch);
    let (width, height) = args.canvas_size();
    let params = ProjectionParams::for_canvas(width, height);
    let mut widget = ScatterWidget::new(rotation, params, args.style());

    match &args.output {
        Some(path) => render_to_file(path, &args, &mut widget, points),
        None => terminal::run(widget, points),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(&args) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("rgbcube").chain(args.iter().copied()))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rgbcube-{}-{name}", std::process::id()))
    }

    fn widget_for(args: &Args) -> ScatterWidget {
        let (width, height) = args.canvas_size();
        let params = ProjectionParams::for_canvas(width, height);
        ScatterWidget::new(RotationState::default(), params, args.style())
    }

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn negative_pitch_is_accepted() {
        let args = parse(&["--pitch", "-0.5", "photo.png"]).unwrap();
        assert_eq!(args.pitch, -0.5);
        assert_eq!(args.image, Some(PathBuf::from("photo.png")));
    }

    #[test]
    fn non_finite_angles_are_rejected() {
        for value in ["NaN", "inf", "-inf"] {
            assert!(parse(&["--yaw", value]).is_err(), "--yaw {value}");
            assert!(parse(&["--pitch", value]).is_err(), "--pitch {value}");
        }
        assert!(parse(&["--radius", "NaN"]).is_err());
        assert!(parse(&["--yaw", "abc"]).is_err());
    }

    #[test]
    fn canvas_must_have_pixels() {
        assert!(parse(&["--width", "0"]).is_err());
        assert!(parse(&["--height", "0"]).is_err());
        assert!(parse(&["--width", "-3"]).is_err());
        let args = parse(&["--width", "1", "--height", "2"]).unwrap();
        assert_eq!(args.canvas_size(), (1, 2));
    }

    #[test]
    fn sample_and_image_conflict() {
        assert!(parse(&["--sample", "solid-red", "photo.png"]).is_err());
    }

    #[test]
    fn style_defaults_follow_the_target() {
        let terminal = parse(&["--sample", "solid-red"]).unwrap();
        assert_eq!(terminal.style().point_radius, 1.0);

        let png = parse(&["--sample", "solid-red", "-o", "out.png"]).unwrap();
        assert_eq!(png.style().point_radius, 3.0);
        assert_eq!(png.style().axis_width, 2.0);

        let custom = parse(&["--sample", "solid-red", "--radius", "5"]).unwrap();
        assert_eq!(custom.style().point_radius, 5.0);
    }

    #[test]
    fn missing_input_is_reported() {
        let args = parse(&[]).unwrap();
        assert!(matches!(args.load(), Err(Error::NoInput)));
    }

    #[test]
    fn headless_render_writes_png() {
        let path = temp_path("frame.png");
        let args = parse(&[
            "--sample",
            "checkerboard-red-green",
            "--width",
            "64",
            "--height",
            "48",
        ])
        .unwrap();
        let points = args.load().unwrap();
        let mut widget = widget_for(&args);

        render_to_file(&path, &args, &mut widget, points).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();
        assert_eq!(image.dimensions(), (64, 48));
    }

    #[test]
    fn failed_write_names_the_output_file() {
        let path = temp_path("frame.txt");
        let args = parse(&["--sample", "solid-red", "--width", "8", "--height", "8"]).unwrap();
        let points = args.load().unwrap();
        let mut widget = widget_for(&args);

        let err = render_to_file(&path, &args, &mut widget, points).unwrap_err();

        match &err {
            Error::Save { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("expected a save error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("failed to write"));
    }
}
