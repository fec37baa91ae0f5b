use crate::graphics::{Rgb, Surface};
use crate::math::{project, ProjectionParams};
use crate::point::Point3D;
use crate::state::RotationState;

/// Visual constants for a plotting session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub point_radius: f64,
    pub axis_width: f64,
    pub background: Rgb,
}

impl Default for SceneStyle {
    fn default() -> Self {
        SceneStyle {
            point_radius: 3.0,
            axis_width: 2.0,
            background: Rgb::BLACK,
        }
    }
}

/// Reference axes: endpoint of each unit axis and its stroke color
const AXES: [(Point3D, Rgb); 3] = [
    (Point3D::new(1.0, 0.0, 0.0), Rgb::RED),
    (Point3D::new(0.0, 1.0, 0.0), Rgb::GREEN),
    (Point3D::new(0.0, 0.0, 1.0), Rgb::BLUE),
];

const ORIGIN: Point3D = Point3D::new(0.0, 0.0, 0.0);

/// Repaints the whole surface: background, axes, then one disc per point in input order
pub fn render_scene<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Point3D],
    rotation: &RotationState,
    params: &ProjectionParams,
    style: &SceneStyle,
) {
    surface.clear(style.background);

    let origin = project(&ORIGIN, rotation, params);
    for (end, color) in AXES.iter() {
        let tip = project(end, rotation, params);
        surface.stroke_line(origin, tip, *color, style.axis_width);
    }

    for point in points {
        let center = project(point, rotation, params);
        let color = Rgb::from_unit(point.r, point.g, point.b);
        surface.fill_disc(center, style.point_radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{DrawCall, PixelCanvas, RecordingSurface};
    use crate::point::points_from_rgba;

    fn setup() -> (ProjectionParams, RotationState, SceneStyle) {
        (
            ProjectionParams::for_canvas(120, 90),
            RotationState::default(),
            SceneStyle::default(),
        )
    }

    #[test]
    fn two_pixel_image_draws_two_discs_and_three_axes() {
        let (params, rotation, style) = setup();
        let points = points_from_rgba(&[255, 0, 0, 0, 0, 255, 0, 255]);
        let mut surface = RecordingSurface::default();

        render_scene(&mut surface, &points, &rotation, &params, &style);

        assert_eq!(surface.calls.len(), 6);
        assert_eq!(surface.calls[0], DrawCall::Clear(Rgb::BLACK));
        let line_colors: Vec<Rgb> = surface
            .lines()
            .iter()
            .map(|c| match c {
                DrawCall::Line { color, .. } => *color,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(line_colors, vec![Rgb::RED, Rgb::GREEN, Rgb::BLUE]);
        let disc_colors: Vec<Rgb> = surface
            .discs()
            .iter()
            .map(|c| match c {
                DrawCall::Disc { color, .. } => *color,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(disc_colors, vec![Rgb(255, 0, 0), Rgb(0, 255, 0)]);
    }

    #[test]
    fn axes_are_drawn_without_points() {
        let (params, rotation, style) = setup();
        let mut surface = RecordingSurface::default();
        render_scene(&mut surface, &[], &rotation, &params, &style);
        assert_eq!(surface.lines().len(), 3);
        assert!(surface.discs().is_empty());
    }

    #[test]
    fn axes_share_the_projected_origin() {
        let (params, rotation, style) = setup();
        let mut surface = RecordingSurface::default();
        render_scene(&mut surface, &[], &rotation, &params, &style);
        let origin = project(&ORIGIN, &rotation, &params);
        for call in surface.lines() {
            if let DrawCall::Line { from, width, .. } = call {
                assert_eq!(*from, origin);
                assert_eq!(*width, style.axis_width);
            }
        }
    }

    #[test]
    fn black_point_fills_black() {
        let (params, rotation, style) = setup();
        let mut surface = RecordingSurface::default();
        render_scene(&mut surface, &[ORIGIN], &rotation, &params, &style);
        assert!(matches!(
            surface.discs()[0],
            DrawCall::Disc { color: Rgb(0, 0, 0), .. }
        ));
    }

    #[test]
    fn rendering_twice_is_pixel_identical() {
        let (params, rotation, style) = setup();
        let points = points_from_rgba(&[10, 200, 30, 255, 255, 255, 0, 255, 90, 0, 140, 255]);
        let mut first = PixelCanvas::new(120, 90);
        let mut second = PixelCanvas::new(120, 90);

        render_scene(&mut first, &points, &rotation, &params, &style);
        render_scene(&mut second, &points, &rotation, &params, &style);
        let once = first.clone();
        render_scene(&mut first, &points, &rotation, &params, &style);

        assert_eq!(first, second);
        assert_eq!(first, once);
    }

    #[test]
    fn point_disc_lands_on_its_projection() {
        let (params, rotation, style) = setup();
        let point = Point3D::new(0.25, 0.75, 0.5);
        let mut canvas = PixelCanvas::new(120, 90);
        render_scene(&mut canvas, &[point], &rotation, &params, &style);
        let [x, y] = project(&point, &rotation, &params);
        assert_eq!(
            canvas.pixel(x as usize, y as usize),
            Some(Rgb::from_unit(0.25, 0.75, 0.5))
        );
    }
}
