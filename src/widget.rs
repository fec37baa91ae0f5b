use crate::graphics::Surface;
use crate::math::ProjectionParams;
use crate::point::Point3D;
use crate::scene::{render_scene, SceneStyle};
use crate::state::{DragSession, RotationState};

/// Pointer input in canvas coordinates, mouse and touch alike
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    // the terminal frontend reports no touches
    /// `touches` is the number of fingers currently on the surface
    #[allow(dead_code)]
    TouchStart { x: f64, y: f64, touches: usize },
    #[allow(dead_code)]
    TouchMove { x: f64, y: f64, touches: usize },
    #[allow(dead_code)]
    TouchEnd,
}

/// What handling an event did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The surface was repainted
    pub repainted: bool,
    /// The platform's default scroll or gesture handling should be suppressed
    pub prevent_default: bool,
}

/// Scatter plot of the RGB cube that rotates while dragged
pub struct ScatterWidget {
    rotation: RotationState,
    initial_rotation: RotationState,
    /// `Some` while a drag is in progress
    drag: Option<DragSession>,
    /// Points of the last plot, kept for re-rendering
    points: Option<Vec<Point3D>>,
    params: ProjectionParams,
    style: SceneStyle,
}

impl ScatterWidget {
    pub fn new(rotation: RotationState, params: ProjectionParams, style: SceneStyle) -> Self {
        ScatterWidget {
            rotation,
            initial_rotation: rotation,
            drag: None,
            points: None,
            params,
            style,
        }
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn point_count(&self) -> usize {
        self.points.as_ref().map_or(0, Vec::len)
    }

    /// Replaces the cached points and draws them
    pub fn plot<S: Surface + ?Sized>(&mut self, points: Vec<Point3D>, surface: &mut S) {
        log::debug!("plotting {} points", points.len());
        self.points = Some(points);
        self.repaint(surface);
    }

    /// Draws the cached points, or nothing at all before the first plot
    pub fn repaint<S: Surface + ?Sized>(&self, surface: &mut S) -> bool {
        match &self.points {
            Some(points) => {
                render_scene(surface, points, &self.rotation, &self.params, &self.style);
                true
            }
            None => false,
        }
    }

    /// Swaps the lens after the canvas changed size
    pub fn resize<S: Surface + ?Sized>(&mut self, params: ProjectionParams, surface: &mut S) {
        self.params = params;
        self.repaint(surface);
    }

    /// Returns to the rotation the widget started with
    pub fn reset_rotation<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.drag = None;
        self.rotation = self.initial_rotation;
        self.repaint(surface);
    }

    /// Runs one input event through the drag state machine
    pub fn handle_event<S: Surface + ?Sized>(
        &mut self,
        event: PointerEvent,
        surface: &mut S,
    ) -> EventResponse {
        match event {
            PointerEvent::PointerDown { x, y } => {
                self.begin_drag(x, y);
                EventResponse::default()
            }
            PointerEvent::TouchStart { x, y, touches } => {
                if touches == 1 {
                    self.begin_drag(x, y);
                }
                EventResponse::default()
            }
            PointerEvent::PointerMove { x, y } => EventResponse {
                repainted: self.drag_to(x, y, surface),
                prevent_default: false,
            },
            PointerEvent::TouchMove { x, y, touches } => {
                if touches != 1 || self.drag.is_none() {
                    return EventResponse::default();
                }
                EventResponse {
                    repainted: self.drag_to(x, y, surface),
                    prevent_default: true,
                }
            }
            PointerEvent::PointerUp | PointerEvent::PointerLeave | PointerEvent::TouchEnd => {
                if self.drag.take().is_some() {
                    log::trace!("drag ended at {:?}", self.rotation);
                }
                EventResponse::default()
            }
        }
    }

    fn begin_drag(&mut self, x: f64, y: f64) {
        log::trace!("drag started at ({x}, {y})");
        self.drag = Some(DragSession::begin(x, y, self.rotation));
    }

    fn drag_to<S: Surface + ?Sized>(&mut self, x: f64, y: f64, surface: &mut S) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        self.rotation = session.rotation_at(x, y);
        self.repaint(surface)
    }
}
