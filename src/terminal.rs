use crate::error::Result;
use crate::graphics::{PixelCanvas, Rgb};
use crate::math::ProjectionParams;
use crate::point::Point3D;
use crate::widget::{PointerEvent, ScatterWidget};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Rows kept below the canvas for the status line
const STATUS_ROWS: u16 = 1;

/// Keyboard commands understood by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reset,
    ToggleDebug,
}

pub fn key_action(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Reset),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::ToggleDebug),
        _ => None,
    }
}

/// Canvas pixels available in a terminal of `cols` x `rows` cells
pub fn canvas_dims(cols: u16, rows: u16) -> (usize, usize) {
    let width = (cols as usize).max(1);
    let height = (rows.saturating_sub(STATUS_ROWS) as usize * 2).max(2);
    (width, height)
}

/// Current terminal size in cells
pub fn terminal_size() -> (u16, u16) {
    if let Some(size) = termsize::get() {
        return (size.cols, size.rows);
    }
    terminal::size().unwrap_or((80, 24))
}

/// Translates a mouse report into a pointer event on a canvas of `width` x `height` pixels
pub fn pointer_event(mouse: &MouseEvent, width: usize, height: usize) -> Option<PointerEvent> {
    let x = mouse.column as f64;
    let y = mouse.row as f64 * 2.0;
    let inside = (mouse.column as usize) < width && (mouse.row as usize) * 2 < height;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if inside => {
            Some(PointerEvent::PointerDown { x, y })
        }
        MouseEventKind::Drag(MouseButton::Left) if inside => {
            Some(PointerEvent::PointerMove { x, y })
        }
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::PointerLeave),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::PointerUp),
        _ => None,
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Writes the canvas two pixels per cell, followed by the status line
pub fn present<W: Write>(out: &mut W, canvas: &PixelCanvas, status: &str) -> io::Result<()> {
    let cell_rows = canvas.height().div_ceil(2);
    let mut current: Option<(Rgb, Rgb)> = None;

    for row in 0..cell_rows {
        queue!(out, MoveTo(0, row as u16))?;
        for x in 0..canvas.width() {
            let top = canvas.pixel(x, row * 2).unwrap_or(Rgb::BLACK);
            let bottom = canvas.pixel(x, row * 2 + 1).unwrap_or(Rgb::BLACK);
            if current != Some((top, bottom)) {
                queue!(
                    out,
                    SetForegroundColor(to_color(top)),
                    SetBackgroundColor(to_color(bottom))
                )?;
                current = Some((top, bottom));
            }
            queue!(out, Print(HALF_BLOCK))?;
        }
    }

    queue!(
        out,
        ResetColor,
        MoveTo(0, cell_rows as u16),
        Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    out.flush()
}

/// Puts the terminal into raw drawing mode and restores it when dropped
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            Show,
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

fn status_line(widget: &ScatterWidget, debug: bool, frame_time: Duration) -> String {
    if debug {
        let rotation = widget.rotation();
        format!(
            "{} {} | yaw {:.2} pitch {:.2} | {} points | frame {:.1} ms{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            rotation.yaw,
            rotation.pitch,
            widget.point_count(),
            frame_time.as_secs_f64() * 1000.0,
            if widget.is_dragging() { " | dragging" } else { "" }
        )
    } else {
        "drag to rotate | r reset | d debug | q quit".to_string()
    }
}

/// Plots `points` and rotates them interactively until the user quits
pub fn run(mut widget: ScatterWidget, points: Vec<Point3D>) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();

    let (cols, rows) = terminal_size();
    let (width, height) = canvas_dims(cols, rows);
    let mut canvas = PixelCanvas::new(width, height);
    widget.resize(ProjectionParams::for_canvas(width, height), &mut canvas);

    let started = Instant::now();
    widget.plot(points, &mut canvas);
    let mut frame_time = started.elapsed();
    let mut debug = false;
    let mut dirty = true;

    loop {
        if dirty {
            present(&mut stdout, &canvas, &status_line(&widget, debug, frame_time))?;
            dirty = false;
        }

        let event = event::read()?;
        let started = Instant::now();
        match event {
            Event::Key(key) => match key_action(&key) {
                Some(Action::Quit) => break,
                Some(Action::Reset) => {
                    widget.reset_rotation(&mut canvas);
                    frame_time = started.elapsed();
                    dirty = true;
                }
                Some(Action::ToggleDebug) => {
                    debug = !debug;
                    dirty = true;
                }
                None => {}
            },
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event(&mouse, canvas.width(), canvas.height()) {
                    let response = widget.handle_event(pointer, &mut canvas);
                    if response.repainted {
                        frame_time = started.elapsed();
                        dirty = true;
                    }
                }
            }
            Event::FocusLost => {
                widget.handle_event(PointerEvent::PointerLeave, &mut canvas);
            }
            Event::Resize(cols, rows) => {
                let (width, height) = canvas_dims(cols, rows);
                log::debug!("terminal resized to {cols}x{rows}, canvas {width}x{height}");
                canvas = PixelCanvas::new(width, height);
                widget.resize(ProjectionParams::for_canvas(width, height), &mut canvas);
                execute!(stdout, Clear(ClearType::All))?;
                dirty = true;
            }
            _ => {}
        }
    }

    Ok(())
}
