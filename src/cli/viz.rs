//! Terminal visualization using braille graphics
//!
//! Draws fitted point sets and plane traces with Unicode braille characters.
//! This is an output sink only: it reads `FitResult` snapshots and returns
//! text.

use drawille::Canvas;

use crate::cli::helpers::signed;
use crate::core::fit::{FitResult, Plane};

/// Default canvas size in braille pixels (2×4 pixels per character)
pub const PLOT_WIDTH: u32 = 100;
pub const PLOT_HEIGHT: u32 = 40;

/// Linear map from a data range onto `0..pixels`
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
    pixels: u32,
}

impl Axis {
    fn new(min: f64, max: f64, pixels: u32) -> Self {
        Self { min, max, pixels }
    }

    fn map(&self, value: f64) -> u32 {
        let last = self.pixels.saturating_sub(1) as f64;
        let range = self.max - self.min;
        if !range.is_finite() || range <= f64::EPSILON {
            return (last / 2.0) as u32;
        }
        (((value - self.min) / range) * last).round().clamp(0.0, last) as u32
    }
}

/// Set every pixel along a straight line; `step` > 1 gives a dotted line
fn draw_line(canvas: &mut Canvas, from: (u32, u32), to: (u32, u32), step: usize) {
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (x1, y1) = (to.0 as f64, to.1 as f64);
    let n = (x1 - x0).abs().max((y1 - y0).abs()).max(1.0) as usize;
    for i in (0..=n).step_by(step.max(1)) {
        let t = i as f64 / n as f64;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        canvas.set(x.round() as u32, y.round() as u32);
    }
}

/// Top view of the points inside their XY bounding box
pub fn render_top_view(result: &FitResult, width: u32, height: u32) -> String {
    let mut canvas = Canvas::new(width, height);
    let span = &result.span;
    let ax = Axis::new(span.min_x, span.max_x, width);
    let ay = Axis::new(span.min_y, span.max_y, height);

    let (left, right) = (0, width.saturating_sub(1));
    let (top, bottom) = (0, height.saturating_sub(1));
    draw_line(&mut canvas, (left, top), (right, top), 2);
    draw_line(&mut canvas, (left, bottom), (right, bottom), 2);
    draw_line(&mut canvas, (left, top), (left, bottom), 2);
    draw_line(&mut canvas, (right, top), (right, bottom), 2);

    for p in &result.points {
        let px = ax.map(p.x);
        // Y grows upwards on screen
        let py = bottom - ay.map(p.y);
        canvas.set(px, py);
        canvas.set(px.saturating_sub(1), py);
        canvas.set((px + 1).min(right), py);
    }

    let mut out = String::new();
    out.push_str("Top view (X →, Y ↑):\n");
    out.push_str(&canvas.frame());
    out.push_str(&format!(
        "\n  X: [{:.3}, {:.3}]  Y: [{:.3}, {:.3}] mm",
        span.min_x, span.max_x, span.min_y, span.max_y
    ));
    out
}

/// Plane height at the ends of the X range, along `y`
fn plane_trace(plane: &Plane, min_x: f64, max_x: f64, y: f64) -> Option<(f64, f64)> {
    Some((plane.z_at(min_x, y)?, plane.z_at(max_x, y)?))
}

/// Side profile: point heights against X with the plane trace(s) at the centre Y
///
/// The overlay plane is drawn over the primary result's X range as it is,
/// without shifting it to the primary's centre.
pub fn render_profile(
    primary: &FitResult,
    overlay: Option<&FitResult>,
    width: u32,
    height: u32,
) -> String {
    let span = &primary.span;
    let (_, centre_y) = primary.centre;

    let primary_trace = plane_trace(&primary.plane, span.min_x, span.max_x, centre_y);
    let overlay_trace =
        overlay.and_then(|o| plane_trace(&o.plane, span.min_x, span.max_x, centre_y));

    let mut min_z = f64::INFINITY;
    let mut max_z = f64::NEG_INFINITY;
    let traces = primary_trace.iter().chain(overlay_trace.iter());
    let heights = primary
        .points
        .iter()
        .map(|p| p.z)
        .chain(traces.flat_map(|&(a, b)| [a, b]));
    for z in heights {
        min_z = min_z.min(z);
        max_z = max_z.max(z);
    }

    let mut canvas = Canvas::new(width, height);
    let ax = Axis::new(span.min_x, span.max_x, width);
    let az = Axis::new(min_z, max_z, height);
    let bottom = height.saturating_sub(1);
    let right = width.saturating_sub(1);

    if let Some((z0, z1)) = primary_trace {
        draw_line(&mut canvas, (0, bottom - az.map(z0)), (right, bottom - az.map(z1)), 1);
    }
    if let Some((z0, z1)) = overlay_trace {
        draw_line(&mut canvas, (0, bottom - az.map(z0)), (right, bottom - az.map(z1)), 3);
    }
    for p in &primary.points {
        let px = ax.map(p.x);
        let py = bottom - az.map(p.z);
        canvas.set(px, py);
        canvas.set(px, py.saturating_sub(1));
        canvas.set(px, (py + 1).min(bottom));
    }

    let mut out = String::new();
    out.push_str(&format!("Profile at Y = {:.3} (X →, Z ↑):\n", centre_y));
    out.push_str(&canvas.frame());
    if min_z.is_finite() && max_z.is_finite() {
        out.push_str(&format!(
            "\n  Z: [{}, {}] mm",
            signed(min_z, 3),
            signed(max_z, 3)
        ));
    }
    out.push_str("\n  ── fitted plane");
    if overlay_trace.is_some() {
        out.push_str("   ⠄⠄ reference plane");
    }
    out
}

/// Complete plot: top view and profile
pub fn render_plot(primary: &FitResult, overlay: Option<&FitResult>) -> String {
    let mut out = render_top_view(primary, PLOT_WIDTH, PLOT_HEIGHT);
    out.push_str("\n\n");
    out.push_str(&render_profile(primary, overlay, PLOT_WIDTH, PLOT_HEIGHT));
    out
}
