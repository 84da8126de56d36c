//! Viewport and coordinate transformation for canvas rendering.
//!
//! Maps between panel millimeters (origin at the panel's top-left corner, Y
//! down) and viewport pixels. A [`CanvasTransform`] is a short-lived value:
//! it must be recomputed whenever the viewport size, zoom, pan or panel
//! dimensions change.

use std::fmt;

use serde::{Deserialize, Serialize};

use eurorack_panel_core::constants::{DEFAULT_CANVAS_PADDING_PX, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

use crate::model::Point;

/// Inputs for [`compute_canvas_transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransformParams {
    pub canvas_size_px: Point,
    pub panel_size_mm: Point,
    pub zoom: f64,
    pub pan: Point,
    pub padding_px: f64,
}

/// Panel-to-screen mapping for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasTransform {
    /// Screen position of the panel's top-left corner.
    pub origin: Point,
    /// Pixels per millimeter.
    pub scale: f64,
    pub panel_size_px: Point,
}

/// Fits the panel into the viewport minus padding, applies zoom, and centers
/// it offset by `pan`.
pub fn compute_canvas_transform(params: &CanvasTransformParams) -> CanvasTransform {
    let panel_w = params.panel_size_mm.x.max(1.0);
    let panel_h = params.panel_size_mm.y.max(1.0);
    let usable_w = (params.canvas_size_px.x - params.padding_px * 2.0).max(0.0);
    let usable_h = (params.canvas_size_px.y - params.padding_px * 2.0).max(0.0);

    let base_scale = (usable_w / panel_w).min(usable_h / panel_h);
    let scale = base_scale * params.zoom;
    let panel_size_px = Point::new(panel_w * scale, panel_h * scale);

    let origin = Point::new(
        (params.canvas_size_px.x - panel_size_px.x) / 2.0 + params.pan.x,
        (params.canvas_size_px.y - panel_size_px.y) / 2.0 + params.pan.y,
    );

    CanvasTransform {
        origin,
        scale,
        panel_size_px,
    }
}

/// Panel millimeters to screen pixels.
pub fn project_panel_point(point_mm: Point, transform: &CanvasTransform) -> Point {
    transform.origin + point_mm * transform.scale
}

/// Screen pixels to panel millimeters. `None` when the transform has zero
/// scale and no point can be interpreted.
pub fn screen_point_to_panel(point_px: Point, transform: &CanvasTransform) -> Option<Point> {
    if transform.scale == 0.0 {
        return None;
    }
    Some(Point::new(
        (point_px.x - transform.origin.x) / transform.scale,
        (point_px.y - transform.origin.y) / transform.scale,
    ))
}

/// Zoom and pan state owned by an interactive view.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan: Point,
    padding_px: f64,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::default(),
            padding_px: DEFAULT_CANVAS_PADDING_PX,
        }
    }

    pub fn with_padding(mut self, padding_px: f64) -> Self {
        self.padding_px = padding_px.max(0.0);
        self
    }

    /// Gets the current zoom level (1.0 = panel fits the viewport).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    /// Sets the zoom level, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan + Point::new(dx, dy);
    }

    /// Resets to 1:1 fit, centered.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::default();
    }

    /// Computes this frame's transform.
    pub fn transform(&self, canvas_size_px: Point, panel_size_mm: Point) -> CanvasTransform {
        compute_canvas_transform(&CanvasTransformParams {
            canvas_size_px,
            panel_size_mm,
            zoom: self.zoom,
            pan: self.pan,
            padding_px: self.padding_px,
        })
    }

    /// Zooms by `factor` while keeping the panel point under `screen_point`
    /// fixed on screen ("zoom to cursor").
    pub fn zoom_at(
        &mut self,
        screen_point: Point,
        factor: f64,
        canvas_size_px: Point,
        panel_size_mm: Point,
    ) {
        let before = self.transform(canvas_size_px, panel_size_mm);
        let Some(anchor_mm) = screen_point_to_panel(screen_point, &before) else {
            self.set_zoom(self.zoom * factor);
            return;
        };

        self.set_zoom(self.zoom * factor);
        let after = self.transform(canvas_size_px, panel_size_mm);
        let drifted = project_panel_point(anchor_mm, &after);
        self.pan = self.pan + (screen_point - drifted);
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan.x, self.pan.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(zoom: f64, pan: Point) -> CanvasTransformParams {
        CanvasTransformParams {
            canvas_size_px: Point::new(800.0, 600.0),
            panel_size_mm: Point::new(50.0, 100.0),
            zoom,
            pan,
            padding_px: 50.0,
        }
    }

    #[test]
    fn test_fit_and_center() {
        let t = compute_canvas_transform(&params(1.0, Point::default()));
        // usable height 500px / 100mm limits the scale
        assert_eq!(t.scale, 5.0);
        assert_eq!(t.panel_size_px, Point::new(250.0, 500.0));
        assert_eq!(t.origin, Point::new(275.0, 50.0));
    }

    #[test]
    fn test_zoom_and_pan() {
        let t = compute_canvas_transform(&params(2.0, Point::new(10.0, -20.0)));
        assert_eq!(t.scale, 10.0);
        assert_eq!(t.origin, Point::new(150.0 + 10.0, -200.0 - 20.0));
    }

    #[test]
    fn test_roundtrip() {
        let t = compute_canvas_transform(&params(1.7, Point::new(3.0, 4.0)));
        let p = Point::new(12.5, 80.25);
        let back = screen_point_to_panel(project_panel_point(p, &t), &t).unwrap();
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_transform() {
        let t = compute_canvas_transform(&CanvasTransformParams {
            canvas_size_px: Point::new(0.0, 0.0),
            panel_size_mm: Point::new(0.0, 0.0),
            zoom: 1.0,
            pan: Point::default(),
            padding_px: 10.0,
        });
        assert_eq!(t.scale, 0.0);
        assert!(screen_point_to_panel(Point::new(1.0, 1.0), &t).is_none());
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let canvas = Point::new(800.0, 600.0);
        let panel = Point::new(50.0, 128.5);
        let mut viewport = Viewport::new();
        let cursor = Point::new(420.0, 200.0);
        let before = screen_point_to_panel(cursor, &viewport.transform(canvas, panel)).unwrap();
        viewport.zoom_at(cursor, 2.0, canvas, panel);
        assert_eq!(viewport.zoom(), 2.0);
        let after = screen_point_to_panel(cursor, &viewport.transform(canvas, panel)).unwrap();
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(1000.0);
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        viewport.set_zoom(0.0);
        assert_eq!(viewport.zoom(), MIN_ZOOM);
        viewport.set_zoom(f64::NAN);
        assert_eq!(viewport.zoom(), MIN_ZOOM);
    }
}
