//! Interactive map state: viewport, drag, hover and display settings.
//!
//! The controller owns the viewport. Pointer positions are physical pixels
//! relative to the surface's top-left corner.

use foundation::Point;

use crate::element::MapElement;
use crate::fit::fit;
use crate::grid::DEFAULT_GRID_INTERVAL;
use crate::picking::hit_test;
use crate::viewport::{Physical, Viewport};

#[derive(Debug, Copy, Clone, PartialEq)]
struct Drag {
    start_px: Point,
    start_center: Point,
}

/// What the presentation layer shows after a pointer move.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerFeedback {
    /// Logical coordinates under the pointer.
    pub logical: Point,
    /// Indices of hovered elements, in element order.
    pub hovered: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapController {
    viewport: Viewport,
    drag: Option<Drag>,
    hovered: Vec<usize>,
    cursor: Point,
    /// Zero disables the grid.
    pub grid_interval: f64,
    pub crosshair: bool,
}

impl Default for MapController {
    fn default() -> Self {
        Self::new(Physical::new(0.0, 0.0))
    }
}

impl MapController {
    pub fn new(physical: Physical) -> Self {
        Self {
            viewport: Viewport::new(Point::ORIGIN, 1.0, physical),
            drag: None,
            hovered: Vec::new(),
            cursor: Point::ORIGIN,
            grid_interval: DEFAULT_GRID_INTERVAL,
            crosshair: true,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn hovered(&self) -> &[usize] {
        &self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Logical coordinates last under the pointer, or the center once the
    /// pointer has left.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.physical = Physical::new(width.max(0.0), height.max(0.0));
    }

    pub fn pointer_down(&mut self, px: Point) {
        self.drag = Some(Drag {
            start_px: px,
            start_center: self.viewport.center,
        });
    }

    /// Pans while dragging, then re-evaluates hover against `elements`.
    pub fn pointer_move(&mut self, px: Point, elements: &[MapElement]) -> PointerFeedback {
        if let Some(drag) = self.drag {
            self.viewport.center =
                self.viewport
                    .dragged_center(drag.start_center, drag.start_px, px);
        }

        let logical = self.viewport.to_logical(px);
        self.cursor = logical;
        self.hovered = hit_test(logical, elements, &self.viewport);
        PointerFeedback {
            logical,
            hovered: self.hovered.clone(),
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Ends any drag and clears hover.
    pub fn pointer_leave(&mut self) {
        self.drag = None;
        self.hovered.clear();
        self.cursor = self.viewport.center;
    }

    pub fn wheel(&mut self, delta: f64) {
        self.viewport.wheel(delta);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn set_center(&mut self, center: Point) {
        self.viewport.center = center;
    }

    /// Frames `elements`. Returns `false` and leaves the view untouched when
    /// there is nothing to frame.
    pub fn fit_to(&mut self, elements: &[MapElement]) -> bool {
        let Some(f) = fit(elements, self.viewport.physical) else {
            return false;
        };
        self.viewport.center = f.center;
        self.viewport.set_scale(f.scale);
        true
    }

    /// Status line shown in the map corner: `(x, y) scale`.
    pub fn indicator(&self) -> String {
        format!(
            "({:.2}, {:.2}) {:.2}",
            self.cursor.x, self.cursor.y, self.viewport.scale()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::MapController;
    use crate::element::{MapElement, PointType, RegionType};
    use crate::viewport::Physical;
    use foundation::{Point, Region};

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} != {b} (eps={eps})");
    }

    fn controller() -> MapController {
        MapController::new(Physical::new(400.0, 300.0))
    }

    #[test]
    fn defaults() {
        let c = controller();
        assert_eq!(c.viewport().center, Point::ORIGIN);
        assert_eq!(c.viewport().scale(), 1.0);
        assert_eq!(c.grid_interval, 100.0);
        assert!(c.crosshair);
    }

    #[test]
    fn drag_pans_opposite_to_pointer() {
        let mut c = controller();
        c.pointer_down(Point::new(200.0, 150.0));
        c.pointer_move(Point::new(250.0, 120.0), &[]);
        assert_close(c.viewport().center.x, -50.0, 1e-12);
        assert_close(c.viewport().center.y, -30.0, 1e-12);

        c.pointer_up();
        c.pointer_move(Point::new(0.0, 0.0), &[]);
        assert_close(c.viewport().center.x, -50.0, 1e-12);
    }

    #[test]
    fn move_without_drag_only_hovers() {
        let mut c = controller();
        let elements = [
            MapElement::point(Point::new(0.0, 0.0), PointType::Matcher),
            MapElement::region(Region::circle(Point::ORIGIN, 30.0), RegionType::Subscription),
        ];
        let fb = c.pointer_move(Point::new(203.0, 150.0), &elements);
        assert_eq!(fb.hovered, vec![0, 1]);
        assert_close(fb.logical.x, 3.0, 1e-12);
        assert_eq!(c.viewport().center, Point::ORIGIN);

        let fb = c.pointer_move(Point::new(220.0, 150.0), &elements);
        assert_eq!(fb.hovered, vec![1]);
    }

    #[test]
    fn leave_clears_hover_and_drag() {
        let mut c = controller();
        let elements = [MapElement::point(Point::ORIGIN, PointType::Client)];
        c.pointer_down(Point::new(200.0, 150.0));
        c.pointer_move(Point::new(200.0, 150.0), &elements);
        assert_eq!(c.hovered(), &[0]);
        c.pointer_leave();
        assert!(c.hovered().is_empty());
        assert!(!c.is_dragging());
        assert_eq!(c.cursor(), c.viewport().center);
    }

    #[test]
    fn zoom_buttons_and_wheel() {
        let mut c = controller();
        c.zoom_in();
        c.zoom_in();
        assert_close(c.viewport().scale(), 1.21, 1e-12);
        c.zoom_out();
        assert_close(c.viewport().scale(), 1.1, 1e-12);
        c.wheel(-100.0);
        assert_close(c.viewport().scale(), 0.99, 1e-12);
    }

    #[test]
    fn fit_to_empty_keeps_view() {
        let mut c = controller();
        c.zoom_in();
        assert!(!c.fit_to(&[]));
        assert_close(c.viewport().scale(), 1.1, 1e-12);
    }

    #[test]
    fn fit_to_frames_elements() {
        let mut c = MapController::new(Physical::new(400.0, 200.0));
        let elements = [
            MapElement::point(Point::ORIGIN, PointType::Matcher),
            MapElement::region(
                Region::circle(Point::new(100.0, 0.0), 10.0),
                RegionType::Subscription,
            ),
        ];
        assert!(c.fit_to(&elements));
        assert_close(c.viewport().center.x, 53.0, 1e-12);
        assert_close(c.viewport().scale(), 400.0 / 154.0, 1e-12);
    }

    #[test]
    fn resize_feeds_fit_and_transform() {
        let mut c = controller();
        c.resize(400.0, 200.0);
        assert_eq!(c.viewport().physical, Physical::new(400.0, 200.0));

        let q = c.viewport().to_logical(Point::new(200.0, 100.0));
        assert_close(q.x, 0.0, 1e-12);
        assert_close(q.y, 0.0, 1e-12);

        let elements = [
            MapElement::point(Point::ORIGIN, PointType::Matcher),
            MapElement::region(
                Region::circle(Point::new(100.0, 0.0), 10.0),
                RegionType::Subscription,
            ),
        ];
        assert!(c.fit_to(&elements));
        let scale = 400.0 / 154.0;
        assert_close(c.viewport().scale(), scale, 1e-12);
        let corner = c.viewport().to_logical(Point::new(0.0, 0.0));
        assert_close(corner.x, 53.0 - 200.0 / scale, 1e-9);
        assert_close(corner.y, 100.0 / scale, 1e-9);

        c.resize(-5.0, 10.0);
        assert_eq!(c.viewport().physical, Physical::new(0.0, 10.0));
    }

    #[test]
    fn indicator_formats_cursor_and_scale() {
        let mut c = controller();
        c.pointer_move(Point::new(210.0, 140.0), &[]);
        assert_eq!(c.indicator(), "(10.00, 10.00) 1.00");
    }
}
