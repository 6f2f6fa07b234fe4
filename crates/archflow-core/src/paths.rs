//! Geometry engine.
//!
//! Pure coordinate math used by every diagram renderer: connector path
//! specs, connection-point selection and bounding rectangles. All functions
//! are total over well-formed numeric input; NaN coordinates propagate to
//! the output rather than being validated here (definitions are validated
//! at load time).

use crate::geom::{Point, Rect, Size, Vector, point, rect, vector};

/// Default grid step for [`snap_to_grid`].
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Default bow intensity for curved connector paths.
pub const DEFAULT_CURVATURE: f64 = 0.3;

/// A computed geometric description of a connector, independent of any
/// output format. The SVG writer turns these into `d` attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSpec {
    Line {
        from: Point,
        to: Point,
    },
    Cubic {
        from: Point,
        c1: Point,
        c2: Point,
        to: Point,
    },
    /// Polyline through two or more points (orthogonal routing).
    Poly {
        points: Vec<Point>,
    },
}

impl PathSpec {
    pub fn from_point(&self) -> Point {
        match self {
            PathSpec::Line { from, .. } | PathSpec::Cubic { from, .. } => *from,
            PathSpec::Poly { points } => points.first().copied().unwrap_or_else(|| point(0.0, 0.0)),
        }
    }

    pub fn to_point(&self) -> Point {
        match self {
            PathSpec::Line { to, .. } | PathSpec::Cubic { to, .. } => *to,
            PathSpec::Poly { points } => points.last().copied().unwrap_or_else(|| point(0.0, 0.0)),
        }
    }

    /// True when the path starts and ends at the same point and never leaves
    /// it (e.g. a curve between coincident endpoints).
    pub fn is_degenerate(&self) -> bool {
        match self {
            PathSpec::Line { from, to } => from == to,
            PathSpec::Cubic { from, c1, c2, to } => from == to && from == c1 && from == c2,
            PathSpec::Poly { points } => points.windows(2).all(|w| w[0] == w[1]),
        }
    }
}

/// Center of an anchored box: top-left position plus half the size.
pub fn center(position: Point, size: Size) -> Point {
    point(position.x + size.width / 2.0, position.y + size.height / 2.0)
}

pub fn straight_path(a: Point, b: Point) -> PathSpec {
    PathSpec::Line { from: a, to: b }
}

/// Cubic path bowing proportionally to both displacement components:
/// control points sit at `curvature * dx` horizontally and half-weighted
/// `curvature * dy / 2` vertically from each endpoint. Coincident endpoints
/// yield a degenerate zero-length path.
pub fn curved_path(a: Point, b: Point, curvature: f64) -> PathSpec {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    PathSpec::Cubic {
        from: a,
        c1: point(a.x + dx * curvature, a.y + dy * curvature * 0.5),
        c2: point(b.x - dx * curvature, b.y - dy * curvature * 0.5),
        to: b,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrthogonalDirection {
    #[default]
    HorizontalFirst,
    VerticalFirst,
}

/// Right-angle route through the midpoint of the axis picked by `direction`.
pub fn orthogonal_path(a: Point, b: Point, direction: OrthogonalDirection) -> PathSpec {
    let points = match direction {
        OrthogonalDirection::HorizontalFirst => {
            let mid_x = (a.x + b.x) / 2.0;
            vec![a, point(mid_x, a.y), point(mid_x, b.y), b]
        }
        OrthogonalDirection::VerticalFirst => {
            let mid_y = (a.y + b.y) / 2.0;
            vec![a, point(a.x, mid_y), point(b.x, mid_y), b]
        }
    };
    PathSpec::Poly { points }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    pub from: Point,
    pub to: Point,
}

/// Endpoints for a connector between two boxes.
///
/// Each endpoint is offset from its box center toward the other box by half
/// the box width, using the angle between centers. This treats every box as
/// roughly circular instead of clipping against the exact rectangle edge; a
/// deliberate visual approximation, kept as-is.
pub fn connection_endpoints(from_box: Rect, to_box: Rect) -> Endpoints {
    let from_center = center(from_box.origin, from_box.size);
    let to_center = center(to_box.origin, to_box.size);

    let angle = (to_center.y - from_center.y).atan2(to_center.x - from_center.x);
    let from_radius = from_box.size.width / 2.0;
    let to_radius = to_box.size.width / 2.0;

    Endpoints {
        from: point(
            from_center.x + angle.cos() * from_radius,
            from_center.y + angle.sin() * from_radius,
        ),
        to: point(
            to_center.x - angle.cos() * to_radius,
            to_center.y - angle.sin() * to_radius,
        ),
    }
}

/// Minimal rectangle covering every box. Empty input yields a zero rect;
/// callers rendering a group from a member set must guard for that.
pub fn bounding_box<I>(boxes: I) -> Rect
where
    I: IntoIterator<Item = Rect>,
{
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut any = false;

    for b in boxes {
        any = true;
        min_x = min_x.min(b.origin.x);
        min_y = min_y.min(b.origin.y);
        max_x = max_x.max(b.origin.x + b.size.width);
        max_y = max_y.max(b.origin.y + b.size.height);
    }

    if !any {
        return rect(0.0, 0.0, 0.0, 0.0);
    }
    rect(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Expands a rectangle by `side` on the left, right and bottom edges and by
/// `top` above. Group containers use the larger top margin for their label.
pub fn rect_with_margins(r: Rect, side: f64, top: f64) -> Rect {
    rect(
        r.origin.x - side,
        r.origin.y - top,
        r.size.width + 2.0 * side,
        r.size.height + top + side,
    )
}

pub fn snap_to_grid(p: Point, grid_size: f64) -> Point {
    point(
        (p.x / grid_size).round() * grid_size,
        (p.y / grid_size).round() * grid_size,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Point on the middle of one box edge.
pub fn connection_point(b: Rect, side: Side) -> Point {
    let c = center(b.origin, b.size);
    match side {
        Side::Top => point(c.x, b.origin.y),
        Side::Right => point(b.origin.x + b.size.width, c.y),
        Side::Bottom => point(c.x, b.origin.y + b.size.height),
        Side::Left => point(b.origin.x, c.y),
    }
}

/// Edge-midpoint endpoints picked by the dominant displacement axis
/// (horizontal displacement → left/right edges, else top/bottom).
pub fn best_connection_points(from_box: Rect, to_box: Rect) -> (Point, Point, Side, Side) {
    let from_center = center(from_box.origin, from_box.size);
    let to_center = center(to_box.origin, to_box.size);
    let dx = to_center.x - from_center.x;
    let dy = to_center.y - from_center.y;

    let (from_side, to_side) = if dx.abs() > dy.abs() {
        if dx > 0.0 {
            (Side::Right, Side::Left)
        } else {
            (Side::Left, Side::Right)
        }
    } else if dy > 0.0 {
        (Side::Bottom, Side::Top)
    } else {
        (Side::Top, Side::Bottom)
    };

    (
        connection_point(from_box, from_side),
        connection_point(to_box, to_side),
        from_side,
        to_side,
    )
}

pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Angle from `a` to `b` in radians.
pub fn angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

pub fn point_along_line(a: Point, b: Point, t: f64) -> Point {
    point(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Row-major grid positions for `count` items.
pub fn grid_positions(count: usize, columns: usize, spacing: Vector, start: Point) -> Vec<Point> {
    let columns = columns.max(1);
    (0..count)
        .map(|i| {
            let col = (i % columns) as f64;
            let row = (i / columns) as f64;
            point(start.x + col * spacing.x, start.y + row * spacing.y)
        })
        .collect()
}

pub fn horizontal_positions(count: usize, spacing: f64, start: Point) -> Vec<Point> {
    (0..count)
        .map(|i| point(start.x + i as f64 * spacing, start.y))
        .collect()
}

pub fn vertical_positions(count: usize, spacing: f64, start: Point) -> Vec<Point> {
    (0..count)
        .map(|i| point(start.x, start.y + i as f64 * spacing))
        .collect()
}

/// Uniform scale that fits `content` into `viewport` with `padding` on every
/// side, capped at 1 (content is never scaled up).
pub fn zoom_to_fit(content: Size, viewport: Size, padding: f64) -> f64 {
    let scale_x = (viewport.width - padding * 2.0) / content.width;
    let scale_y = (viewport.height - padding * 2.0) / content.height;
    scale_x.min(scale_y).min(1.0)
}

/// Translation that centers zoomed content inside the viewport.
pub fn center_offset(content: Rect, viewport: Size, zoom: f64) -> Vector {
    let scaled_w = content.size.width * zoom;
    let scaled_h = content.size.height * zoom;
    vector(
        (viewport.width - scaled_w) / 2.0 - content.origin.x * zoom,
        (viewport.height - scaled_h) / 2.0 - content.origin.y * zoom,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::size;

    #[test]
    fn center_is_position_plus_half_size() {
        assert_eq!(
            center(point(10.0, 20.0), size(80.0, 80.0)),
            point(50.0, 60.0)
        );
        assert_eq!(
            center(point(0.0, 0.0), size(60.0, 120.0)),
            point(30.0, 60.0)
        );
    }

    #[test]
    fn curved_path_between_coincident_points_is_degenerate() {
        let a = point(42.0, 17.0);
        for k in [0.0, 0.3, 1.0] {
            let p = curved_path(a, a, k);
            assert!(p.is_degenerate(), "curvature {k}");
            assert_eq!(p.from_point(), a);
            assert_eq!(p.to_point(), a);
        }
    }

    #[test]
    fn curved_path_control_points_bow_with_displacement() {
        let p = curved_path(point(0.0, 0.0), point(100.0, 40.0), 0.3);
        let PathSpec::Cubic { c1, c2, .. } = p else {
            panic!("expected cubic");
        };
        assert_eq!(c1, point(30.0, 6.0));
        assert_eq!(c2, point(70.0, 34.0));
    }

    #[test]
    fn orthogonal_path_routes_through_axis_midpoint() {
        let p = orthogonal_path(
            point(0.0, 0.0),
            point(100.0, 60.0),
            OrthogonalDirection::HorizontalFirst,
        );
        let PathSpec::Poly { points } = p else {
            panic!("expected polyline");
        };
        assert_eq!(
            points,
            vec![
                point(0.0, 0.0),
                point(50.0, 0.0),
                point(50.0, 60.0),
                point(100.0, 60.0)
            ]
        );

        let p = orthogonal_path(
            point(0.0, 0.0),
            point(100.0, 60.0),
            OrthogonalDirection::VerticalFirst,
        );
        let PathSpec::Poly { points } = p else {
            panic!("expected polyline");
        };
        assert_eq!(points[1], point(0.0, 30.0));
        assert_eq!(points[2], point(100.0, 30.0));
    }

    #[test]
    fn bounding_box_of_empty_input_is_zero_rect() {
        let r = bounding_box(std::iter::empty());
        assert_eq!(r, rect(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn bounding_box_contains_every_input_box() {
        let boxes = vec![
            rect(10.0, 10.0, 80.0, 80.0),
            rect(200.0, -40.0, 60.0, 60.0),
            rect(-5.0, 150.0, 120.0, 120.0),
        ];
        let bb = bounding_box(boxes.iter().copied());
        for b in &boxes {
            assert!(bb.origin.x <= b.origin.x);
            assert!(bb.origin.y <= b.origin.y);
            assert!(bb.origin.x + bb.size.width >= b.origin.x + b.size.width);
            assert!(bb.origin.y + bb.size.height >= b.origin.y + b.size.height);
        }
    }

    #[test]
    fn connection_endpoints_offset_toward_the_other_box() {
        // Two md boxes on the same row, 200 px apart.
        let a = rect(0.0, 0.0, 80.0, 80.0);
        let b = rect(200.0, 0.0, 80.0, 80.0);
        let e = connection_endpoints(a, b);
        assert!((e.from.x - 80.0).abs() < 1e-9);
        assert!((e.from.y - 40.0).abs() < 1e-9);
        assert!((e.to.x - 200.0).abs() < 1e-9);
        assert!((e.to.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn best_connection_points_pick_the_dominant_axis() {
        let a = rect(0.0, 0.0, 80.0, 80.0);
        let below = rect(10.0, 300.0, 80.0, 80.0);
        let (_, _, from_side, to_side) = best_connection_points(a, below);
        assert_eq!(from_side, Side::Bottom);
        assert_eq!(to_side, Side::Top);
    }

    #[test]
    fn snap_rounds_to_nearest_grid_step() {
        assert_eq!(
            snap_to_grid(point(33.0, 49.0), DEFAULT_GRID_SIZE),
            point(40.0, 40.0)
        );
    }

    #[test]
    fn zoom_to_fit_never_scales_up() {
        let z = zoom_to_fit(size(100.0, 100.0), size(1000.0, 1000.0), 40.0);
        assert_eq!(z, 1.0);
        let z = zoom_to_fit(size(2000.0, 500.0), size(1000.0, 600.0), 40.0);
        assert!((z - 0.46).abs() < 1e-9);
    }

    #[test]
    fn point_along_line_interpolates() {
        let p = point_along_line(point(0.0, 0.0), point(10.0, 20.0), 0.5);
        assert_eq!(p, point(5.0, 10.0));
    }

    #[test]
    fn grid_positions_fill_rows_left_to_right() {
        let pts = grid_positions(5, 2, vector(100.0, 50.0), point(10.0, 10.0));
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], point(10.0, 10.0));
        assert_eq!(pts[1], point(110.0, 10.0));
        assert_eq!(pts[2], point(10.0, 60.0));
        assert_eq!(pts[4], point(10.0, 110.0));
    }
}
