use crate::pointer::Point;

/// Euclidean distance between two points.
pub fn distance(p0: Point, p1: Point) -> f32 {
    let dx = p0.x - p1.x;
    let dy = p0.y - p1.y;
    (dx * dx + dy * dy).sqrt()
}

/// Midpoint of two points.
pub fn center(p0: Point, p1: Point) -> Point {
    Point::new((p0.x + p1.x) / 2.0, (p0.y + p1.y) / 2.0)
}

/// Movement strictly beyond `slop` counts; a point exactly on the boundary
/// stays a tap candidate.
pub(crate) fn beyond_slop(from: Point, to: Point, slop: f32) -> bool {
    distance(from, to) > slop
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(-1.0, 2.0), Point::new(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn center_is_midpoint() {
        assert_eq!(
            center(Point::new(0.0, 0.0), Point::new(10.0, -4.0)),
            Point::new(5.0, -2.0)
        );
    }

    #[test]
    fn slop_boundary_is_exclusive() {
        let origin = Point::new(0.0, 0.0);
        assert!(!beyond_slop(origin, Point::new(6.0, 8.0), 10.0));
        assert!(!beyond_slop(origin, Point::new(0.0, 10.0), 10.0));
        assert!(beyond_slop(origin, Point::new(0.0, 10.5), 10.0));
    }
}
