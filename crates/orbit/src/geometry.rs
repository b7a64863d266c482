#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cartesian offset for a polar coordinate, y pointing up.
    pub fn from_polar(angle_deg: f64, radius: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(rad.cos() * radius, rad.sin() * radius)
    }

    /// Places a y-up offset relative to a y-down screen origin.
    pub fn to_screen(self, origin: Point, scale: f64) -> Point {
        Point::new(origin.x + self.x * scale, origin.y - self.y * scale)
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_from_polar_axes() {
        assert!(close(Point::from_polar(0.0, 10.0), Point::new(10.0, 0.0)));
        assert!(close(Point::from_polar(90.0, 10.0), Point::new(0.0, 10.0)));
        assert!(close(Point::from_polar(180.0, 2.0), Point::new(-2.0, 0.0)));
    }

    #[test]
    fn test_to_screen_flips_y() {
        let origin = Point::new(100.0, 100.0);
        let up = Point::from_polar(90.0, 10.0).to_screen(origin, 2.0);
        assert!(close(up, Point::new(100.0, 80.0)));
    }
}
