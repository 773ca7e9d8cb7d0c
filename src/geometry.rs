use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `radians`, measured from +X towards +Y.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }
}

/// Nearest-forward hit of the half-line `origin + u * direction` (u > 0)
/// with the open segment `a + t * (b - a)` (0 < t < 1).
///
/// Endpoints are excluded, so a ray passing exactly through a vertex may
/// slip between two walls. Parallel and collinear pairs never intersect.
pub fn intersect(segment: &Segment, origin: Point, direction: Point) -> Option<Point> {
    let (x1, y1) = (segment.a.x, segment.a.y);
    let (x2, y2) = (segment.b.x, segment.b.y);
    let (x3, y3) = (origin.x, origin.y);
    let (x4, y4) = (origin.x + direction.x, origin.y + direction.y);

    let den = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if den == 0.0 {
        return None;
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / den;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / den;

    if t > 0.0 && t < 1.0 && u > 0.0 {
        Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    } else {
        None
    }
}

/// Crossing point of the closed segments `p1-p2` and `p3-p4`, endpoints
/// included on both.
pub fn segments_intersect(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let d12 = p2 - p1;
    let d34 = p4 - p3;

    let den = d12.y * d34.x - d12.x * d34.y;
    if den == 0.0 {
        return None; // parallel, or one of the segments has zero length
    }

    let t1 = ((p1.x - p3.x) * d34.y + (p3.y - p1.y) * d34.x) / den;
    let t2 = ((p3.x - p1.x) * d12.y + (p1.y - p3.y) * d12.x) / -den;

    if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
        Some(p1 + d12 * t1)
    } else {
        None
    }
}
