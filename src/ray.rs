use crate::geometry::{self, Point};
use crate::world::Boundary;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub dir: Point, // unit length
}

impl Ray {
    pub fn new(origin: Point, radians: f32) -> Self {
        Self {
            origin,
            dir: Point::from_angle(radians),
        }
    }

    #[inline]
    pub fn cast(&self, wall: &Boundary) -> Option<Point> {
        geometry::intersect(&wall.segment, self.origin, self.dir)
    }

    /// Closest hit among `walls`, measured from the ray origin. On equal
    /// distances the earlier wall wins.
    pub fn nearest(&self, walls: &[Boundary]) -> Option<Point> {
        let mut closest = None;
        let mut record = f32::INFINITY;
        for wall in walls {
            if let Some(p) = self.cast(wall) {
                let d = self.origin.distance(p);
                if d < record {
                    record = d;
                    closest = Some(p);
                }
            }
        }
        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn wall(x1: f32, y1: f32, x2: f32, y2: f32) -> Boundary {
        Boundary::new(Point::new(x1, y1), Point::new(x2, y2), Color::WHITE)
    }

    #[test]
    fn nearest_picks_closest_wall() {
        let walls = [
            wall(50.0, -10.0, 50.0, 10.0),
            wall(20.0, -10.0, 20.0, 10.0),
            wall(80.0, -10.0, 80.0, 10.0),
        ];
        let ray = Ray::new(Point::new(0.0, 0.0), 0.0);
        let hit = ray.nearest(&walls).expect("hit");
        assert!((hit.x - 20.0).abs() < 1e-4);
        assert!(hit.y.abs() < 1e-4);
    }

    #[test]
    fn nearest_ignores_walls_behind() {
        let walls = [wall(-20.0, -10.0, -20.0, 10.0)];
        let ray = Ray::new(Point::new(0.0, 0.0), 0.0);
        assert_eq!(ray.nearest(&walls), None);
    }

    #[test]
    fn overlapping_walls_hit_once() {
        let first = wall(10.0, -5.0, 10.0, 5.0);
        let second = wall(10.0, -8.0, 10.0, 8.0);
        let ray = Ray::new(Point::new(0.0, 0.0), 0.0);
        let hit = ray.nearest(&[first, second]).expect("hit");
        assert!((hit.x - 10.0).abs() < 1e-4);
    }
}
