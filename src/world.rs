use crate::color::Color;
use crate::geometry::{Point, Segment};

pub struct Boundary {
    pub segment: Segment,
    pub color: Color,
}

impl Boundary {
    pub fn new(a: Point, b: Point, color: Color) -> Self {
        Self {
            segment: Segment::new(a, b),
            color,
        }
    }
}

/// Every obstacle the lights are tested against. Shapes are fixed once the
/// world is built; only the shared color can change.
#[derive(Default)]
pub struct World {
    walls: Vec<Boundary>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, a: Point, b: Point, color: Color) {
        self.walls.push(Boundary::new(a, b, color));
    }

    pub fn extend_segments(&mut self, segments: impl IntoIterator<Item = Segment>, color: Color) {
        self.walls.extend(segments.into_iter().map(|s| Boundary {
            segment: s,
            color,
        }));
    }

    /// Four walls along the edges of a `width x height` canvas.
    pub fn push_border(&mut self, width: f32, height: f32, color: Color) {
        let tl = Point::new(0.0, 0.0);
        let tr = Point::new(width, 0.0);
        let br = Point::new(width, height);
        let bl = Point::new(0.0, height);
        self.push(tl, tr, color);
        self.push(tr, br, color);
        self.push(br, bl, color);
        self.push(bl, tl, color);
    }

    pub fn repaint(&mut self, color: Color) {
        for wall in &mut self.walls {
            wall.color = color;
        }
    }

    #[inline]
    pub fn walls(&self) -> &[Boundary] {
        &self.walls
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_is_closed_loop() {
        let mut world = World::new();
        world.push_border(100.0, 50.0, Color::WHITE);
        assert_eq!(world.len(), 4);
        let walls = world.walls();
        for i in 0..4 {
            assert_eq!(walls[i].segment.b, walls[(i + 1) % 4].segment.a);
        }
    }

    #[test]
    fn repaint_changes_color_only() {
        let mut world = World::new();
        world.push(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Color::WHITE);
        world.push(Point::new(2.0, 0.0), Point::new(3.0, 1.0), Color::WHITE);
        let before: Vec<Segment> = world.walls().iter().map(|w| w.segment).collect();

        world.repaint(Color::BLACK);

        assert!(world.walls().iter().all(|w| w.color == Color::BLACK));
        let after: Vec<Segment> = world.walls().iter().map(|w| w.segment).collect();
        assert_eq!(before, after);
    }
}
