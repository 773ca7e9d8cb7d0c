use std::f32::consts::TAU;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::color::Color;
use crate::geometry::{self, Point};
use crate::ray::Ray;
use crate::world::Boundary;

/// Each ray of a light paired with its nearest hit, in ray order.
pub type Fan = Vec<(Ray, Option<Point>)>;

pub struct LightSource {
    pub pos: Point,
    pub color: Color,
    pub ray_color: Color,
    rays: Vec<Ray>,
}

impl LightSource {
    pub fn new(pos: Point, color: Color, ray_color: Color, ray_count: usize) -> Self {
        let mut light = Self {
            pos,
            color,
            ray_color,
            rays: Vec::new(),
        };
        light.update_ray_count(ray_count);
        light
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.rays.len()
    }

    #[inline]
    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// Rebuilds `n` rays spaced `360/n` degrees apart starting at 0 degrees.
    /// Never fewer than one.
    pub fn update_ray_count(&mut self, n: usize) {
        let n = n.max(1);
        let step = TAU / n as f32;
        self.rays.clear();
        self.rays.reserve(n);
        for k in 0..n {
            self.rays.push(Ray::new(self.pos, k as f32 * step));
        }
    }

    fn pin_rays(&mut self) {
        let pos = self.pos;
        for ray in &mut self.rays {
            ray.origin = pos;
        }
    }

    /// Visibility fan: the nearest hit of every ray against `walls`.
    pub fn spread(&mut self, walls: &[Boundary]) -> Fan {
        self.pin_rays();
        self.rays.iter().map(|r| (*r, r.nearest(walls))).collect()
    }

    /// Same result as [`spread`](Self::spread), rays evaluated on the rayon pool.
    pub fn spread_parallel(&mut self, walls: &[Boundary]) -> Fan {
        self.pin_rays();
        self.rays.par_iter().map(|r| (*r, r.nearest(walls))).collect()
    }

    /// Moves to `to` unless the straight path crosses a wall. Returns whether
    /// the move was committed.
    pub fn try_move(&mut self, to: Point, walls: &[Boundary]) -> bool {
        let from = self.pos;
        let blocked = walls
            .iter()
            .any(|w| geometry::segments_intersect(from, to, w.segment.a, w.segment.b).is_some());
        if blocked {
            return false;
        }
        self.pos = to;
        true
    }

    #[inline]
    pub fn move_to(&mut self, to: Point) {
        self.pos = to;
    }
}
