use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{self, Color};
use crate::config::{Layout, SceneConfig};
use crate::geometry::{Point, Segment};
use crate::light::{Fan, LightSource};
use crate::maze::Maze;
use crate::world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// State changes requested by the input layer. Queued with [`Scene::push`]
/// and applied together at the start of the next [`Scene::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    MoveActive(Point),
    AddLight(Point),
    SpawnRebalanced(Point),
    CycleActive(Direction),
    MoreRays,
    FewerRays,
    Reset,
    ToggleWallColor,
    SetMaxRayCount(usize),
}

pub struct LightView {
    pub pos: Point,
    pub color: Color,
    pub ray_color: Color,
    pub active: bool,
    pub fan: Fan,
}

/// Everything the renderer needs for one tick, in draw order.
pub struct Frame {
    pub boundaries: Vec<(Segment, Color)>,
    pub lights: Vec<LightView>,
}

pub struct Scene {
    config: SceneConfig,
    seed: u64,
    width: f32,
    height: f32,
    world: World,
    lights: Vec<LightSource>,
    active: usize,
    hue: f32,
    ray_count: usize,
    wall_color: usize,
    spawn_at: Point,
    pending: Vec<Command>,
}

impl Scene {
    pub fn new(config: SceneConfig, width: f32, height: f32) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        let ray_count = config.clamp_rays(config.initial_rays);
        let mut scene = Self {
            config,
            seed,
            width,
            height,
            world: World::new(),
            lights: Vec::new(),
            active: 0,
            hue: 0.0,
            ray_count,
            wall_color: 0,
            spawn_at: Point::default(),
            pending: Vec::new(),
        };
        scene.build_world();
        scene.reset();
        scene
    }

    /// Rebuilds the walls for a new canvas size from the same seed and
    /// starts over with a single light. Empty sizes (a minimized window)
    /// keep the current scene.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            debug!("ignoring resize to {width}x{height}");
            return;
        }
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pending.clear();
        self.build_world();
        self.reset();
    }

    fn build_world(&mut self) {
        let (w, h) = (self.width, self.height);
        let color = self.config.wall_colors[self.wall_color];
        let mut world = World::new();

        if !(w > 0.0 && h > 0.0) {
            warn!("empty canvas {w}x{h}, scene has no walls");
            self.world = world;
            self.spawn_at = Point::default();
            return;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        match self.config.layout {
            Layout::Maze { rows, cols } => {
                let maze = Maze::generate(rows, cols, &mut rng);
                // Even grids leave the last room row/column on the canvas edge.
                world.push_border(w, h, color);
                world.extend_segments(maze.segments(w, h), color);
                let cw = w / cols.max(1) as f32;
                let ch = h / rows.max(1) as f32;
                self.spawn_at = Point::new(cw + 10.0, ch + 10.0);
                info!(
                    "maze {rows}x{cols}: {} open cells, {} walls (seed {})",
                    maze.open_count(),
                    world.len(),
                    self.seed
                );
            }
            Layout::Scatter { walls } => {
                world.push_border(w, h, color);
                for _ in 0..walls {
                    let a = Point::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
                    let b = Point::new(rng.random_range(0.0..w), rng.random_range(0.0..h));
                    world.push(a, b, color);
                }
                self.spawn_at = Point::new(w * 0.5, h * 0.5);
                info!("scatter: {} walls (seed {})", world.len(), self.seed);
            }
            Layout::Empty => {
                world.push_border(w, h, color);
                self.spawn_at = Point::new(w * 0.5, h * 0.5);
            }
        }
        self.world = world;
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    #[inline]
    pub fn spawn_point(&self) -> Point {
        self.spawn_at
    }

    #[inline]
    pub fn wall_color(&self) -> Color {
        self.config.wall_colors[self.wall_color]
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push(command);
    }

    pub fn apply_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        for command in pending {
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: Command) {
        if !matches!(command, Command::MoveActive(_)) {
            debug!("{command:?}");
        }
        match command {
            Command::MoveActive(p) => self.move_active(p),
            Command::AddLight(p) => self.add_light(p),
            Command::SpawnRebalanced(p) => self.spawn_light_rebalanced(p),
            Command::CycleActive(dir) => self.cycle_active(dir),
            Command::MoreRays => self.increase_rays(),
            Command::FewerRays => self.decrease_rays(),
            Command::Reset => self.reset(),
            Command::ToggleWallColor => self.toggle_wall_color(),
            Command::SetMaxRayCount(n) => self.set_max_ray_count(n),
        }
    }

    /// Applies queued commands, then casts every light against the walls.
    pub fn tick(&mut self) -> Frame {
        self.apply_pending();

        let walls = self.world.walls();
        let parallel = self.config.parallel;
        let active = self.active;
        let lights = self
            .lights
            .iter_mut()
            .enumerate()
            .map(|(i, light)| {
                let fan = if parallel {
                    light.spread_parallel(walls)
                } else {
                    light.spread(walls)
                };
                LightView {
                    pos: light.pos,
                    color: light.color,
                    ray_color: light.ray_color,
                    active: i == active,
                    fan,
                }
            })
            .collect();

        Frame {
            boundaries: walls.iter().map(|w| (w.segment, w.color)).collect(),
            lights,
        }
    }

    pub fn move_active(&mut self, to: Point) {
        let Some(light) = self.lights.get_mut(self.active) else {
            return;
        };
        if self.config.collision {
            light.try_move(to, self.world.walls());
        } else {
            light.move_to(to);
        }
    }

    fn push_light(&mut self, at: Point) {
        self.hue += self.config.hue_step;
        let (color, ray_color) = color::light_colors(self.hue);
        self.lights
            .push(LightSource::new(at, color, ray_color, self.ray_count));
        self.active = self.lights.len() - 1;
    }

    /// Adds a light at `at` and gives it focus; the previous active light
    /// drops to the inactive ray count.
    pub fn add_light(&mut self, at: Point) {
        let inactive = self.config.clamp_rays(self.config.inactive_rays);
        if let Some(light) = self.lights.get_mut(self.active) {
            light.update_ray_count(inactive);
        }
        self.push_light(at);
    }

    /// Adds a light after splitting the ray budget over the existing lights.
    pub fn spawn_light_rebalanced(&mut self, at: Point) {
        let n = self.lights.len().max(1);
        self.set_ray_count(self.config.ray_budget * 2 / n);
        self.push_light(at);
    }

    pub fn cycle_active(&mut self, dir: Direction) {
        let n = self.lights.len();
        if n < 2 {
            return;
        }
        let inactive = self.config.clamp_rays(self.config.inactive_rays);
        let focused = self.config.clamp_rays(self.config.focused_rays);

        self.lights[self.active].update_ray_count(inactive);
        self.active = match dir {
            Direction::Left => (self.active + n - 1) % n,
            Direction::Right => (self.active + 1) % n,
        };
        self.lights[self.active].update_ray_count(focused);
    }

    pub fn increase_rays(&mut self) {
        if self.ray_count < self.config.max_rays {
            self.set_ray_count(self.ray_count + self.config.ray_step);
        }
    }

    pub fn decrease_rays(&mut self) {
        if self.ray_count > self.config.min_rays {
            self.set_ray_count(self.ray_count.saturating_sub(self.config.ray_step));
        }
    }

    // Clamped, then applied to every light.
    fn set_ray_count(&mut self, n: usize) {
        self.ray_count = self.config.clamp_rays(n);
        for light in &mut self.lights {
            light.update_ray_count(self.ray_count);
        }
    }

    pub fn set_max_ray_count(&mut self, max: usize) {
        self.config.max_rays = max.max(self.config.min_rays).max(1);
        self.set_ray_count(self.config.initial_rays);
        info!("max ray count changed to {}", self.config.max_rays);
    }

    /// Back to one default light at the spawn point with the initial ray
    /// count and a fresh hue cycle.
    pub fn reset(&mut self) {
        self.ray_count = self.config.clamp_rays(self.config.initial_rays);
        self.hue = 0.0;
        self.active = 0;
        self.lights.clear();
        self.lights.push(LightSource::new(
            self.spawn_at,
            Color::DEFAULT_LIGHT,
            Color::DEFAULT_RAY,
            self.ray_count,
        ));
    }

    pub fn toggle_wall_color(&mut self) {
        self.wall_color = (self.wall_color + 1) % self.config.wall_colors.len();
        self.world.repaint(self.wall_color());
    }

    /// Repaints every wall. Colors outside the configured pair are applied
    /// but leave the toggle position where it was.
    pub fn set_wall_color(&mut self, color: Color) {
        if let Some(i) = self.config.wall_colors.iter().position(|&c| c == color) {
            self.wall_color = i;
        }
        self.world.repaint(color);
    }
}
