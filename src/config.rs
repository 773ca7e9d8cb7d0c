use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::color::Color;

/// Obstacle arrangement a scene is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Recursive-backtracker maze on a `rows x cols` grid.
    Maze { rows: usize, cols: usize },
    /// Canvas border plus randomly placed decorative walls.
    Scatter { walls: usize },
    /// Canvas border only.
    Empty,
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub layout: Layout,
    pub initial_rays: usize,
    pub max_rays: usize,
    pub min_rays: usize,
    pub ray_step: usize,
    pub inactive_rays: usize, // lights that lose focus
    pub focused_rays: usize,  // light that gains focus by cycling
    pub ray_budget: usize,    // shared between lights on touch spawn
    pub hue_step: f32,        // degrees per spawned light
    pub wall_colors: [Color; 2],
    pub collision: bool,
    pub parallel: bool,
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Maze { rows: 21, cols: 43 },
            initial_rays: 1800,
            max_rays: 14400,
            min_rays: 100,
            ray_step: 100,
            inactive_rays: 640,
            focused_rays: 3200,
            ray_budget: 1800,
            hue_step: 10.0,
            wall_colors: [Color::WHITE, Color::BLACK],
            collision: true,
            parallel: false,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Clamps `n` into the configured `[min_rays, max_rays]` window, never
    /// below one ray.
    pub fn clamp_rays(&self, n: usize) -> usize {
        let lo = self.min_rays.max(1);
        let hi = self.max_rays.max(lo);
        n.clamp(lo, hi)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Maze,
    Scatter,
    Empty,
}

/// Interactive 2D light and shadow casting.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Obstacle layout.
    #[arg(long, value_enum, default_value_t = LayoutArg::Maze)]
    pub layout: LayoutArg,

    /// Maze grid rows (odd values give a closed outer wall).
    #[arg(long, default_value_t = 21, value_parser = clap::value_parser!(u32).range(1..))]
    pub rows: u32,

    /// Maze grid columns (odd values give a closed outer wall).
    #[arg(long, default_value_t = 43, value_parser = clap::value_parser!(u32).range(1..))]
    pub cols: u32,

    /// Number of random walls in the scatter layout.
    #[arg(long, default_value_t = 8)]
    pub walls: usize,

    /// Rays per light at start and after reset.
    #[arg(long, default_value_t = 1800)]
    pub rays: usize,

    /// Upper bound for the ray count.
    #[arg(long, default_value_t = 14400)]
    pub max_rays: usize,

    /// Let lights pass through walls.
    #[arg(long)]
    pub no_collision: bool,

    /// Cast rays on all cores.
    #[arg(long)]
    pub parallel: bool,

    /// Seed for maze and wall generation; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl From<&CliArgs> for SceneConfig {
    fn from(args: &CliArgs) -> Self {
        let layout = match args.layout {
            LayoutArg::Maze => Layout::Maze {
                rows: args.rows as usize,
                cols: args.cols as usize,
            },
            LayoutArg::Scatter => Layout::Scatter { walls: args.walls },
            LayoutArg::Empty => Layout::Empty,
        };
        let defaults = SceneConfig::default();
        Self {
            layout,
            initial_rays: args.rays,
            max_rays: args.max_rays,
            collision: !args.no_collision,
            parallel: args.parallel,
            seed: args.seed,
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_command_line() {
        let args = CliArgs::try_parse_from(["lightmaze"]).expect("parse");
        let config = SceneConfig::from(&args);
        assert_eq!(config.layout, Layout::Maze { rows: 21, cols: 43 });
        assert_eq!(config.initial_rays, 1800);
        assert_eq!(config.max_rays, 14400);
        assert!(config.collision);
        assert!(!config.parallel);
        assert_eq!(args.log_level, LevelFilter::Info);
    }

    #[test]
    fn overrides() {
        let args = CliArgs::try_parse_from([
            "lightmaze",
            "--layout",
            "scatter",
            "--walls",
            "3",
            "--no-collision",
            "--seed",
            "99",
            "--log-level",
            "debug",
        ])
        .expect("parse");
        let config = SceneConfig::from(&args);
        assert_eq!(config.layout, Layout::Scatter { walls: 3 });
        assert!(!config.collision);
        assert_eq!(config.seed, Some(99));
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn zero_rows_rejected() {
        assert!(CliArgs::try_parse_from(["lightmaze", "--rows", "0"]).is_err());
    }

    #[test]
    fn clamp_rays_window() {
        let config = SceneConfig::default();
        assert_eq!(config.clamp_rays(0), 100);
        assert_eq!(config.clamp_rays(5000), 5000);
        assert_eq!(config.clamp_rays(20000), 14400);

        let odd = SceneConfig {
            min_rays: 0,
            max_rays: 0,
            ..SceneConfig::default()
        };
        assert_eq!(odd.clamp_rays(0), 1);
        assert_eq!(odd.clamp_rays(50), 1);
    }
}
