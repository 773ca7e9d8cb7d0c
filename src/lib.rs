//! Light and shadow casting in a 2D scene of wall segments.
//!
//! Every light owns a fan of evenly spaced rays; each tick the nearest wall
//! hit along every ray is found, giving the visible region around the light.
//! Walls come from a randomized depth-first maze or from random segments.

pub mod color;
pub mod config;
pub mod geometry;
pub mod input;
pub mod light;
pub mod maze;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod world;
