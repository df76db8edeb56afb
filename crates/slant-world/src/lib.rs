//! Voxel grid storage and world generation.
#![forbid(unsafe_code)]

pub mod grid;
pub mod worldgen;

pub use grid::{GridError, WorldGrid};
pub use worldgen::{WorldGenConfig, WorldGenMode, generate_world};
