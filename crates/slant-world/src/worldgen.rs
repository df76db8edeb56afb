use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;
use slant_blocks::BlockRegistry;

use crate::grid::{GridError, WorldGrid};

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorldGenMode {
    Normal,
    Flat,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    pub seed: i32,
    pub mode: WorldGenMode,
    pub flat_thickness: usize,
    pub base_height: usize,
    pub height_amplitude: f32,
    pub height_frequency: f32,
    pub dirt_depth: usize,
    // Per-column probability of a stone pillar on the surface.
    pub pillar_chance: f32,
    pub pillar_height: usize,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            length: 64,
            seed: 1337,
            mode: WorldGenMode::Normal,
            flat_thickness: 4,
            base_height: 10,
            height_amplitude: 6.0,
            height_frequency: 0.03,
            dirt_depth: 3,
            pillar_chance: 0.004,
            pillar_height: 10,
        }
    }
}

// Cheap deterministic column hash mapped to [0, 1).
#[inline]
fn column_unit(seed: i32, x: usize, z: usize) -> f32 {
    let mut h = (seed as u32 as u64) ^ 0x9E37_79B9_7F4A_7C15;
    h ^= (x as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = h.rotate_left(31) ^ (z as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^= h >> 29;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 32;
    (h >> 40) as f32 / (1u64 << 24) as f32
}

pub fn generate_world(cfg: &WorldGenConfig, reg: &BlockRegistry) -> Result<WorldGrid, GridError> {
    let mut grid = WorldGrid::new(cfg.width, cfg.height, cfg.length)?;
    let stone = reg.block_by_name("stone");
    let dirt = reg.block_by_name("dirt");
    let grass = reg.block_by_name("grass");
    let top = cfg.height.saturating_sub(1);

    match cfg.mode {
        WorldGenMode::Flat => {
            let t = cfg.flat_thickness.min(cfg.height);
            grid.fill_box((0, 0, 0), (cfg.width, t, cfg.length), stone);
        }
        WorldGenMode::Normal => {
            let mut terrain = FastNoiseLite::with_seed(cfg.seed);
            terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
            terrain.set_frequency(Some(cfg.height_frequency));
            for z in 0..cfg.length {
                for x in 0..cfg.width {
                    let n = terrain.get_noise_2d(x as f32, z as f32);
                    let h = (cfg.base_height as f32 + n * cfg.height_amplitude).round();
                    let surface = (h.max(1.0) as usize).min(top);
                    let dirt_from = surface.saturating_sub(cfg.dirt_depth);
                    for y in 0..=surface {
                        let b = if y == surface {
                            grass
                        } else if y >= dirt_from {
                            dirt
                        } else {
                            stone
                        };
                        let i = grid.idx(x, y, z);
                        grid.blocks[i] = b;
                    }
                    if column_unit(cfg.seed, x, z) < cfg.pillar_chance {
                        let pillar_top = (surface + cfg.pillar_height).min(top);
                        for y in surface + 1..=pillar_top {
                            let i = grid.idx(x, y, z);
                            grid.blocks[i] = stone;
                        }
                    }
                }
            }
        }
    }
    Ok(grid)
}
