//! Angled (45° diagonal) sun lighting: blocker depths and per-face colors.
#![forbid(unsafe_code)]

use std::time::Instant;

use crossbeam_channel::Receiver;
use slant_blocks::{Block, BlockRegistry};
use slant_color::{Color, PackedColor};
use slant_world::WorldGrid;

pub mod depth;
pub mod env;
pub mod palette;

pub use depth::{BlockerDepths, LightBlockers, MarchEnd};
pub use env::{DEFAULT_SHADOWLIGHT, DEFAULT_SUNLIGHT, EnvChange, WorldEnv};
pub use palette::{Face, LightPalette};

/// Per-column surface heights, allocated with the world.
///
/// Nothing populates it yet, so every lookup reports `None`.
#[derive(Clone, Debug)]
pub struct HeightMap {
    width: usize,
    length: usize,
    heights: Vec<i16>,
}

impl HeightMap {
    const UNSET: i16 = i16::MIN;

    pub fn new(width: usize, length: usize) -> Self {
        Self { width, length, heights: vec![Self::UNSET; width * length] }
    }

    pub fn get(&self, x: i32, z: i32) -> Option<i16> {
        if x < 0 || z < 0 || x as usize >= self.width || z as usize >= self.length {
            return None;
        }
        let h = self.heights[x as usize + z as usize * self.width];
        (h != Self::UNSET).then_some(h)
    }
}

/// Owns the depth map, height map and palette for one world at a time.
#[derive(Debug, Default)]
pub struct AngledLighting {
    depths: Option<BlockerDepths>,
    heightmap: Option<HeightMap>,
    palette: LightPalette,
    env_rx: Option<Receiver<EnvChange>>,
}

impl AngledLighting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `env` and take its current colors.
    pub fn init(&mut self, env: &mut WorldEnv) {
        self.env_rx = Some(env.subscribe());
        self.palette = LightPalette::new(env.sunlight(), env.shadowlight());
        log::debug!("angled lighting subscribed to world env");
    }

    pub fn dispose(&mut self) {
        self.env_rx = None;
        self.heightmap = None;
    }

    pub fn reset(&mut self) {
        self.depths = None;
        self.heightmap = None;
    }

    pub fn on_new_map(&mut self) {
        self.palette = LightPalette::default();
        self.reset();
    }

    pub fn on_world_loaded(&mut self, grid: &WorldGrid, reg: &BlockRegistry) {
        let (w, h, l) = grid.dims();
        self.depths = Some(BlockerDepths::new(w, h, l));
        self.heightmap = Some(HeightMap::new(w, l));
        log::debug!("angled lighting allocated for {}x{}x{}", w, h, l);
        self.compute_depths(grid, reg, 0, 0, w, l);
    }

    pub fn on_world_unloaded(&mut self) {
        self.reset();
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.depths.is_some()
    }

    /// Recompute a region of the depth map; see [`BlockerDepths::compute_region`].
    /// Returns the number of cells that changed.
    pub fn compute_depths(
        &mut self,
        grid: &WorldGrid,
        reg: &BlockRegistry,
        x_start: i32,
        z_start: i32,
        x_extent: usize,
        z_extent: usize,
    ) -> usize {
        let depths = self.loaded_mut();
        assert_eq!(
            depths.dims(),
            grid.dims(),
            "world grid dimensions differ from the loaded lighting arrays"
        );
        let t0 = Instant::now();
        let occ = LightBlockers::new(grid, reg);
        let changed = depths.compute_region(&occ, x_start, z_start, x_extent, z_extent);
        let ms = t0.elapsed().as_millis();
        log::info!(
            target: "perf",
            "ms={} light_depths x={} z={} extent=({}, {}) changed={}",
            ms,
            x_start,
            z_start,
            x_extent,
            z_extent,
            changed
        );
        changed
    }

    /// Update depths after `(x, y, z)` changed from `old` to `new`.
    ///
    /// Call once the grid already holds `new`. Returns the skewed cells whose
    /// depth changed; the map then matches a full recompute.
    pub fn notify_block_changed(
        &mut self,
        grid: &WorldGrid,
        reg: &BlockRegistry,
        x: i32,
        y: i32,
        z: i32,
        old: Block,
        new: Block,
    ) -> Vec<(usize, usize)> {
        let Some(depths) = self.depths.as_mut() else {
            return Vec::new();
        };
        if !grid.contains(x, y, z) || reg.blocks_light(old.id) == reg.blocks_light(new.id) {
            return Vec::new();
        }
        assert_eq!(
            depths.dims(),
            grid.dims(),
            "world grid dimensions differ from the loaded lighting arrays"
        );
        let cells = depths.cells_reading(x as usize, y as usize, z as usize);
        let occ = LightBlockers::new(grid, reg);
        depths.recompute_cells(&occ, &cells)
    }

    /// Apply every queued env change. Returns how many were applied.
    pub fn poll_env(&mut self) -> usize {
        let Some(rx) = self.env_rx.as_ref() else {
            return 0;
        };
        let pending: Vec<EnvChange> = rx.try_iter().collect();
        for ev in &pending {
            self.apply_env_change(*ev);
        }
        pending.len()
    }

    pub fn apply_env_change(&mut self, ev: EnvChange) {
        log::debug!("env change {:?}", ev);
        match ev {
            EnvChange::Sunlight(c) => self.set_sun_color(c),
            EnvChange::Shadowlight(c) => self.set_shadow_color(c),
        }
    }

    pub fn set_sun_color(&mut self, col: Color) {
        self.palette.set_sun(col);
    }

    pub fn set_shadow_color(&mut self, col: Color) {
        self.palette.set_shadow(col);
    }

    #[inline]
    pub fn palette(&self) -> &LightPalette {
        &self.palette
    }

    #[inline]
    pub fn depths(&self) -> Option<&BlockerDepths> {
        self.depths.as_ref()
    }

    /// Out-of-bounds voxels are lit.
    pub fn is_lit(&self, x: i32, y: i32, z: i32) -> bool {
        let d = self.loaded();
        let (w, h, l) = d.dims();
        if x < 0 || y < 0 || z < 0 || x as usize >= w || y as usize >= h || z as usize >= l {
            return true;
        }
        let (u, v) = d.skew(x as usize, y as usize, z as usize);
        y >= d.get(u, v)
    }

    pub fn face_color(&self, face: Face, x: i32, y: i32, z: i32) -> PackedColor {
        let lit = self.is_lit(x, y.saturating_add(face.sample_dy()), z);
        self.palette.pick(face, lit)
    }

    #[inline]
    pub fn color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::Generic, x, y, z)
    }

    #[inline]
    pub fn sprite_color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::Sprite, x, y, z)
    }

    #[inline]
    pub fn top_color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::Top, x, y, z)
    }

    #[inline]
    pub fn bottom_color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::Bottom, x, y, z)
    }

    #[inline]
    pub fn x_side_color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::XSide, x, y, z)
    }

    #[inline]
    pub fn z_side_color(&self, x: i32, y: i32, z: i32) -> PackedColor {
        self.face_color(Face::ZSide, x, y, z)
    }

    /// Unsupported: the height map is never populated, so this is `None`.
    pub fn light_height(&self, x: i32, z: i32) -> Option<i16> {
        match &self.heightmap {
            Some(hm) => hm.get(x, z),
            None => panic!("light height queried before a world was loaded"),
        }
    }

    fn loaded(&self) -> &BlockerDepths {
        match &self.depths {
            Some(d) => d,
            None => panic!("angled lighting queried before a world was loaded"),
        }
    }

    fn loaded_mut(&mut self) -> &mut BlockerDepths {
        match &mut self.depths {
            Some(d) => d,
            None => panic!("angled lighting queried before a world was loaded"),
        }
    }
}

#[cfg(test)]
mod tests;
