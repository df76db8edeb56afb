//! Blocker depths over skewed columns.
//!
//! Sunlight travels along the world diagonal, decreasing x, y and z together.
//! Voxel `(x, y, z)` therefore shares its ray with every `(x+k, y+k, z+k)`,
//! and all of them map to the same skewed cell `u = x + height - y`,
//! `v = z + height - y`. The map is `(width + height) × (length + height)`
//! and each cell stores the `y` at which its ray stopped.

use slant_blocks::BlockRegistry;
use slant_world::WorldGrid;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Immutable snapshot of the grid plus a flat `blocks_light` table.
pub struct LightBlockers<'a> {
    grid: &'a WorldGrid,
    table: Vec<bool>,
    w: i32,
    h: i32,
    l: i32,
}

impl<'a> LightBlockers<'a> {
    pub fn new(grid: &'a WorldGrid, reg: &BlockRegistry) -> Self {
        Self {
            grid,
            table: reg.light_blockers(),
            w: grid.width as i32,
            h: grid.height as i32,
            l: grid.length as i32,
        }
    }

    // Callers keep coordinates in bounds; the march never leaves the grid.
    #[inline]
    fn blocks(&self, x: i32, y: i32, z: i32) -> bool {
        let b = self.grid.get_block(x as usize, y as usize, z as usize);
        self.table.get(b.id as usize).copied().unwrap_or(true)
    }

    // Direct cell, one-below lookahead, and the two corner quorums.
    #[inline]
    fn ray_open(&self, xd: i32, y: i32, zd: i32) -> bool {
        let ys = if y > 0 { y - 1 } else { y };
        let xs = if xd > 0 { xd - 1 } else { xd };
        let zs = if zd > 0 { zd - 1 } else { zd };
        !self.blocks(xd, y, zd)
            && !self.blocks(xd, ys, zd)
            && !(self.blocks(xs, y, zd) && self.blocks(xd, y, zs))
            && !(self.blocks(xs, ys, zd) && self.blocks(xd, ys, zs))
    }

    /// Walk the ray of skewed cell `(u, v)` down from the top of the world.
    pub fn march(&self, u: usize, v: usize) -> MarchEnd {
        let (w, h, l) = (self.w, self.h, self.l);
        let mut y = h - 1;
        let mut xd = u as i32 + h - 1;
        let mut zd = v as i32 + h - 1;
        // Cells in the far margin start outside the world; slide them back
        // along the diagonal onto the boundary.
        let x_over = (xd - (w + h - 1)).max(0);
        let z_over = (zd - (l + h - 1)).max(0);
        let over = x_over.max(z_over);
        y -= over;
        xd -= over + h;
        zd -= over + h;

        while y > 0 && xd >= 0 && xd < w && zd >= 0 && zd < l && self.ray_open(xd, y, zd) {
            y -= 1;
            xd -= 1;
            zd -= 1;
        }
        if xd < 0 || zd < 0 { MarchEnd::ExitedEdge } else { MarchEnd::Stopped(y) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarchEnd {
    /// Ray was blocked (or reached the floor) at this height.
    Stopped(i32),
    /// Ray left through the low x or z face of the world.
    ExitedEdge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockerDepths {
    width: usize,
    height: usize,
    length: usize,
    cells: Vec<i32>,
}

impl BlockerDepths {
    pub fn new(width: usize, height: usize, length: usize) -> Self {
        Self { width, height, length, cells: vec![0; (width + height) * (length + height)] }
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.length)
    }

    /// Skewed array extent `(width + height, length + height)`.
    #[inline]
    pub fn extent(&self) -> (usize, usize) {
        (self.width + self.height, self.length + self.height)
    }

    /// Skewed cell of an in-bounds voxel.
    #[inline]
    pub fn skew(&self, x: usize, y: usize, z: usize) -> (usize, usize) {
        (x + self.height - y, z + self.height - y)
    }

    #[inline]
    pub fn get(&self, u: usize, v: usize) -> i32 {
        self.cells[u + v * (self.width + self.height)]
    }

    #[inline]
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Recompute a region given in world column coordinates.
    ///
    /// Starts are shifted by `height` into skewed space. An extent equal to
    /// the world's own size also pulls the start back by `height`, so a
    /// `(0, 0, width, length)` request covers the whole skewed array,
    /// margins included. The result is clamped to the array. Returns the
    /// number of cells whose value changed.
    pub fn compute_region(
        &mut self,
        occ: &LightBlockers<'_>,
        x_start: i32,
        z_start: i32,
        x_extent: usize,
        z_extent: usize,
    ) -> usize {
        let (xe, ze) = self.extent();
        let (u0, u1) = widen(x_start, x_extent, self.width, self.height, xe);
        let (v0, v1) = widen(z_start, z_extent, self.length, self.height, ze);
        if u0 >= u1 || v0 >= v1 {
            return 0;
        }
        #[cfg(feature = "parallel")]
        let rows = self.cells.par_chunks_mut(xe).enumerate().skip(v0).take(v1 - v0);
        #[cfg(not(feature = "parallel"))]
        let rows = self.cells.chunks_mut(xe).enumerate().skip(v0).take(v1 - v0);
        rows.map(|(v, row)| march_row(occ, row, v, u0, u1)).sum()
    }

    /// Re-march specific cells. Returns the ones whose value changed.
    pub fn recompute_cells(
        &mut self,
        occ: &LightBlockers<'_>,
        cells: &[(usize, usize)],
    ) -> Vec<(usize, usize)> {
        let xe = self.width + self.height;
        let mut changed = Vec::new();
        for &(u, v) in cells {
            if let MarchEnd::Stopped(y) = occ.march(u, v) {
                let slot = &mut self.cells[u + v * xe];
                if *slot != y {
                    *slot = y;
                    changed.push((u, v));
                }
            }
        }
        changed
    }

    /// Cells whose march reads voxel `(x, y, z)`: the ray through it, the
    /// ray whose lookahead lands on it, and the four rays that use it as a
    /// quorum corner.
    pub fn cells_reading(&self, x: usize, y: usize, z: usize) -> Vec<(usize, usize)> {
        const OFFSETS: [(i64, i64); 6] = [(0, 0), (-1, -1), (1, 0), (0, 1), (0, -1), (-1, 0)];
        let (xe, ze) = self.extent();
        let (u0, v0) = self.skew(x, y, z);
        OFFSETS
            .iter()
            .filter_map(|&(du, dv)| {
                let u = u0 as i64 + du;
                let v = v0 as i64 + dv;
                (u >= 0 && v >= 0 && (u as usize) < xe && (v as usize) < ze)
                    .then_some((u as usize, v as usize))
            })
            .collect()
    }
}

fn widen(start: i32, extent: usize, world: usize, height: usize, limit: usize) -> (usize, usize) {
    let height = height as i64;
    let mut s = start as i64 + height;
    let mut n = extent as i64;
    if extent == world {
        n += height;
        s -= height;
    }
    let lo = s.clamp(0, limit as i64) as usize;
    let hi = (s + n).clamp(0, limit as i64) as usize;
    (lo, hi)
}

fn march_row(occ: &LightBlockers<'_>, row: &mut [i32], v: usize, u0: usize, u1: usize) -> usize {
    let mut changed = 0;
    for u in u0..u1 {
        // Rays leaving through the world edge keep whatever was stored.
        if let MarchEnd::Stopped(y) = occ.march(u, v) {
            if row[u] != y {
                row[u] = y;
                changed += 1;
            }
        }
    }
    changed
}
