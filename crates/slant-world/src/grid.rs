use std::fmt;

use slant_blocks::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    EmptyDimension { width: usize, height: usize, length: usize },
    TooLarge { width: usize, height: usize, length: usize },
    BlockCountMismatch { expected: usize, got: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::EmptyDimension { width, height, length } => {
                write!(f, "world dimensions must be non-zero, got {}x{}x{}", width, height, length)
            }
            GridError::TooLarge { width, height, length } => {
                write!(f, "world {}x{}x{} exceeds the addressable size", width, height, length)
            }
            GridError::BlockCountMismatch { expected, got } => {
                write!(f, "expected {} blocks for the world volume, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Dense `width × height × length` block array.
#[derive(Clone, Debug)]
pub struct WorldGrid {
    pub width: usize,
    pub height: usize,
    pub length: usize,
    pub blocks: Vec<Block>,
}

impl WorldGrid {
    /// All-air world. Each axis must be non-zero and fit in an `i32`.
    pub fn new(width: usize, height: usize, length: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 || length == 0 {
            return Err(GridError::EmptyDimension { width, height, length });
        }
        let limit = i32::MAX as usize / 2;
        if width > limit || height > limit || length > limit {
            return Err(GridError::TooLarge { width, height, length });
        }
        let Some(volume) = width.checked_mul(height).and_then(|v| v.checked_mul(length)) else {
            return Err(GridError::TooLarge { width, height, length });
        };
        Ok(Self { width, height, length, blocks: vec![Block::AIR; volume] })
    }

    /// Wraps existing storage; `blocks.len()` must equal the volume.
    pub fn from_blocks(
        width: usize,
        height: usize,
        length: usize,
        blocks: Vec<Block>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(width, height, length)?;
        let expected = grid.blocks.len();
        if blocks.len() != expected {
            return Err(GridError::BlockCountMismatch { expected, got: blocks.len() });
        }
        grid.blocks = blocks;
        Ok(grid)
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.length)
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.length + z) * self.width + x
    }

    /// Unchecked in release builds: out-of-range coordinates read an
    /// unrelated block or panic on the final index. Use [`WorldGrid::get`]
    /// for checked access.
    #[inline]
    pub fn get_block(&self, x: usize, y: usize, z: usize) -> Block {
        debug_assert!(x < self.width && y < self.height && z < self.length);
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.length
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if !self.contains(x, y, z) {
            return None;
        }
        Some(self.get_block(x as usize, y as usize, z as usize))
    }

    /// Writes `b` and returns the block it replaced, or `None` when out of bounds.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, b: Block) -> Option<Block> {
        if !self.contains(x, y, z) {
            return None;
        }
        let i = self.idx(x as usize, y as usize, z as usize);
        Some(std::mem::replace(&mut self.blocks[i], b))
    }

    /// Fills the half-open box `[min, max)` clipped to the grid.
    pub fn fill_box(&mut self, min: (usize, usize, usize), max: (usize, usize, usize), b: Block) {
        let x1 = max.0.min(self.width);
        let y1 = max.1.min(self.height);
        let z1 = max.2.min(self.length);
        for y in min.1..y1 {
            for z in min.2..z1 {
                for x in min.0..x1 {
                    let i = self.idx(x, y, z);
                    self.blocks[i] = b;
                }
            }
        }
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(|b| *b == Block::AIR)
    }
}
