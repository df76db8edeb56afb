use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use super::config::BlocksConfig;
use super::types::{Block, BlockId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub blocks_light: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateName(String),
    NonSequentialId { name: String, expected: BlockId, got: BlockId },
    UnknownFallback(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateName(n) => write!(f, "block {:?} defined twice", n),
            RegistryError::NonSequentialId { name, expected, got } => write!(
                f,
                "block {:?} has id {} but ids must be sequential (expected {})",
                name, got, expected
            ),
            RegistryError::UnknownFallback(n) => {
                write!(f, "unknown_block names {:?}, which is not defined", n)
            }
        }
    }
}

impl Error for RegistryError {}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self { blocks: Vec::new(), by_name: HashMap::new(), unknown_block_id: None }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    /// Whether blocks of this id stop the sun ray. Ids missing from the
    /// registry are treated as opaque.
    #[inline]
    pub fn blocks_light(&self, id: BlockId) -> bool {
        self.get(id).map(|ty| ty.blocks_light).unwrap_or(true)
    }

    /// Flat `blocks_light` table indexed by block id.
    pub fn light_blockers(&self) -> Vec<bool> {
        self.blocks.iter().map(|ty| ty.blocks_light).collect()
    }

    /// Resolve a block by name, falling back to the configured unknown block, then air.
    pub fn block_by_name(&self, name: &str) -> Block {
        let id = self
            .id_by_name(name)
            .or(self.unknown_block_id)
            .or_else(|| self.id_by_name("air"))
            .unwrap_or(Block::AIR.id);
        Block::from_id(id)
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(blocks_toml: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: BlocksConfig = toml::from_str(blocks_toml)?;
        Ok(Self::from_configs(cfg)?)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        for def in cfg.blocks.into_iter() {
            let expected = reg.blocks.len() as BlockId;
            let id = def.id.unwrap_or(expected);
            if id != expected {
                return Err(RegistryError::NonSequentialId { name: def.name, expected, got: id });
            }
            if reg.by_name.contains_key(&def.name) {
                return Err(RegistryError::DuplicateName(def.name));
            }
            let solid = def.solid.unwrap_or(true);
            let blocks_light = def.blocks_light.unwrap_or(solid);
            reg.by_name.insert(def.name.clone(), id);
            reg.blocks.push(BlockType { id, name: def.name, solid, blocks_light });
        }
        if let Some(name) = cfg.unknown_block {
            match reg.id_by_name(&name) {
                Some(id) => reg.unknown_block_id = Some(id),
                None => return Err(RegistryError::UnknownFallback(name)),
            }
        }
        Ok(reg)
    }
}
