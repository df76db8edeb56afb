use serde::Deserialize;

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    pub blocks: Vec<BlockDef>,
    // Optional name of a block to use when a requested block is unavailable.
    // If absent or not found, lookups fall back to `air`.
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    // Defaults to `solid` when omitted (glass, leaves: solid but let light through).
    #[serde(default)]
    pub blocks_light: Option<bool>,
}

impl BlockDef {
    pub fn named(name: &str) -> Self {
        Self { name: name.into(), id: None, solid: None, blocks_light: None }
    }
}
