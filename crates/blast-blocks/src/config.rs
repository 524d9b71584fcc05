use serde::Deserialize;

/// Top-level block table as read from `blocks.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    /// Blast resistance. Missing means 0 (fully permeable).
    #[serde(default)]
    pub resistance: Option<f32>,
    #[serde(default)]
    pub liquid: Option<bool>,
    /// Borrow another block's resistance instead of `resistance`.
    #[serde(default)]
    pub resistance_as: Option<ResistanceAs>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ResistanceAs {
    pub block: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}
