use bevy::prelude::*;

use crate::model::LdtkWorld;

/// Bevy asset wrapper for LDtk projects (.ldtk files)
#[derive(TypePath, Asset, Debug)]
pub struct LdtkProjectAsset {
    /// The imported world. Read-only once the asset is loaded.
    pub world: LdtkWorld,
}
