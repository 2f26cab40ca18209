//! # `bevy_ldtkmap_assets`
//!
//! Layer 1 of `bevy_ldtkmap`: the read-only runtime model of an LDtk project
//! and the asset loader that imports `.ldtk` documents into it.
//!
//! The model is built once per project and never mutated afterwards. Field
//! values are decoded into a closed [`FieldValue`](model::FieldValue) union at
//! import time, so an unknown field kind is reported by the loader instead of
//! surfacing later during binding.

pub mod assets;
pub mod loaders;
pub mod model;
pub mod plugin;

pub mod prelude {
    //! Common imports for `bevy_ldtkmap_assets` users.

    pub use crate::assets::project::LdtkProjectAsset;
    pub use crate::loaders::{LdtkLoaderSettings, UnknownFieldPolicy};
    pub use crate::model::{
        Definitions, EntityDefinition, EntityInstance, FieldInstance, FieldValue, IntGrid,
        LdtkWorld, Level, LevelBuilder, LevelContents, LookupError, TileRef, Tileset,
        WorldBuilder,
    };
    pub use crate::plugin::LdtkmapAssetsPlugin;
}

pub use plugin::LdtkmapAssetsPlugin;
