use std::sync::Arc;

use bevy::{platform::collections::HashMap, prelude::*};
use thiserror::Error;

use super::entity::EntityDefinition;
use super::level::Level;

/// Failed lookup in a world registry or level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Tileset {0} not found")]
    TilesetNotFound(i64),

    #[error("Entity definition {0} not found")]
    EntityDefinitionNotFound(i64),

    #[error("{0} IntGrid not found")]
    IntGridNotFound(String),

    #[error("Level '{0}' not found")]
    LevelNotFound(String),
}

/// A tileset registered in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    pub uid: i64,
    pub identifier: String,
    /// Atlas texture. `None` for tilesets the editor embeds without an image.
    pub texture: Option<Handle<Image>>,
    /// Edge length of one tile in pixels.
    pub tile_grid_size: u32,
    /// Atlas size in pixels.
    pub px_size: UVec2,
}

impl Tileset {
    pub fn new(uid: i64, identifier: impl Into<String>, texture: Handle<Image>) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            texture: Some(texture),
            tile_grid_size: 0,
            px_size: UVec2::ZERO,
        }
    }
}

/// Project-wide registries shared by every level of a world.
///
/// Built once by [`WorldBuilder`](super::builder::WorldBuilder) and never
/// mutated afterwards.
#[derive(Debug, Default)]
pub struct Definitions {
    pub(crate) tilesets: HashMap<i64, Tileset>,
    pub(crate) entities: HashMap<i64, EntityDefinition>,
}

impl Definitions {
    /// Texture of a registered tileset.
    pub fn tileset_texture(&self, uid: i64) -> Result<&Handle<Image>, LookupError> {
        self.tilesets
            .get(&uid)
            .and_then(|tileset| tileset.texture.as_ref())
            .ok_or(LookupError::TilesetNotFound(uid))
    }

    pub fn tileset(&self, uid: i64) -> Option<&Tileset> {
        self.tilesets.get(&uid)
    }

    pub fn entity_definition(&self, uid: i64) -> Result<&EntityDefinition, LookupError> {
        self.entities
            .get(&uid)
            .ok_or(LookupError::EntityDefinitionNotFound(uid))
    }

    /// Entity definition by kind name.
    pub fn entity_definition_by_identifier(&self, identifier: &str) -> Option<&EntityDefinition> {
        self.entities
            .values()
            .find(|definition| definition.identifier == identifier)
    }

    pub fn tilesets(&self) -> impl Iterator<Item = &Tileset> {
        self.tilesets.values()
    }

    pub fn entity_definitions(&self) -> impl Iterator<Item = &EntityDefinition> {
        self.entities.values()
    }
}

/// Root of a loaded project: the registries and the ordered levels.
#[derive(Debug, Clone)]
pub struct LdtkWorld {
    pub(crate) definitions: Arc<Definitions>,
    pub(crate) levels: Vec<Level>,
}

impl LdtkWorld {
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Levels in document order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, identifier: &str) -> Result<&Level, LookupError> {
        self.levels
            .iter()
            .find(|level| level.identifier() == identifier)
            .ok_or_else(|| LookupError::LevelNotFound(identifier.to_string()))
    }

    pub fn level_by_uid(&self, uid: i64) -> Result<&Level, LookupError> {
        self.levels
            .iter()
            .find(|level| level.uid() == uid)
            .ok_or_else(|| LookupError::LevelNotFound(uid.to_string()))
    }

    pub fn tileset_texture(&self, uid: i64) -> Result<&Handle<Image>, LookupError> {
        self.definitions.tileset_texture(uid)
    }

    pub fn entity_definition(&self, uid: i64) -> Result<&EntityDefinition, LookupError> {
        self.definitions.entity_definition(uid)
    }
}
