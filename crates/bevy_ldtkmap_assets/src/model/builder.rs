//! One-shot construction of an immutable [`LdtkWorld`].
//!
//! Importers collect registries and levels here, then call
//! [`WorldBuilder::build`]. The resulting world only exposes read accessors.

use std::sync::Arc;

use bevy::{platform::collections::HashMap, prelude::*};

use super::entity::EntityDefinition;
use super::field::FieldInstance;
use super::level::{Level, LevelContents};
use super::world::{Definitions, LdtkWorld, Tileset};

/// Level under construction.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    identifier: String,
    iid: String,
    uid: i64,
    world_position: Vec2,
    px_size: UVec2,
    bg_color: Color,
    neighbours: Vec<i64>,
    field_instances: Vec<FieldInstance>,
    contents: Option<LevelContents>,
}

impl LevelBuilder {
    pub fn new(identifier: impl Into<String>, uid: i64) -> Self {
        Self {
            identifier: identifier.into(),
            iid: String::new(),
            uid,
            world_position: Vec2::ZERO,
            px_size: UVec2::ZERO,
            bg_color: Color::BLACK,
            neighbours: Vec::new(),
            field_instances: Vec::new(),
            contents: None,
        }
    }

    pub fn iid(mut self, iid: impl Into<String>) -> Self {
        self.iid = iid.into();
        self
    }

    pub fn world_position(mut self, position: Vec2) -> Self {
        self.world_position = position;
        self
    }

    pub fn px_size(mut self, size: UVec2) -> Self {
        self.px_size = size;
        self
    }

    pub fn bg_color(mut self, color: Color) -> Self {
        self.bg_color = color;
        self
    }

    pub fn neighbour(mut self, uid: i64) -> Self {
        self.neighbours.push(uid);
        self
    }

    pub fn field(mut self, field: FieldInstance) -> Self {
        self.field_instances.push(field);
        self
    }

    /// Materialize the level. Without contents the level is built unloaded.
    pub fn contents(mut self, contents: LevelContents) -> Self {
        self.contents = Some(contents);
        self
    }

    fn finish(self, definitions: Arc<Definitions>) -> Level {
        Level {
            identifier: self.identifier,
            iid: self.iid,
            uid: self.uid,
            world_position: self.world_position,
            px_size: self.px_size,
            bg_color: self.bg_color,
            neighbours: self.neighbours,
            field_instances: self.field_instances,
            contents: self.contents,
            definitions,
        }
    }
}

/// Collects tilesets, entity definitions and levels for a world.
#[derive(Debug, Clone, Default)]
pub struct WorldBuilder {
    tilesets: HashMap<i64, Tileset>,
    entities: HashMap<i64, EntityDefinition>,
    levels: Vec<LevelBuilder>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tileset. A later registration with the same uid replaces
    /// the earlier one.
    pub fn tileset(mut self, tileset: Tileset) -> Self {
        self.tilesets.insert(tileset.uid, tileset);
        self
    }

    pub fn entity_definition(mut self, definition: EntityDefinition) -> Self {
        self.entities.insert(definition.uid, definition);
        self
    }

    /// Append a level; levels keep insertion order.
    pub fn level(mut self, level: LevelBuilder) -> Self {
        self.levels.push(level);
        self
    }

    pub fn build(self) -> LdtkWorld {
        let definitions = Arc::new(Definitions {
            tilesets: self.tilesets,
            entities: self.entities,
        });
        let levels = self
            .levels
            .into_iter()
            .map(|level| level.finish(Arc::clone(&definitions)))
            .collect();

        LdtkWorld {
            definitions,
            levels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::world::LookupError;

    #[test]
    fn test_registries_are_shared_by_levels() {
        let mut images = Assets::<Image>::default();
        let texture = images.add(Image::default());

        let world = WorldBuilder::new()
            .tileset(Tileset::new(7, "Atlas", texture.clone()))
            .entity_definition(EntityDefinition::new(3, "Player", UVec2::new(16, 24)))
            .level(LevelBuilder::new("Level_0", 0))
            .level(LevelBuilder::new("Level_1", 1).neighbour(0))
            .build();

        assert_eq!(world.tileset_texture(7), Ok(&texture));
        assert_eq!(world.tileset_texture(8), Err(LookupError::TilesetNotFound(8)));
        assert_eq!(
            world.entity_definition(4),
            Err(LookupError::EntityDefinitionNotFound(4))
        );

        let level = world.level("Level_1").unwrap();
        assert_eq!(level.neighbours(), &[0]);
        assert_eq!(
            level.definitions().entity_definition(3).map(|d| d.size),
            Ok(UVec2::new(16, 24))
        );
        assert_eq!(world.level_by_uid(0).map(Level::identifier), Ok("Level_0"));
    }

    #[test]
    fn test_tileset_without_texture_is_not_found() {
        let world = WorldBuilder::new()
            .tileset(Tileset {
                uid: 2,
                identifier: "Embedded".to_string(),
                texture: None,
                tile_grid_size: 16,
                px_size: UVec2::ZERO,
            })
            .build();
        assert_eq!(world.tileset_texture(2), Err(LookupError::TilesetNotFound(2)));
        assert!(world.definitions().tileset(2).is_some());
    }
}
