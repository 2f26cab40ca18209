use std::sync::Arc;

use bevy::prelude::*;

use super::entity::EntityInstance;
use super::field::FieldInstance;
use super::int_grid::IntGrid;
use super::world::{Definitions, LookupError};

/// Materialized contents of a level.
///
/// A level receives its contents in one piece, so callers never observe
/// entities without the matching int grids or layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelContents {
    /// Pre-baked layer surfaces, one per declared layer, back to front.
    pub layers: Vec<Handle<Image>>,
    pub entities: Vec<EntityInstance>,
    pub int_grids: Vec<IntGrid>,
}

/// One playable area of a world.
#[derive(Debug, Clone)]
pub struct Level {
    pub(crate) identifier: String,
    pub(crate) iid: String,
    pub(crate) uid: i64,
    pub(crate) world_position: Vec2,
    pub(crate) px_size: UVec2,
    pub(crate) bg_color: Color,
    pub(crate) neighbours: Vec<i64>,
    pub(crate) field_instances: Vec<FieldInstance>,
    pub(crate) contents: Option<LevelContents>,
    pub(crate) definitions: Arc<Definitions>,
}

impl Level {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn iid(&self) -> &str {
        &self.iid
    }

    pub fn uid(&self) -> i64 {
        self.uid
    }

    pub fn world_position(&self) -> Vec2 {
        self.world_position
    }

    /// Level size in pixels.
    pub fn px_size(&self) -> UVec2 {
        self.px_size
    }

    pub fn bg_color(&self) -> Color {
        self.bg_color
    }

    /// Uids of adjacent levels.
    pub fn neighbours(&self) -> &[i64] {
        &self.neighbours
    }

    /// Custom fields set on the level itself.
    pub fn field_instances(&self) -> &[FieldInstance] {
        &self.field_instances
    }

    /// Whether layers, entities and int grids are materialized. Levels stored
    /// in separate files start out unloaded.
    pub fn is_loaded(&self) -> bool {
        self.contents.is_some()
    }

    pub fn layers(&self) -> &[Handle<Image>] {
        self.contents
            .as_ref()
            .map_or(&[], |contents| contents.layers.as_slice())
    }

    /// Entity instances in authoring order. Empty while unloaded.
    pub fn entity_instances(&self) -> &[EntityInstance] {
        self.contents
            .as_ref()
            .map_or(&[], |contents| contents.entities.as_slice())
    }

    pub fn int_grids(&self) -> &[IntGrid] {
        self.contents
            .as_ref()
            .map_or(&[], |contents| contents.int_grids.as_slice())
    }

    /// Int grid by identifier. The first match wins.
    pub fn int_grid(&self, identifier: &str) -> Result<&IntGrid, LookupError> {
        self.int_grids()
            .iter()
            .find(|grid| grid.identifier() == identifier)
            .ok_or_else(|| LookupError::IntGridNotFound(identifier.to_string()))
    }

    /// Registries of the owning world.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Return a copy of this level with its contents materialized.
    ///
    /// Used by loaders that resolve externally stored levels after the world
    /// itself was imported.
    pub fn with_contents(&self, contents: LevelContents) -> Self {
        Self {
            contents: Some(contents),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::builder::{LevelBuilder, WorldBuilder};

    fn level_with_grids() -> Level {
        let world = WorldBuilder::new()
            .level(LevelBuilder::new("Level_0", 0).contents(LevelContents {
                int_grids: vec![
                    IntGrid::new("Collisions", UVec2::new(2, 1), 16, vec![1, 0]),
                    IntGrid::new("Collisions", UVec2::new(1, 1), 16, vec![9]),
                ],
                ..default()
            }))
            .build();
        world.levels()[0].clone()
    }

    #[test]
    fn test_int_grid_found() {
        let level = level_with_grids();
        let grid = level.int_grid("Collisions").unwrap();
        assert_eq!(grid.values(), &[1, 0]);
    }

    #[test]
    fn test_int_grid_not_found() {
        let level = level_with_grids();
        assert_eq!(
            level.int_grid("Nope"),
            Err(LookupError::IntGridNotFound("Nope".to_string()))
        );
    }

    #[test]
    fn test_unloaded_level_has_no_contents() {
        let world = WorldBuilder::new()
            .level(LevelBuilder::new("Level_1", 1))
            .build();
        let level = &world.levels()[0];
        assert!(!level.is_loaded());
        assert!(level.entity_instances().is_empty());
        assert!(level.int_grid("Collisions").is_err());

        let loaded = level.with_contents(LevelContents::default());
        assert!(loaded.is_loaded());
    }
}
