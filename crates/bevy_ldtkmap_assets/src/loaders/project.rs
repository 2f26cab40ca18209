use std::path::Path;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    platform::collections::HashMap,
    prelude::*,
    tasks::ConditionalSendFuture,
};
use normalize_path::NormalizePath;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::project::LdtkProjectAsset;
use crate::loaders::document::{
    EntityInstanceNode, FieldInstanceNode, LayerNode, LevelNode, ProjectDocument,
};
use crate::model::{
    EntityDefinition, EntityInstance, FieldError, FieldInstance, IntGrid, LdtkWorld,
    LevelBuilder, LevelContents, TileRef, Tileset, WorldBuilder, parse_hex_color,
};

/// Asset loader for LDtk projects (.ldtk files)
///
/// Decodes the document, loads every tileset atlas as an image dependency and
/// builds the immutable [`LdtkWorld`].
#[derive(Default)]
pub struct LdtkProjectAssetLoader;

/// What to do with a field whose type tag names an unsupported kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownFieldPolicy {
    /// Abort the whole project load.
    #[default]
    Fail,
    /// Drop the owning entity (or the level field) and keep loading.
    Skip,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LdtkLoaderSettings {
    pub unknown_fields: UnknownFieldPolicy,
}

#[derive(Debug, Error)]
pub enum ProjectLoaderError {
    #[error("Failed to decode project: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Level '{level}': {source}")]
    Field {
        level: String,
        #[source]
        source: FieldError,
    },
}

impl AssetLoader for LdtkProjectAssetLoader {
    type Asset = LdtkProjectAsset;
    type Settings = LdtkLoaderSettings;
    type Error = ProjectLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let document: ProjectDocument = serde_json::from_slice(&bytes)?;

            let parent = load_context
                .asset_path()
                .path()
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();

            let world = import_document(document, settings, |rel_path| {
                let path = resolve_relative_path(&parent, rel_path)?;
                Ok(load_context.load(path))
            })?;

            debug!(
                "Loaded LDtk project {:?} with {} levels",
                load_context.asset_path(),
                world.levels().len()
            );

            Ok(LdtkProjectAsset { world })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ldtk"]
    }
}

/// Build a world from a decoded document.
///
/// `load_texture` turns a tileset's `relPath` into an image handle.
pub fn import_document(
    document: ProjectDocument,
    settings: &LdtkLoaderSettings,
    mut load_texture: impl FnMut(&str) -> Result<Handle<Image>, ProjectLoaderError>,
) -> Result<LdtkWorld, ProjectLoaderError> {
    let mut builder = WorldBuilder::new();

    for node in &document.defs.tilesets {
        let texture = node
            .rel_path
            .as_deref()
            .map(&mut load_texture)
            .transpose()?;
        builder = builder.tileset(Tileset {
            uid: node.uid,
            identifier: node.identifier.clone(),
            texture,
            tile_grid_size: node.tile_grid_size,
            px_size: UVec2::new(node.px_wid, node.px_hei),
        });
    }

    for node in document.defs.entities {
        let mut definition =
            EntityDefinition::new(node.uid, node.identifier, UVec2::new(node.width, node.height));
        definition.tileset_uid = node.tileset_id;
        for field in node.field_defs {
            definition = definition.with_field(field.identifier, field.type_tag);
        }
        builder = builder.entity_definition(definition);
    }

    // Newer documents reference neighbours by iid only.
    let uid_by_iid: HashMap<String, i64> = document
        .levels
        .iter()
        .map(|level| (level.iid.clone(), level.uid))
        .collect();

    for node in document.levels {
        builder = builder.level(import_level(node, settings, &uid_by_iid)?);
    }

    Ok(builder.build())
}

fn import_level(
    node: LevelNode,
    settings: &LdtkLoaderSettings,
    uid_by_iid: &HashMap<String, i64>,
) -> Result<LevelBuilder, ProjectLoaderError> {
    let level_error = |source: FieldError| ProjectLoaderError::Field {
        level: node.identifier.clone(),
        source,
    };

    let mut level = LevelBuilder::new(node.identifier.clone(), node.uid)
        .iid(node.iid.clone())
        .world_position(Vec2::new(node.world_x as f32, node.world_y as f32))
        .px_size(UVec2::new(node.px_wid, node.px_hei));

    if let Some(hex) = &node.bg_color {
        level = level.bg_color(parse_hex_color(hex).map_err(level_error)?);
    }

    for neighbour in &node.neighbours {
        let uid = neighbour.level_uid.or_else(|| {
            neighbour
                .level_iid
                .as_ref()
                .and_then(|iid| uid_by_iid.get(iid).copied())
        });
        match uid {
            Some(uid) => level = level.neighbour(uid),
            None => warn!(
                "Level '{}': unresolved neighbour in direction '{}'",
                node.identifier, neighbour.dir
            ),
        }
    }

    for field in &node.field_instances {
        match decode_field(field) {
            Ok(field) => level = level.field(field),
            Err(err) if skip_unknown(settings, &err) => {
                warn!("Level '{}': skipping field: {}", node.identifier, err);
            }
            Err(err) => return Err(level_error(err)),
        }
    }

    if let Some(layers) = &node.layer_instances {
        let contents = import_layers(layers, settings).map_err(level_error)?;
        level = level.contents(contents);
    }

    Ok(level)
}

fn import_layers(
    layers: &[LayerNode],
    settings: &LdtkLoaderSettings,
) -> Result<LevelContents, FieldError> {
    let mut contents = LevelContents::default();

    for layer in layers {
        if !layer.int_grid_csv.is_empty() {
            contents.int_grids.push(
                IntGrid::new(
                    layer.identifier.clone(),
                    UVec2::new(layer.c_wid, layer.c_hei),
                    layer.grid_size,
                    layer.int_grid_csv.clone(),
                )
                .with_offset(IVec2::new(
                    layer.px_total_offset_x,
                    layer.px_total_offset_y,
                )),
            );
        }

        for entity in &layer.entity_instances {
            match import_entity(entity) {
                Ok(instance) => contents.entities.push(instance),
                Err(err) if skip_unknown(settings, &err) => {
                    warn!("Skipping entity '{}': {}", entity.identifier, err);
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(contents)
}

fn import_entity(node: &EntityInstanceNode) -> Result<EntityInstance, FieldError> {
    let px = IVec2::new(
        node.px.first().copied().unwrap_or_default(),
        node.px.get(1).copied().unwrap_or_default(),
    );
    let pivot = Vec2::new(
        node.pivot.first().copied().unwrap_or_default(),
        node.pivot.get(1).copied().unwrap_or_default(),
    );

    let mut instance = EntityInstance::new(node.identifier.clone(), node.def_uid, px)
        .with_iid(node.iid.clone())
        .with_pivot(pivot)
        .with_size(UVec2::new(node.width, node.height));

    if let Some(tile) = &node.tile {
        instance = instance.with_tile(TileRef::new(
            tile.tileset_uid,
            URect::new(tile.x, tile.y, tile.x + tile.w, tile.y + tile.h),
        ));
    }

    let fields = node
        .field_instances
        .iter()
        .map(decode_field)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(instance.with_fields(fields))
}

fn decode_field(node: &FieldInstanceNode) -> Result<FieldInstance, FieldError> {
    FieldInstance::from_json(&node.identifier, &node.type_tag, &node.value)
}

fn skip_unknown(settings: &LdtkLoaderSettings, err: &FieldError) -> bool {
    settings.unknown_fields == UnknownFieldPolicy::Skip
        && matches!(err, FieldError::UnknownType { .. })
}

/// Resolve a path relative to the project file into an asset-root-relative
/// path with forward slashes.
fn resolve_relative_path(parent: &Path, relative_path: &str) -> Result<String, ProjectLoaderError> {
    let relative_path = relative_path.replace('\\', "/");

    let parent_str = parent.to_str().ok_or_else(|| {
        ProjectLoaderError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", parent))
    })?;
    let parent_str = parent_str.replace('\\', "/");

    let full_path = if parent_str.is_empty() {
        relative_path
    } else {
        format!("{}/{}", parent_str, relative_path)
    };

    // Resolve .. and . components
    let normalized = Path::new(&full_path).normalize();

    normalized
        .to_str()
        .map(|s| s.replace('\\', "/"))
        .ok_or_else(|| {
            ProjectLoaderError::InvalidPath(format!("Invalid UTF-8 in path: {:?}", normalized))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, LookupError};
    use serde_json::json;

    fn document(value: serde_json::Value) -> ProjectDocument {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> serde_json::Value {
        json!({
            "defs": {
                "tilesets": [
                    { "uid": 1, "identifier": "Atlas", "relPath": "../art/atlas.png", "tileGridSize": 16, "pxWid": 256, "pxHei": 128 },
                    { "uid": 2, "identifier": "Internal_icons", "relPath": null }
                ],
                "entities": [
                    {
                        "uid": 10, "identifier": "Player", "width": 16, "height": 24, "tilesetId": 1,
                        "fieldDefs": [ { "identifier": "Health", "__type": "Int" } ]
                    }
                ]
            },
            "levels": [
                {
                    "identifier": "Level_0", "iid": "a", "uid": 0, "worldX": 0, "worldY": 0,
                    "pxWid": 64, "pxHei": 32, "__bgColor": "#40465B",
                    "__neighbours": [ { "levelIid": "b", "dir": "e" } ],
                    "fieldInstances": [ { "__identifier": "Music", "__type": "String", "__value": "calm" } ],
                    "layerInstances": [
                        {
                            "__identifier": "Entities", "__type": "Entities", "__cWid": 4, "__cHei": 2, "__gridSize": 16,
                            "entityInstances": [
                                {
                                    "__identifier": "Player", "iid": "p1", "px": [24, 16], "__pivot": [0.5, 1.0],
                                    "__tile": { "tilesetUid": 1, "x": 0, "y": 16, "w": 16, "h": 24 },
                                    "defUid": 10, "width": 16, "height": 24,
                                    "fieldInstances": [ { "__identifier": "Health", "__type": "Int", "__value": 3 } ]
                                }
                            ]
                        },
                        {
                            "__identifier": "Collisions", "__type": "IntGrid", "__cWid": 4, "__cHei": 2, "__gridSize": 16,
                            "intGridCsv": [1, 1, 1, 1, 0, 0, 0, 1]
                        }
                    ]
                },
                {
                    "identifier": "Level_1", "iid": "b", "uid": 5, "worldX": 64, "worldY": 0,
                    "__neighbours": [ { "levelIid": "a", "dir": "w" } ],
                    "layerInstances": null
                }
            ]
        })
    }

    fn import(value: serde_json::Value, settings: &LdtkLoaderSettings) -> Result<LdtkWorld, ProjectLoaderError> {
        let mut images = Assets::<Image>::default();
        import_document(document(value), settings, |_| Ok(images.add(Image::default())))
    }

    #[test]
    fn test_import_levels_and_registries() {
        let world = import(sample(), &LdtkLoaderSettings::default()).unwrap();

        assert_eq!(world.levels().len(), 2);
        assert!(world.tileset_texture(1).is_ok());
        assert_eq!(world.tileset_texture(2), Err(LookupError::TilesetNotFound(2)));
        assert_eq!(world.entity_definition(10).unwrap().tileset_uid, Some(1));

        let level = world.level("Level_0").unwrap();
        assert!(level.is_loaded());
        assert_eq!(level.neighbours(), &[5]);
        assert_eq!(level.bg_color(), Color::srgb_u8(0x40, 0x46, 0x5B));
        assert_eq!(
            level.field_instances()[0].value(),
            &FieldValue::String(Some("calm".to_string()))
        );

        let player = &level.entity_instances()[0];
        assert_eq!(player.px(), IVec2::new(24, 16));
        assert_eq!(player.pivot(), Vec2::new(0.5, 1.0));
        assert_eq!(player.tile().map(|t| t.rect), Some(URect::new(0, 16, 16, 40)));

        let grid = level.int_grid("Collisions").unwrap();
        assert_eq!(grid.value_at(IVec2::new(3, 1)), Some(1));
    }

    #[test]
    fn test_external_level_is_unloaded() {
        let world = import(sample(), &LdtkLoaderSettings::default()).unwrap();
        let level = world.level_by_uid(5).unwrap();
        assert!(!level.is_loaded());
        assert_eq!(level.neighbours(), &[0]);
    }

    fn with_unknown_field() -> serde_json::Value {
        let mut value = sample();
        value["levels"][0]["layerInstances"][0]["entityInstances"][0]["fieldInstances"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "__identifier": "Spin", "__type": "Quaternion", "__value": null }));
        value
    }

    #[test]
    fn test_unknown_field_fails_load() {
        let err = import(with_unknown_field(), &LdtkLoaderSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            ProjectLoaderError::Field {
                source: FieldError::UnknownType { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_field_skips_entity() {
        let settings = LdtkLoaderSettings {
            unknown_fields: UnknownFieldPolicy::Skip,
        };
        let world = import(with_unknown_field(), &settings).unwrap();
        let level = world.level("Level_0").unwrap();
        assert!(level.entity_instances().is_empty());
        assert!(level.int_grid("Collisions").is_ok());
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_relative_path(Path::new("maps"), "../art/atlas.png").unwrap(),
            "art/atlas.png"
        );
        assert_eq!(
            resolve_relative_path(Path::new(""), "atlas.png").unwrap(),
            "atlas.png"
        );
    }
}
