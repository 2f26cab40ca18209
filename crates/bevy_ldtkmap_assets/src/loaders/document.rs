//! Raw node shapes of an `.ldtk` document.
//!
//! Only the keys the runtime model needs are declared; everything else in the
//! document is ignored by serde.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub defs: DefinitionsNode,
    #[serde(default)]
    pub levels: Vec<LevelNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionsNode {
    #[serde(default)]
    pub tilesets: Vec<TilesetNode>,
    #[serde(default)]
    pub entities: Vec<EntityDefinitionNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetNode {
    pub uid: i64,
    pub identifier: String,
    #[serde(default)]
    pub rel_path: Option<String>,
    #[serde(default)]
    pub tile_grid_size: u32,
    #[serde(default)]
    pub px_wid: u32,
    #[serde(default)]
    pub px_hei: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDefinitionNode {
    pub uid: i64,
    pub identifier: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub tileset_id: Option<i64>,
    #[serde(default)]
    pub field_defs: Vec<FieldDefinitionNode>,
}

#[derive(Debug, Deserialize)]
pub struct FieldDefinitionNode {
    pub identifier: String,
    #[serde(rename = "__type")]
    pub type_tag: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelNode {
    pub identifier: String,
    #[serde(default)]
    pub iid: String,
    pub uid: i64,
    #[serde(default)]
    pub world_x: i32,
    #[serde(default)]
    pub world_y: i32,
    #[serde(default)]
    pub px_wid: u32,
    #[serde(default)]
    pub px_hei: u32,
    #[serde(rename = "__bgColor", default)]
    pub bg_color: Option<String>,
    #[serde(rename = "__neighbours", default)]
    pub neighbours: Vec<NeighbourNode>,
    #[serde(default)]
    pub field_instances: Vec<FieldInstanceNode>,
    /// `null` when the level lives in its own file.
    #[serde(default)]
    pub layer_instances: Option<Vec<LayerNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighbourNode {
    #[serde(default)]
    pub level_iid: Option<String>,
    #[serde(default)]
    pub level_uid: Option<i64>,
    #[serde(default)]
    pub dir: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerNode {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(rename = "__type")]
    pub layer_type: String,
    #[serde(rename = "__cWid", default)]
    pub c_wid: u32,
    #[serde(rename = "__cHei", default)]
    pub c_hei: u32,
    #[serde(rename = "__gridSize", default)]
    pub grid_size: u32,
    #[serde(rename = "__pxTotalOffsetX", default)]
    pub px_total_offset_x: i32,
    #[serde(rename = "__pxTotalOffsetY", default)]
    pub px_total_offset_y: i32,
    #[serde(default)]
    pub int_grid_csv: Vec<i32>,
    #[serde(default)]
    pub entity_instances: Vec<EntityInstanceNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInstanceNode {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(default)]
    pub iid: String,
    pub px: Vec<i32>,
    #[serde(rename = "__pivot", default)]
    pub pivot: Vec<f32>,
    #[serde(rename = "__tile", default)]
    pub tile: Option<TileNode>,
    pub def_uid: i64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub field_instances: Vec<FieldInstanceNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileNode {
    pub tileset_uid: i64,
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default)]
    pub w: u32,
    #[serde(default)]
    pub h: u32,
}

#[derive(Debug, Deserialize)]
pub struct FieldInstanceNode {
    #[serde(rename = "__identifier")]
    pub identifier: String,
    #[serde(rename = "__type")]
    pub type_tag: String,
    #[serde(rename = "__value", default)]
    pub value: Value,
}
