use bevy::math::{IVec2, URect, UVec2, Vec2};

use super::field::FieldInstance;

/// Field declared on an entity definition in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    pub identifier: String,
    /// Editor type tag, e.g. `Int` or `LocalEnum.Direction`.
    pub type_tag: String,
}

/// Shared metadata for every instance of one entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDefinition {
    pub uid: i64,
    pub identifier: String,
    /// Default size of the entity in pixels.
    pub size: UVec2,
    /// Tileset used to render this kind, if the editor assigned one.
    pub tileset_uid: Option<i64>,
    pub field_definitions: Vec<FieldDefinition>,
}

impl EntityDefinition {
    pub fn new(uid: i64, identifier: impl Into<String>, size: UVec2) -> Self {
        Self {
            uid,
            identifier: identifier.into(),
            size,
            tileset_uid: None,
            field_definitions: Vec::new(),
        }
    }

    pub fn with_tileset(mut self, tileset_uid: i64) -> Self {
        self.tileset_uid = Some(tileset_uid);
        self
    }

    pub fn with_field(mut self, identifier: impl Into<String>, type_tag: impl Into<String>) -> Self {
        self.field_definitions.push(FieldDefinition {
            identifier: identifier.into(),
            type_tag: type_tag.into(),
        });
        self
    }
}

/// Reference to a rectangle inside a tileset texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRef {
    pub tileset_uid: i64,
    /// Source rectangle in pixels.
    pub rect: URect,
}

impl TileRef {
    pub fn new(tileset_uid: i64, rect: URect) -> Self {
        Self { tileset_uid, rect }
    }
}

/// One placed occurrence of an entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInstance {
    identifier: String,
    iid: String,
    px: IVec2,
    pivot: Vec2,
    size: UVec2,
    tile: Option<TileRef>,
    def_uid: i64,
    field_instances: Vec<FieldInstance>,
}

impl EntityInstance {
    /// Create an instance with a zero pivot and no tile or fields.
    pub fn new(identifier: impl Into<String>, def_uid: i64, px: IVec2) -> Self {
        Self {
            identifier: identifier.into(),
            iid: String::new(),
            px,
            pivot: Vec2::ZERO,
            size: UVec2::ZERO,
            tile: None,
            def_uid,
            field_instances: Vec::new(),
        }
    }

    pub fn with_iid(mut self, iid: impl Into<String>) -> Self {
        self.iid = iid.into();
        self
    }

    pub fn with_pivot(mut self, pivot: Vec2) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_size(mut self, size: UVec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_tile(mut self, tile: TileRef) -> Self {
        self.tile = Some(tile);
        self
    }

    pub fn with_field(mut self, field: FieldInstance) -> Self {
        self.field_instances.push(field);
        self
    }

    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldInstance>) -> Self {
        self.field_instances.extend(fields);
        self
    }

    /// Name of the entity kind. Binding matches this against a shape name.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Editor-assigned instance id.
    pub fn iid(&self) -> &str {
        &self.iid
    }

    /// Pixel position inside the level.
    pub fn px(&self) -> IVec2 {
        self.px
    }

    /// Normalized pivot, `(0, 0)` is top-left.
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// Instance size in pixels (may differ from the definition when resized).
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn tile(&self) -> Option<&TileRef> {
        self.tile.as_ref()
    }

    pub fn def_uid(&self) -> i64 {
        self.def_uid
    }

    /// Field values in document order.
    pub fn field_instances(&self) -> &[FieldInstance] {
        &self.field_instances
    }
}
