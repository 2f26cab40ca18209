//! Registry of record shapes.
//!
//! Uses the inventory crate for compile-time registration of types marked with
//! `#[derive(LdtkEntity)]`.

use bevy::{platform::collections::HashMap, prelude::*};
use bevy_ldtkmap_assets::model::{Definitions, EntityDefinition};

use crate::binding::{SlotKind, slot_name};

/// Metadata about one declared slot.
#[derive(Debug, Clone)]
pub struct LdtkSlotInfo {
    pub name: &'static str,
    pub kind: SlotKind,
}

/// Information about a registered `LdtkEntity` shape.
///
/// Submitted via `inventory::submit!` by the derive macro.
pub struct LdtkEntityInfo {
    /// Entity identifier the shape binds to.
    pub identifier: &'static str,

    /// Rust type name.
    pub type_name: &'static str,

    /// Declared slots.
    pub fields: &'static [LdtkSlotInfo],

    /// Default slots the shape provides (`position`, `pivot`, ...).
    pub default_slots: &'static [&'static str],
}

inventory::collect!(LdtkEntityInfo);

/// A definition field that no slot of the matching shape accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedField {
    pub entity: String,
    pub field: String,
    pub slot: String,
    pub shape: &'static str,
}

/// Registry of all types with `#[derive(LdtkEntity)]`.
///
/// Built once at plugin startup.
#[derive(Resource, Default)]
pub struct LdtkEntityRegistry {
    by_identifier: HashMap<&'static str, &'static LdtkEntityInfo>,
}

impl LdtkEntityRegistry {
    /// Build the registry from all inventory submissions.
    pub fn build() -> Self {
        let mut registry = Self::default();
        for info in inventory::iter::<LdtkEntityInfo> {
            registry.insert(info);
        }

        info!(
            "LdtkEntityRegistry built with {} registered shapes",
            registry.len()
        );

        registry
    }

    /// Register a shape. A later shape with the same identifier replaces the
    /// earlier one.
    pub fn insert(&mut self, info: &'static LdtkEntityInfo) {
        if let Some(previous) = self.by_identifier.insert(info.identifier, info) {
            warn!(
                "Entity identifier '{}' registered by both {} and {}",
                info.identifier, previous.type_name, info.type_name
            );
        }
    }

    pub fn get(&self, identifier: &str) -> Option<&'static LdtkEntityInfo> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static LdtkEntityInfo> + '_ {
        self.by_identifier.values().copied()
    }

    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    /// Definition fields that would be skipped when binding into the
    /// registered shapes.
    pub fn audit(&self, definitions: &Definitions) -> Vec<UnmappedField> {
        let mut unmapped = Vec::new();
        for definition in definitions.entity_definitions() {
            if let Some(info) = self.get(&definition.identifier) {
                unmapped.extend(audit_definition(info, definition));
            }
        }
        unmapped.sort_by(|a, b| (&a.entity, &a.field).cmp(&(&b.entity, &b.field)));
        unmapped
    }
}

fn audit_definition(
    info: &'static LdtkEntityInfo,
    definition: &EntityDefinition,
) -> impl Iterator<Item = UnmappedField> {
    definition
        .field_definitions
        .iter()
        .filter_map(move |field| {
            let slot = slot_name(&field.identifier);
            if info.fields.iter().any(|f| f.name == slot) {
                return None;
            }
            Some(UnmappedField {
                entity: definition.identifier.clone(),
                field: field.identifier.clone(),
                slot: slot.into_owned(),
                shape: info.type_name,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ldtkmap_assets::model::WorldBuilder;

    static DOOR: LdtkEntityInfo = LdtkEntityInfo {
        identifier: "Door",
        type_name: "Door",
        fields: &[LdtkSlotInfo {
            name: "locked",
            kind: SlotKind::Bool,
        }],
        default_slots: &["position", "pivot"],
    };

    #[test]
    fn test_audit_reports_unmapped_fields() {
        let mut registry = LdtkEntityRegistry::default();
        registry.insert(&DOOR);

        let world = WorldBuilder::new()
            .entity_definition(
                EntityDefinition::new(1, "Door", UVec2::splat(16))
                    .with_field("Locked", "Bool")
                    .with_field("Key_id", "Int"),
            )
            .entity_definition(EntityDefinition::new(2, "Chest", UVec2::splat(16)).with_field("Loot", "String"))
            .build();

        let unmapped = registry.audit(world.definitions());
        assert_eq!(
            unmapped,
            vec![UnmappedField {
                entity: "Door".to_string(),
                field: "Key_id".to_string(),
                slot: "key_id".to_string(),
                shape: "Door",
            }]
        );
    }

    #[test]
    fn test_lookup_by_identifier() {
        let mut registry = LdtkEntityRegistry::default();
        registry.insert(&DOOR);
        assert_eq!(registry.len(), 1);
        assert!(registry.get("Door").is_some());
        assert!(registry.get("door").is_none());
    }
}
