use bevy::prelude::*;
use bevy_ldtkmap_assets::model::{
    EntityDefinition, EntityInstance, FieldInstance, FieldValue, LdtkWorld, LevelBuilder,
    LevelContents, TileRef, Tileset, WorldBuilder,
};
use bevy_ldtkmap_core::diagnostics::{Diagnostics, Severity};
use bevy_ldtkmap_core::prelude::*;
use bevy_ldtkmap_core::registry::UnmappedField;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, LdtkEnum)]
enum Facing {
    #[default]
    Left,
    Right,
    #[ldtk(rename = "Upwards")]
    Up,
}

#[derive(Debug, Default, LdtkEntity)]
struct Hero {
    position: Vec2,
    pivot: Vec2,
    texture: Handle<Image>,
    frame_size: Vec2,
    health: i32,
    speed: f32,
    facing: Facing,
    tint: Color,
    #[ldtk(rename = "spawn")]
    spawn_cell: IVec2,
    target: Option<IVec2>,
    #[ldtk(skip)]
    runtime_only: u32,
}

#[derive(Debug, Default, PartialEq, LdtkEntity)]
#[ldtk(name = "Chest")]
struct ChestRecord {
    #[ldtk(position)]
    at: Vec2,
    loot: Option<String>,
}

#[derive(Debug, Default, PartialEq, LdtkEntity)]
struct LevelInfo {
    music: String,
    dark: bool,
}

fn hero_instance() -> EntityInstance {
    EntityInstance::new("Hero", 1, IVec2::new(32, 48))
        .with_pivot(Vec2::new(0.5, 1.0))
        .with_fields([
            FieldInstance::new("Health", FieldValue::Int(Some(5))),
            FieldInstance::new("Speed", FieldValue::Int(Some(2))),
            FieldInstance::new(
                "Facing",
                FieldValue::LocalEnum {
                    qualifier: Some("Facing".to_string()),
                    case: Some("Right".to_string()),
                },
            ),
            FieldInstance::new("Tint", FieldValue::Color(Color::srgb(1.0, 0.0, 0.0))),
            FieldInstance::new("Spawn", FieldValue::Point(Some(IVec2::new(3, 4)))),
            FieldInstance::new("Target", FieldValue::Point(None)),
        ])
}

fn world(entities: Vec<EntityInstance>) -> (LdtkWorld, Handle<Image>) {
    let mut images = Assets::<Image>::default();
    let texture = images.add(Image::default());

    let world = WorldBuilder::new()
        .tileset(Tileset::new(7, "Characters", texture.clone()))
        .entity_definition(
            EntityDefinition::new(1, "Hero", UVec2::new(16, 32))
                .with_tileset(7)
                .with_field("Health", "Int")
                .with_field("Mana", "Int"),
        )
        .entity_definition(EntityDefinition::new(2, "Chest", UVec2::splat(16)).with_field("Loot", "String"))
        .level(
            LevelBuilder::new("Entrance", 0)
                .field(FieldInstance::new("Music", FieldValue::String(Some("cave".to_string()))))
                .field(FieldInstance::new("Dark", FieldValue::Bool(true)))
                .contents(LevelContents {
                    entities,
                    ..default()
                }),
        )
        .build();

    (world, texture)
}

fn binder() -> Binder {
    Binder::new(BindOptions {
        default_slot_diagnostics: true,
    })
}

#[test]
fn test_derived_slot_table() {
    let names: Vec<&str> = Hero::FIELD_SLOTS.iter().map(|slot| slot.name).collect();
    assert_eq!(
        names,
        vec!["health", "speed", "facing", "tint", "spawn", "target"]
    );
    assert_eq!(Hero::IDENTIFIER, "Hero");
    assert_eq!(ChestRecord::IDENTIFIER, "Chest");

    let facing = Hero::field_slot("facing").map(|slot| slot.kind);
    assert_eq!(facing, Some(SlotKind::Enum));
    assert_eq!(Hero::field_slot("target").map(|slot| slot.kind), Some(SlotKind::Point));
    assert!(Hero::field_slot("runtime_only").is_none());
    assert!(Hero::field_slot("position").is_none());
}

#[test]
fn test_bind_derived_entity() {
    let (world, texture) = world(vec![hero_instance()]);
    let level = &world.levels()[0];
    let mut diagnostics = Diagnostics::new();

    let hero: Hero = binder()
        .first_entity(level, &mut diagnostics)
        .unwrap()
        .unwrap();

    assert_eq!(hero.position, Vec2::new(32.0, 48.0));
    assert_eq!(hero.pivot, Vec2::new(0.5, 1.0));
    assert_eq!(hero.texture, texture);
    assert_eq!(hero.frame_size, Vec2::new(16.0, 32.0));
    assert_eq!(hero.health, 5);
    assert_eq!(hero.speed, 2.0);
    assert_eq!(hero.facing, Facing::Right);
    assert_eq!(hero.tint, Color::srgb(1.0, 0.0, 0.0));
    assert_eq!(hero.spawn_cell, IVec2::new(3, 4));
    assert_eq!(hero.target, None);
    assert_eq!(hero.runtime_only, 0);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_enum_rename_and_unknown_case() {
    let up = FieldValue::LocalEnum {
        qualifier: Some("Facing".to_string()),
        case: Some("Upwards".to_string()),
    };
    assert_eq!(Facing::from_field_value(&up), Ok(Facing::Up));
    assert_eq!(Facing::CASES, &["Left", "Right", "Upwards"]);

    let down = FieldValue::LocalEnum {
        qualifier: Some("Facing".to_string()),
        case: Some("Down".to_string()),
    };
    assert_eq!(
        Facing::from_field_value(&down),
        Err(ConvertError::UnknownCase {
            enum_name: "Facing",
            case: "Down".to_string()
        })
    );
}

#[test]
fn test_bad_enum_case_fails_entity() {
    let instance = EntityInstance::new("Hero", 1, IVec2::ZERO)
        .with_tile(TileRef::new(7, URect::new(0, 0, 16, 32)))
        .with_field(FieldInstance::new(
            "Facing",
            FieldValue::LocalEnum {
                qualifier: Some("Facing".to_string()),
                case: Some("Sideways".to_string()),
            },
        ));
    let (world, _) = world(vec![instance]);

    let err = binder()
        .bind_entities::<Hero>(&world.levels()[0], &mut ())
        .unwrap_err();
    assert!(matches!(err, BindError::Conversion { shape: "Hero", .. }));
}

#[test]
fn test_custom_identifier_and_attribute_default_slot() {
    let (world, _) = world(vec![
        EntityInstance::new("Chest", 2, IVec2::new(8, 8))
            .with_field(FieldInstance::new("Loot", FieldValue::String(None))),
    ]);
    let level = &world.levels()[0];
    let mut diagnostics = Diagnostics::new();

    let chests: Vec<ChestRecord> = binder().bind_entities(level, &mut diagnostics).unwrap();

    assert_eq!(
        chests,
        vec![ChestRecord {
            at: Vec2::new(8.0, 8.0),
            loot: None,
        }]
    );
    // pivot is missing, texture and frame size too
    assert_eq!(diagnostics.count(Severity::Error), 1);
    assert_eq!(diagnostics.count(Severity::Warning), 2);
}

#[test]
fn test_level_fields_derived() {
    let (world, _) = world(Vec::new());
    let info: LevelInfo = world.levels()[0].level_fields(&mut ()).unwrap();
    assert_eq!(
        info,
        LevelInfo {
            music: "cave".to_string(),
            dark: true,
        }
    );
}

#[test]
fn test_registry_collects_derived_shapes() {
    let registry = LdtkEntityRegistry::build();

    let hero = registry.get("Hero").unwrap();
    assert_eq!(hero.type_name, "Hero");
    assert_eq!(
        hero.default_slots,
        &["position", "pivot", "texture", "frame_size"]
    );

    let chest = registry.get("Chest").unwrap();
    assert_eq!(chest.type_name, "ChestRecord");
    assert_eq!(chest.default_slots, &["position"]);

    let (world, _) = world(Vec::new());
    let unmapped = registry.audit(world.definitions());
    assert_eq!(
        unmapped,
        vec![UnmappedField {
            entity: "Hero".to_string(),
            field: "Mana".to_string(),
            slot: "mana".to_string(),
            shape: "Hero",
        }]
    );
}
