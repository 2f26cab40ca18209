//! Type-directed binding of field instances onto record shapes.
//!
//! A record shape is any `Default` type implementing [`LdtkEntity`], normally
//! through `#[derive(LdtkEntity)]`. The derive produces a static table of
//! named slots with setters, so binding never inspects types at runtime:
//!
//! 1. Start from `T::default()`.
//! 2. Fill the default slots (`position`, `pivot`, `texture`, `frame_size`)
//!    from the instance and the world registries.
//! 3. For every field instance, in document order, lower-case the first
//!    character of its identifier and store the value into the slot with that
//!    name. Fields without a slot are reported and skipped.
//!
//! Recoverable problems go to a [`DiagnosticSink`]; broken registry
//! references and values that do not fit their slot fail the entity with a
//! [`BindError`].

mod convert;

use std::borrow::Cow;

use bevy::prelude::*;
use bevy_ldtkmap_assets::model::{Definitions, EntityInstance, FieldInstance, Level, LookupError};
use thiserror::Error;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

pub use bevy_ldtkmap_assets::model::FieldValue;
pub use convert::{ConvertError, FromFieldValue, LdtkEnum, SlotKind, enum_from_field_value};

/// A named, writable slot on a record shape.
pub struct FieldSlot<T: 'static> {
    /// Slot name as matched against field identifiers.
    pub name: &'static str,
    /// Storage kind the slot expects.
    pub kind: SlotKind,
    /// Convert and store a value into the record.
    pub set: fn(&mut T, &FieldValue) -> Result<(), ConvertError>,
}

/// Setters for the slots populated from instance and definition data.
///
/// Each entry is optional; a missing `position` or `pivot` is reported as an
/// error, a missing `texture` or `frame_size` as a warning.
pub struct DefaultSlots<T: 'static> {
    pub position: Option<fn(&mut T, Vec2)>,
    pub pivot: Option<fn(&mut T, Vec2)>,
    pub texture: Option<fn(&mut T, Handle<Image>)>,
    pub frame_size: Option<fn(&mut T, Vec2)>,
}

impl<T: 'static> DefaultSlots<T> {
    /// No default slots at all.
    pub const NONE: Self = Self {
        position: None,
        pivot: None,
        texture: None,
        frame_size: None,
    };
}

/// A record shape that entity instances can be bound to.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use bevy_ldtkmap_core::prelude::*;
///
/// #[derive(Default, LdtkEntity)]
/// struct Door {
///     position: Vec2,
///     pivot: Vec2,
///     locked: bool,
///     key_id: Option<u32>,
/// }
/// ```
pub trait LdtkEntity: Default + 'static {
    /// Entity identifier this shape binds to; by default the type name.
    const IDENTIFIER: &'static str;

    /// Declared slots, looked up by name.
    const FIELD_SLOTS: &'static [FieldSlot<Self>];

    const DEFAULT_SLOTS: DefaultSlots<Self> = DefaultSlots::NONE;

    fn field_slot(name: &str) -> Option<&'static FieldSlot<Self>> {
        Self::FIELD_SLOTS.iter().find(|slot| slot.name == name)
    }
}

/// Errors that stop the binding of one entity.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// A tileset or entity definition the instance refers to is not registered.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// The shape wants a texture but neither the instance nor its definition
    /// names a tileset.
    #[error("Entity '{entity}' has no tileset to take a texture from")]
    MissingTileset { entity: String },

    /// A field value does not fit the slot it maps to.
    #[error("Field '{field}' on {shape}: {source}")]
    Conversion {
        shape: &'static str,
        field: String,
        #[source]
        source: ConvertError,
    },

    /// Entities were requested from a level whose contents are not loaded.
    #[error("Level '{0}' is not loaded")]
    LevelNotLoaded(String),
}

/// Binder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOptions {
    /// Report default slots missing on a shape. On by default in debug
    /// builds only.
    pub default_slot_diagnostics: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            default_slot_diagnostics: cfg!(debug_assertions),
        }
    }
}

/// Slot name for a field identifier: the first character lower-cased.
pub fn slot_name(identifier: &str) -> Cow<'_, str> {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => {
            let mut name: String = first.to_lowercase().collect();
            name.push_str(chars.as_str());
            Cow::Owned(name)
        }
        _ => Cow::Borrowed(identifier),
    }
}

/// Projects entity instances and field sets onto record shapes.
///
/// The binder holds no state besides its options; every call is a pure
/// function of its inputs and the read-only registries.
#[derive(Debug, Clone, Default)]
pub struct Binder {
    options: BindOptions,
}

impl Binder {
    pub fn new(options: BindOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BindOptions {
        &self.options
    }

    /// Bind one instance into a fresh `T`.
    pub fn bind_entity<T: LdtkEntity>(
        &self,
        instance: &EntityInstance,
        definitions: &Definitions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<T, BindError> {
        let mut record = T::default();
        self.populate_default_slots(&mut record, instance, definitions, sink)?;
        populate_fields(&mut record, instance.field_instances(), sink)?;
        Ok(record)
    }

    /// Bind every instance of `T` in the level, in authoring order.
    ///
    /// A level without such instances yields an empty vector.
    pub fn bind_entities<T: LdtkEntity>(
        &self,
        level: &Level,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Vec<T>, BindError> {
        ensure_loaded(level)?;
        level
            .entity_instances()
            .iter()
            .filter(|instance| instance.identifier() == T::IDENTIFIER)
            .map(|instance| self.bind_entity(instance, level.definitions(), sink))
            .collect()
    }

    /// Bind the first instance of `T` in the level, `None` if there is none.
    pub fn first_entity<T: LdtkEntity>(
        &self,
        level: &Level,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<T>, BindError> {
        ensure_loaded(level)?;
        level
            .entity_instances()
            .iter()
            .find(|instance| instance.identifier() == T::IDENTIFIER)
            .map(|instance| self.bind_entity(instance, level.definitions(), sink))
            .transpose()
    }

    /// Bind a bare field set (for example a level's own fields). Default
    /// slots are left untouched.
    pub fn bind_fields<T: LdtkEntity>(
        &self,
        fields: &[FieldInstance],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<T, BindError> {
        let mut record = T::default();
        populate_fields(&mut record, fields, sink)?;
        Ok(record)
    }

    fn populate_default_slots<T: LdtkEntity>(
        &self,
        record: &mut T,
        instance: &EntityInstance,
        definitions: &Definitions,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), BindError> {
        let slots = &T::DEFAULT_SLOTS;
        let report = self.options.default_slot_diagnostics;

        match slots.position {
            Some(set) => set(record, instance.px().as_vec2()),
            None if report => sink.report(Diagnostic::error(format!(
                "Sprite field \"position\" not found, add it to {} for full support of LDtk entity",
                T::IDENTIFIER
            ))),
            None => {}
        }

        match slots.pivot {
            Some(set) => set(record, instance.pivot()),
            None if report => sink.report(Diagnostic::error(format!(
                "Sprite field \"pivot\" not found, add it to {} for full support of LDtk entity",
                T::IDENTIFIER
            ))),
            None => {}
        }

        match slots.texture {
            Some(set) => {
                let tileset_uid = match instance.tile() {
                    Some(tile) => tile.tileset_uid,
                    None => definitions
                        .entity_definition(instance.def_uid())?
                        .tileset_uid
                        .ok_or_else(|| BindError::MissingTileset {
                            entity: instance.identifier().to_string(),
                        })?,
                };
                set(record, definitions.tileset_texture(tileset_uid)?.clone());
            }
            None if report => sink.report(Diagnostic::warning(format!(
                "Sprite field \"texture\" not found, add it to {} if you need texture support on this entity",
                T::IDENTIFIER
            ))),
            None => {}
        }

        match slots.frame_size {
            Some(set) => {
                let definition = definitions.entity_definition(instance.def_uid())?;
                set(record, definition.size.as_vec2());
            }
            None if report => sink.report(Diagnostic::warning(format!(
                "Sprite field \"frame_size\" not found, add it to {} if you need texture support on this entity",
                T::IDENTIFIER
            ))),
            None => {}
        }

        Ok(())
    }
}

fn populate_fields<T: LdtkEntity>(
    record: &mut T,
    fields: &[FieldInstance],
    sink: &mut dyn DiagnosticSink,
) -> Result<(), BindError> {
    for field in fields {
        let name = slot_name(field.identifier());

        let Some(slot) = T::field_slot(&name) else {
            sink.report(Diagnostic::error(format!(
                "Field \"{}\" not found, add it to {} for full support of LDtk entity",
                name,
                T::IDENTIFIER
            )));
            continue;
        };

        (slot.set)(record, field.value()).map_err(|source| BindError::Conversion {
            shape: T::IDENTIFIER,
            field: field.identifier().to_string(),
            source,
        })?;
    }
    Ok(())
}

fn ensure_loaded(level: &Level) -> Result<(), BindError> {
    if level.is_loaded() {
        Ok(())
    } else {
        Err(BindError::LevelNotLoaded(level.identifier().to_string()))
    }
}

/// Binding shortcuts on [`Level`] using default [`BindOptions`].
pub trait LevelEntities {
    /// Every instance of `T`, in authoring order.
    fn entities<T: LdtkEntity>(&self, sink: &mut dyn DiagnosticSink) -> Result<Vec<T>, BindError>;

    /// The first instance of `T`, if any.
    fn first_entity<T: LdtkEntity>(
        &self,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<T>, BindError>;

    /// The level's own fields bound into `T`.
    fn level_fields<T: LdtkEntity>(&self, sink: &mut dyn DiagnosticSink) -> Result<T, BindError>;
}

impl LevelEntities for Level {
    fn entities<T: LdtkEntity>(&self, sink: &mut dyn DiagnosticSink) -> Result<Vec<T>, BindError> {
        Binder::default().bind_entities(self, sink)
    }

    fn first_entity<T: LdtkEntity>(
        &self,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Option<T>, BindError> {
        Binder::default().first_entity(self, sink)
    }

    fn level_fields<T: LdtkEntity>(&self, sink: &mut dyn DiagnosticSink) -> Result<T, BindError> {
        Binder::default().bind_fields(self.field_instances(), sink)
    }
}
