//! Read-only runtime model of an LDtk project.
//!
//! `LdtkWorld` owns the tileset and entity-definition registries and the
//! ordered levels. Each `Level` owns its entity instances, int grids and
//! pre-baked layer surfaces. Everything is built once through
//! [`WorldBuilder`] and only exposes accessors afterwards, so a world can be
//! shared between any number of readers.

pub mod builder;
pub mod entity;
pub mod field;
pub mod int_grid;
pub mod level;
pub mod world;

pub use builder::{LevelBuilder, WorldBuilder};
pub use entity::{EntityDefinition, EntityInstance, FieldDefinition, TileRef};
pub use field::{FieldError, FieldInstance, FieldValue, parse_hex_color};
pub use int_grid::IntGrid;
pub use level::{Level, LevelContents};
pub use world::{Definitions, LdtkWorld, LookupError, Tileset};
