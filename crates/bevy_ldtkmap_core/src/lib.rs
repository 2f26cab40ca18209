//! # `bevy_ldtkmap_core`
//!
//! Binding layer for `bevy_ldtkmap`. Projects the entity instances and
//! fields of a loaded LDtk level onto plain Rust structs.
//!
//! **This crate does NOT spawn, render or simulate anything** - it hands
//! typed records to game code, which decides what to do with them.
//!
//! ## Architecture
//!
//! - **Layer 1** (`bevy_ldtkmap_assets`): the immutable project model and the
//!   `.ldtk` loader
//! - **Layer 2** (this crate): the binder, its diagnostics, the shape registry
//!   and the plugin announcing loaded projects
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap_assets::prelude::*;
//! use bevy_ldtkmap_core::prelude::*;
//!
//! #[derive(Default, LdtkEntity)]
//! struct Player {
//!     position: Vec2,
//!     pivot: Vec2,
//!     health: i32,
//! }
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(LdtkmapAssetsPlugin)
//!         .add_plugins(LdtkmapCorePlugin::default())
//!         .add_systems(Startup, load_project)
//!         .run();
//! }
//!
//! fn load_project(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands
//!         .spawn(LdtkProject {
//!             handle: asset_server.load("levels/world.ldtk"),
//!         })
//!         .observe(on_loaded);
//! }
//!
//! fn on_loaded(
//!     loaded: On<ProjectLoaded>,
//!     projects: Query<&LdtkProject>,
//!     assets: Res<Assets<LdtkProjectAsset>>,
//!     config: Res<LdtkmapCoreConfig>,
//! ) {
//!     let Ok(project) = projects.get(loaded.entity) else { return };
//!     let Some(asset) = assets.get(&project.handle) else { return };
//!     let binder = config.binder();
//!     for level in asset.world.levels() {
//!         match binder.bind_entities::<Player>(level, &mut LogDiagnostics) {
//!             Ok(players) => info!("{} players in {}", players.len(), level.identifier()),
//!             Err(err) => error!("{err}"),
//!         }
//!     }
//! }
//! ```

// Lets the derive macros name `::bevy_ldtkmap_core` from inside this crate's tests.
extern crate self as bevy_ldtkmap_core;

pub mod binding;
pub mod components;
pub mod diagnostics;
pub mod events;
pub mod plugin;
pub mod registry;
pub mod systems;

// Re-exported for LdtkEntity derive users
pub use inventory;

pub mod prelude {
    //! Common imports for `bevy_ldtkmap_core` users.

    pub use crate::binding::{
        BindError, BindOptions, Binder, ConvertError, FromFieldValue, LdtkEntity, LdtkEnum,
        LevelEntities, SlotKind,
    };
    pub use crate::components::{LdtkProject, LdtkProjectReady};
    pub use crate::diagnostics::{
        Diagnostic, DiagnosticSink, Diagnostics, LogDiagnostics, Severity,
    };
    pub use crate::events::ProjectLoaded;
    pub use crate::plugin::{LdtkmapCoreConfig, LdtkmapCorePlugin};
    pub use crate::registry::{LdtkEntityInfo, LdtkEntityRegistry};

    // Re-export the derive macros
    pub use bevy_ldtkmap_macros::{LdtkEntity, LdtkEnum};
}

// Re-export plugin types at crate root for convenience
pub use plugin::{LdtkmapCoreConfig, LdtkmapCorePlugin};
