//! # bevy_ldtkmap
//!
//! LDtk project loader and field binder for Bevy.
//!
//! This is a meta-crate that combines the `bevy_ldtkmap_*` sub-crates.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_ldtkmap::prelude::*;
//!
//! #[derive(Default, LdtkEntity)]
//! struct Door {
//!     position: Vec2,
//!     pivot: Vec2,
//!     locked: bool,
//! }
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyLdtkmapPlugin::default())
//!         .add_systems(Startup, load_project)
//!         .run();
//! }
//!
//! fn load_project(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.spawn(LdtkProject {
//!         handle: asset_server.load("levels/world.ldtk"),
//!     });
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Layer 1** ([`assets`]): the project model and the `.ldtk` loader
//! - **Layer 2** ([`core`]): binding field instances onto typed records

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_ldtkmap_assets as assets;
pub use bevy_ldtkmap_core as core;

// Re-exported for LdtkEntity derive users
pub use inventory;

/// Unified prelude for bevy_ldtkmap
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap::prelude::*;
///
/// fn my_system(projects: Query<&LdtkProject>, assets: Res<Assets<LdtkProjectAsset>>) {
///     // Work with loaded projects...
/// }
/// ```
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    // Unified plugin
    pub use crate::plugin::BevyLdtkmapPlugin;
}
