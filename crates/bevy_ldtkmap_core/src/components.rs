//! Project components.

use bevy::prelude::*;
use bevy_ldtkmap_assets::prelude::LdtkProjectAsset;

/// Root component for an LDtk project.
///
/// Spawn an entity with this component to have the project audited and
/// announced once it and all its tileset images have loaded.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_ldtkmap_core::prelude::LdtkProject;
/// fn load_project(mut commands: Commands, asset_server: Res<AssetServer>) {
///     commands.spawn(LdtkProject {
///         handle: asset_server.load("levels/world.ldtk"),
///     });
/// }
/// ```
#[derive(Component, Debug, Clone)]
pub struct LdtkProject {
    /// Handle to the loaded `LdtkProjectAsset`.
    pub handle: Handle<LdtkProjectAsset>,
}

/// Marker added once a project has been processed.
///
/// Remove it to have the project processed again, e.g. after a hot reload.
#[derive(Component, Debug, Default)]
pub struct LdtkProjectReady;
