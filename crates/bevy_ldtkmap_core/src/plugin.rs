//! Plugin for `bevy_ldtkmap_core`.

use bevy::prelude::*;

use crate::binding::{BindOptions, Binder};
use crate::registry::LdtkEntityRegistry;
use crate::systems::process_loaded_projects;

/// Configuration for `LdtkmapCorePlugin`.
///
/// Inserted as a resource so systems can build a [`Binder`] with the same
/// options.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_core::{LdtkmapCoreConfig, LdtkmapCorePlugin};
/// use bevy_ldtkmap_core::binding::BindOptions;
///
/// App::new()
///     .add_plugins(LdtkmapCorePlugin::new(LdtkmapCoreConfig {
///         bind: BindOptions {
///             default_slot_diagnostics: true,
///         },
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct LdtkmapCoreConfig {
    /// Options used by [`LdtkmapCoreConfig::binder`].
    pub bind: BindOptions,

    /// Log definition fields that no registered shape accepts when a project
    /// finishes loading.
    pub audit_projects: bool,
}

impl Default for LdtkmapCoreConfig {
    fn default() -> Self {
        Self {
            bind: BindOptions::default(),
            audit_projects: true,
        }
    }
}

impl LdtkmapCoreConfig {
    pub fn binder(&self) -> Binder {
        Binder::new(self.bind.clone())
    }
}

/// Plugin for the `bevy_ldtkmap_core` binding layer.
///
/// Add this plugin after `LdtkmapAssetsPlugin`.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_assets::LdtkmapAssetsPlugin;
/// use bevy_ldtkmap_core::LdtkmapCorePlugin;
///
/// fn app() {
///     App::new()
///         .add_plugins(DefaultPlugins)
///         .add_plugins(LdtkmapAssetsPlugin)
///         .add_plugins(LdtkmapCorePlugin::default())
///         .run();
/// }
/// ```
#[derive(Default)]
pub struct LdtkmapCorePlugin {
    config: LdtkmapCoreConfig,
}

impl LdtkmapCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: LdtkmapCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for LdtkmapCorePlugin {
    fn build(&self, app: &mut App) {
        // Build the shape registry from inventory
        let registry = LdtkEntityRegistry::build();
        app.insert_resource(registry);

        app.insert_resource(self.config.clone());

        // Runs in PreUpdate so ProjectLoaded observers fire before user systems
        app.add_systems(PreUpdate, process_loaded_projects);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_inserts_resources() {
        let mut app = App::new();
        app.add_plugins(LdtkmapCorePlugin::new(LdtkmapCoreConfig {
            bind: BindOptions {
                default_slot_diagnostics: false,
            },
            audit_projects: false,
        }));

        assert!(app.world().contains_resource::<LdtkEntityRegistry>());
        let config = app.world().resource::<LdtkmapCoreConfig>();
        assert!(!config.audit_projects);
        assert!(!config.binder().options().default_slot_diagnostics);
    }
}
