//! Unified plugin for bevy_ldtkmap.

use bevy::prelude::*;

use bevy_ldtkmap_assets::LdtkmapAssetsPlugin;
use bevy_ldtkmap_core::{LdtkmapCoreConfig, LdtkmapCorePlugin};

/// Plugin that adds asset loading and the binding layer.
///
/// This plugin includes:
/// - Asset loading ([`LdtkmapAssetsPlugin`])
/// - Project processing and the shape registry ([`LdtkmapCorePlugin`])
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         BevyLdtkmapPlugin::default().with_core(LdtkmapCoreConfig {
///             audit_projects: false,
///             ..default()
///         }),
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyLdtkmapPlugin {
    /// Core configuration
    pub core: LdtkmapCoreConfig,
}

impl BevyLdtkmapPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: LdtkmapCoreConfig) -> Self {
        self.core = config;
        self
    }
}

impl Plugin for BevyLdtkmapPlugin {
    fn build(&self, app: &mut App) {
        // Layer 1: Assets
        app.add_plugins(LdtkmapAssetsPlugin);

        // Layer 2: Binding
        app.add_plugins(LdtkmapCorePlugin::new(self.core.clone()));

        info!("BevyLdtkmapPlugin initialized");
    }
}
