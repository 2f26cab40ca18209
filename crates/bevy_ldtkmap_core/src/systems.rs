//! Reactive project processing.

use bevy::asset::RecursiveDependencyLoadState;
use bevy::prelude::*;
use bevy_ldtkmap_assets::prelude::LdtkProjectAsset;

use crate::components::{LdtkProject, LdtkProjectReady};
use crate::events::ProjectLoaded;
use crate::plugin::LdtkmapCoreConfig;
use crate::registry::LdtkEntityRegistry;

/// Detects when an `LdtkProjectAsset` finishes loading, audits it against the
/// registered shapes and fires [`ProjectLoaded`].
///
/// Runs in `PreUpdate` before user systems.
pub fn process_loaded_projects(
    asset_server: Res<AssetServer>,
    project_assets: Res<Assets<LdtkProjectAsset>>,
    registry: Res<LdtkEntityRegistry>,
    config: Res<LdtkmapCoreConfig>,
    mut commands: Commands,
    project_query: Query<(Entity, &LdtkProject), Without<LdtkProjectReady>>,
) {
    for (project_entity, project) in &project_query {
        let load_state = asset_server.get_recursive_dependency_load_state(&project.handle);

        match load_state {
            Some(RecursiveDependencyLoadState::Loaded) => {}
            Some(RecursiveDependencyLoadState::Failed(err)) => {
                error!("LDtk project {:?} failed to load: {}", project_entity, err);
                commands.entity(project_entity).insert(LdtkProjectReady);
                continue;
            }
            _ => continue,
        }

        let Some(asset) = project_assets.get(&project.handle) else {
            warn!("Project asset loaded but not found in Assets resource!");
            continue;
        };

        let project_name = asset_server
            .get_path(&project.handle)
            .map(|p| {
                p.path()
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Project")
                    .to_string()
            })
            .unwrap_or_else(|| "Project".to_string());

        info!(
            "LDtk project '{}' loaded with {} levels",
            project_name,
            asset.world.levels().len()
        );

        if config.audit_projects {
            for unmapped in registry.audit(asset.world.definitions()) {
                warn!(
                    "Field \"{}\" of entity '{}' has no slot \"{}\" on {}",
                    unmapped.field, unmapped.entity, unmapped.slot, unmapped.shape
                );
            }
        }

        commands
            .entity(project_entity)
            .insert((Name::new(format!("LDtk: {}", project_name)), LdtkProjectReady));

        let level_count = asset.world.levels().len();
        commands
            .entity(project_entity)
            .trigger(move |entity| ProjectLoaded {
                entity,
                level_count,
            });
    }
}
