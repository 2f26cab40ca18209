//! Events fired by the core plugin.

use bevy::prelude::*;

/// Fired when a project and all its dependencies are loaded.
///
/// This is an `EntityEvent` that can be observed on the project entity.
///
/// # Example
///
/// ```ignore
/// commands.spawn(LdtkProject { ... })
///     .observe(|trigger: On<ProjectLoaded>| {
///         info!("Project ready with {} levels", trigger.event().level_count);
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct ProjectLoaded {
    /// The project entity
    #[event_target]
    pub entity: Entity,
    /// Number of levels in the project
    pub level_count: usize,
}
