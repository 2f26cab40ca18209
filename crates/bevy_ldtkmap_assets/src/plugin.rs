use bevy::prelude::*;

use crate::assets::project::LdtkProjectAsset;
use crate::loaders::LdtkProjectAssetLoader;

/// Plugin that registers the LDtk project asset type and its loader
///
/// This plugin enables loading `.ldtk` files as Bevy assets.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_ldtkmap_assets::LdtkmapAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(LdtkmapAssetsPlugin)
///     .run();
/// ```
///
/// # What this plugin does NOT do
///
/// - Field binding (that's Layer 2 - `bevy_ldtkmap_core`)
/// - Layer rasterization or rendering
///
/// This is a **Layer 1** plugin: pure asset loading with no ECS concerns.
pub struct LdtkmapAssetsPlugin;

impl Plugin for LdtkmapAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LdtkProjectAsset>()
            .register_asset_loader(LdtkProjectAssetLoader);
    }
}
