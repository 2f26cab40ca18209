pub mod document;
pub mod project;

pub use project::{
    LdtkLoaderSettings, LdtkProjectAssetLoader, ProjectLoaderError, UnknownFieldPolicy,
    import_document,
};
