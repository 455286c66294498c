//! Asset loading/parsers (meshes, textures).
//! OBJ meshes keep quads and triangles as separate index batches.
//! The ground texture is decoded to RGBA8 for upload.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod texture;

pub use error::{AssetError, AssetResult, ParseErrorKind};
pub use mesh::MeshAsset;
