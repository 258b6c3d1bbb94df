//! Domain models for Scatt
//!
//! Turns a loosely-typed project manifest into sprites, scripts and blocks
//! without any I/O concerns. Manifest retrieval is delegated to a
//! [`ManifestLoader`].

mod json;
mod script;
mod sprite;
mod loader;
mod project;

pub use json::JsonExt;
pub use script::{extract_scripts, BlockTuple, Position, Script};
pub use sprite::{SpriteNode, SpriteRegistry, StageChild};
pub use loader::{LoadError, ManifestLoader};
pub use project::{
    fingerprint, project_name, ErrorState, ModelError, ParseError, ProjectAnalysis, ProjectModel,
};
