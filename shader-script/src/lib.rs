//! Script-level parsing for shader files: splitting a script into named
//! bodies, the per-shader grammar, sort resolution, skins and file loading.

use shader_core::ParseError;
use thiserror::Error;

pub mod formats;
pub mod library;
pub mod loader;
mod numeric;
pub mod parser;
pub mod script;
pub mod sort;

pub use formats::skin::{Skin, SkinSurface};
pub use library::ShaderLibrary;
pub use parser::parse_shader;
pub use script::{split_script, ScriptBodies};
pub use sort::resolve_sort;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse shader: {0}")]
    Parse(#[from] ParseError),
    #[error("Failed to read skin records: {0}")]
    Skin(#[from] csv::Error),
    #[error("Unknown shader: {0}")]
    UnknownShader(String),
    #[error("Invalid script data: {0}")]
    InvalidData(String),
}
