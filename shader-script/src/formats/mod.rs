//! Module defining parsers for the text formats read from disk.

// Export the core parser trait
pub mod parser;
pub use parser::ScriptFormat;

// Format-specific implementations
pub mod shader_script;
pub mod skin;

pub use shader_script::ShaderScriptFormat;
pub use skin::SkinFormat;
