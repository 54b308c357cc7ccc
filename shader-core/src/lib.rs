//! Core library for the shader script compiler front-end.
//! Defines the shader descriptor data model, the tokenizer and the
//! surface-parameter table shared by every parsing stage.

use thiserror::Error;

/// The shader descriptor tree (shader, stage, deform, tcMod, waveform).
pub mod shader;
/// Render sort buckets.
pub mod sort;
/// Surface and content flag constants plus the `surfaceparm` lookup table.
pub mod surface;
/// Comment-stripping, quote-aware tokenizer.
pub mod tokenizer;

// Re-export core public items

/// A fully parsed shader descriptor.
pub use crate::shader::Shader;
/// One texture/blend layer of a shader.
pub use crate::shader::ShaderStage;
pub use crate::shader::{Deform, TexMod, Turbulence, Waveform};
/// Numeric render-order bucket.
pub use crate::sort::Sort;
/// Surface/content flag pair produced by a `surfaceparm` keyword.
pub use crate::surface::SurfaceParm;
/// Token stream with one-token rewind.
pub use crate::tokenizer::Tokenizer;

/// Errors that abort the parse of a single shader.
///
/// Anything not listed here (unknown keywords, unknown `surfaceparm` values,
/// unknown deform or tcMod variants) is tolerated and skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The shader name was not followed by an opening brace, or the text was empty.
    #[error("Structural error: expected '{{' after shader name '{name}'")]
    Structural {
        /// The name read before the missing brace (empty if there was none).
        name: String,
    },
    /// A keyword that requires an argument reached the end of the stream.
    #[error("Missing parameter for '{keyword}' keyword in shader '{shader}'")]
    MissingArgument {
        /// Name of the shader being parsed.
        shader: String,
        /// The keyword that was left without its argument.
        keyword: &'static str,
    },
}
