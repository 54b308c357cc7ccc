use crate::LoadError;

/// Trait defining the interface for format-specific text parsers.
///
/// Implementors turn the full contents of one file into a parsed value
/// (the raw bodies of a shader script, the surface list of a skin, ...).
pub trait ScriptFormat {
    /// The value produced from one file.
    type Output;

    /// Parses file content.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the content cannot be read in this format.
    fn parse(&self, content: &str) -> Result<Self::Output, LoadError>;

    /// Returns a descriptive name for this format.
    ///
    /// This can be used for debugging, logging, or user-facing error messages.
    fn format_name(&self) -> &'static str;
}
