use crate::formats::ScriptFormat;
use crate::script::{split_script, ScriptBodies};
use crate::LoadError;

/// A multi-shader `.shader` script, split into raw per-shader bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderScriptFormat;

impl ScriptFormat for ShaderScriptFormat {
    type Output = ScriptBodies;

    fn parse(&self, content: &str) -> Result<ScriptBodies, LoadError> {
        Ok(split_script(content))
    }

    fn format_name(&self) -> &'static str {
        "shader script"
    }
}
