use crate::formats::ScriptFormat;
use crate::LoadError;
use log::{trace, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surfaces carrying this prefix are attachment tags, not drawable geometry.
const TAG_PREFIX: &str = "tag_";

/// One model surface and the shader it is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SkinSurface {
    /// Lower-cased surface name.
    pub name: String,
    /// Shader name as written in the skin; resolved against a shader library by the caller.
    pub shader_name: String,
}

/// An ordered surface-to-shader mapping read from a `.skin` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Skin {
    pub surfaces: Vec<SkinSurface>,
}

impl Skin {
    /// Parses `surfaceName,shaderName` lines.
    ///
    /// `tag_` surfaces are skipped, as are lines without a shader name.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Skin` if the CSV reader rejects the input.
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.trim().as_bytes());

        let mut surfaces = Vec::new();
        for record in reader.records() {
            let record = record?;
            let name = record.get(0).unwrap_or_default().to_ascii_lowercase();
            if name.is_empty() {
                continue;
            }
            if name.starts_with(TAG_PREFIX) {
                trace!("Skipping skin tag '{name}'");
                continue;
            }

            match record.get(1).filter(|shader| !shader.is_empty()) {
                Some(shader_name) => surfaces.push(SkinSurface {
                    name,
                    shader_name: shader_name.to_owned(),
                }),
                None => warn!("Skin surface '{name}' has no shader name, skipping"),
            }
        }

        Ok(Self { surfaces })
    }

    /// Looks up the shader name assigned to `surface` (case-insensitive).
    pub fn shader_for(&self, surface: &str) -> Option<&str> {
        let surface = surface.to_ascii_lowercase();
        self.surfaces
            .iter()
            .find(|s| s.name == surface)
            .map(|s| s.shader_name.as_str())
    }
}

/// The `.skin` text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkinFormat;

impl ScriptFormat for SkinFormat {
    type Output = Skin;

    fn parse(&self, content: &str) -> Result<Skin, LoadError> {
        Skin::parse(content)
    }

    fn format_name(&self) -> &'static str {
        "skin"
    }
}
