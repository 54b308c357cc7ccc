use crate::sort::Sort;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Blend factor names as stored on a [`ShaderStage`].
pub mod blend {
    pub const GL_ONE: &str = "GL_ONE";
    pub const GL_ZERO: &str = "GL_ZERO";
    pub const GL_SRC_ALPHA: &str = "GL_SRC_ALPHA";
    pub const GL_ONE_MINUS_SRC_ALPHA: &str = "GL_ONE_MINUS_SRC_ALPHA";
    pub const GL_DST_COLOR: &str = "GL_DST_COLOR";
}

/// Placeholder for the built-in white texture.
pub const WHITE_IMAGE: &str = "*white";
/// Placeholder for the map's precomputed lightmap texture.
pub const LIGHTMAP_IMAGE: &str = "*lightmap";
/// Texture used for `$lightmap` when no lightmap is available.
pub const NO_LIGHTMAP_IMAGE: &str = WHITE_IMAGE;

/// A periodic function driving an animated value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waveform {
    /// Function name, lower-cased (`sin`, `square`, `triangle`, ...).
    pub func_name: String,
    pub base: f32,
    pub amp: f32,
    pub phase: f32,
    pub freq: f32,
}

impl Waveform {
    /// Returns `true` if any parameter is not-a-number (a starved read).
    pub fn has_nan(&self) -> bool {
        [self.base, self.amp, self.phase, self.freq]
            .iter()
            .any(|v| v.is_nan())
    }
}

/// Waveform-shaped parameters of a `tcMod turb`, without a function name.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Turbulence {
    pub base: f32,
    pub amp: f32,
    pub phase: f32,
    pub freq: f32,
}

/// A per-vertex deformation. Only `deformVertexes wave` is recognised.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Deform {
    Wave {
        /// Reciprocal of the divisor given in the script.
        spread: f32,
        wave: Waveform,
    },
}

/// A texture-coordinate modifier applied by a stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum TexMod {
    Rotate {
        /// Rotation speed, converted from degrees.
        radians: f32,
    },
    Scale {
        x: f32,
        y: f32,
    },
    Scroll {
        s: f32,
        t: f32,
    },
    Stretch(Waveform),
    Turbulence(Turbulence),
}

impl TexMod {
    /// The script keyword this modifier was parsed from.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Rotate { .. } => "rotate",
            Self::Scale { .. } => "scale",
            Self::Scroll { .. } => "scroll",
            Self::Stretch(_) => "stretch",
            Self::Turbulence(_) => "turb",
        }
    }

    fn has_nan(&self) -> bool {
        match self {
            Self::Rotate { radians } => radians.is_nan(),
            Self::Scale { x, y } => x.is_nan() || y.is_nan(),
            Self::Scroll { s, t } => s.is_nan() || t.is_nan(),
            Self::Stretch(wave) => wave.has_nan(),
            Self::Turbulence(turb) => [turb.base, turb.amp, turb.phase, turb.freq]
                .iter()
                .any(|v| v.is_nan()),
        }
    }
}

/// One texture/blend layer of a shader, drawn in declaration order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShaderStage {
    pub has_blend_func: bool,
    pub blend_src: String,
    pub blend_dest: String,
    pub depth_write: bool,
    /// Set by an explicit `depthWrite`; stops `blendFunc` from clearing depth writes.
    pub depth_write_override: bool,
    pub depth_func: String,

    pub maps: Vec<String>,
    pub anim_freq: f32,
    pub clamp: bool,
    pub tc_gen: String,
    pub rgb_gen: String,
    pub rgb_wave: Option<Waveform>,
    pub alpha_gen: String,
    pub alpha_func: Option<String>,
    pub alpha_wave: Option<Waveform>,
    pub is_lightmap: bool,
    pub tc_mods: Vec<TexMod>,
}

impl Default for ShaderStage {
    fn default() -> Self {
        Self {
            has_blend_func: false,
            blend_src: blend::GL_ONE.to_owned(),
            blend_dest: blend::GL_ZERO.to_owned(),
            depth_write: true,
            depth_write_override: false,
            depth_func: "lequal".to_owned(),
            maps: Vec::new(),
            anim_freq: 0.0,
            clamp: false,
            tc_gen: "base".to_owned(),
            rgb_gen: "identity".to_owned(),
            rgb_wave: None,
            alpha_gen: "1.0".to_owned(),
            alpha_func: None,
            alpha_wave: None,
            is_lightmap: false,
            tc_mods: Vec::new(),
        }
    }
}

impl ShaderStage {
    /// Returns `true` if the blend factors are the opaque `GL_ONE, GL_ZERO` pair.
    pub fn has_opaque_blend(&self) -> bool {
        self.blend_src == blend::GL_ONE && self.blend_dest == blend::GL_ZERO
    }

    fn has_nan(&self) -> bool {
        self.anim_freq.is_nan()
            || self.rgb_wave.as_ref().is_some_and(Waveform::has_nan)
            || self.alpha_wave.as_ref().is_some_and(Waveform::has_nan)
            || self.tc_mods.iter().any(TexMod::has_nan)
    }
}

/// A named render material: ordered stages plus shader-wide metadata.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shader {
    pub name: String,
    pub sort: Sort,
    pub surface_flags: u32,
    pub content_flags: u32,
    pub cull: String,
    pub sky: bool,
    pub cloud_size: i32,
    pub inner_box: Vec<String>,
    pub outer_box: Vec<String>,
    pub fog: bool,
    pub polygon_offset: bool,
    /// Allows sprite surfaces from multiple entities to be merged into one batch.
    pub entity_mergable: bool,
    /// Never set by the script grammar; kept for renderers that toggle it themselves.
    pub position_lerp: bool,
    pub portal_range: f32,
    pub vertex_deforms: Vec<Deform>,
    pub stages: Vec<ShaderStage>,
}

impl Default for Shader {
    fn default() -> Self {
        Self {
            name: String::new(),
            sort: Sort::BAD,
            surface_flags: 0,
            content_flags: 0,
            cull: "front".to_owned(),
            sky: false,
            cloud_size: 0,
            inner_box: Vec::new(),
            outer_box: Vec::new(),
            fog: false,
            polygon_offset: false,
            entity_mergable: false,
            position_lerp: false,
            portal_range: 0.0,
            vertex_deforms: Vec::new(),
            stages: Vec::new(),
        }
    }
}

impl Shader {
    /// Creates an empty shader descriptor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if any numeric field holds not-a-number.
    ///
    /// The grammar parser does not reject starved numeric reads; callers that
    /// want to fail fast can check this after parsing.
    pub fn has_nan_values(&self) -> bool {
        self.portal_range.is_nan()
            || self
                .vertex_deforms
                .iter()
                .any(|Deform::Wave { spread, wave }| spread.is_nan() || wave.has_nan())
            || self.stages.iter().any(ShaderStage::has_nan)
    }
}
