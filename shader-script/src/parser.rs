//! Recursive-descent parser for a single shader body.
//!
//! Every sub-parser receives the token stream plus an exclusive borrow of the
//! descriptor it fills in, and only writes the fields listed in its docs.

use crate::numeric::{parse_float, parse_int};
use crate::sort::resolve_sort;
use log::{debug, trace, warn};
use shader_core::shader::{blend, LIGHTMAP_IMAGE, NO_LIGHTMAP_IMAGE, WHITE_IMAGE};
use shader_core::surface::SurfaceParm;
use shader_core::{
    Deform, ParseError, Shader, ShaderStage, Sort, TexMod, Tokenizer, Turbulence, Waveform,
};

/// Face suffixes of a sky box, in the order renderers expect them.
const SKY_BOX_SUFFIXES: [&str; 6] = ["rt", "bk", "lf", "ft", "up", "dn"];

/// Keywords recognised at shader level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShaderKeyword {
    OpenStage,
    Close,
    Sort,
    Cull,
    DeformVertexes,
    SurfaceParm,
    PolygonOffset,
    EntityMergable,
    Portal,
    FogParms,
    SkyParms,
    Unknown,
}

impl ShaderKeyword {
    fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "{" => Self::OpenStage,
            "}" => Self::Close,
            "sort" => Self::Sort,
            "cull" => Self::Cull,
            "deformvertexes" => Self::DeformVertexes,
            "surfaceparm" => Self::SurfaceParm,
            "polygonoffset" => Self::PolygonOffset,
            "entitymergable" => Self::EntityMergable,
            "portal" => Self::Portal,
            "fogparms" => Self::FogParms,
            "skyparms" => Self::SkyParms,
            _ => Self::Unknown,
        }
    }
}

/// Keywords recognised inside a stage block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageKeyword {
    Close,
    ClampMap,
    Map,
    AnimMap,
    RgbGen,
    AlphaGen,
    AlphaFunc,
    BlendFunc,
    DepthFunc,
    DepthWrite,
    TcMod,
    TcGen,
    Unknown,
}

impl StageKeyword {
    fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "}" => Self::Close,
            "clampmap" => Self::ClampMap,
            "map" => Self::Map,
            "animmap" => Self::AnimMap,
            "rgbgen" => Self::RgbGen,
            "alphagen" => Self::AlphaGen,
            "alphafunc" => Self::AlphaFunc,
            "blendfunc" => Self::BlendFunc,
            "depthfunc" => Self::DepthFunc,
            "depthwrite" => Self::DepthWrite,
            "tcmod" => Self::TcMod,
            "tcgen" => Self::TcGen,
            _ => Self::Unknown,
        }
    }
}

/// Parses one shader body (`name { ... }`) into a resolved [`Shader`].
///
/// `lightmap_index` is negative when the surface using this shader has no
/// lightmap; `$lightmap` stages then fall back to the white image.
///
/// # Errors
///
/// Returns [`ParseError::Structural`] when the name is not followed by `{`, and
/// [`ParseError::MissingArgument`] when `map`/`clampMap` has no filename.
/// Every other unrecognised construct is skipped.
pub fn parse_shader(text: &str, lightmap_index: i32) -> Result<Shader, ParseError> {
    let mut tokens = Tokenizer::new(text);

    let name = tokens.next_token().unwrap_or_default().to_owned();
    if tokens.next_token() != Some("{") {
        return Err(ParseError::Structural { name });
    }

    let mut shader = Shader::new(name);

    while let Some(token) = tokens.next_token() {
        let keyword = ShaderKeyword::from_token(token);
        trace!("Shader '{}': keyword {:?}", shader.name, keyword);

        match keyword {
            ShaderKeyword::Close => break,
            ShaderKeyword::OpenStage => parse_stage(&mut tokens, &mut shader, lightmap_index)?,
            ShaderKeyword::Sort => parse_sort(&mut tokens, &mut shader),
            ShaderKeyword::Cull => {
                shader.cull = tokens.next_token().unwrap_or_default().to_owned();
            }
            ShaderKeyword::DeformVertexes => parse_deform(&mut tokens, &mut shader),
            ShaderKeyword::SurfaceParm => parse_surface_parm(&mut tokens, &mut shader),
            ShaderKeyword::PolygonOffset => shader.polygon_offset = true,
            ShaderKeyword::EntityMergable => shader.entity_mergable = true,
            ShaderKeyword::Portal => shader.sort = Sort::PORTAL,
            // Fog parameters are left in the stream and skipped as unknown keywords.
            ShaderKeyword::FogParms => {
                shader.fog = true;
                shader.sort = Sort::FOG;
            }
            ShaderKeyword::SkyParms => parse_sky_parms(&mut tokens, &mut shader),
            ShaderKeyword::Unknown => {}
        }
    }

    resolve_sort(&mut shader);
    debug!(
        "Parsed shader '{}': {} stage(s), sort {}",
        shader.name,
        shader.stages.len(),
        shader.sort
    );
    Ok(shader)
}

/// Reads the next token as a float; a missing token reads as NaN.
fn read_float(tokens: &mut Tokenizer, what: &str) -> f32 {
    tokens.next_token().map_or_else(
        || {
            warn!("Token stream exhausted while reading {what}, using NaN");
            f32::NAN
        },
        parse_float,
    )
}

fn read_lower(tokens: &mut Tokenizer) -> String {
    tokens.next_token().unwrap_or_default().to_ascii_lowercase()
}

fn read_upper(tokens: &mut Tokenizer) -> String {
    tokens.next_token().unwrap_or_default().to_ascii_uppercase()
}

/// Reads `func base amp phase freq`.
///
/// Yields `None` only when the stream ends before the function name; starved
/// numeric reads still produce a waveform with NaN parameters.
fn parse_waveform(tokens: &mut Tokenizer) -> Option<Waveform> {
    let Some(func_name) = tokens.next_token().map(str::to_ascii_lowercase) else {
        warn!("Token stream exhausted before waveform function name");
        return None;
    };
    Some(Waveform {
        func_name,
        base: read_float(tokens, "waveform base"),
        amp: read_float(tokens, "waveform amplitude"),
        phase: read_float(tokens, "waveform phase"),
        freq: read_float(tokens, "waveform frequency"),
    })
}

/// Writes `shader.sort`.
fn parse_sort(tokens: &mut Tokenizer, shader: &mut Shader) {
    let value = read_lower(tokens);
    shader.sort = Sort::from_name(&value)
        .unwrap_or_else(|| parse_int(&value).map_or(Sort::BAD, Sort));
}

/// Appends to `shader.vertex_deforms`.
fn parse_deform(tokens: &mut Tokenizer, shader: &mut Shader) {
    let kind = read_lower(tokens);
    match kind.as_str() {
        "wave" => {
            let spread = 1.0 / read_float(tokens, "deform spread");
            if let Some(wave) = parse_waveform(tokens) {
                shader.vertex_deforms.push(Deform::Wave { spread, wave });
            }
        }
        _ => trace!("Ignoring deformVertexes '{kind}' in '{}'", shader.name),
    }
}

/// ORs into `shader.surface_flags` and `shader.content_flags`.
fn parse_surface_parm(tokens: &mut Tokenizer, shader: &mut Shader) {
    let value = read_lower(tokens);
    match SurfaceParm::lookup(&value) {
        Some(parm) => {
            shader.surface_flags |= parm.surface;
            shader.content_flags |= parm.contents;
        }
        None => trace!("Ignoring unknown surfaceparm '{value}' in '{}'", shader.name),
    }
}

fn sky_box_faces(name: &str) -> Vec<String> {
    // A missing box name is treated like `-`.
    if name == "-" || name.is_empty() {
        return Vec::new();
    }
    SKY_BOX_SUFFIXES
        .iter()
        .map(|suffix| format!("{name}_{suffix}.tga"))
        .collect()
}

/// Writes `sky`, `cloud_size`, `inner_box`, `outer_box` and `sort`.
fn parse_sky_parms(tokens: &mut Tokenizer, shader: &mut Shader) {
    let inner_box = read_lower(tokens);
    let cloud_size = tokens.next_token().and_then(parse_int).unwrap_or(0);
    let outer_box = read_lower(tokens);

    shader.sky = true;
    shader.inner_box = sky_box_faces(&inner_box);
    shader.cloud_size = cloud_size;
    shader.outer_box = sky_box_faces(&outer_box);
    shader.sort = Sort::ENVIRONMENT;
}

/// Parses a `{ ... }` stage block and appends it to `shader.stages`.
///
/// Besides the stage itself this may write `shader.portal_range` (`alphaGen portal`).
fn parse_stage(
    tokens: &mut Tokenizer,
    shader: &mut Shader,
    lightmap_index: i32,
) -> Result<(), ParseError> {
    let mut stage = ShaderStage::default();

    while let Some(token) = tokens.next_token() {
        match StageKeyword::from_token(token) {
            StageKeyword::Close => break,
            StageKeyword::ClampMap => {
                stage.clamp = true;
                parse_map(tokens, &mut stage, &shader.name, "clampmap", lightmap_index)?;
            }
            StageKeyword::Map => {
                parse_map(tokens, &mut stage, &shader.name, "map", lightmap_index)?;
            }
            StageKeyword::AnimMap => parse_anim_map(tokens, &mut stage),
            StageKeyword::RgbGen => {
                stage.rgb_gen = read_lower(tokens);
                if stage.rgb_gen == "wave" {
                    stage.rgb_wave = parse_waveform(tokens);
                    if stage.rgb_wave.is_none() {
                        stage.rgb_gen = "identity".to_owned();
                    }
                }
            }
            StageKeyword::AlphaGen => {
                stage.alpha_gen = read_lower(tokens);
                match stage.alpha_gen.as_str() {
                    "wave" => {
                        stage.alpha_wave = parse_waveform(tokens);
                        if stage.alpha_wave.is_none() {
                            stage.alpha_gen = "1.0".to_owned();
                        }
                    }
                    "portal" => shader.portal_range = read_float(tokens, "portal range"),
                    _ => {}
                }
            }
            StageKeyword::AlphaFunc => stage.alpha_func = Some(read_upper(tokens)),
            StageKeyword::BlendFunc => parse_blend_func(tokens, &mut stage),
            StageKeyword::DepthFunc => stage.depth_func = read_lower(tokens),
            StageKeyword::DepthWrite => {
                stage.depth_write = true;
                stage.depth_write_override = true;
            }
            StageKeyword::TcMod => parse_tex_mod(tokens, &mut stage),
            StageKeyword::TcGen => {
                stage.tc_gen = tokens.next_token().unwrap_or_default().to_owned();
            }
            StageKeyword::Unknown => {}
        }
    }

    normalize_stage(&mut stage);
    shader.stages.push(stage);
    Ok(())
}

/// Appends one texture to `stage.maps`; `$lightmap` also sets `stage.is_lightmap`.
fn parse_map(
    tokens: &mut Tokenizer,
    stage: &mut ShaderStage,
    shader_name: &str,
    keyword: &'static str,
    lightmap_index: i32,
) -> Result<(), ParseError> {
    let Some(map) = tokens.next_token() else {
        return Err(ParseError::MissingArgument {
            shader: shader_name.to_owned(),
            keyword,
        });
    };

    let map = match map {
        "$whiteimage" => WHITE_IMAGE,
        "$lightmap" => {
            stage.is_lightmap = true;
            if lightmap_index < 0 {
                NO_LIGHTMAP_IMAGE
            } else {
                LIGHTMAP_IMAGE
            }
        }
        other => other,
    };
    stage.maps.push(map.to_owned());
    Ok(())
}

/// Returns `true` for tokens ending in a `.extension` (no `/` or `.` after the dot).
fn looks_like_filename(token: &str) -> bool {
    token
        .rfind('.')
        .map(|dot| &token[dot + 1..])
        .is_some_and(|ext| !ext.is_empty() && !ext.contains('/'))
}

/// Writes `stage.anim_freq` and appends frames to `stage.maps`.
///
/// The first token that is not a filename is pushed back for the stage loop.
fn parse_anim_map(tokens: &mut Tokenizer, stage: &mut ShaderStage) {
    stage.anim_freq = read_float(tokens, "animMap frequency");

    while let Some(token) = tokens.next_token() {
        if looks_like_filename(token) {
            stage.maps.push(token.to_owned());
        } else {
            tokens.prev_token();
            break;
        }
    }
}

/// Writes the blend factors and `has_blend_func`; may clear `depth_write`.
fn parse_blend_func(tokens: &mut Tokenizer, stage: &mut ShaderStage) {
    let src = read_upper(tokens);
    stage.has_blend_func = true;
    if !stage.depth_write_override {
        stage.depth_write = false;
    }

    let (src, dest) = match src.as_str() {
        "ADD" => (blend::GL_ONE.to_owned(), blend::GL_ONE.to_owned()),
        "BLEND" => (
            blend::GL_SRC_ALPHA.to_owned(),
            blend::GL_ONE_MINUS_SRC_ALPHA.to_owned(),
        ),
        "FILTER" => (blend::GL_DST_COLOR.to_owned(), blend::GL_ZERO.to_owned()),
        _ => {
            let dest = read_upper(tokens);
            (src, dest)
        }
    };
    stage.blend_src = src;
    stage.blend_dest = dest;
}

/// Post-block fixups, applied in order.
fn normalize_stage(stage: &mut ShaderStage) {
    if stage.has_opaque_blend() {
        stage.has_blend_func = false;
        stage.depth_write = true;
    }

    // Blended lightmap stages always use filter blending, otherwise they look too bright.
    if stage.is_lightmap && stage.has_blend_func {
        stage.blend_src = blend::GL_DST_COLOR.to_owned();
        stage.blend_dest = blend::GL_ZERO.to_owned();
    }
}

/// Appends a recognised modifier to `stage.tc_mods`; anything else is dropped.
fn parse_tex_mod(tokens: &mut Tokenizer, stage: &mut ShaderStage) {
    let kind = read_lower(tokens);

    let tc_mod = match kind.as_str() {
        "rotate" => Some(TexMod::Rotate {
            radians: read_float(tokens, "tcMod rotate angle").to_radians(),
        }),
        "scale" => Some(TexMod::Scale {
            x: read_float(tokens, "tcMod scale x"),
            y: read_float(tokens, "tcMod scale y"),
        }),
        "scroll" => Some(TexMod::Scroll {
            s: read_float(tokens, "tcMod scroll s"),
            t: read_float(tokens, "tcMod scroll t"),
        }),
        "stretch" => parse_waveform(tokens).map(TexMod::Stretch),
        "turb" => Some(TexMod::Turbulence(Turbulence {
            base: read_float(tokens, "tcMod turb base"),
            amp: read_float(tokens, "tcMod turb amplitude"),
            phase: read_float(tokens, "tcMod turb phase"),
            freq: read_float(tokens, "tcMod turb frequency"),
        })),
        _ => None,
    };

    match tc_mod {
        Some(tc_mod) => stage.tc_mods.push(tc_mod),
        None => trace!("Discarding tcMod '{kind}'"),
    }
}
