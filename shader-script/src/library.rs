use crate::loader::{find_script_files, load_script_file};
use crate::parser::parse_shader;
use crate::script::{split_script, ScriptBodies};
use crate::{LoadError, Skin, SkinSurface};
use log::{debug, info};
use rayon::prelude::*;
use shader_core::{ParseError, Shader};
use std::path::Path;

/// Raw shader bodies collected from any number of scripts.
///
/// Bodies are stored unparsed and turned into [`Shader`] descriptors on
/// demand, because the result depends on the lightmap index of the surface
/// being drawn. A body added later replaces an earlier one with the same name.
#[derive(Debug, Clone, Default)]
pub struct ShaderLibrary {
    bodies: ScriptBodies,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `text` and merges its bodies. Returns how many bodies it contained.
    pub fn add_script(&mut self, text: &str) -> usize {
        self.merge(split_script(text))
    }

    fn merge(&mut self, bodies: ScriptBodies) -> usize {
        let count = bodies.len();
        self.bodies.extend(bodies);
        count
    }

    /// Loads one script file.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Io` if the file cannot be read.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, LoadError> {
        let bodies = load_script_file(path)?;
        Ok(self.merge(bodies))
    }

    /// Loads every `*.shader` file in `dir`, in path order.
    ///
    /// # Errors
    ///
    /// Fails on the first directory or file that cannot be read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, LoadError> {
        let mut total = 0;
        for path in find_script_files(dir)? {
            total += self.load_file(&path)?;
        }
        info!("Loaded {total} shader bodies from {:?}", dir);
        Ok(total)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Shader names (lower-cased) in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(&name.to_ascii_lowercase())
    }

    /// The unparsed body stored for `name` (case-insensitive).
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.bodies
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Parses the shader called `name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `LoadError::UnknownShader` if no body has that name, or
    /// `LoadError::Parse` if the body fails to parse.
    pub fn parse(&self, name: &str, lightmap_index: i32) -> Result<Shader, LoadError> {
        let body = self
            .raw(name)
            .ok_or_else(|| LoadError::UnknownShader(name.to_owned()))?;
        Ok(parse_shader(body, lightmap_index)?)
    }

    /// Parses every body in parallel. Results are in name order.
    pub fn parse_all(&self, lightmap_index: i32) -> Vec<(String, Result<Shader, ParseError>)> {
        let bodies: Vec<(&String, &String)> = self.bodies.iter().collect();
        debug!("Parsing {} shader bodies", bodies.len());

        bodies
            .par_iter()
            .map(|(name, body)| ((*name).clone(), parse_shader(body, lightmap_index)))
            .collect()
    }

    /// Resolves each surface of `skin` to a parsed shader.
    pub fn resolve_skin<'a>(
        &self,
        skin: &'a Skin,
        lightmap_index: i32,
    ) -> Vec<(&'a SkinSurface, Result<Shader, LoadError>)> {
        skin.surfaces
            .iter()
            .map(|surface| (surface, self.parse(&surface.shader_name, lightmap_index)))
            .collect()
    }
}
