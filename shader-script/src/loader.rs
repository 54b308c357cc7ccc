use crate::formats::{ScriptFormat, ShaderScriptFormat, SkinFormat};
use crate::script::ScriptBodies;
use crate::{LoadError, Skin};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of shader scripts picked up from directories.
pub const SCRIPT_EXTENSION: &str = "shader";

/// Reads a file and parses it with the given format.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, or the format's own error.
pub fn load_with<F: ScriptFormat>(path: &Path, format: &F) -> Result<F::Output, LoadError> {
    let content = fs::read_to_string(path)?;
    debug!(
        "Read {} bytes of {} from {:?}",
        content.len(),
        format.format_name(),
        path
    );
    format.parse(&content)
}

/// Loads a shader script file and splits it into raw bodies.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read.
pub fn load_script_file(path: &Path) -> Result<ScriptBodies, LoadError> {
    let bodies = load_with(path, &ShaderScriptFormat)?;
    info!("Loaded {} shader(s) from {:?}", bodies.len(), path);
    Ok(bodies)
}

/// Loads a `.skin` file.
///
/// # Errors
///
/// Returns `LoadError::Io` if the file cannot be read, `LoadError::Skin` if it is malformed.
pub fn load_skin_file(path: &Path) -> Result<Skin, LoadError> {
    load_with(path, &SkinFormat)
}

/// Lists every `*.shader` file directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns `LoadError::InvalidData` if `dir` is not a directory, `LoadError::Io`
/// if it cannot be listed.
pub fn find_script_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::InvalidData(format!(
            "Not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_script = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION));
        if path.is_file() && is_script {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
