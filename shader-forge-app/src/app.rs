//! The `shader-forge` command: load scripts, parse shaders, write a report.

use crate::config::{AppConfig, Settings};
use crate::error::AppError;
use crate::logging::init_logger;
use crate::output::{write_report, ReportEntry};
use clap::Parser;
use log::{debug, info, warn};
use shader_script::loader::load_skin_file;
use shader_script::ShaderLibrary;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

/// Parses the command line and runs the application.
///
/// # Errors
///
/// Returns any error produced by [`run`].
pub fn main() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    run(&config)?;
    Ok(())
}

/// Runs the application with an already parsed configuration.
///
/// # Errors
///
/// Fails if settings cannot be resolved, a script or skin cannot be loaded,
/// the report cannot be written, or `--strict` rejects a shader.
pub fn run(config: &AppConfig) -> Result<(), AppError> {
    let settings = Settings::load(config)?;
    init_logger(settings.global_log_level);

    info!("Shader Forge starting");
    debug!("Config: {:?}", config);
    debug!("Settings: {:?}", settings);

    let start = Instant::now();
    let library = load_library(&config.scripts)?;
    info!(
        "{} shader bodies loaded in {:.2?}",
        library.len(),
        start.elapsed()
    );
    debug!("Shaders: {:?}", library.names().collect::<Vec<_>>());

    let entries = collect_entries(config, &library, settings.lightmap_index)?;

    for entry in entries.iter().filter(|e| e.has_nan_values()) {
        warn!("Shader '{}' contains NaN values", entry.name);
    }

    match &config.output_path {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)?;
            write_report(BufWriter::new(file), &entries, settings.format)?;
            info!("Report written to {:?}", path);
        }
        None => write_report(io::stdout().lock(), &entries, settings.format)?,
    }

    if config.strict {
        let rejected = entries
            .iter()
            .filter(|e| e.is_failure() || e.has_nan_values())
            .count();
        if rejected > 0 {
            return Err(AppError::Strict(rejected));
        }
    }

    info!("Done in {:.2?}", start.elapsed());
    Ok(())
}

/// Builds a library from script files and directories, in argument order.
fn load_library(scripts: &[PathBuf]) -> Result<ShaderLibrary, AppError> {
    let mut library = ShaderLibrary::new();
    for path in scripts {
        if path.is_dir() {
            library.load_dir(path)?;
        } else {
            library.load_file(path)?;
        }
    }
    Ok(library)
}

fn collect_entries(
    config: &AppConfig,
    library: &ShaderLibrary,
    lightmap_index: i32,
) -> Result<Vec<ReportEntry>, AppError> {
    let wanted: Vec<String> = config
        .shaders
        .iter()
        .map(|name| name.to_ascii_lowercase())
        .collect();

    if let Some(skin_path) = &config.skin {
        let skin = load_skin_file(skin_path)?;
        info!("Resolving {} skin surfaces", skin.surfaces.len());
        let entries = library
            .resolve_skin(&skin, lightmap_index)
            .into_iter()
            .map(|(surface, result)| {
                ReportEntry::new(surface.shader_name.to_ascii_lowercase(), result)
                    .with_surface(surface.name.as_str())
            })
            .filter(|entry| wanted.is_empty() || wanted.contains(&entry.name))
            .collect();
        return Ok(entries);
    }

    if wanted.is_empty() {
        return Ok(library
            .parse_all(lightmap_index)
            .into_iter()
            .map(|(name, result)| ReportEntry::new(name, result))
            .collect());
    }

    Ok(wanted
        .into_iter()
        .map(|name| {
            let result = library.parse(&name, lightmap_index);
            ReportEntry::new(name, result)
        })
        .collect())
}
