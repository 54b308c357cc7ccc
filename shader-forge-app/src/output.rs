use crate::config::OutputFormat;
use crate::error::AppError;
use colored::Colorize;
use serde::Serialize;
use shader_core::{Deform, Shader};
use std::io::Write;

/// One line of the report: a parsed shader or the reason it could not be parsed.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    /// Lower-cased shader name.
    pub name: String,
    /// Skin surface that referenced the shader, when reporting a skin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shader: Option<Shader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    pub fn new<E: ToString>(name: impl Into<String>, result: Result<Shader, E>) -> Self {
        let (shader, error) = match result {
            Ok(shader) => (Some(shader), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            name: name.into(),
            surface: None,
            shader,
            error,
        }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_nan_values(&self) -> bool {
        self.shader.as_ref().is_some_and(Shader::has_nan_values)
    }
}

/// Writes `entries` to `writer` in the requested format.
///
/// # Errors
///
/// Fails if the writer fails or serialization fails.
pub fn write_report<W: Write>(
    writer: W,
    entries: &[ReportEntry],
    format: OutputFormat,
) -> Result<(), AppError> {
    match format {
        OutputFormat::Summary => write_summary(writer, entries),
        OutputFormat::Json => write_json(writer, entries),
        OutputFormat::Csv => write_csv(writer, entries),
    }
}

fn write_json<W: Write>(mut writer: W, entries: &[ReportEntry]) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writeln!(writer)?;
    Ok(())
}

fn write_csv<W: Write>(writer: W, entries: &[ReportEntry]) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([
        "Name",
        "Surface",
        "Sort",
        "Stages",
        "Surface Flags",
        "Content Flags",
        "Sky",
        "Fog",
        "Deforms",
        "Error",
    ])?;

    for entry in entries {
        let surface = entry.surface.clone().unwrap_or_default();
        let error = entry.error.clone().unwrap_or_default();
        match &entry.shader {
            Some(shader) => wtr.write_record([
                entry.name.clone(),
                surface,
                shader.sort.0.to_string(),
                shader.stages.len().to_string(),
                format!("{:#x}", shader.surface_flags),
                format!("{:#x}", shader.content_flags),
                shader.sky.to_string(),
                shader.fog.to_string(),
                shader.vertex_deforms.len().to_string(),
                error,
            ])?,
            None => wtr.write_record([
                entry.name.clone(),
                surface,
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                error,
            ])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

fn write_summary<W: Write>(mut writer: W, entries: &[ReportEntry]) -> Result<(), AppError> {
    for entry in entries {
        let label = match &entry.surface {
            Some(surface) => format!("{} -> {}", surface, entry.name),
            None => entry.name.clone(),
        };

        let Some(shader) = &entry.shader else {
            let error = entry.error.as_deref().unwrap_or("unknown error");
            writeln!(writer, "{} {}: {}", "✗".red(), label.bold(), error.red())?;
            continue;
        };

        let marker = if shader.has_nan_values() {
            "!".yellow()
        } else {
            "✓".green()
        };
        writeln!(writer, "{} {}", marker, label.bold())?;
        writeln!(writer, "    sort: {}", shader.sort)?;
        writeln!(
            writer,
            "    flags: surface {:#x}, contents {:#x}",
            shader.surface_flags, shader.content_flags
        )?;
        if shader.sky {
            writeln!(
                writer,
                "    sky: cloud size {}, inner [{}], outer [{}]",
                shader.cloud_size,
                shader.inner_box.join(", "),
                shader.outer_box.join(", ")
            )?;
        }
        if shader.fog {
            writeln!(writer, "    fog")?;
        }
        for deform in &shader.vertex_deforms {
            match deform {
                Deform::Wave { spread, wave } => writeln!(
                    writer,
                    "    deform: wave {} {}",
                    spread, wave.func_name
                )?,
            }
        }
        for (index, stage) in shader.stages.iter().enumerate() {
            let mods: Vec<&str> = stage.tc_mods.iter().map(|m| m.type_name()).collect();
            writeln!(
                writer,
                "    stage {}: [{}] blend {} {}{}{}",
                index,
                stage.maps.join(", "),
                stage.blend_src,
                stage.blend_dest,
                if stage.is_lightmap { ", lightmap" } else { "" },
                if mods.is_empty() {
                    String::new()
                } else {
                    format!(", tcMod {}", mods.join(" "))
                }
            )?;
        }
    }

    let failed = entries.iter().filter(|e| e.is_failure()).count();
    let summary = format!(
        "{} shader(s), {} failed",
        entries.len(),
        failed
    );
    if failed > 0 {
        writeln!(writer, "{}", summary.red())?;
    } else {
        writeln!(writer, "{}", summary.green())?;
    }
    Ok(())
}
