//! Command-line front end.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use eurorack_panel_designer::{
    compute_clearance_lines, export_panel, load_project, save_project, ExportFormat, ExportOptions,
    HoleShape, PanelDimensions, PanelModel,
};
use eurorack_panel_settings::Config;

#[derive(Parser, Debug)]
#[command(
    name = "eurorack-panel",
    version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")")
)]
#[command(about = "Design Eurorack front panels and export them for manufacturing", long_about = None)]
pub struct Cli {
    /// Settings file (.toml or .json); defaults to the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty panel project
    New {
        /// Requested width in cm, rounded up to whole HP
        #[arg(long)]
        width_cm: Option<f64>,
        /// Panel height in mm (default: 3U)
        #[arg(long)]
        height_mm: Option<f64>,
        /// Project file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Export a project to json, svg, kicad-svg, kicad-pcb or stl
    Export {
        /// Project file
        project: PathBuf,
        /// Output format (default from settings)
        #[arg(short, long)]
        format: Option<String>,
        /// Output file, or `-` for stdout (default: <output_directory>/<name>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// STL thickness in mm (default: the panel's own setting)
        #[arg(long)]
        thickness: Option<f64>,
    },
    /// Print panel dimensions, holes and clearance lines
    Info {
        /// Project file
        project: PathBuf,
    },
}

/// Dispatches a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::New {
            width_cm,
            height_mm,
            output,
        } => {
            let model = new_panel(&config, width_cm, height_mm);
            save_project(&output, &model)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "Created {}HP panel at {}",
                model.dimensions.width_hp,
                output.display()
            );
        }
        Commands::Export {
            project,
            format,
            output,
            thickness,
        } => {
            let written = export_project(&config, &project, format.as_deref(), output, thickness)?;
            if let Some(path) = written {
                info!("Exported {} to {}", project.display(), path.display());
            }
        }
        Commands::Info { project } => {
            let model = load_project(&project)
                .with_context(|| format!("Failed to load {}", project.display()))?;
            print!("{}", describe_panel(&model));
        }
    }

    Ok(())
}

/// Empty panel using the configured pitch, height and thickness.
pub fn new_panel(config: &Config, width_cm: Option<f64>, height_mm: Option<f64>) -> PanelModel {
    let mm_per_hp = config.panel.mm_per_hp;
    let dimensions = match width_cm {
        Some(cm) => PanelDimensions::from_width_cm(
            cm,
            Some(height_mm.unwrap_or(config.panel.height_mm)),
            mm_per_hp,
        ),
        None => {
            let mut dims = PanelDimensions::from_hp(config.panel.default_width_hp, mm_per_hp);
            dims.height_mm = height_mm.unwrap_or(config.panel.height_mm);
            dims
        }
    };

    let mut model = PanelModel::new(dimensions);
    model.options.mm_per_hp = mm_per_hp;
    model.options.thickness_mm = config.export.thickness_mm;
    model.normalized()
}

/// Exports a project file. Returns the written path, or `None` when the
/// output went to stdout.
pub fn export_project(
    config: &Config,
    project: &Path,
    format: Option<&str>,
    output: Option<PathBuf>,
    thickness: Option<f64>,
) -> Result<Option<PathBuf>> {
    let model = load_project(project)
        .with_context(|| format!("Failed to load {}", project.display()))?;

    let format_name = format.unwrap_or(&config.export.default_format);
    let format: ExportFormat = format_name.parse().map_err(anyhow::Error::msg)?;

    let mut options = ExportOptions::for_model(&model);
    if let Some(thickness_mm) = thickness {
        options.thickness_mm = thickness_mm;
    }

    let content = export_panel(&model, format, &options)
        .with_context(|| format!("Failed to export {} as {}", project.display(), format))?;

    let path = match output {
        Some(path) if path.as_os_str() == "-" => {
            print!("{}", content);
            return Ok(None);
        }
        Some(path) => path,
        None => {
            let stem = project
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "panel".to_string());
            config
                .export
                .output_directory
                .join(format!("{}.{}", stem, format.extension()))
        }
    };

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}

/// Human-readable summary of a panel.
pub fn describe_panel(model: &PanelModel) -> String {
    let dims = &model.dimensions;
    let mut out = format!(
        "Panel: {} HP ({} mm x {} mm)\n",
        dims.width_hp, dims.width_mm, dims.height_mm
    );
    out.push_str(&format!("Elements: {}\n", model.elements.len()));
    for element in &model.elements {
        out.push_str(&format!(
            "  {} {} at ({}, {})\n",
            element.element_type(),
            element.id,
            element.position_mm.x,
            element.position_mm.y
        ));
    }

    let holes = model.mounting_holes();
    out.push_str(&format!("Mounting holes: {}\n", holes.len()));
    for hole in &holes {
        let shape = match hole.shape {
            HoleShape::Circle => format!("circle d={}", hole.diameter_mm),
            HoleShape::Slot => format!(
                "slot d={} l={}",
                hole.diameter_mm,
                hole.slot_length_mm.unwrap_or(hole.diameter_mm)
            ),
        };
        out.push_str(&format!(
            "  ({:.2}, {:.2}) {}\n",
            hole.center.x, hole.center.y, shape
        ));
    }

    let satellites = model.element_mounting_holes();
    if !satellites.is_empty() {
        out.push_str(&format!("Satellite holes: {}\n", satellites.len()));
    }

    let lines = compute_clearance_lines(&model.clearance, dims.height_mm);
    out.push_str(&format!(
        "Clearance lines: top {} mm, bottom {} mm\n",
        lines.top_y, lines.bottom_y
    ));
    out
}
