//! Command-line interface for rendering one image or a directory of images

use crate::io::configuration::{
    DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH,
    DEFAULT_PREVIEW_WIDTH, DEFAULT_SETTINGS_FILE, DEFAULT_STAMP_OVERSAMPLE, OUTPUT_SUFFIX,
    PREVIEW_SUFFIX, SOURCE_EXTENSIONS,
};
use crate::io::error::{Result, io_error};
use crate::io::image::{decode_or_undecoded, export_png, oversample_stamp};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::settings::Settings;
use crate::raster::buffer::{RasterImage, Readiness};
use crate::render::grid::{RenderConfig, TargetSize};
use crate::render::renderer::PatternRenderer;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "stampgrid")]
#[command(
    author,
    version,
    about = "Render halftone mosaics by stamping a brightness-scaled pattern image"
)]
/// Command-line arguments for the halftone renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image or directory of images (defaults to the saved choice)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Stamp pattern image (defaults to the saved choice)
    #[arg(short, long)]
    pub stamp: Option<PathBuf>,

    /// Full resolution output width in pixels
    #[arg(short = 'w', long)]
    pub width: Option<u32>,

    /// Full resolution output height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Preview width in pixels; height follows the output aspect ratio
    #[arg(short, long, default_value_t = DEFAULT_PREVIEW_WIDTH)]
    pub preview_width: u32,

    /// Cell width at full resolution
    #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
    pub cell_width: f64,

    /// Cell height at full resolution
    #[arg(long, default_value_t = DEFAULT_CELL_HEIGHT)]
    pub cell_height: f64,

    /// Resize the stamp to this multiple of the cell size before rendering (0 disables)
    #[arg(short, long, default_value_t = DEFAULT_STAMP_OVERSAMPLE)]
    pub oversample: u32,

    /// Offset added to every brightness-derived stamp scale
    #[arg(short = 'b', long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub scale_bias: f64,

    /// Skip writing the preview image
    #[arg(long)]
    pub no_preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Settings file remembering the last used images and dimensions
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Do not update the settings file after a successful run
    #[arg(long)]
    pub no_save: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Settings explicitly given on the command line
    pub fn overrides(&self) -> Settings {
        Settings {
            source: self.target.clone(),
            stamp: self.stamp.clone(),
            width: self.width,
            height: self.height,
        }
    }
}

/// Choices resolved from the command line, saved settings and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    /// Source image or directory
    pub source: PathBuf,
    /// Stamp image
    pub stamp: PathBuf,
    /// Full resolution target, also the reference resolution
    pub full: TargetSize,
    /// Preview target, or `None` when previews are disabled
    pub preview: Option<TargetSize>,
    /// Renderer configuration
    pub config: RenderConfig,
}

impl RunPlan {
    /// Combine command-line arguments with previously saved settings
    ///
    /// # Errors
    ///
    /// Returns an error if no source or stamp is known, or a dimension or
    /// cell parameter is invalid
    pub fn resolve(cli: &Cli, saved: &Settings) -> Result<Self> {
        let merged = saved.merged_with(&cli.overrides());

        let source = merged
            .source
            .ok_or_else(|| io_error("No source image given and none saved"))?;
        let stamp = merged
            .stamp
            .ok_or_else(|| io_error("No stamp image given and none saved"))?;

        let full = TargetSize::new(
            merged.width.unwrap_or(DEFAULT_OUTPUT_WIDTH),
            merged.height.unwrap_or(DEFAULT_OUTPUT_HEIGHT),
        )?;
        let preview = (!cli.no_preview).then(|| full.with_width(cli.preview_width));

        let config = RenderConfig::new(full, cli.cell_width, cli.cell_height)?
            .with_scale_bias(cli.scale_bias);
        config.validate()?;

        Ok(Self {
            source,
            stamp,
            full,
            preview,
            config,
        })
    }

    /// The choices worth remembering for the next session
    pub fn to_settings(&self) -> Settings {
        Settings {
            source: Some(self.source.clone()),
            stamp: Some(self.stamp.clone()),
            width: Some(self.full.width),
            height: Some(self.full.height),
        }
    }
}

/// Orchestrates batch rendering with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Progress display, absent when running quietly
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Render files according to CLI arguments and saved settings
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or saved, parameters are
    /// invalid, the target cannot be listed, or an output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let saved = Settings::load(&self.cli.settings)?;
        let plan = RunPlan::resolve(&self.cli, &saved)?;
        let renderer = PatternRenderer::new(plan.config)?;

        let files = self.collect_files(&plan.source)?;
        if files.is_empty() {
            return Ok(());
        }

        let stamp = oversample_stamp(
            decode_or_undecoded(&plan.stamp),
            plan.config.cell_width,
            plan.config.cell_height,
            self.cli.oversample,
        );
        if stamp.readiness() == Readiness::Placeholder {
            warn!(path = %plan.stamp.display(), "stamp image is a placeholder; nothing to render");
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(&renderer, &plan, &stamp, file, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        if !self.cli.no_save {
            plan.to_settings().save(&self.cli.settings)?;
        }

        Ok(())
    }

    fn collect_files(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if target.is_file() {
            if is_source_image(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.to_path_buf()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(io_error("Target file must be a PNG or JPEG image"))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target)? {
                let path = entry?.path();
                if is_source_image(&path)
                    && !is_render_output(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(io_error("Target must be an image file or directory"))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(
        &mut self,
        renderer: &PatternRenderer,
        plan: &RunPlan,
        stamp: &RasterImage,
        input_path: &Path,
        index: usize,
    ) -> Result<()> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let source = decode_or_undecoded(input_path);
        if source.readiness() == Readiness::Placeholder {
            warn!("Skipping: {} (placeholder image)", input_path.display());
            if let Some(ref mut pm) = self.progress_manager {
                pm.skip_file(index, "placeholder");
            }
            return Ok(());
        }

        if let Some(preview_size) = plan.preview {
            self.enter_stage(index, Stage::Preview);
            let preview = renderer.render(&source, stamp, preview_size);
            export_png(&preview, &Self::get_preview_path(input_path))?;
        }

        self.enter_stage(index, Stage::Full);
        let full = renderer.render(&source, stamp, plan.full);

        self.enter_stage(index, Stage::Export);
        let output_path = Self::get_output_path(input_path);
        export_png(&full, &output_path)?;

        info!(
            "Rendered {} -> {} ({}x{}) in {:.2?}",
            input_path.display(),
            output_path.display(),
            full.width(),
            full.height(),
            start_time.elapsed()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    fn enter_stage(&mut self, index: usize, stage: Stage) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.enter_stage(index, stage);
        }
    }

    /// Path of the full resolution output for a source image
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::suffixed_png(input_path, OUTPUT_SUFFIX)
    }

    /// Path of the preview output for a source image
    pub fn get_preview_path(input_path: &Path) -> PathBuf {
        Self::suffixed_png(input_path, PREVIEW_SUFFIX)
    }

    fn suffixed_png(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{suffix}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

fn is_source_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            SOURCE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

// Outputs land next to their sources; re-running on a directory must not feed them back in
fn is_render_output(path: &Path) -> bool {
    path.file_stem()
        .map(|stem| stem.to_string_lossy())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX) || stem.ends_with(PREVIEW_SUFFIX))
}
