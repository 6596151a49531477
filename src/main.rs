use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fractal3d_explorer::{
    DOCUMENT_EXTENSION, FractalParameters, RenderSettings, RenderSurface, SpinOptions,
    export_spin, save_document,
};

#[derive(Parser)]
#[command(name = "fractal3d", version)]
#[command(about = "Raymarched Mandelbulb-family renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a fractal document, or the default fractal, to an image
    Render {
        /// .f3d document to render
        #[arg(short, long)]
        document: Option<PathBuf>,
        /// Output image; png, jpg, jpeg or bmp
        #[arg(short, long, default_value = "fractal.png")]
        output: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Write a fractal document
    Save {
        output: PathBuf,
        /// Randomize shape and colours from this seed
        #[arg(long)]
        random_seed: Option<u64>,
        /// Fractal type index (0 Mandelbulb, 1 Julia bulb, 2 Cosine bulb, 3 Burning bulb)
        #[arg(long)]
        kind: Option<u32>,
        #[arg(short = 'n', long)]
        power: Option<u32>,
        /// Enable rotation at this many degrees per second
        #[arg(long, allow_hyphen_values = true)]
        rotation_speed: Option<f64>,
    },
    /// Render one full rotation as numbered frames
    Spin {
        #[arg(short, long)]
        document: Option<PathBuf>,
        #[arg(long, default_value = "frames")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 36)]
        frames: u32,
        #[arg(long, default_value = "png")]
        format: String,
        #[command(flatten)]
        size: SizeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SizeArgs {
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
}

/// Per-run overrides of the render settings.
#[derive(Args)]
struct SettingsArgs {
    #[arg(long)]
    max_iterations: Option<u32>,
    #[arg(long)]
    max_steps: Option<u32>,
    #[arg(long)]
    hit_epsilon: Option<f64>,
    #[arg(long)]
    occlusion: Option<f64>,
}

impl SettingsArgs {
    fn resolve(&self) -> Result<RenderSettings> {
        let defaults = RenderSettings::default();
        let settings = RenderSettings {
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            hit_epsilon: self.hit_epsilon.unwrap_or(defaults.hit_epsilon),
            occlusion_strength: self.occlusion.unwrap_or(defaults.occlusion_strength),
            ..defaults
        };

        settings.validate().context("invalid render settings")?;

        Ok(settings)
    }
}

fn surface_for(document: Option<&Path>, settings: &SettingsArgs) -> Result<RenderSurface> {
    let mut surface = RenderSurface::new(settings.resolve()?);

    if let Some(path) = document {
        surface
            .load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
    }

    Ok(surface)
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Render {
            document,
            output,
            size,
            settings,
        } => {
            let surface = surface_for(document.as_deref(), &settings)?;
            let params = surface.parameters();

            println!("Rendering {}...", params.kind().display_name());
            println!("Image size: {}x{}", size.width, size.height);
            println!("Power: {}", params.power());

            let start = Instant::now();
            surface
                .export_image(&output, size.width, size.height)
                .with_context(|| format!("failed to export {}", output.display()))?;

            println!("Duration:   {:?}", start.elapsed());
            println!("Written:    {}", output.display());
        }
        Command::Save {
            output,
            random_seed,
            kind,
            power,
            rotation_speed,
        } => {
            let mut params = FractalParameters::default();

            if let Some(seed) = random_seed {
                params = params.randomized(&mut fastrand::Rng::with_seed(seed));
            }
            if let Some(index) = kind {
                params = params.with_kind_index(index)?;
            }
            if let Some(n) = power {
                params = params.updated(|r| r.n = n)?;
            }
            if let Some(speed) = rotation_speed {
                params = params.with_rotation_speed(speed)?;
            }

            if !has_document_extension(&output) {
                warn!(
                    path = %output.display(),
                    "fractal documents are usually named *.{DOCUMENT_EXTENSION}"
                );
            }

            save_document(&params, &output)
                .with_context(|| format!("failed to save {}", output.display()))?;

            info!(kind = params.kind().display_name(), power = params.power(), "document written");
            println!("Written:    {}", output.display());
        }
        Command::Spin {
            document,
            out_dir,
            frames,
            format,
            size,
            settings,
        } => {
            let mut surface = surface_for(document.as_deref(), &settings)?;

            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;

            let options = SpinOptions {
                frames,
                width: size.width,
                height: size.height,
                extension: format,
            };

            let start = Instant::now();
            let written = export_spin(&mut surface, &out_dir, &options)?;

            println!("Frames:     {}", written.len());
            println!("Duration:   {:?}", start.elapsed());
            println!("Directory:  {}", out_dir.display());
        }
    }

    Ok(())
}
