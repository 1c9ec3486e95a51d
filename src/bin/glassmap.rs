use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glassmap::{
    DisplacementGenerator, EffectOptions, FilterParams, PixelSize, ShapeConfig, Size,
    filter_markup, generate_displacement_map, preview_effect,
};

#[derive(Parser, Debug)]
#[command(name = "glassmap", version)]
struct Cli {
    /// Log progress to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a displacement map PNG (or print it as a data URI).
    Generate(GenerateArgs),
    /// Print the SVG filter markup for an element.
    Filter(FilterArgs),
    /// Render a backdrop image through the glass filter.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct ElementArgs {
    /// Element width in CSS pixels.
    #[arg(long)]
    width: f64,

    /// Element height in CSS pixels.
    #[arg(long)]
    height: f64,

    /// Effect options JSON.
    #[arg(long)]
    effect: Option<PathBuf>,
}

impl ElementArgs {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn options(&self) -> anyhow::Result<EffectOptions> {
        match &self.effect {
            Some(path) => Ok(EffectOptions::from_path(path)?),
            None => Ok(EffectOptions::default()),
        }
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Element width in CSS pixels.
    #[arg(long, required_unless_present = "config")]
    width: Option<f64>,

    /// Element height in CSS pixels.
    #[arg(long, required_unless_present = "config")]
    height: Option<f64>,

    /// Effect options JSON.
    #[arg(long, conflicts_with = "config")]
    effect: Option<PathBuf>,

    /// Shape config JSON (size and lens parameters).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, required_unless_present = "data_uri")]
    out: Option<PathBuf>,

    /// Print the map as a data URI on stdout.
    #[arg(long, default_value_t = false)]
    data_uri: bool,
}

impl GenerateArgs {
    fn shape_config(&self) -> anyhow::Result<ShapeConfig> {
        if let Some(path) = &self.config {
            return Ok(ShapeConfig::from_path(path)?);
        }
        let (Some(width), Some(height)) = (self.width, self.height) else {
            anyhow::bail!("--width and --height are required without --config");
        };
        let options = match &self.effect {
            Some(path) => EffectOptions::from_path(path)?,
            None => EffectOptions::default(),
        };
        Ok(options.shape_config(Size::new(width, height)))
    }
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[command(flatten)]
    element: ElementArgs,

    /// Effect strength in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    intensity: f64,

    /// SVG filter element id.
    #[arg(long, default_value = "glass")]
    id: String,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    element: ElementArgs,

    /// Backdrop image (any format the image crate decodes).
    #[arg(long)]
    backdrop: PathBuf,

    /// Effect strength in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    intensity: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Filter(args) => cmd_filter(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.shape_config()?;
    let mut generator = DisplacementGenerator::new(config)?;
    let map = generator.generate()?;
    generator.dispose();
    tracing::info!(
        width = map.size().width,
        height = map.size().height,
        "generated displacement map"
    );

    if let Some(out) = &args.out {
        map.write_png(out)?;
        eprintln!("wrote {}", out.display());
    }
    if args.data_uri {
        println!("{}", map.data_uri());
    }
    Ok(())
}

fn cmd_filter(args: FilterArgs) -> anyhow::Result<()> {
    let options = args.element.options()?;
    let config = options.shape_config(args.element.size());
    let params = FilterParams::new(&options, args.intensity)?;
    let map = generate_displacement_map(config)?;
    let size = PixelSize::new(config.width, config.height)?;
    println!("{}", filter_markup(&args.id, &map.data_uri(), size, &params)?);
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let options = args.element.options()?;
    let backdrop = load_rgba(&args.backdrop)?;
    let out = preview_effect(&backdrop, &options, args.intensity, args.element.size())?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    out.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load_rgba(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let img = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}
