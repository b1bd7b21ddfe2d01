use anyhow::{Context, Result};
use clap::Parser;
use image_to_vector_wasm::svg::to_svg;
use image_to_vector_wasm::{VectorizeConfig, decode_rgba, extract_palette, trace_polygons};
use std::fs;
use std::path::{Path, PathBuf};

/// Turn images into flat-color SVG polygons and report their palettes.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON configuration file (camelCase keys); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Palette size for k-means
    #[arg(short = 'k', long)]
    k: Option<usize>,

    /// Number of k-means rounds
    #[arg(long)]
    iterations: Option<usize>,

    /// Pixel budget for the palette sampler
    #[arg(long)]
    target_pixels: Option<u32>,

    /// Point decimation strength, 0 (strongest) to 1 (none)
    #[arg(short, long)]
    simplify: Option<f32>,

    /// Minimum region area in px²
    #[arg(short = 'a', long)]
    min_area: Option<f64>,

    /// Comma-separated list of hex colors allowed to form regions
    #[arg(short = 'c', long, conflicts_with = "filter_extracted")]
    palette: Option<String>,

    /// Restrict regions to the colors of the extracted palette
    #[arg(long)]
    filter_extracted: bool,

    /// Also write `<stem>.palette.json` with the ranked palette
    #[arg(long)]
    palette_json: bool,

    /// Also write `<stem>.stats.json` with region tracing counters
    #[arg(long)]
    stats: bool,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "vectorized_")]
    prefix: String,

    /// Log pipeline details (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> Result<VectorizeConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let doc = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            VectorizeConfig::from_json(&doc).with_context(|| format!("parsing {}", path.display()))?
        }
        None => VectorizeConfig::default(),
    };

    if let Some(k) = args.k {
        config.k = k;
    }
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(target) = args.target_pixels {
        config.target_pixels = target;
    }
    if let Some(simplify) = args.simplify {
        config.simplify = simplify;
    }
    if let Some(min_area) = args.min_area {
        config.min_area = min_area;
    }
    if let Some(list) = &args.palette {
        config.palette = Some(list.split(',').map(|x| x.trim().to_uppercase()).collect());
    }

    config.validate()?;
    Ok(config)
}

fn output_path(args: &Args, input: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    match &args.out_dir {
        Some(dir) => dir.join(format!("{stem}.{extension}")),
        None => PathBuf::from(format!("{}{stem}.{extension}", args.prefix)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let config = load_config(&args)?;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let img = decode_rgba(&bytes).with_context(|| format!("decoding {}", input.display()))?;

        let palette = extract_palette(&img, &config).context("palette extraction failed")?;
        let mut run_config = config.clone();
        if args.filter_extracted {
            run_config.palette = Some(palette.clone());
        }
        let (polygons, stats) = trace_polygons(&img, &run_config).context("vectorization failed")?;
        let svg = to_svg(img.width(), img.height(), &polygons);
        log::info!("{}: {} polygons", input.display(), polygons.len());

        let svg_path = output_path(&args, input, "svg");
        if let Some(parent) = svg_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&svg_path, svg)?;
        println!("Saved → {}", svg_path.display());

        if args.stats {
            let json_path = output_path(&args, input, "stats.json");
            fs::write(&json_path, serde_json::to_string_pretty(&stats)?)?;
            println!("Saved → {}", json_path.display());
        }

        if args.palette_json {
            let json_path = output_path(&args, input, "palette.json");
            fs::write(&json_path, serde_json::to_string_pretty(&palette)?)?;
            println!("Saved → {}", json_path.display());
        }
    }

    Ok(())
}
