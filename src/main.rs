use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use pipviz::config::{DEFAULT_INPUT, DEFAULT_OUTPUT, FileConfig};
use pipviz::domain::ParsedReport;
use pipviz::parser::parse_with_warnings;
use pipviz::render::{
    HtmlSurface, RenderOptions, RenderOutcome, ViewerOutcome, render, viewport,
};

/// Visualize point-in-polygon test results
///
/// Reads a result report (polygon vertices followed by classified test
/// points) and writes an interactive HTML plot of it.
///
/// Examples:
///   # Read results.txt from the working directory
///   pipviz
///
///   # Read another report, open the plot and return immediately
///   pipviz -i run7/results.txt -o run7.html --open --no-wait
#[derive(Parser, Debug)]
#[command(name = "pipviz")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches pipviz.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Result report to read (defaults to results.txt)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// HTML plot to write (defaults to pipviz.html)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Viewport margin as a fraction of each axis' extent
    #[arg(long)]
    margin: Option<f64>,

    /// Open the plot in the system browser
    #[arg(long)]
    open: bool,

    /// Do not wait for the viewer to be closed
    #[arg(long)]
    no_wait: bool,

    /// Disable coloured console output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Command line merged over the config file
#[derive(Debug)]
struct Settings {
    input: PathBuf,
    output: PathBuf,
    margin: f64,
    min_margin: f64,
    width: u32,
    height: u32,
    title: Option<String>,
    open: bool,
    wait: bool,
    color: bool,
    verbose: bool,
}

impl Settings {
    fn resolve(args: &Args, file: FileConfig) -> Self {
        Self {
            input: args
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: args
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            margin: args.margin.unwrap_or(file.margin),
            min_margin: file.min_margin,
            width: file.width,
            height: file.height,
            title: file.title,
            open: args.open || file.open,
            wait: !args.no_wait && file.wait,
            color: !args.no_color && file.color,
            verbose: args.verbose || file.verbose,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        FileConfig::from_path(config_path)?
    } else {
        FileConfig::load().unwrap_or_default()
    };
    let settings = Settings::resolve(&args, file_config);

    if !(settings.margin.is_finite() && settings.margin >= 0.0) {
        bail!("Margin must be a non-negative number, got {}", settings.margin);
    }

    println!("pipviz - Point-in-Polygon Result Viewer");
    println!("=======================================");
    println!();

    if settings.verbose {
        println!("Configuration:");
        println!("  Input: {}", settings.input.display());
        println!("  Output: {}", settings.output.display());
        println!("  Margin: {} (min {})", settings.margin, settings.min_margin);
        println!("  Size: {}x{}px", settings.width, settings.height);
        println!("  Open in browser: {}", settings.open);
        println!("  Wait for viewer: {}", settings.wait);
        println!();
    }

    if !settings.input.exists() {
        bail!("Input file not found: {}", settings.input.display());
    }

    let spinner = create_spinner("Reading polygon and test point data...");
    let start = Instant::now();
    let text = std::fs::read_to_string(&settings.input)
        .with_context(|| format!("Failed to read input file: {}", settings.input.display()))?;
    let lines: Vec<&str> = text.lines().collect();
    let parsed = parse_with_warnings(&lines);
    let (report, warnings) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            spinner.finish_and_clear();
            return Err(e).with_context(|| {
                format!("Invalid report format in {}", settings.input.display())
            });
        }
    };
    spinner.finish_with_message(format!(
        "Loaded {} polygon vertices and {} test points [{:.1}s]",
        report.polygon.vertex_count(),
        report.test_points.len(),
        start.elapsed().as_secs_f32()
    ));

    for warning in &warnings {
        eprintln!("Warning: error reading {}", warning);
    }
    if report.vertex_count_mismatch()
        && let Some(declared) = report.declared_vertex_count
    {
        eprintln!(
            "Warning: header declares {} polygon points but {} were read",
            declared,
            report.polygon.vertex_count()
        );
    }

    println!("Points inside the polygon: {}", report.inside_count());
    println!("Points outside the polygon: {}", report.outside_count());

    let mut options = RenderOptions {
        margin_ratio: settings.margin,
        min_margin: settings.min_margin,
        color: settings.color && std::io::stdout().is_terminal(),
        ..Default::default()
    };
    if let Some(title) = settings.title.clone() {
        options.title = title;
    }

    if settings.verbose {
        print_geometry_details(&report, &options);
    }

    let mut surface = HtmlSurface::new(settings.output.clone(), settings.width, settings.height)
        .with_open(settings.open)
        .with_wait(settings.wait);

    let outcome = render(&report, &mut surface, &options, &mut std::io::stdout().lock())
        .context("Failed to render visualization")?;

    match outcome {
        RenderOutcome::NothingToShow => {}
        RenderOutcome::Shown(ViewerOutcome::Cancelled) => {
            println!();
            println!("Visualization cancelled by user.");
        }
        RenderOutcome::Shown(_) => {
            println!();
            println!(
                "Done! Total time: {:.1}s",
                total_start.elapsed().as_secs_f32()
            );
        }
    }

    Ok(())
}

fn print_geometry_details(report: &ParsedReport, options: &RenderOptions) {
    let polygon = &report.polygon;
    println!("Polygon:");
    println!("  Corners: {}", polygon.vertex_count());
    println!("  Area: {:.4}", polygon.area());
    match polygon.winding() {
        Some(order) => println!("  Winding: {:?}", order),
        None => println!("  Winding: degenerate"),
    }
    if let Some(view) = viewport(report, options) {
        println!(
            "  Viewport: x [{:.3}, {:.3}], y [{:.3}, {:.3}]",
            view.min_x, view.max_x, view.min_y, view.max_y
        );
    }
    println!();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
