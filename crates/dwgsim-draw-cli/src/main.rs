//! `dwgsim-draw`: view a DwgSim JSON drawing as SVG or PNG, or echo it back
//! as JSON.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use dwgsim_draw::{Document, RenderOptions, echo_json, render_document};
use miette::{IntoDiagnostic, WrapErr};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    /// SVG drawing
    #[default]
    Svg,
    /// PNG image, needs `--output`
    Png,
    /// The parsed document as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "dwgsim-draw", version, about = "Draw the model space entities of a DwgSim JSON file")]
struct Cli {
    /// DwgSim JSON file
    input: Utf8PathBuf,

    /// Write here instead of stdout
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// What to produce
    #[arg(short = 'O', long, value_enum, default_value_t)]
    format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Canvas width in pixels
    #[arg(long, default_value_t = dwgsim_draw::render::defaults::WIDTH)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = dwgsim_draw::render::defaults::HEIGHT)]
    height: f64,

    /// PNG pixels per SVG pixel
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

/// Everything `run` needs, resolved from the command line
#[derive(Debug, Clone)]
struct Config {
    input: Utf8PathBuf,
    output: Option<Utf8PathBuf>,
    format: OutputFormat,
    pretty: bool,
    render: RenderOptions,
    scale: f32,
}

impl Cli {
    fn into_config(self) -> miette::Result<Config> {
        if self.format == OutputFormat::Png && self.output.is_none() {
            miette::bail!(
                code = "dwgsim_draw::cli::png_needs_output",
                help = "pass --output <file.png>",
                "PNG output cannot go to stdout"
            );
        }
        let render = RenderOptions {
            width: self.width,
            height: self.height,
            ..RenderOptions::default()
        };
        render.validate()?;
        Ok(Config {
            input: self.input,
            output: self.output,
            format: self.format,
            pretty: self.pretty,
            render,
            scale: self.scale,
        })
    }
}

fn init_tracing(quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("warn")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> miette::Result<()> {
    let doc = Document::load(&config.input)?;

    match config.format {
        OutputFormat::Json => {
            let mut text = echo_json(&doc, config.pretty);
            text.push('\n');
            emit(config.output.as_deref(), &text)
        }
        OutputFormat::Svg => {
            let rendering = render_document(&doc, &config.render)?;
            tracing::info!(
                shapes = rendering.stats.shapes(),
                skipped = rendering.stats.skipped,
                "drawing rendered"
            );
            emit(config.output.as_deref(), &rendering.svg)
        }
        OutputFormat::Png => {
            let rendering = render_document(&doc, &config.render)?;
            let path = config
                .output
                .as_deref()
                .ok_or_else(|| miette::miette!("PNG output needs a file"))?;
            dwgsim_raster::write_png(&rendering.svg, path, config.scale)?;
            tracing::info!(
                shapes = rendering.stats.shapes(),
                skipped = rendering.stats.skipped,
                path = %path,
                "drawing rasterized"
            );
            Ok(())
        }
    }
}

/// Write `text` to `path`, or to stdout when there is none.
fn emit(path: Option<&Utf8Path>, text: &str) -> miette::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot write {path}")),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .into_diagnostic()
                .wrap_err("cannot write to stdout")
        }
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet);
    let config = cli.into_config()?;
    run(&config)
}
