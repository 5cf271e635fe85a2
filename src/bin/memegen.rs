use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use memegen::{
    ContentClassifier, FontRasterizer, GeneratorConfig, HostedInference, ImgflipCatalog,
    MemeGenerator, Session, SessionOptions, default_picker,
};

#[derive(Parser, Debug)]
#[command(name = "memegen", version, about = "Interactive captioned meme generator")]
struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory generated memes are written to.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Directory catalog templates are cached in.
    #[arg(long)]
    templates_dir: Option<PathBuf>,

    /// Prompts file read by the batch menu entries.
    #[arg(long)]
    prompts_file: Option<PathBuf>,

    /// Watermark text drawn in the bottom-left corner.
    #[arg(long, conflicts_with = "no_watermark")]
    watermark: Option<String>,

    /// Disable the watermark.
    #[arg(long, default_value_t = false)]
    no_watermark: bool,

    /// Caption font file (skips system font discovery).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Seed for template selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "configuration loaded");

    let inference = HostedInference::connect(&config.inference)?;
    let classifier = ContentClassifier::new(Box::new(inference.clone()), Box::new(inference));
    let font = FontRasterizer::discover(&config.font).context("load caption font")?;
    tracing::info!(family = font.family(), "caption font ready");

    let mut catalog = ImgflipCatalog::new(&config.catalog, config.template_dir.clone())?;
    let picker = default_picker();
    let mut generator = MemeGenerator::new(config, classifier, Box::new(font));
    let opts = SessionOptions::from_config(generator.config());

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Session::new(
        stdin.lock(),
        &mut stdout,
        &mut generator,
        &mut catalog,
        picker.as_ref(),
        opts,
    )
    .run()?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}

fn init_logging(verbose: u8) {
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

fn load_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(dir) = &cli.templates_dir {
        config.template_dir = dir.clone();
    }
    if let Some(path) = &cli.prompts_file {
        config.prompts_file = path.clone();
    }
    if let Some(text) = &cli.watermark {
        config.watermark = Some(text.clone());
    }
    if cli.no_watermark {
        config.watermark = None;
    }
    if let Some(path) = &cli.font {
        config.font.path = Some(path.clone());
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;
    Ok(config)
}
