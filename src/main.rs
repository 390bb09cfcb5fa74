use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use rand::{thread_rng, Rng as _};
use thiserror::Error;

use setmaze::{
    generate_batch, logging,
    progress::ProgressHandle,
    render,
    settings::{Settings, SettingsError},
    GenerationError,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "setmaze")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of columns")]
    cols: Option<usize>,
    #[clap(short, long, help = "Seed, random if not set here or in the config")]
    seed: Option<u64>,
    #[clap(short = 'n', long, default_value_t = 1, help = "How many mazes to generate")]
    count: usize,
    #[clap(short, long, help = "Use the size of a preset from the config")]
    preset: Option<String>,
    #[clap(long, help = "Path of the config file")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeatable")]
    verbose: u8,
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("no maze size given and no preset configured")]
    NoSize,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        if let Some(s) = config_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", config_path);
        }
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&config_path)?;
        return Ok(());
    }

    better_panic::install();

    logging::init(LevelFilter::Warn);
    let settings = Settings::load(&config_path)?;
    logging::init(verbosity(settings.get_log_level().into(), args.verbose));

    let (rows, cols) = resolve_size(&args, &settings)?;
    let seed = args
        .seed
        .or(settings.get_seed())
        .unwrap_or_else(|| thread_rng().gen());
    log::info!("Seed: {}", seed);

    let progress = ProgressHandle::new();
    let mazes = generate_batch(rows, cols, args.count, seed, &progress)?;
    log::debug!("Generated {} of {} cells", progress.progress().done, progress.progress().from);

    let output = mazes
        .iter()
        .map(render::to_text)
        .collect::<Vec<_>>()
        .join("\n");
    print!("{}", output);

    Ok(())
}

fn resolve_size(args: &Args, settings: &Settings) -> Result<(usize, usize), AppError> {
    let preset = match &args.preset {
        Some(title) => Some(
            settings
                .preset(title)
                .ok_or_else(|| AppError::UnknownPreset(title.clone()))?,
        ),
        None => settings.default_preset(),
    };

    let rows = args.rows.or(preset.as_ref().map(|p| p.rows));
    let cols = args.cols.or(preset.as_ref().map(|p| p.cols));

    match (rows, cols) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => Err(AppError::NoSize),
    }
}

fn verbosity(base: LevelFilter, verbose: u8) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let index = LEVELS.iter().position(|&l| l == base).unwrap_or(2);
    LEVELS[(index + verbose as usize).min(LEVELS.len() - 1)]
}
