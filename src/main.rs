mod app;
mod colors;
mod config;
mod decay;
mod effect;
mod event;
mod geometry;
mod help;
mod render;
mod scheduler;
mod settings;
mod surface;
mod terminal;

use clap::{Args, Parser, Subcommand};
use colors::Rgb;
use config::TrailConfig;
use serde::Serialize;
use settings::Settings;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tiletrail")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.2.0")]
#[command(about = "Terminal tile grid that lights up under the mouse and fades out", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/tiletrail/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write log records to this file (RUST_LOG filters, default info)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tile trail (move the mouse over the terminal)
    Run(TrailArgs),

    /// Print the effective configuration
    Config(TrailArgs),
}

/// Overrides for the config file values
#[derive(Args)]
struct TrailArgs {
    /// Tile width in pixels
    #[arg(long)]
    cell_width: Option<u32>,

    /// Tile height in pixels
    #[arg(long)]
    cell_height: Option<u32>,

    /// Spacing between tiles in pixels
    #[arg(short, long)]
    gap: Option<u32>,

    /// Fade-out duration in milliseconds
    #[arg(short, long)]
    linger: Option<u64>,

    /// Repaint interval in milliseconds
    #[arg(short, long)]
    tick: Option<u64>,

    /// Highlight colour (#rrggbb)
    #[arg(long)]
    highlight: Option<Rgb>,
}

impl TrailArgs {
    fn apply(&self, config: &mut TrailConfig) {
        if let Some(v) = self.cell_width { config.cell_width = v; }
        if let Some(v) = self.cell_height { config.cell_height = v; }
        if let Some(v) = self.gap { config.gap = v; }
        if let Some(v) = self.linger { config.linger_ms = v; }
        if let Some(v) = self.tick { config.tick_ms = v; }
        if let Some(v) = self.highlight { config.highlight = v; }
    }
}

#[derive(Serialize)]
struct EffectiveConfig<'a> {
    trail: &'a TrailConfig,
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    // The alternate screen owns stderr, so only log to a file unless asked
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn resolve_config(path: Option<&Path>, args: &TrailArgs) -> io::Result<TrailConfig> {
    let settings = match path {
        Some(p) => Settings::load_explicit(p)?,
        None => Settings::load(),
    };
    let mut config = TrailConfig::default();
    settings.trail.apply(&mut config);
    args.apply(&mut config);
    Ok(config)
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Run(args) => {
            let config = resolve_config(cli.config.as_deref(), &args)?;
            app::run(config)?;
        }
        Commands::Config(args) => {
            let config = resolve_config(cli.config.as_deref(), &args)?;
            let path = cli.config.unwrap_or_else(Settings::config_path);
            let text = toml::to_string_pretty(&EffectiveConfig { trail: &config })
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            println!("# {}", path.display());
            print!("{}", text);
            config.validate()?;
        }
    }

    Ok(())
}
