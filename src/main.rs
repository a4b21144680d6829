use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use structured_logger::json::new_writer;
use structured_logger::Builder;

use osm_poster::config::RunConfig;
use osm_poster::errors::{Error, Result};
use osm_poster::etl::draw_map::DrawMapEtl;
use osm_poster::etl::tag_survey::TagSurveyEtl;
use osm_poster::etl::Etl;
use osm_poster::style::{Color, JsonFileStore, StyleConfig, StyleStore};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Level of the JSON log written to stderr
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Style configuration file [default: user.config]
    #[arg(long, global = true)]
    styles: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an extract to a PNG or JPEG image
    Render(RenderArgs),

    /// List the drawable tag values an extract uses
    Survey {
        /// .osm or .osm.xz extract
        input: PathBuf,

        /// Write the JSON report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the style configuration
    #[command(subcommand)]
    Styles(StylesCommand),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// .osm or .osm.xz extract
    input: Option<PathBuf>,

    /// Image to write, .png or .jpg
    output: Option<PathBuf>,

    /// Preview canvas width [default: 1000]
    #[arg(long)]
    width: Option<f64>,

    /// Preview canvas height [default: 800]
    #[arg(long)]
    height: Option<f64>,

    /// Export with this many pixels on the longest side
    #[arg(long)]
    max_dim: Option<u32>,

    /// Where to save the style snapshot [default: next to the image]
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// JSON job file; flags override its fields
    #[arg(long)]
    job: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum StylesCommand {
    /// Replace the configuration with the defaults
    Reset,

    /// Make a saved configuration the active one
    Import { file: PathBuf },

    /// Change one style
    Set {
        key: String,

        #[arg(long)]
        enabled: Option<bool>,

        /// #RRGGBB or #RRGGBBAA
        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        width: Option<f32>,
    },
}

fn setup_logging(level: &str) {
    Builder::with_level(level)
        .with_target_writer("*", new_writer(io::stderr()))
        .init();
}

fn render(args: RenderArgs, styles: Option<PathBuf>) -> Result<()> {
    let job_file = match &args.job {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let flags = RunConfig {
        input: args.input,
        output: args.output,
        width: args.width,
        height: args.height,
        max_dim: args.max_dim,
        style_config: styles,
        snapshot_dir: args.snapshot_dir,
    };
    let run_config = job_file.overridden_by(flags);
    let job = run_config.render_job()?;
    let mut store = JsonFileStore::new(run_config.style_config_path());

    let outcome = DrawMapEtl::new(&job, &mut store).process()?;
    info!(
        image = outcome.image.display().to_string().as_str(),
        snapshot = outcome.snapshot.display().to_string().as_str(),
        width = outcome.width,
        height = outcome.height,
        skipped = outcome.diagnostics.diagnostics.len();
        "Done"
    );
    Ok(())
}

fn edit_styles(command: StylesCommand, store: &mut dyn StyleStore) -> Result<()> {
    let config = match command {
        StylesCommand::Reset => StyleConfig::default(),
        StylesCommand::Import { file } => JsonFileStore::load_file(&file)?,
        StylesCommand::Set {
            key,
            enabled,
            color,
            width,
        } => {
            let current = store.read()?;
            let mut entry = current
                .style_of(&key)
                .cloned()
                .ok_or_else(|| Error::UnknownStyleKey(key.clone()))?;
            if let Some(enabled) = enabled {
                entry = entry.with_enabled(enabled);
            }
            if let Some(color) = color {
                entry = entry.with_color(Color::from_hex(&color)?);
            }
            if let Some(width) = width {
                entry = entry.with_width(width)?;
            }
            current.with_entry(&key, entry)?
        }
    };
    store.write(&config)?;
    info!("Style configuration saved");
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let style_path = || {
        RunConfig {
            style_config: cli.styles.clone(),
            ..Default::default()
        }
        .style_config_path()
    };

    match cli.command {
        Command::Render(args) => render(args, cli.styles.clone()),
        Command::Survey { input, output } => {
            let mut store = JsonFileStore::new(style_path());
            TagSurveyEtl::new(input, output, &mut store).process()?;
            Ok(())
        }
        Command::Styles(command) => edit_styles(command, &mut JsonFileStore::new(style_path())),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(err = err.to_string().as_str(), input_error = err.is_input_error(); "Failed");
            ExitCode::FAILURE
        }
    }
}
