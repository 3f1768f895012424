use clap::{Parser, Subcommand};
use poster_gal::imaging::RustBackend;
use poster_gal::pipeline::{self, RunRequest};
use poster_gal::publish::GitCli;
use poster_gal::{config, generate, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poster-gal")]
#[command(about = "Add an A4 poster to the gallery page and publish it")]
#[command(long_about = "\
Add an A4 poster to the gallery page and publish it

The image is checked for an A4 portrait shape (width/height within 0.02 of
0.707), resized to 595x842 and saved as <name>.jpg in the working directory.
index.html is then rebuilt from every image in that directory, and the
directory is committed and pushed with git.

Working directory layout:

  <work-dir>/
  ├── .git/                 # Checkout whose upstream serves the page
  ├── config.toml           # Optional settings (see gen-config)
  ├── index.html            # Regenerated on every run
  ├── __Event.jpg           # Leading underscores sort first, hidden in titles
  └── poster.jpg

The words 'index' and 'gen-config' are subcommands, so an image file with
one of those names must be given with a path, e.g. 'poster-gal ./index'.

Run 'poster-gal gen-config' to generate a documented config.toml.")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Cli {
    /// Poster image to add (PNG, JPEG, TIFF or WebP)
    #[arg(required = true)]
    image: Option<PathBuf>,

    /// Gallery directory [default: directory containing the executable]
    #[arg(long, global = true)]
    work_dir: Option<PathBuf>,

    /// Convert and regenerate the index, but skip git
    #[arg(long)]
    no_publish: bool,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate index.html from the working directory without converting
    Index,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are reported as errors by clap but succeed
            if !e.use_stderr() {
                e.exit();
            }
            // Usage errors go to stdout like every other fatal error
            print!("{}", e.render());
            return ExitCode::FAILURE;
        }
    };

    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        Some(Command::Index) => {
            let work_dir = resolve_work_dir(cli.work_dir.as_deref())?;
            let site_config = config::load_config(&work_dir)?;
            let report = generate::generate(&work_dir, &site_config)?;
            output::print_gallery_output(&report);
        }
        None => {
            let Some(image) = cli.image else {
                return Err("no input image given".into());
            };
            let work_dir = resolve_work_dir(cli.work_dir.as_deref())?;
            let site_config = config::load_config(&work_dir)?;
            let request = RunRequest {
                input: image,
                work_dir: work_dir.clone(),
                publish: !cli.no_publish,
            };
            pipeline::run(
                &request,
                &site_config,
                &RustBackend::new(),
                &GitCli::new(&work_dir),
                output::print_pipeline_event,
            )?;
        }
    }

    Ok(())
}

/// `--work-dir` if given, otherwise the directory holding this executable.
fn resolve_work_dir(cli_work_dir: Option<&Path>) -> std::io::Result<PathBuf> {
    if let Some(dir) = cli_work_dir {
        return Ok(dir.to_path_buf());
    }
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| std::io::Error::other("cannot determine the executable's directory"))
}

/// Diagnostics go to stderr so stdout stays the progress report.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={}",
            env!("CARGO_PKG_NAME").replace('-', "_"),
            level
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
