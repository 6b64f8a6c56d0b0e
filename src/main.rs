#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kinsoku::prelude::{NAME, VERSION};
use kinsoku::terminal::Terminal;
use kinsoku::{preview, report, CheckError, LayoutConfig, Manuscript};

#[derive(Parser)]
#[command(name = "kinsoku", version)]
#[command(about = "Checks Japanese manuscript paragraphs against line width, ruby and kinsoku rules")]
#[command(group(ArgGroup::new("mode").required(true).args(["check", "view"])))]
struct Cli {
    /// UTF-8 text file, one paragraph per line
    path: PathBuf,
    /// Print the first violation of every paragraph
    #[arg(long)]
    check: bool,
    /// Render every paragraph as wrapped rows with violations highlighted
    #[arg(long)]
    view: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{NAME}=warn"))),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CheckError>() {
                Some(CheckError::FileNotFound { path }) => {
                    eprintln!("{NAME}: file not found: {}", path.display());
                }
                _ => eprintln!("{NAME}: error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = LayoutConfig::load().context("loading layout configuration")?;
    let manuscript = Manuscript::load(&cli.path)?;
    info!(
        version = VERSION,
        path = %cli.path.display(),
        max_width = config.max_width,
        paragraphs = manuscript.height(),
        mode = if cli.view { "view" } else { "check" },
        "checking manuscript"
    );

    let mut terminal = Terminal::stdout();
    let written = if cli.view {
        preview::print_preview(&mut terminal, &manuscript, &config)
    } else {
        report::print_report(&mut terminal, &manuscript, &config)
    };
    written.context("writing output")
}
