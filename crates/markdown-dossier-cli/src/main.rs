use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::debug;
use markdown_dossier_config::{Config, SourceLayout};
use markdown_dossier_engine::{BuildRequest, build_dossier, derive_filename, derive_title};
use markdown_dossier_pdf::PdfTypesetter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_INPUT_DIR: &str = "docs/02-technical-specifications";
const DEFAULT_OUTPUT_DIR: &str = "pdf";

/// Render a folder of markdown chapters into a branded PDF dossier
#[derive(Parser, Debug)]
#[command(name = "markdown-dossier", version)]
struct Args {
    /// Folder holding the markdown sources
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// PDF file to write (defaults to pdf/<folder>.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How sources are discovered under the input folder
    #[arg(short, long, value_enum, ignore_case = true)]
    layout: Option<LayoutArg>,

    /// Config file to use instead of ~/.config/markdown-dossier/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not print the created file path
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Every markdown file in the folder, in name order
    Chapters,
    /// A readme per system folder followed by its stories
    Systems,
}

impl From<LayoutArg> for SourceLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Chapters => SourceLayout::Chapters,
            LayoutArg::Systems => SourceLayout::Systems,
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                bail!("Config file '{}' does not exist", path.display());
            }
            config
        }
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}

/// Folder name the title and default file name are derived from.
fn folder_name(input_dir: &Path) -> String {
    input_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dossier".to_string())
}

/// Merges flags over the config file over defaults.
fn build_request(args: &Args, config: Config) -> BuildRequest {
    let input_dir = args
        .input_dir
        .clone()
        .or(config.input_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    let folder = folder_name(&input_dir);
    let output = args
        .output
        .clone()
        .or(config.output)
        .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_DIR).join(derive_filename(&folder)));

    BuildRequest {
        branding: config.branding.resolve(&derive_title(&folder)),
        layout: args
            .layout
            .map(SourceLayout::from)
            .or(config.layout)
            .unwrap_or_default(),
        date: chrono::Local::now().date_naive(),
        input_dir,
        output,
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let request = build_request(&args, config);
    debug!("resolved build request: {request:?}");

    let outcome = build_dossier(&request, &PdfTypesetter::default())
        .with_context(|| format!("Failed to build '{}'", request.output.display()))?;

    if !args.quiet {
        println!("Created PDF dossier at: {}", outcome.output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
