//! `TexTract` CLI - extract textures and flats from WAD files

pub mod progress;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::options::ExtractOptions;
use crate::operations::TextureExtractor;
use progress::{StepReporter, print_done, print_summary};

#[derive(Parser)]
#[command(name = "textract", version)]
#[command(about = "TexTract: extract textures, flats, ANIMATED and SWITCHES from Doom WADs")]
#[command(
    long_about = "Reads a request list (from --list or standard input) naming textures \
                  after a '-texture' line and flats after a '-flat' line, finds them in the \
                  given WADs (first WAD wins) and writes them, with the patches they use, \
                  into the output WAD."
)]
struct Cli {
    /// Patch WADs or directories of WADs to extract from, highest priority first
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Base WAD (usually the IWAD); decides the texture format and TEXTURE1/TEXTURE2 split
    #[arg(short, long)]
    base: PathBuf,

    /// Output WAD
    #[arg(short, long)]
    output: PathBuf,

    /// Do not add animation cycles or write ANIMATED
    #[arg(long)]
    no_animated: bool,

    /// Do not add switch pairs or write SWITCHES
    #[arg(long)]
    no_switches: bool,

    /// Replace the output WAD instead of adding to it
    #[arg(long)]
    overwrite: bool,

    /// Texture that must stay first in TEXTURE1 (default: AASTINKY and friends)
    #[arg(long, value_name = "NAME")]
    null_texture: Option<String>,

    /// Copy every base texture definition into the output
    #[arg(long)]
    keep_base_textures: bool,

    /// Read the request list from FILE instead of standard input
    #[arg(short, long, value_name = "FILE")]
    list: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log every copied entry
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::new(&self.base, &self.output)
            .with_inputs(&self.files)
            .with_no_animated(self.no_animated)
            .with_no_switches(self.no_switches)
            .with_overwrite(self.overwrite)
            .with_keep_base_textures(self.keep_base_textures);
        if let Some(name) = &self.null_texture {
            options = options.with_null_texture(name);
        }
        options
    }

    fn log_filter(&self) -> EnvFilter {
        let default = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Run the `TexTract` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(io::stderr)
        .init();

    let options = cli.options();
    let started = Instant::now();
    let reporter = StepReporter::new(cli.quiet || cli.verbose);

    let result = match &cli.list {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open request list {}", path.display()))?;
            TextureExtractor::run_with_progress(&options, BufReader::new(file), &|p| reporter.update(p))
        }
        None => TextureExtractor::run_with_progress(&options, io::stdin().lock(), &|p| reporter.update(p)),
    };
    reporter.finish();

    let summary = result.with_context(|| format!("extraction into {} failed", options.output.display()))?;
    if !cli.quiet {
        print_summary(&summary);
        print_done(started.elapsed());
    }
    Ok(())
}
