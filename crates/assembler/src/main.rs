//! CLI entry point for the W16 assembler.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use w16_asm::{assemble_file, write_image, AssembleError, AssemblerConfig};
use w16_core::Profile;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
#[cfg(test)]
use tempfile as _;
use thiserror as _;
use tracing as _;

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble W16 source into a binary image")]
struct Opts {
    /// Assembly source file.
    #[arg(value_name = "SOURCE")]
    source: PathBuf,
    /// Output binary image.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,
    /// Instruction set profile.
    #[arg(short, long, default_value_t = Profile::Extended)]
    profile: Profile,
    /// Also write the listing to this file.
    #[arg(long, value_name = "PATH")]
    listing: Option<PathBuf>,
    /// Suppress per-instruction progress lines.
    #[arg(short, long)]
    quiet: bool,
    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: &AssembleError) {
    eprintln!("error: {err}");
    if let AssembleError::Encode(encode) = err {
        eprintln!("  | {}", encode.text);
    }
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();
    init_tracing(opts.verbose);

    let config = AssemblerConfig::for_profile(opts.profile);
    let assembly = match assemble_file(&opts.source, &config) {
        Ok(assembly) => assembly,
        Err(err) => {
            report(&err);
            return Ok(ExitCode::FAILURE);
        }
    };

    for warning in &assembly.warnings {
        eprintln!("warning: {warning}");
    }

    println!(
        "[Pass 1] {} instructions, {} labels ({} profile)",
        assembly.listing.len(),
        assembly.symbols.len(),
        config.profile
    );
    println!("[Pass 2] encoding");
    if !opts.quiet {
        print!("{}", assembly.listing_text());
    }

    if let Err(err) = write_image(&assembly, &opts.output) {
        report(&err);
        return Ok(ExitCode::FAILURE);
    }
    if let Some(path) = &opts.listing {
        fs::write(path, assembly.listing_text())
            .with_context(|| format!("cannot write listing {}", path.display()))?;
    }

    println!(
        "Assembled {} instructions ({} bytes) -> {}",
        assembly.image.len(),
        assembly.image.to_bytes().len(),
        opts.output.display()
    );
    Ok(ExitCode::SUCCESS)
}
