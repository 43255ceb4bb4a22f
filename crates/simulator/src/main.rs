//! CLI entry point for the W16 simulator.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use w16_core::{
    disassemble_program, render_dump, BinaryImage, CoreConfig, CoreState, Machine, Profile,
    RunBoundary, StdConsole,
};

#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use w16_asm as _;

/// Exit status when the image cannot be loaded.
const EXIT_LOAD_FAILURE: u8 = 1;
/// Exit status when the run ends in a fault or at the step limit.
const EXIT_ABNORMAL: u8 = 2;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a W16 binary image")]
struct Opts {
    /// Binary image produced by w16-asm.
    #[arg(value_name = "BINARY")]
    binary: PathBuf,
    /// Instruction set profile.
    #[arg(short, long, default_value_t = Profile::Extended)]
    profile: Profile,
    /// Print the final machine state.
    #[arg(long)]
    dump: bool,
    /// Print the final machine state as JSON.
    #[arg(long, conflicts_with = "dump")]
    json: bool,
    /// Stop after this many instructions.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
    /// Print the disassembled image and exit.
    #[arg(long)]
    disassemble: bool,
    /// Debug-level logging.
    #[arg(short, long)]
    verbose: bool,
    /// Log every executed instruction.
    #[arg(long)]
    trace: bool,
}

fn init_tracing(opts: &Opts) {
    let default = if opts.trace {
        "trace"
    } else if opts.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_disassembly(profile: Profile, image: &BinaryImage) {
    for row in disassemble_program(profile, image) {
        println!("{:03}: {:04X}  {}", row.address, row.word, row.text);
    }
}

fn report_boundary(boundary: RunBoundary, state: &CoreState, max_steps: Option<u64>) {
    match boundary {
        RunBoundary::Halted => println!("--- HLT instruction at PC {} ---", state.pc),
        RunBoundary::EndOfProgram => println!("--- end of program at PC {} ---", state.pc),
        RunBoundary::Faulted(code) => match state.diagnostics.last_fault {
            Some(fault) => eprintln!(
                "--- FAULT: {code} at PC {} (word 0x{:04X}) ---",
                fault.pc, fault.word
            ),
            None => eprintln!("--- FAULT: {code} at PC {} ---", state.pc),
        },
        RunBoundary::StepLimit => eprintln!(
            "--- step limit of {} reached at PC {} ---",
            max_steps.unwrap_or_default(),
            state.pc
        ),
    }
}

fn report_warnings(state: &CoreState) {
    let diagnostics = &state.diagnostics;
    if diagnostics.has_warnings() {
        eprintln!(
            "warnings: {} memory, {} register, {} input",
            diagnostics.memory_warnings, diagnostics.register_warnings, diagnostics.input_errors
        );
    }
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();
    init_tracing(&opts);

    let config = CoreConfig::for_profile(opts.profile).with_max_steps(opts.max_steps);
    let image = match BinaryImage::load(&opts.binary, config.program_capacity) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::from(EXIT_LOAD_FAILURE));
        }
    };
    debug!(words = image.len(), profile = %config.profile, "program loaded");

    if opts.disassemble {
        print_disassembly(config.profile, &image);
        return Ok(ExitCode::SUCCESS);
    }

    let mut machine = Machine::new(config, image);
    let mut console = StdConsole::stdio();
    let outcome = machine.run(&mut console);
    debug!(steps = outcome.steps, boundary = ?outcome.boundary, "run finished");

    let state = machine.state();
    report_boundary(outcome.boundary, state, opts.max_steps);
    report_warnings(state);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(state)?);
    } else if opts.dump {
        print!("{}", render_dump(state));
    }

    Ok(if outcome.boundary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_ABNORMAL)
    })
}
