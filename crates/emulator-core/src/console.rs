//! Console seam: blocking integer input, register output, and state dumps.
//!
//! The engine only talks to a [`Console`]; [`StdConsole`] binds it to a
//! reader/writer pair (the process stdio in the simulator binary) and
//! [`BufferedConsole`] scripts it for tests.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::api::CoreState;

/// Words printed per memory row in a state dump.
pub const DUMP_WORDS_PER_ROW: usize = 8;

/// Console input that could not be turned into a register value.
#[derive(Debug, Error)]
pub enum InputError {
    /// The line was not a decimal integer.
    #[error("input {0:?} is not an integer")]
    NotANumber(String),
    /// Input stream closed.
    #[error("console input is exhausted")]
    EndOfInput,
    /// Reading the input stream failed.
    #[error("console read failed: {0}")]
    Io(#[from] io::Error),
}

/// Host-provided console used by `INP`, `OUT` and `DMP`.
pub trait Console {
    /// Prompts for and reads one integer destined for `register`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when no integer could be read. The offending
    /// line is consumed either way.
    fn read_input(&mut self, register: &str) -> Result<i32, InputError>;

    /// Prints one register value.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn write_output(&mut self, register: &str, value: i32) -> io::Result<()>;

    /// Prints a read-only snapshot of the machine.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    fn dump(&mut self, state: &CoreState) -> io::Result<()>;
}

/// Parses one console line as a register value.
///
/// # Errors
///
/// Returns [`InputError::NotANumber`] when the trimmed line is not an `i32`.
pub fn parse_input(line: &str) -> Result<i32, InputError> {
    let trimmed = line.trim();
    trimmed
        .parse::<i32>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Renders registers, flags, PC, and memory as text.
#[must_use]
pub fn render_dump(state: &CoreState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- MACHINE STATE ({}) ---", state.profile);
    let _ = writeln!(out, "PC: {}  State: {:?}", state.pc, state.run_state);
    let registers: Vec<String> = state
        .registers
        .as_slice()
        .iter()
        .zip(state.profile.register_names())
        .map(|(value, name)| format!("{name}={value}"))
        .collect();
    let _ = writeln!(out, "Registers: {}", registers.join("  "));
    let _ = writeln!(
        out,
        "Flags: ZF={} SF={}",
        u8::from(state.flags.zero),
        u8::from(state.flags.sign)
    );
    let _ = writeln!(out, "Memory:");
    let width = state.memory.len().saturating_sub(1).to_string().len().max(2);
    for (row, words) in state
        .memory
        .as_slice()
        .chunks(DUMP_WORDS_PER_ROW)
        .enumerate()
    {
        let _ = write!(out, "  [{:0width$}]:", row * DUMP_WORDS_PER_ROW);
        for word in words {
            let _ = write!(out, "{word:>6}");
        }
        out.push('\n');
    }
    out
}

/// Console over any buffered reader and writer.
#[derive(Debug)]
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    /// Binds a console to `input` and `output`.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_input(&mut self, register: &str) -> Result<i32, InputError> {
        write!(self.output, "INPUT required for register {register}: ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput);
        }
        parse_input(&line)
    }

    fn write_output(&mut self, register: &str, value: i32) -> io::Result<()> {
        writeln!(self.output, "OUTPUT from register {register}: {value}")
    }

    fn dump(&mut self, state: &CoreState) -> io::Result<()> {
        self.output.write_all(render_dump(state).as_bytes())
    }
}

/// One value printed by `OUT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Register name as the profile spells it.
    pub register: String,
    /// Printed value.
    pub value: i32,
}

/// In-memory console: scripted input lines, captured output.
#[derive(Debug, Clone, Default)]
pub struct BufferedConsole {
    inputs: VecDeque<String>,
    outputs: Vec<OutputRecord>,
    prompts: Vec<String>,
    dumps: Vec<String>,
}

impl BufferedConsole {
    /// Creates a console that will answer input requests with `lines` in order.
    pub fn with_inputs<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every `OUT` in execution order.
    #[must_use]
    pub fn outputs(&self) -> &[OutputRecord] {
        &self.outputs
    }

    /// Printed values in execution order.
    #[must_use]
    pub fn values(&self) -> Vec<i32> {
        self.outputs.iter().map(|record| record.value).collect()
    }

    /// Registers that requested input, in order.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Rendered dumps, in order.
    #[must_use]
    pub fn dumps(&self) -> &[String] {
        &self.dumps
    }
}

impl Console for BufferedConsole {
    fn read_input(&mut self, register: &str) -> Result<i32, InputError> {
        self.prompts.push(register.to_string());
        let line = self.inputs.pop_front().ok_or(InputError::EndOfInput)?;
        parse_input(&line)
    }

    fn write_output(&mut self, register: &str, value: i32) -> io::Result<()> {
        self.outputs.push(OutputRecord {
            register: register.to_string(),
            value,
        });
        Ok(())
    }

    fn dump(&mut self, state: &CoreState) -> io::Result<()> {
        self.dumps.push(render_dump(state));
        Ok(())
    }
}
