//! Host-facing API: configuration, machine state, and the run loop.

use tracing::{debug, info};

use crate::console::Console;
use crate::diag::Diagnostics;
use crate::encoding::Profile;
use crate::execute::step_one;
use crate::image::BinaryImage;
use crate::memory::Memory;
use crate::state::{Flags, RegisterFile, RunState};
use crate::FaultCode;

/// Top-level configuration for a machine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Architecture profile.
    pub profile: Profile,
    /// Data memory size in words.
    pub memory_words: usize,
    /// Largest program accepted; longer images are truncated.
    pub program_capacity: usize,
    /// Optional bound on executed instructions.
    pub max_steps: Option<u64>,
}

impl CoreConfig {
    /// Profile defaults with no step limit.
    #[must_use]
    pub const fn for_profile(profile: Profile) -> Self {
        Self {
            profile,
            memory_words: profile.memory_words(),
            program_capacity: profile.program_capacity(),
            max_steps: None,
        }
    }

    /// Returns a copy with a step limit.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::for_profile(Profile::default())
    }
}

/// Complete machine state of one simulator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreState {
    /// Profile the state was built for.
    pub profile: Profile,
    /// Register file.
    pub registers: RegisterFile,
    /// Comparison flags.
    pub flags: Flags,
    /// Data memory.
    pub memory: Memory,
    /// Index of the next instruction.
    pub pc: i32,
    /// Current execution state.
    pub run_state: RunState,
    /// Recovered-condition counters and the last fault.
    pub diagnostics: Diagnostics,
}

impl CoreState {
    /// Creates the initial state: zeroed, running at PC 0, with the stack
    /// and base pointers (when the profile has them) one past the top of memory.
    #[must_use]
    pub fn with_config(config: &CoreConfig) -> Self {
        let mut state = Self {
            profile: config.profile,
            registers: RegisterFile::for_profile(config.profile),
            flags: Flags::default(),
            memory: Memory::new(config.memory_words),
            pc: 0,
            run_state: RunState::Running,
            diagnostics: Diagnostics::default(),
        };
        state.reset();
        state
    }

    /// Restores the initial state without reallocating memory.
    pub fn reset(&mut self) {
        self.registers.clear();
        self.memory.clear();
        self.flags = Flags::default();
        self.pc = 0;
        self.run_state = RunState::Running;
        self.diagnostics = Diagnostics::default();
        let top = i32::try_from(self.memory.len()).unwrap_or(i32::MAX);
        for pointer in [self.profile.stack_pointer(), self.profile.base_pointer()]
            .into_iter()
            .flatten()
        {
            self.registers.set(pointer, top);
        }
    }

    /// Reads a register by name.
    #[must_use]
    pub fn register(&self, name: &str) -> Option<i32> {
        self.profile
            .register_index(name)
            .and_then(|index| self.registers.get(index))
    }

    /// Current stack pointer value, when the profile has a stack.
    #[must_use]
    pub fn stack_pointer(&self) -> Option<i32> {
        self.profile
            .stack_pointer()
            .and_then(|index| self.registers.get(index))
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction executed and control continues.
    Retired,
    /// `HLT` executed, or the machine was already halted.
    Halted,
    /// A fault was raised, or one was already latched.
    Fault {
        /// Fault code.
        cause: FaultCode,
    },
    /// The program counter is outside the program; the run is complete.
    EndOfProgram,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunBoundary {
    /// `HLT` executed.
    Halted,
    /// A runtime fault stopped the machine.
    Faulted(FaultCode),
    /// The program counter left the program.
    EndOfProgram,
    /// The configured step limit was reached.
    StepLimit,
}

impl RunBoundary {
    /// Whether the run ended without a fault or limit.
    #[must_use]
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Halted | Self::EndOfProgram)
    }
}

/// Summary returned by [`Machine::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Instructions executed during this call.
    pub steps: u64,
    /// Reason the run stopped.
    pub boundary: RunBoundary,
}

/// A loaded program bound to its machine state.
#[derive(Debug, Clone)]
pub struct Machine {
    config: CoreConfig,
    program: BinaryImage,
    state: CoreState,
}

impl Machine {
    /// Creates a machine in its initial state. Programs longer than the
    /// configured capacity are truncated.
    #[must_use]
    pub fn new(config: CoreConfig, program: BinaryImage) -> Self {
        let program = if program.len() > config.program_capacity {
            BinaryImage::new(program.words()[..config.program_capacity].to_vec())
        } else {
            program
        };
        let state = CoreState::with_config(&config);
        Self {
            config,
            program,
            state,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Loaded program.
    #[must_use]
    pub const fn program(&self) -> &BinaryImage {
        &self.program
    }

    /// Current machine state.
    #[must_use]
    pub const fn state(&self) -> &CoreState {
        &self.state
    }

    /// Mutable machine state, for hosts that preload registers or memory.
    pub fn state_mut(&mut self) -> &mut CoreState {
        &mut self.state
    }

    /// Consumes the machine and returns its final state.
    #[must_use]
    pub fn into_state(self) -> CoreState {
        self.state
    }

    /// Executes one instruction.
    pub fn step(&mut self, console: &mut dyn Console) -> StepOutcome {
        step_one(&mut self.state, &self.program, console)
    }

    /// Runs until halt, fault, end of program, or the step limit.
    pub fn run(&mut self, console: &mut dyn Console) -> RunOutcome {
        let start = self.state.diagnostics.steps;
        let boundary = loop {
            let executed = self.state.diagnostics.steps - start;
            if self.config.max_steps.is_some_and(|limit| executed >= limit) {
                break RunBoundary::StepLimit;
            }
            match self.step(console) {
                StepOutcome::Retired => {}
                StepOutcome::Halted => break RunBoundary::Halted,
                StepOutcome::Fault { cause } => break RunBoundary::Faulted(cause),
                StepOutcome::EndOfProgram => break RunBoundary::EndOfProgram,
            }
        };
        let steps = self.state.diagnostics.steps - start;
        match boundary {
            RunBoundary::Faulted(cause) => info!(steps, %cause, pc = self.state.pc, "run faulted"),
            _ => debug!(steps, ?boundary, pc = self.state.pc, "run finished"),
        }
        RunOutcome { steps, boundary }
    }
}
