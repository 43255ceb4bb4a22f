//! Instruction execution pipeline.
//!
//! Execution is split in two phases. [`execute_instruction`] reads the
//! pre-instruction state, performs console I/O, and records every register,
//! memory and flag change in an [`ExecuteState`]. [`commit_execution`] then
//! applies those changes. A faulting instruction is never committed, so it
//! leaves no partial side effects.

mod flags;
mod helpers;

pub use flags::{condition_holds, register_test_holds, FlagsUpdate};
pub use helpers::{compute_effective_address, register_label};

use tracing::{trace, warn};

use crate::api::{CoreState, StepOutcome};
use crate::console::Console;
use crate::decoder::{DecodedInstruction, DecodedOrFault, Decoder};
use crate::diag::FaultRecord;
use crate::disasm::disassemble_instruction;
use crate::encoding::Operation;
use crate::image::BinaryImage;
use crate::state::{Flags, RunState};
use crate::FaultCode;

/// Control-flow result of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Advance to `PC + 1`.
    Continue,
    /// Transfer control to an explicit instruction index.
    JumpTo(i32),
    /// Stop; the machine is halted.
    Halt,
    /// Stop; the instruction faulted and nothing was committed.
    Fault(FaultCode),
}

/// Side effects accumulated while executing one instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecuteState {
    /// Register writes, applied in order.
    pub register_writes: Vec<(u8, i32)>,
    /// In-range memory writes, applied in order.
    pub memory_writes: Vec<(i64, i32)>,
    /// Flag change.
    pub flags_update: FlagsUpdate,
    /// Zero every register before applying writes.
    pub clear_registers: bool,
    /// Zero all memory before applying writes.
    pub clear_memory: bool,
    /// Out-of-range memory accesses seen.
    pub memory_warnings: u32,
    /// Accesses to undefined registers seen.
    pub register_warnings: u32,
    /// Console reads that failed.
    pub input_errors: u32,
}

impl ExecuteState {
    fn read_register(&mut self, state: &CoreState, index: u8) -> i32 {
        state.registers.get(index).unwrap_or_else(|| {
            warn!(pc = state.pc, register = index, "read of undefined register; using 0");
            self.register_warnings += 1;
            0
        })
    }

    fn write_register(&mut self, state: &CoreState, index: u8, value: i32) {
        if state.registers.contains(index) {
            self.register_writes.push((index, value));
        } else {
            warn!(pc = state.pc, register = index, "write to undefined register dropped");
            self.register_warnings += 1;
        }
    }

    fn read_memory(&mut self, state: &CoreState, address: i64) -> i32 {
        state.memory.read(address).unwrap_or_else(|| {
            warn!(pc = state.pc, address, "memory read out of range; using 0");
            self.memory_warnings += 1;
            0
        })
    }

    fn write_memory(&mut self, state: &CoreState, address: i64, value: i32) {
        if state.memory.contains(address) {
            self.memory_writes.push((address, value));
        } else {
            warn!(pc = state.pc, address, "memory write out of range dropped");
            self.memory_warnings += 1;
        }
    }
}

/// Executes one decoded instruction against the pre-instruction state.
///
/// Console I/O happens here; everything else is deferred to
/// [`commit_execution`].
#[allow(clippy::too_many_lines)]
pub fn execute_instruction(
    instruction: &DecodedInstruction,
    state: &CoreState,
    console: &mut dyn Console,
) -> (ExecuteOutcome, ExecuteState) {
    let mut exec = ExecuteState::default();
    let fields = instruction.fields;
    let (ra, rb) = (fields.reg_a, fields.reg_b);
    let value = fields.value;
    let imm = i32::from(value);
    let address = i64::from(value);

    let outcome = match instruction.operation() {
        Operation::Halt => ExecuteOutcome::Halt,
        Operation::Dump => {
            if let Err(err) = console.dump(state) {
                warn!(%err, "state dump failed");
            }
            ExecuteOutcome::Continue
        }
        Operation::MoveImmediate => {
            exec.write_register(state, ra, imm);
            ExecuteOutcome::Continue
        }
        Operation::MoveRegister => {
            let source = exec.read_register(state, rb);
            exec.write_register(state, ra, source);
            ExecuteOutcome::Continue
        }
        Operation::Load => {
            let loaded = exec.read_memory(state, address);
            exec.write_register(state, ra, loaded);
            ExecuteOutcome::Continue
        }
        Operation::Store => {
            let stored = exec.read_register(state, ra);
            exec.write_memory(state, address, stored);
            ExecuteOutcome::Continue
        }
        Operation::StoreImmediate => {
            exec.write_memory(state, i64::from(fields.address), imm);
            ExecuteOutcome::Continue
        }
        Operation::LoadIndexed => {
            let base = exec.read_register(state, rb);
            let loaded = exec.read_memory(state, compute_effective_address(base, value));
            exec.write_register(state, ra, loaded);
            ExecuteOutcome::Continue
        }
        Operation::StoreIndexed => {
            let base = exec.read_register(state, rb);
            let stored = exec.read_register(state, ra);
            exec.write_memory(state, compute_effective_address(base, value), stored);
            ExecuteOutcome::Continue
        }
        Operation::Add | Operation::Sub | Operation::Mul | Operation::Xor => {
            let lhs = exec.read_register(state, ra);
            let rhs = exec.read_register(state, rb);
            let result = match instruction.operation() {
                Operation::Add => lhs.wrapping_add(rhs),
                Operation::Sub => lhs.wrapping_sub(rhs),
                Operation::Mul => lhs.wrapping_mul(rhs),
                _ => lhs ^ rhs,
            };
            exec.write_register(state, ra, result);
            ExecuteOutcome::Continue
        }
        Operation::Div => {
            let lhs = exec.read_register(state, ra);
            let rhs = exec.read_register(state, rb);
            if rhs == 0 {
                return (ExecuteOutcome::Fault(FaultCode::DivideByZero), exec);
            }
            exec.write_register(state, ra, lhs.wrapping_div(rhs));
            ExecuteOutcome::Continue
        }
        Operation::AddImmediate => {
            let lhs = exec.read_register(state, ra);
            exec.write_register(state, ra, lhs.wrapping_add(imm));
            ExecuteOutcome::Continue
        }
        Operation::SubImmediate => {
            let lhs = exec.read_register(state, ra);
            exec.write_register(state, ra, lhs.wrapping_sub(imm));
            ExecuteOutcome::Continue
        }
        Operation::Increment => {
            let current = exec.read_register(state, ra);
            exec.write_register(state, ra, current.wrapping_add(1));
            ExecuteOutcome::Continue
        }
        Operation::Decrement => {
            let current = exec.read_register(state, ra);
            exec.write_register(state, ra, current.wrapping_sub(1));
            ExecuteOutcome::Continue
        }
        Operation::Not => {
            let current = exec.read_register(state, ra);
            exec.write_register(state, ra, !current);
            ExecuteOutcome::Continue
        }
        Operation::Compare => {
            let lhs = exec.read_register(state, ra);
            let rhs = exec.read_register(state, rb);
            exec.flags_update = FlagsUpdate::Set(Flags::from_comparison(lhs, rhs));
            ExecuteOutcome::Continue
        }
        Operation::CompareImmediate => {
            let lhs = exec.read_register(state, ra);
            exec.flags_update = FlagsUpdate::Set(Flags::from_comparison(lhs, imm));
            ExecuteOutcome::Continue
        }
        Operation::Jump => ExecuteOutcome::JumpTo(imm),
        Operation::Branch(condition) => {
            if condition_holds(condition, state.flags) {
                ExecuteOutcome::JumpTo(imm)
            } else {
                ExecuteOutcome::Continue
            }
        }
        Operation::BranchOnRegister(test) => {
            let tested = exec.read_register(state, ra);
            if register_test_holds(test, tested) {
                ExecuteOutcome::JumpTo(imm)
            } else {
                ExecuteOutcome::Continue
            }
        }
        Operation::Push | Operation::Pop | Operation::Call | Operation::Return => {
            let Some(sp) = state.profile.stack_pointer() else {
                return (ExecuteOutcome::Fault(FaultCode::IllegalOpcode), exec);
            };
            execute_stack(instruction.operation(), state, &mut exec, sp, ra, imm)
        }
        Operation::Input => {
            if state.registers.contains(ra) {
                let name = register_label(state.profile, ra);
                let input = match console.read_input(&name) {
                    Ok(input) => input,
                    Err(err) => {
                        warn!(pc = state.pc, register = %name, %err, "invalid input; register set to 0");
                        exec.input_errors += 1;
                        0
                    }
                };
                exec.write_register(state, ra, input);
            } else {
                exec.write_register(state, ra, 0);
            }
            ExecuteOutcome::Continue
        }
        Operation::Output => {
            let printed = exec.read_register(state, ra);
            if state.registers.contains(ra) {
                let name = register_label(state.profile, ra);
                if let Err(err) = console.write_output(&name, printed) {
                    warn!(%err, "console output failed");
                }
            }
            ExecuteOutcome::Continue
        }
        Operation::ClearRegister => {
            exec.write_register(state, ra, 0);
            ExecuteOutcome::Continue
        }
        Operation::ClearRegisters => {
            exec.clear_registers = true;
            ExecuteOutcome::Continue
        }
        Operation::ClearMemory => {
            exec.write_memory(state, address, 0);
            ExecuteOutcome::Continue
        }
        Operation::ClearAllMemory => {
            exec.clear_memory = true;
            ExecuteOutcome::Continue
        }
    };

    (outcome, exec)
}

fn execute_stack(
    operation: Operation,
    state: &CoreState,
    exec: &mut ExecuteState,
    sp: u8,
    ra: u8,
    target: i32,
) -> ExecuteOutcome {
    let top = exec.read_register(state, sp);
    match operation {
        Operation::Push => {
            let pushed = exec.read_register(state, ra);
            let new_top = top.wrapping_sub(1);
            exec.write_memory(state, i64::from(new_top), pushed);
            exec.write_register(state, sp, new_top);
            ExecuteOutcome::Continue
        }
        Operation::Pop => {
            let popped = exec.read_memory(state, i64::from(top));
            exec.write_register(state, sp, top.wrapping_add(1));
            exec.write_register(state, ra, popped);
            ExecuteOutcome::Continue
        }
        Operation::Call => {
            let new_top = top.wrapping_sub(1);
            exec.write_memory(state, i64::from(new_top), state.pc.wrapping_add(1));
            exec.write_register(state, sp, new_top);
            ExecuteOutcome::JumpTo(target)
        }
        _ => {
            let return_to = exec.read_memory(state, i64::from(top));
            exec.write_register(state, sp, top.wrapping_add(1));
            ExecuteOutcome::JumpTo(return_to)
        }
    }
}

/// Applies accumulated side effects to the machine state.
pub fn commit_execution(state: &mut CoreState, exec: &ExecuteState) {
    if exec.clear_registers {
        state.registers.clear();
    }
    if exec.clear_memory {
        state.memory.clear();
    }
    for &(index, value) in &exec.register_writes {
        state.registers.set(index, value);
    }
    for &(address, value) in &exec.memory_writes {
        state.memory.write(address, value);
    }
    match exec.flags_update {
        FlagsUpdate::None => {}
        FlagsUpdate::Set(flags) => state.flags = flags,
    }
}

/// Fetches, decodes, executes and commits the instruction at `state.pc`.
pub fn step_one(
    state: &mut CoreState,
    program: &BinaryImage,
    console: &mut dyn Console,
) -> StepOutcome {
    match state.run_state {
        RunState::Running => {}
        RunState::Halted => return StepOutcome::Halted,
        RunState::Faulted(cause) => return StepOutcome::Fault { cause },
    }

    let Some(word) = usize::try_from(state.pc)
        .ok()
        .and_then(|index| program.get(index))
    else {
        return StepOutcome::EndOfProgram;
    };

    state.diagnostics.steps = state.diagnostics.steps.saturating_add(1);
    let instruction = match Decoder::decode(state.profile, word) {
        DecodedOrFault::Instruction(instruction) => instruction,
        DecodedOrFault::Fault(cause) => return latch_fault(state, cause, word),
    };

    trace!(
        pc = state.pc,
        word = format_args!("{word:#06x}"),
        instruction = %disassemble_instruction(state.profile, &instruction),
        "step"
    );

    let (outcome, exec) = execute_instruction(&instruction, state, console);
    state
        .diagnostics
        .record_warnings(exec.memory_warnings, exec.register_warnings, exec.input_errors);

    match outcome {
        ExecuteOutcome::Continue => {
            commit_execution(state, &exec);
            state.pc = state.pc.wrapping_add(1);
            StepOutcome::Retired
        }
        ExecuteOutcome::JumpTo(target) => {
            commit_execution(state, &exec);
            state.pc = target;
            StepOutcome::Retired
        }
        ExecuteOutcome::Halt => {
            commit_execution(state, &exec);
            state.run_state = RunState::Halted;
            StepOutcome::Halted
        }
        ExecuteOutcome::Fault(cause) => latch_fault(state, cause, word),
    }
}

fn latch_fault(state: &mut CoreState, cause: FaultCode, word: u16) -> StepOutcome {
    warn!(pc = state.pc, word = format_args!("{word:#06x}"), %cause, "runtime fault");
    state.run_state = RunState::Faulted(cause);
    state.diagnostics.last_fault = Some(FaultRecord {
        code: cause,
        pc: state.pc,
        word,
    });
    StepOutcome::Fault { cause }
}
