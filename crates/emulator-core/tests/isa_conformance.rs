//! ISA conformance: each case runs a small hand-encoded program and checks
//! the final registers, flags, and memory.

use proptest as _;
#[cfg(feature = "serde")]
use serde as _;
use tempfile as _;
use thiserror as _;
use tracing as _;

use rstest::rstest;
use w16_core::{
    BufferedConsole, CoreConfig, Fields, Machine, Profile, RunBoundary, Syntax,
};

/// Encodes `mnemonic` with the table row whose syntax is `syntax`.
fn enc(profile: Profile, mnemonic: &str, syntax: Syntax, fields: Fields) -> u16 {
    profile
        .entries_for(mnemonic)
        .find(|spec| spec.syntax == syntax)
        .unwrap_or_else(|| panic!("{mnemonic} has no {syntax:?} form"))
        .encode(fields)
        .expect("fields in range")
}

fn r(reg_a: u8) -> Fields {
    Fields {
        reg_a,
        ..Fields::default()
    }
}

fn rr(reg_a: u8, reg_b: u8) -> Fields {
    Fields {
        reg_a,
        reg_b,
        ..Fields::default()
    }
}

fn rv(reg_a: u8, value: u16) -> Fields {
    Fields {
        reg_a,
        value,
        ..Fields::default()
    }
}

fn v(value: u16) -> Fields {
    Fields {
        value,
        ..Fields::default()
    }
}

fn run(profile: Profile, program: Vec<u16>) -> (Machine, BufferedConsole, RunBoundary) {
    let mut machine = Machine::new(CoreConfig::for_profile(profile), program.into());
    let mut console = BufferedConsole::default();
    let outcome = machine.run(&mut console);
    (machine, console, outcome.boundary)
}

const X: Profile = Profile::Extended;

#[rstest]
#[case::add("ADD", 7, 5, 12)]
#[case::sub("SUB", 7, 9, -2)]
#[case::mul("MUL", 7, 6, 42)]
#[case::div("DIV", 7, 2, 3)]
#[case::xor("XOR", 0b1100, 0b1010, 0b0110)]
fn register_pair_arithmetic(
    #[case] mnemonic: &str,
    #[case] lhs: u16,
    #[case] rhs: u16,
    #[case] expected: i32,
) {
    let program = vec![
        enc(X, "MOV", Syntax::RegImm, rv(0, lhs)),
        enc(X, "MOV", Syntax::RegImm, rv(1, rhs)),
        enc(X, mnemonic, Syntax::RegReg, rr(0, 1)),
        enc(X, "HLT", Syntax::Bare, Fields::default()),
    ];
    let (machine, _, boundary) = run(X, program);
    assert_eq!(boundary, RunBoundary::Halted);
    assert_eq!(machine.state().register("EAX"), Some(expected));
    assert_eq!(machine.state().register("EBX"), Some(i32::from(rhs)));
}

#[rstest]
#[case::add_imm("ADD", 10, 255, 265)]
#[case::sub_imm("SUB", 10, 255, -245)]
fn immediate_arithmetic(
    #[case] mnemonic: &str,
    #[case] start: u16,
    #[case] imm: u16,
    #[case] expected: i32,
) {
    let program = vec![
        enc(X, "MOV", Syntax::RegImm, rv(2, start)),
        enc(X, mnemonic, Syntax::RegImm, rv(2, imm)),
    ];
    let (machine, _, boundary) = run(X, program);
    assert_eq!(boundary, RunBoundary::EndOfProgram);
    assert_eq!(machine.state().register("ECX"), Some(expected));
}

#[test]
fn not_inverts_all_bits() {
    let program = vec![
        enc(X, "MOV", Syntax::RegImm, rv(3, 5)),
        enc(X, "NOT", Syntax::Reg, r(3)),
    ];
    let (machine, _, _) = run(X, program);
    assert_eq!(machine.state().register("EDX"), Some(!5));
}

#[rstest]
#[case::je_taken("JE", 4, 4, true)]
#[case::je_not_taken("JE", 4, 5, false)]
#[case::jne_taken("JNE", 4, 5, true)]
#[case::jg_taken("JG", 6, 5, true)]
#[case::jg_equal("JG", 5, 5, false)]
#[case::jl_taken("JL", 1, 5, true)]
#[case::jge_equal("JGE", 5, 5, true)]
#[case::jge_less("JGE", 4, 5, false)]
#[case::jle_equal("JLE", 5, 5, true)]
#[case::jle_greater("JLE", 6, 5, false)]
fn flag_branches(
    #[case] mnemonic: &str,
    #[case] lhs: u16,
    #[case] rhs: u16,
    #[case] taken: bool,
) {
    // MOV EAX,lhs ; CMP EAX,#rhs ; Jcc 4 ; INC EBX ; HLT
    let program = vec![
        enc(X, "MOV", Syntax::RegImm, rv(0, lhs)),
        enc(X, "CMP", Syntax::RegImm, rv(0, rhs)),
        enc(X, mnemonic, Syntax::Target, v(4)),
        enc(X, "INC", Syntax::Reg, r(1)),
        enc(X, "HLT", Syntax::Bare, Fields::default()),
    ];
    let (machine, _, boundary) = run(X, program);
    assert_eq!(boundary, RunBoundary::Halted);
    let skipped = machine.state().register("EBX") == Some(0);
    assert_eq!(skipped, taken);
}

#[test]
fn flags_persist_until_next_comparison() {
    // CMP EAX,#0 ; INC EAX ; JE 4 ; HLT ; OUT EAX
    let program = vec![
        enc(X, "CMP", Syntax::RegImm, rv(0, 0)),
        enc(X, "INC", Syntax::Reg, r(0)),
        enc(X, "JE", Syntax::Target, v(4)),
        enc(X, "HLT", Syntax::Bare, Fields::default()),
        enc(X, "OUT", Syntax::Reg, r(0)),
    ];
    let (_, console, boundary) = run(X, program);
    assert_eq!(boundary, RunBoundary::EndOfProgram);
    assert_eq!(console.values(), vec![1]);
}

#[test]
fn direct_memory_moves_round_trip() {
    let program = vec![
        enc(X, "MOV", Syntax::RegImm, rv(0, 99)),
        enc(X, "MOV", Syntax::MemReg, rv(0, 255)),
        enc(X, "MOV", Syntax::RegMem, rv(4, 255)),
        enc(X, "MOV", Syntax::RegReg, rr(5, 4)),
    ];
    let (machine, _, _) = run(X, program);
    let state = machine.state();
    assert_eq!(state.memory.read(255), Some(99));
    assert_eq!(state.register("ESI"), Some(99));
    assert_eq!(state.register("EDI"), Some(99));
}

#[test]
fn basic_store_load_and_immediate_store() {
    let b = Profile::Basic;
    let program = vec![
        enc(b, "SET", Syntax::RegImm, rv(0, 200)),
        enc(b, "STA", Syntax::RegAddr, rv(0, 63)),
        enc(b, "STA", Syntax::ImmAddr, Fields {
            value: 31,
            address: 0,
            ..Fields::default()
        }),
        enc(b, "LDA", Syntax::RegAddr, rv(1, 63)),
        enc(b, "LDA", Syntax::RegAddr, rv(2, 0)),
        enc(b, "SUB", Syntax::RegReg, rr(1, 2)),
        enc(b, "OUT", Syntax::Reg, r(1)),
    ];
    let (machine, console, _) = run(b, program);
    assert_eq!(console.values(), vec![169]);
    assert_eq!(machine.state().memory.read(0), Some(31));
    assert!(!machine.state().diagnostics.has_warnings());
}

#[test]
fn basic_branch_without_register_tests_a() {
    // SET A,#2 ; loop: DEC A ; JNZ loop ; OUT A
    let b = Profile::Basic;
    let program = vec![
        enc(b, "SET", Syntax::RegImm, rv(0, 2)),
        enc(b, "DEC", Syntax::Reg, r(0)),
        enc(b, "JNZ", Syntax::TestTarget, rv(b.default_test_register(), 1)),
        enc(b, "OUT", Syntax::Reg, r(0)),
    ];
    let (machine, console, _) = run(b, program);
    assert_eq!(console.values(), vec![0]);
    assert_eq!(machine.state().diagnostics.steps, 6);
}

#[test]
fn independent_machines_do_not_share_state() {
    let program = vec![enc(X, "INC", Syntax::Reg, r(0))];
    let (first, _, _) = run(X, program.clone());
    let (second, _, _) = run(X, program);
    assert_eq!(first.state().register("EAX"), Some(1));
    assert_eq!(second.state().register("EAX"), Some(1));
}
