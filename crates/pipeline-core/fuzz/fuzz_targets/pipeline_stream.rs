#![no_main]

use libfuzzer_sys::fuzz_target;
use pipeline_core::{
    cycle_cost, BinaryOp, GeneralRegister, Instruction, Machine, OperandSource,
    GENERAL_REGISTER_COUNT,
};

fn decode_source(tag: u8, hi: u8, lo: u8) -> OperandSource {
    match tag % 3 {
        0 => {
            OperandSource::Register(GeneralRegister::ALL[usize::from(hi) % GENERAL_REGISTER_COUNT])
        }
        1 => OperandSource::Memory(u16::from_be_bytes([hi, lo])),
        _ => OperandSource::Immediate(i32::from(i16::from_be_bytes([hi, lo]))),
    }
}

fn decode_instruction(chunk: &[u8]) -> Instruction {
    match chunk[0] % 3 {
        0 => Instruction::Unary {
            op1: decode_source(chunk[1], chunk[2], chunk[3]),
            result: decode_source(chunk[4], chunk[5], chunk[6]),
        },
        1 => Instruction::Binary {
            op1: decode_source(chunk[1], chunk[2], chunk[3]),
            op2: decode_source(chunk[4], chunk[5], chunk[6]),
            result: decode_source(chunk[7], chunk[2], chunk[5]),
            op: if chunk[7] & 1 == 0 { BinaryOp::Add } else { BinaryOp::Sub },
        },
        _ => Instruction::Jump { offset: decode_source(chunk[1], chunk[2], chunk[3]) },
    }
}

fuzz_target!(|data: &[u8]| {
    let mut machine = Machine::new();
    let mut issued = 0u64;

    for chunk in data.chunks_exact(8).take(64) {
        let instruction = decode_instruction(chunk);
        let _ = cycle_cost(&instruction);
        machine.execute(&instruction);
        issued += 1;
    }

    // Every execute call charges at least its fetch+decode cycle.
    assert!(machine.counters().cycle_count >= issued);
});
