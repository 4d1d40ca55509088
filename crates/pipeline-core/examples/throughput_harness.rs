//! Throughput harness for pipeline-core benchmarking.
//!
//! Measures instruction throughput using the production execute path.
//!
//! ## Usage
//!
//! ```sh
//! cargo run -p pipeline-core --example throughput_harness
//! ```
//!
//! ## Metrics
//!
//! - Instructions per second
//! - Cycles per second
//! - Instructions per cycle, checked against the cost model
//!
//! The harness runs one machine per thread; machines share nothing, so the
//! workload scales linearly and the per-machine numbers stay comparable
//! across thread counts.

#![allow(clippy::pedantic)]

use pipeline_core::{cycle_cost, BinaryOp, GeneralRegister, Instruction, Machine, OperandSource};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const NUM_THREADS: usize = 4;

const fn reg(register: GeneralRegister) -> OperandSource {
    OperandSource::Register(register)
}

const fn mem(address: u16) -> OperandSource {
    OperandSource::Memory(address)
}

const fn imm(value: i32) -> OperandSource {
    OperandSource::Immediate(value)
}

/// Register-only stream: every instruction resolves in its issue cycle.
fn register_stream() -> Vec<Instruction> {
    vec![
        Instruction::Unary { op1: imm(1), result: reg(GeneralRegister::R1) },
        Instruction::Binary {
            op1: reg(GeneralRegister::R1),
            op2: imm(1),
            result: reg(GeneralRegister::R2),
            op: BinaryOp::Add,
        },
        Instruction::Binary {
            op1: reg(GeneralRegister::R2),
            op2: reg(GeneralRegister::R1),
            result: reg(GeneralRegister::R3),
            op: BinaryOp::Sub,
        },
        Instruction::Jump { offset: reg(GeneralRegister::R3) },
    ]
}

/// Memory-heavy stream: every instruction defers at least once.
fn memory_stream() -> Vec<Instruction> {
    vec![
        Instruction::Unary { op1: imm(1), result: mem(0) },
        Instruction::Unary { op1: mem(0), result: mem(1) },
        Instruction::Binary {
            op1: mem(0),
            op2: mem(1),
            result: mem(2),
            op: BinaryOp::Add,
        },
        Instruction::Unary { op1: mem(2), result: reg(GeneralRegister::R1) },
    ]
}

/// Mixed stream: the accumulator loop touching every operand kind.
fn mixed_stream() -> Vec<Instruction> {
    vec![
        Instruction::Unary { op1: imm(1), result: reg(GeneralRegister::R1) },
        Instruction::Unary { op1: imm(2), result: reg(GeneralRegister::R2) },
        Instruction::Unary { op1: reg(GeneralRegister::R1), result: mem(1) },
        Instruction::Unary { op1: reg(GeneralRegister::R2), result: mem(2) },
        Instruction::Binary {
            op1: mem(1),
            op2: mem(2),
            result: mem(3),
            op: BinaryOp::Add,
        },
        Instruction::Unary { op1: mem(3), result: reg(GeneralRegister::R3) },
        Instruction::Binary {
            op1: reg(GeneralRegister::R1),
            op2: reg(GeneralRegister::R3),
            result: reg(GeneralRegister::R1),
            op: BinaryOp::Add,
        },
        Instruction::Jump { offset: reg(GeneralRegister::R1) },
    ]
}

#[derive(Debug, Clone, Copy)]
struct BenchmarkResult {
    name: &'static str,
    instructions_per_second: f64,
    cycles_per_second: f64,
    instructions_per_cycle: f64,
    model_instructions_per_cycle: f64,
}

fn predicted_instructions_per_cycle(stream: &[Instruction]) -> f64 {
    let cycles: u64 = stream.iter().filter_map(cycle_cost).sum();
    stream.len() as f64 / cycles as f64
}

fn run_benchmark(
    name: &'static str,
    build: fn() -> Vec<Instruction>,
    duration: Duration,
) -> BenchmarkResult {
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let tx = tx.clone();
            thread::spawn(move || {
                let stream = build();
                let mut machine = Machine::new();

                let mut total_instructions = 0u64;
                let start = Instant::now();

                while start.elapsed() < duration {
                    for instruction in &stream {
                        machine.execute(instruction);
                    }
                    total_instructions += stream.len() as u64;
                }

                tx.send((total_instructions, machine.counters().cycle_count))
                    .ok();
            })
        })
        .collect();

    for handle in handles {
        handle.join().ok();
    }

    drop(tx);

    let mut total_instructions = 0u64;
    let mut total_cycles = 0u64;
    for (instructions, cycles) in rx {
        total_instructions += instructions;
        total_cycles += cycles;
    }

    let elapsed_secs = duration.as_secs_f64();
    BenchmarkResult {
        name,
        instructions_per_second: total_instructions as f64 / elapsed_secs,
        cycles_per_second: total_cycles as f64 / elapsed_secs,
        instructions_per_cycle: total_instructions as f64 / total_cycles as f64,
        model_instructions_per_cycle: predicted_instructions_per_cycle(&build()),
    }
}

fn format_number(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("{:.2}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("{:.2}K", n / 1_000.0)
    } else {
        format!("{:.2}", n)
    }
}

fn print_results(results: &[BenchmarkResult]) {
    println!("\n╔═════════════════════════════════════════════════════════════════╗");
    println!("║                PIPELINE-CORE THROUGHPUT HARNESS                 ║");
    println!("╠═════════════════════════════════════════════════════════════════╣");
    println!(
        "║   Threads:       {:>5}                                          ║",
        NUM_THREADS
    );
    println!("╠═════════════════════════════════════════════════════════════════╣");
    println!(
        "║ {:12} │ {:>15} │ {:>15} │ {:>12} ║",
        "Benchmark", "Instr/sec", "Cycles/sec", "Instr/cycle"
    );
    println!("╟──────────────┼─────────────────┼─────────────────┼──────────────╢");

    for result in results {
        println!(
            "║ {:12} │ {:>15} │ {:>15} │ {:>12.4} ║",
            result.name,
            format_number(result.instructions_per_second),
            format_number(result.cycles_per_second),
            result.instructions_per_cycle
        );
    }

    println!("╚═════════════════════════════════════════════════════════════════╝");

    println!("\nCost model check:");
    for result in results {
        let delta = (result.instructions_per_cycle - result.model_instructions_per_cycle).abs();
        let status = if delta < 1e-9 { "✓ MATCH" } else { "✗ DRIFT" };
        println!(
            "  {} {}: measured {:.4} instr/cycle, model {:.4}",
            status, result.name, result.instructions_per_cycle, result.model_instructions_per_cycle
        );
    }
}

fn main() {
    let warmup = Duration::from_millis(500);
    let benchmark_duration = Duration::from_secs(3);

    println!("Running warmup for {:?}...", warmup);
    let _ = run_benchmark("register", register_stream, warmup);

    println!("Running benchmarks for {:?} each...\n", benchmark_duration);

    let register_result = run_benchmark("register", register_stream, benchmark_duration);
    let memory_result = run_benchmark("memory", memory_stream, benchmark_duration);
    let mixed_result = run_benchmark("mixed", mixed_stream, benchmark_duration);

    print_results(&[register_result, memory_result, mixed_result]);
}
