//! CLI entry point for the pipe-bench benchmark driver.
//!
//! Runs the accumulator reference stream for a configurable number of
//! passes, then reports final machine state and throughput.

use std::env;
use std::ffi::OsString;
use std::time::Instant;

use pipeline_core::{hex_dump, BinaryOp, GeneralRegister, Instruction, Machine, OperandSource};

const DEFAULT_ITERATIONS: u64 = 8_000_000;

const USAGE_TEXT: &str = "\
Usage: pipe-bench [options]

Options:
  -n, --iterations <count>  Stream passes to execute (default: 8000000)
  -q, --quiet               Print only the throughput line
  -h, --help                Show this help message

Examples:
  pipe-bench
  pipe-bench -n 1000000
  pipe-bench --iterations 250000000 --quiet
";

#[derive(Debug, PartialEq, Eq)]
struct BenchArgs {
    iterations: u64,
    quiet: bool,
}

#[derive(Debug)]
enum ParseResult {
    Run(BenchArgs),
    Help,
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut iterations = DEFAULT_ITERATIONS;
    let mut quiet = false;

    while let Some(arg) = args.next() {
        if arg == "--help" || arg == "-h" {
            return Ok(ParseResult::Help);
        }

        if arg == "--quiet" || arg == "-q" {
            quiet = true;
            continue;
        }

        if arg == "-n" || arg == "--iterations" {
            let value = args
                .next()
                .ok_or_else(|| "missing value for -n".to_string())?;
            iterations = value
                .to_string_lossy()
                .parse()
                .map_err(|_| format!("invalid iteration count: {}", value.to_string_lossy()))?;
            continue;
        }

        return Err(format!("unknown option: {}", arg.to_string_lossy()));
    }

    Ok(ParseResult::Run(BenchArgs { iterations, quiet }))
}

/// Accumulator reference stream: seed two registers, spill them, add through
/// memory, load the sum back, fold it into R1, then jump. One pass costs 15
/// cycles and the state reaches a fixed point after the first pass.
const fn accumulator_stream() -> [Instruction; 8] {
    use OperandSource::{Immediate, Memory, Register};

    [
        Instruction::Unary { op1: Immediate(1), result: Register(GeneralRegister::R1) },
        Instruction::Unary { op1: Immediate(2), result: Register(GeneralRegister::R2) },
        Instruction::Unary { op1: Register(GeneralRegister::R1), result: Memory(1) },
        Instruction::Unary { op1: Register(GeneralRegister::R2), result: Memory(2) },
        Instruction::Binary {
            op1: Memory(1),
            op2: Memory(2),
            result: Memory(3),
            op: BinaryOp::Add,
        },
        Instruction::Unary { op1: Memory(3), result: Register(GeneralRegister::R3) },
        Instruction::Binary {
            op1: Register(GeneralRegister::R1),
            op2: Register(GeneralRegister::R3),
            result: Register(GeneralRegister::R1),
            op: BinaryOp::Add,
        },
        Instruction::Jump { offset: Register(GeneralRegister::R1) },
    ]
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn run_bench(args: &BenchArgs) {
    let stream = accumulator_stream();
    let mut machine = Machine::new();

    let start = Instant::now();
    for _ in 0..args.iterations {
        for instruction in &stream {
            machine.execute(instruction);
        }
    }
    let elapsed = start.elapsed();

    let counters = machine.counters();
    let instructions = args.iterations.saturating_mul(stream.len() as u64);
    let delta_ms = elapsed.as_millis().max(1);
    let khz = u128::from(counters.cycle_count) / delta_ms;

    if !args.quiet {
        println!("CYCLE {}", counters.cycle_count);
        println!("REGS {}", hex_dump(machine.registers()));
        println!("RAM  {}", hex_dump(&machine.memory()[..16]));
    }
    println!("approx. {khz} khz");
    if !args.quiet {
        println!("instructions executed: {instructions}");
        println!("elapsed: {delta_ms} ms");
        println!(
            "instructions/cycle: {:.4}",
            instructions as f64 / counters.cycle_count.max(1) as f64
        );
        println!("op1 fetch: {}", counters.op1_fetch_count);
        println!("op2 fetch: {}", counters.op2_fetch_count);
        println!("execution: {}", counters.execution_count);
        println!("writeback: {}", counters.writeback_count);
        println!("exceptions: {}", counters.exception_count);
    }
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => {
            run_bench(&args);
            0
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn defaults_apply_without_flags() {
        let result = parse_args(std::iter::empty()).expect("empty args should parse");
        let ParseResult::Run(args) = result else {
            panic!("expected a run, got {result:?}");
        };
        assert_eq!(args, BenchArgs { iterations: DEFAULT_ITERATIONS, quiet: false });
    }

    #[test]
    fn parses_short_flags() {
        let result = parse_args([OsString::from("-n"), OsString::from("5")].into_iter())
            .expect("valid args should parse");
        let ParseResult::Run(args) = result else {
            panic!("expected a run, got {result:?}");
        };
        assert_eq!(args, BenchArgs { iterations: 5, quiet: false });
    }

    #[test]
    fn parses_long_flags() {
        let result = parse_args(
            [
                OsString::from("--iterations"),
                OsString::from("250"),
                OsString::from("--quiet"),
            ]
            .into_iter(),
        )
        .expect("valid args should parse");
        let ParseResult::Run(args) = result else {
            panic!("expected a run, got {result:?}");
        };
        assert_eq!(args, BenchArgs { iterations: 250, quiet: true });
    }

    #[test]
    fn parses_help_flag() {
        let result = parse_args([OsString::from("--help")].into_iter())
            .expect("help should parse without error");
        assert!(matches!(result, ParseResult::Help));
    }

    #[test]
    fn rejects_unknown_option() {
        let error = parse_args([OsString::from("--frequency")].into_iter())
            .expect_err("unknown option should fail parse");
        assert!(error.contains("unknown option"));
    }

    #[test]
    fn rejects_missing_iteration_value() {
        let error = parse_args([OsString::from("-n")].into_iter())
            .expect_err("missing value should fail parse");
        assert!(error.contains("missing value"));
    }

    #[test]
    fn rejects_non_numeric_iteration_value() {
        let error = parse_args([OsString::from("-n"), OsString::from("fast")].into_iter())
            .expect_err("non-numeric value should fail parse");
        assert!(error.contains("invalid iteration count"));
    }

    #[test]
    fn reference_stream_state_is_stable_across_passes() {
        let mut machine = Machine::new();
        for _ in 0..2 {
            for instruction in &accumulator_stream() {
                machine.execute(instruction);
            }
        }

        assert_eq!(machine.counters().cycle_count, 30);
        assert_eq!(machine.registers()[..4], [4, 4, 2, 3]);
        assert_eq!(machine.memory()[1..4], [1, 2, 3]);
    }
}
