use crate::{Instruction, OperandSource};

/// Predicted cycle cost of executing one well-formed instruction.
///
/// The model mirrors the pipeline's accounting: one cycle for fetch and
/// decode, plus one cycle per deferred event. A memory first operand defers
/// once. A binary instruction whose second operand lives in memory then runs
/// the full deferred tail (operand fetch, execution, writeback). Otherwise a
/// memory destination defers the final commit once. Register and immediate
/// operands never add cycles, and neither does a jump's fixed register
/// destination.
///
/// Returns `None` when the destination resolves to an immediate: such an
/// instruction has no well-formed cost, and executing it records an
/// exception instead.
#[must_use]
pub const fn cycle_cost(instruction: &Instruction) -> Option<u64> {
    let destination = instruction.destination();
    if matches!(destination, OperandSource::Immediate(_)) {
        return None;
    }

    let mut cycles: u64 = 1;
    if instruction.first_operand().is_memory() {
        cycles += 1;
    }

    if let Instruction::Binary { op2, .. } = instruction {
        if op2.is_memory() {
            return Some(cycles + 3);
        }
    }

    if destination.is_memory() {
        cycles += 1;
    }
    Some(cycles)
}

#[cfg(test)]
mod tests {
    use super::cycle_cost;
    use crate::{BinaryOp, GeneralRegister, Instruction, OperandSource};

    const R1: OperandSource = OperandSource::Register(GeneralRegister::R1);
    const IMM: OperandSource = OperandSource::Immediate(7);
    const MEM: OperandSource = OperandSource::Memory(3);

    #[test]
    fn register_and_immediate_forms_cost_one_cycle() {
        assert_eq!(cycle_cost(&Instruction::Unary { op1: IMM, result: R1 }), Some(1));
        assert_eq!(cycle_cost(&Instruction::Unary { op1: R1, result: R1 }), Some(1));
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: IMM, op2: R1, result: R1, op: BinaryOp::Add }),
            Some(1)
        );
        assert_eq!(cycle_cost(&Instruction::Jump { offset: IMM }), Some(1));
    }

    #[test]
    fn each_memory_access_adds_its_latency() {
        assert_eq!(cycle_cost(&Instruction::Unary { op1: R1, result: MEM }), Some(2));
        assert_eq!(cycle_cost(&Instruction::Unary { op1: MEM, result: R1 }), Some(2));
        assert_eq!(cycle_cost(&Instruction::Unary { op1: MEM, result: MEM }), Some(3));
        assert_eq!(cycle_cost(&Instruction::Jump { offset: MEM }), Some(2));
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: MEM, op2: IMM, result: MEM, op: BinaryOp::Sub }),
            Some(3)
        );
    }

    #[test]
    fn memory_second_operand_runs_the_full_deferred_tail() {
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: R1, op2: MEM, result: R1, op: BinaryOp::Add }),
            Some(4)
        );
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: R1, op2: MEM, result: MEM, op: BinaryOp::Add }),
            Some(4)
        );
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: MEM, op2: MEM, result: MEM, op: BinaryOp::Add }),
            Some(5)
        );
    }

    #[test]
    fn immediate_destination_has_no_defined_cost() {
        assert_eq!(cycle_cost(&Instruction::Unary { op1: R1, result: IMM }), None);
        assert_eq!(
            cycle_cost(&Instruction::Binary { op1: R1, op2: MEM, result: IMM, op: BinaryOp::Add }),
            None
        );
    }
}
