use crate::{OperandSource, JUMP_TARGET_REGISTER};

/// Arithmetic operation applied by a binary instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BinaryOp {
    /// Addition, 8-bit wraparound applied at writeback.
    Add,
    /// Subtraction, 8-bit wraparound applied at writeback.
    Sub,
}

impl BinaryOp {
    /// Computes the raw wide intermediate for two resolved operands.
    ///
    /// The result is deliberately not narrowed to 8 bits here; narrowing
    /// happens exactly once, at writeback.
    #[must_use]
    pub const fn apply(self, op1: i32, op2: i32) -> i32 {
        match self {
            Self::Add => op1.wrapping_add(op2),
            Self::Sub => op1.wrapping_sub(op2),
        }
    }
}

/// One instruction of the toy ISA.
///
/// Instructions are immutable values constructed by the host and read-only to
/// the machine for the duration of one `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Instruction {
    /// Copies one operand into the result destination.
    Unary {
        /// Source of the single operand.
        op1: OperandSource,
        /// Destination the operand value is written to.
        result: OperandSource,
    },
    /// Combines two operands with an arithmetic operation.
    Binary {
        /// Source of the first operand.
        op1: OperandSource,
        /// Source of the second operand.
        op2: OperandSource,
        /// Destination the computed value is written to.
        result: OperandSource,
        /// Operation combining the two operands.
        op: BinaryOp,
    },
    /// Writes the offset value into the fixed jump-target register.
    Jump {
        /// Source of the jump offset.
        offset: OperandSource,
    },
}

impl Instruction {
    /// Returns the source resolved by the first pipeline stage.
    #[must_use]
    pub const fn first_operand(&self) -> OperandSource {
        match self {
            Self::Unary { op1, .. } | Self::Binary { op1, .. } => *op1,
            Self::Jump { offset } => *offset,
        }
    }

    /// Returns the destination the writeback stage resolves.
    ///
    /// Jump instructions always target [`JUMP_TARGET_REGISTER`]; they can
    /// never write to memory or to an immediate.
    #[must_use]
    pub const fn destination(&self) -> OperandSource {
        match self {
            Self::Unary { result, .. } | Self::Binary { result, .. } => *result,
            Self::Jump { .. } => OperandSource::Register(JUMP_TARGET_REGISTER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryOp, Instruction};
    use crate::{GeneralRegister, OperandSource, JUMP_TARGET_REGISTER};

    #[test]
    fn binary_op_keeps_wide_intermediates() {
        assert_eq!(BinaryOp::Add.apply(200, 100), 300);
        assert_eq!(BinaryOp::Sub.apply(5, 10), -5);
    }

    #[test]
    fn first_operand_selects_op1_or_offset() {
        let op1 = OperandSource::Memory(9);
        let unary = Instruction::Unary {
            op1,
            result: OperandSource::Register(GeneralRegister::R1),
        };
        let binary = Instruction::Binary {
            op1,
            op2: OperandSource::Immediate(1),
            result: OperandSource::Register(GeneralRegister::R1),
            op: BinaryOp::Add,
        };
        let jump = Instruction::Jump {
            offset: OperandSource::Immediate(4),
        };

        assert_eq!(unary.first_operand(), op1);
        assert_eq!(binary.first_operand(), op1);
        assert_eq!(jump.first_operand(), OperandSource::Immediate(4));
    }

    #[test]
    fn jump_destination_is_the_fixed_register() {
        let jump = Instruction::Jump {
            offset: OperandSource::Memory(100),
        };
        assert_eq!(
            jump.destination(),
            OperandSource::Register(JUMP_TARGET_REGISTER)
        );
    }

    #[test]
    fn unary_and_binary_destinations_follow_result_field() {
        let result = OperandSource::Memory(3);
        let unary = Instruction::Unary {
            op1: OperandSource::Immediate(0),
            result,
        };
        let binary = Instruction::Binary {
            op1: OperandSource::Immediate(0),
            op2: OperandSource::Immediate(0),
            result,
            op: BinaryOp::Sub,
        };

        assert_eq!(unary.destination(), result);
        assert_eq!(binary.destination(), result);
    }
}
