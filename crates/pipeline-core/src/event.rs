use crate::{Fault, Instruction};

/// Pipeline stages, used for metric attribution and trace reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PipelineStage {
    /// First-operand fetch from memory.
    Op1Fetch,
    /// Second-operand fetch from memory.
    Op2Fetch,
    /// Result computation.
    Execution,
    /// Result commit into its destination.
    Writeback,
    /// Terminal exception recording.
    Exception,
}

/// Transient marker of what one in-flight instruction must do next cycle.
///
/// Each event is produced by exactly one stage and consumed by exactly one
/// handler; events never outlive the `execute` call that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineEvent {
    /// First operand is in memory and not yet available.
    Op1Fetch {
        /// Instruction waiting on its first operand.
        instruction: Instruction,
    },
    /// Second operand is in memory and not yet available.
    Op2Fetch {
        /// Instruction waiting on its second operand.
        instruction: Instruction,
        /// Already-resolved first operand value.
        op1: i32,
    },
    /// Both operands are available and the result must be computed.
    Execution {
        /// Instruction ready to execute.
        instruction: Instruction,
        /// Resolved first operand value.
        op1: i32,
        /// Resolved second operand value.
        op2: i32,
    },
    /// A computed result must be committed to a memory destination.
    Writeback {
        /// Instruction whose result is pending.
        instruction: Instruction,
        /// Raw wide result, narrowed to 8 bits at commit.
        result: i32,
    },
    /// A fault was detected; the pipeline terminates after recording it.
    Exception {
        /// Fault that raised this exception.
        fault: Fault,
    },
}

impl PipelineEvent {
    /// Returns the stage whose handler consumes this event.
    #[must_use]
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::Op1Fetch { .. } => PipelineStage::Op1Fetch,
            Self::Op2Fetch { .. } => PipelineStage::Op2Fetch,
            Self::Execution { .. } => PipelineStage::Execution,
            Self::Writeback { .. } => PipelineStage::Writeback,
            Self::Exception { .. } => PipelineStage::Exception,
        }
    }
}
