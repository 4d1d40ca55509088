//! Cycle and per-stage metric counters.

use crate::PipelineStage;

/// Monotonic cycle and stage counters owned by one machine.
///
/// `cycle_count` advances once for the fetch+decode charge of every `execute`
/// call and once per pipeline event actually handled. The five stage counters
/// count handler invocations only; an operand that resolves inline without
/// deferring does not touch them. All counters saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PipelineCounters {
    /// Total cycles charged.
    pub cycle_count: u64,
    /// Handled first-operand fetch events.
    pub op1_fetch_count: u64,
    /// Handled second-operand fetch events.
    pub op2_fetch_count: u64,
    /// Handled execution events.
    pub execution_count: u64,
    /// Handled writeback events.
    pub writeback_count: u64,
    /// Recorded exception events.
    pub exception_count: u64,
}

impl PipelineCounters {
    /// Creates a zeroed counter block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Charges one cycle.
    pub const fn charge_cycle(&mut self) {
        self.cycle_count = self.cycle_count.saturating_add(1);
    }

    /// Records one handled event for the given stage.
    pub const fn record_stage(&mut self, stage: PipelineStage) {
        let counter = match stage {
            PipelineStage::Op1Fetch => &mut self.op1_fetch_count,
            PipelineStage::Op2Fetch => &mut self.op2_fetch_count,
            PipelineStage::Execution => &mut self.execution_count,
            PipelineStage::Writeback => &mut self.writeback_count,
            PipelineStage::Exception => &mut self.exception_count,
        };
        *counter = counter.saturating_add(1);
    }

    /// Resets all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
