use crate::{Fault, Instruction, PipelineEvent};

/// Deterministic trace events emitted while an instruction is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// An instruction entered the pipeline.
    InstructionIssued {
        /// Instruction being issued.
        instruction: Instruction,
    },
    /// A deferred event was charged a cycle and dispatched to its handler.
    EventDispatched {
        /// Event being handled.
        event: PipelineEvent,
        /// Cycle index the dispatch was charged to.
        cycle: u64,
    },
    /// An exception event was recorded.
    FaultRaised {
        /// Fault carried by the recorded exception.
        fault: Fault,
    },
    /// The instruction's event chain drained.
    InstructionRetired {
        /// Instruction that completed.
        instruction: Instruction,
        /// Cycles consumed by the whole call, fetch+decode included.
        cycles: u64,
    },
}

/// Sink trait for deterministic trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Discards every event; backs the untraced execute path.
pub(crate) struct NullSink;

impl TraceSink for NullSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}
