//! Cycle-accurate execution engine for a byte-wide toy ISA: an event-driven
//! four-stage pipeline over sixteen 8-bit registers and 1024 bytes of data
//! memory, charging extra cycles whenever an operand or destination lives in
//! memory.

/// Architectural register-file model.
pub mod registers;
pub use registers::{GeneralRegister, GENERAL_REGISTER_COUNT, JUMP_TARGET_REGISTER};

/// Data-memory model primitives.
pub mod memory;
pub use memory::{new_data_memory, MEMORY_BYTES};

/// Operand source indirection tags.
pub mod source;
pub use source::OperandSource;

/// Instruction shapes and binary operations of the ISA.
pub mod instruction;
pub use instruction::{BinaryOp, Instruction};

/// Transient pipeline events and stage identifiers.
pub mod event;
pub use event::{PipelineEvent, PipelineStage};

/// Fault taxonomy for malformed programs and pipeline states.
pub mod fault;
pub use fault::Fault;

/// Cycle and per-stage activity counters.
pub mod counters;
pub use counters::PipelineCounters;

/// Machine state with operand read and write indirection.
pub mod machine;
pub use machine::Machine;

/// Event-driven pipeline stage machinery.
pub mod pipeline;

/// Deterministic instruction cycle-cost model.
pub mod timing;
pub use timing::cycle_cost;

/// Deterministic trace hooks for in-flight observation.
pub mod trace;
pub use trace::{TraceEvent, TraceSink};

/// Serializable machine snapshots.
pub mod snapshot;
pub use snapshot::{MachineSnapshot, SnapshotLayoutError, SnapshotVersion};

/// Hex formatting for state dumps.
pub mod dump;
pub use dump::hex_dump;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
