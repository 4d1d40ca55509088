use thiserror::Error;

/// Fault taxonomy for conditions detected while an instruction is in flight.
///
/// Inside the pipeline every fault is downgraded to a recorded exception
/// event: terminal for that instruction, never fatal to the machine. The only
/// hard failure surface is a direct [`Machine::write`] call with an immediate
/// target, which returns the fault to the caller instead.
///
/// [`Machine::write`]: crate::Machine::write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// A write resolved to an immediate operand.
    #[error("immediate cannot be a writeback target")]
    InvalidWriteTarget,
    /// A deferred second-operand fetch reached an instruction that has no
    /// second operand. Internal invariant violation: only binary
    /// instructions may ever have an `Op2Fetch` event handled.
    #[error("pipelined Op2Fetch on instruction without second operand")]
    MalformedPipelineState,
}
